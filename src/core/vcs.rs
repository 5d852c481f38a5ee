//
//  Copyright (C) 2022-2024  Chase Ruskin
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use crate::core::version::Descriptor;
use std::path::Path;

/// Directory holding a repository's version-control bookkeeping.
pub const METADATA_DIR: &str = ".git";

/// The operations needed from a version-control client.
///
/// Every operation is given the absolute directory it acts upon and only
/// reports whether it succeeded.
pub trait Vcs {
    /// Clones `repo` into the new directory `dest` with a history of `depth` commits.
    ///
    /// A failed clone should not leave `dest` behind.
    fn clone_into(&self, repo: &str, dest: &Path, depth: u32) -> bool;

    /// Fetches the commit or tag named by `desc` into the clone at `dir`.
    fn fetch_ref(&self, dir: &Path, desc: &Descriptor) -> bool;

    /// Checks out the previously fetched commit or tag named by `desc` in the clone at `dir`.
    fn checkout_ref(&self, dir: &Path, desc: &Descriptor) -> bool;
}

/// A scripted [Vcs] that serves repositories from memory.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};

    /// File written into a checkout to record which ref it holds.
    pub const REF_FILE: &str = "REF";

    #[derive(Default, Clone)]
    pub struct Repo {
        files: Vec<(String, String)>,
        refs: HashSet<String>,
        bad_checkouts: HashSet<String>,
        fail_clone: bool,
        partial_clone: bool,
    }

    impl Repo {
        pub fn new() -> Self {
            Self::default()
        }

        /// Adds a file at the path `rel` to the repository's default branch.
        pub fn file(mut self, rel: &str, contents: &str) -> Self {
            self.files.push((rel.to_string(), contents.to_string()));
            self
        }

        /// Makes a tag or commit available for fetching.
        pub fn with_ref(mut self, value: &str) -> Self {
            self.refs.insert(value.to_string());
            self
        }

        /// Makes a ref fetchable but impossible to check out.
        pub fn broken_ref(mut self, value: &str) -> Self {
            self.refs.insert(value.to_string());
            self.bad_checkouts.insert(value.to_string());
            self
        }

        pub fn unreachable(mut self) -> Self {
            self.fail_clone = true;
            self
        }

        /// Fails the clone after leaving some files in the destination.
        pub fn interrupted(mut self) -> Self {
            self.fail_clone = true;
            self.partial_clone = true;
            self
        }
    }

    #[derive(Default)]
    pub struct MockVcs {
        repos: HashMap<String, Repo>,
        calls: RefCell<Vec<String>>,
    }

    impl MockVcs {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn repo(mut self, url: &str, repo: Repo) -> Self {
            self.repos.insert(url.to_string(), repo);
            self
        }

        /// Lists every operation performed, in order, as `<op> <target>`.
        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        pub fn count(&self, op: &str) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|c| c.split_whitespace().next() == Some(op))
                .count()
        }

        fn origin(&self, dir: &Path) -> Option<&Repo> {
            let url = std::fs::read_to_string(dir.join(METADATA_DIR).join("origin")).ok()?;
            self.repos.get(url.trim())
        }
    }

    impl Vcs for MockVcs {
        fn clone_into(&self, repo: &str, dest: &Path, depth: u32) -> bool {
            self.calls
                .borrow_mut()
                .push(format!("clone {} {}", repo, depth));
            let fixture = match self.repos.get(repo) {
                Some(r) => r,
                None => return false,
            };
            if fixture.fail_clone == true {
                if fixture.partial_clone == true {
                    std::fs::create_dir_all(dest.join(METADATA_DIR)).unwrap();
                }
                return false;
            }
            std::fs::create_dir_all(dest.join(METADATA_DIR)).unwrap();
            std::fs::write(dest.join(METADATA_DIR).join("origin"), repo).unwrap();
            for (rel, contents) in &fixture.files {
                let path = dest.join(rel);
                std::fs::create_dir_all(path.parent().unwrap()).unwrap();
                std::fs::write(path, contents).unwrap();
            }
            std::fs::write(dest.join(REF_FILE), "HEAD").unwrap();
            true
        }

        fn fetch_ref(&self, dir: &Path, desc: &Descriptor) -> bool {
            self.calls.borrow_mut().push(format!("fetch {}", desc));
            match self.origin(dir) {
                Some(r) => r.refs.contains(desc.get_value()),
                None => false,
            }
        }

        fn checkout_ref(&self, dir: &Path, desc: &Descriptor) -> bool {
            self.calls.borrow_mut().push(format!("checkout {}", desc));
            match self.origin(dir) {
                Some(r) if r.bad_checkouts.contains(desc.get_value()) == false => {
                    std::fs::write(dir.join(REF_FILE), desc.get_value()).unwrap();
                    true
                }
                _ => false,
            }
        }
    }
}
