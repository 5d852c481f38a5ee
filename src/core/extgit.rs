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

use crate::core::vcs::Vcs;
use crate::core::version::{Descriptor, Kind};
use crate::util::anyerror::{AnyError, Fault};
use crate::util::filesystem;
use std::path::Path;
use std::process::Stdio;

pub const DEFAULT_COMMAND: &str = "git";

/// A series of git commands necessary to run through subprocesses rather than libgit2 bindings.
pub struct ExtGit {
    command: String,
    verbose: bool,
}

impl ExtGit {
    /// Creates an `ExtGit` struct that calls `git` from the path.
    pub fn new() -> Self {
        Self {
            command: String::from(DEFAULT_COMMAND),
            verbose: false,
        }
    }

    /// Sets the command for calling git through processes.
    ///
    /// By `s` is `None`, the command assumes git is on path and is simply `git`.
    pub fn command(mut self, s: Option<String>) -> Self {
        self.command = s.unwrap_or(DEFAULT_COMMAND.to_string());
        self
    }

    /// Echoes every git command before it is run.
    pub fn verbose(mut self, v: bool) -> Self {
        self.verbose = v;
        self
    }

    /// Runs git with `args` from the directory `dir`.
    fn run(&self, args: &[&str], dir: &Path) -> Result<(), Fault> {
        if self.verbose == true {
            println!("info: running: {} {}", self.command, args.join(" "));
        }
        let status = std::process::Command::new(&self.command)
            .args(args)
            .current_dir(dir)
            .stdout(match self.verbose {
                true => Stdio::inherit(),
                false => Stdio::null(),
            })
            .stderr(Stdio::inherit())
            .status()?;
        match status.code() {
            Some(num) => if num != 0 { Err(AnyError(format!("exited with error code: {}", num)))? } else { () },
            None => return Err(AnyError(format!("terminated by signal")))?,
        };
        Ok(())
    }

    /// Clones a repository `url` to `dest`.
    ///
    /// The clone happens in a temporary directory and its contents are then copied
    /// to `dest`, so a failed clone never leaves a directory at `dest`.
    fn try_clone(&self, url: &str, dest: &Path, depth: u32) -> Result<(), Fault> {
        let tmp_path = tempfile::tempdir()?;
        let depth = depth.to_string();
        let mut args = vec!["clone", "--depth", depth.as_str(), url, "repo"];
        if self.verbose == false {
            args.insert(1, "--quiet");
        }
        self.run(&args, tmp_path.path())?;

        let from_paths = filesystem::list_entries(&tmp_path.path().join("repo"))?
            .into_iter()
            .map(|name| tmp_path.path().join("repo").join(name))
            .collect::<Vec<_>>();
        filesystem::create_dir(dest)?;
        // copy rather than rename because of windows issues
        let options = fs_extra::dir::CopyOptions::new();
        if let Err(e) = fs_extra::copy_items(&from_paths, dest, &options) {
            filesystem::remove_entry(dest)?;
            return Err(Box::new(e));
        }
        Ok(())
    }

    /// Composes the arguments to fetch only the ref named by `desc`.
    fn fetch_args(desc: &Descriptor) -> Vec<&str> {
        match desc.get_kind() {
            Kind::Tag => vec!["fetch", "--quiet", "--depth", "1", "origin", "tag", desc.get_value()],
            Kind::Commit => vec!["fetch", "--quiet", "--depth", "1", "origin", desc.get_value()],
        }
    }

    /// Composes the arguments to check out the already fetched ref named by `desc`.
    fn checkout_args(desc: &Descriptor) -> Vec<&str> {
        vec!["-c", "advice.detachedHead=false", "checkout", "--quiet", desc.get_value()]
    }

    fn report(&self, action: &str, result: Result<(), Fault>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                if self.verbose == true {
                    println!("info: git {} failed: {}", action, e);
                }
                false
            }
        }
    }
}

impl Vcs for ExtGit {
    fn clone_into(&self, repo: &str, dest: &Path, depth: u32) -> bool {
        self.report("clone", self.try_clone(repo, dest, depth))
    }

    fn fetch_ref(&self, dir: &Path, desc: &Descriptor) -> bool {
        self.report("fetch", self.run(&Self::fetch_args(desc), dir))
    }

    fn checkout_ref(&self, dir: &Path, desc: &Descriptor) -> bool {
        self.report("checkout", self.run(&Self::checkout_args(desc), dir))
    }
}
