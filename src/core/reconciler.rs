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

use crate::core::manifest::Manifest;
use crate::core::store::Store;
use crate::core::version::{self, Key};
use crate::error::Error;
use std::collections::HashSet;
use std::path::PathBuf;

/// Prunes store entries that the project no longer depends on.
pub struct Reconciler<'a> {
    store: &'a Store<'a>,
}

impl<'a> Reconciler<'a> {
    pub fn new(store: &'a Store<'a>) -> Self {
        Self { store: store }
    }

    /// Collects the keys of every dependency reachable from `manifest`.
    ///
    /// Nested manifests are only read from entries already in the store, so
    /// a dependency that was never installed contributes its own key but none
    /// of its dependencies.
    pub fn reachable(&self, manifest: &Manifest) -> Result<HashSet<Key>, Error> {
        let mut marked = HashSet::new();
        self.mark(manifest, &mut marked)?;
        Ok(marked)
    }

    fn mark(&self, manifest: &Manifest, marked: &mut HashSet<Key>) -> Result<(), Error> {
        for dep in manifest.get_deps() {
            let (key, _) = version::resolve(dep)?;
            let dir = self.store.path_of(&key);
            // a key is only walked the first time it is seen
            if marked.insert(key) == false {
                continue;
            }
            if let Some(nested) = Manifest::load(&dir)? {
                self.mark(&nested, marked)?;
            }
        }
        Ok(())
    }

    /// Deletes every store entry not reachable from `manifest` and returns
    /// the paths that were removed.
    pub fn reconcile(&self, manifest: &Manifest) -> Result<Vec<PathBuf>, Error> {
        let keep = self
            .reachable(manifest)?
            .into_iter()
            .map(|k| k.as_str().to_string())
            .collect::<HashSet<String>>();

        let mut removed = Vec::new();
        for name in self.store.entries()? {
            if keep.contains(&name) == true {
                continue;
            }
            let path = self.store.remove(&name)?;
            println!("info: removed {}", path.display());
            removed.push(path);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::manifest::MANIFEST_FILE;
    use std::str::FromStr;
    use tempfile::tempdir;

    const FOO: &str = r#"[[dependencies]]
name = "foo"
repo = "https://x/foo.git"
version = "v1.2.0"
"#;

    fn names(keys: &HashSet<Key>) -> Vec<String> {
        let mut list: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        list.sort();
        list
    }

    #[test]
    fn stray_entry_is_removed() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());
        std::fs::create_dir(dir.path().join("foo@v1.2.0")).unwrap();
        std::fs::create_dir(dir.path().join("bar@#HEAD")).unwrap();

        let reconciler = Reconciler::new(&store);
        let removed = reconciler.reconcile(&Manifest::from_str(FOO).unwrap()).unwrap();

        assert_eq!(removed, vec![dir.path().join("bar@#HEAD")]);
        assert_eq!(store.entries().unwrap(), vec![String::from("foo@v1.2.0")]);

        // nothing is left to remove the second time
        let removed = reconciler.reconcile(&Manifest::from_str(FOO).unwrap()).unwrap();
        assert_eq!(removed.len(), 0);
    }

    #[test]
    fn nested_dependencies_are_kept() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());
        let a = dir.path().join("a@v1.0");
        std::fs::create_dir(&a).unwrap();
        std::fs::write(
            a.join(MANIFEST_FILE),
            r#"[[dependencies]]
name = "b"
repo = "https://x/b.git"
"#,
        )
        .unwrap();
        std::fs::create_dir(dir.path().join("b@#HEAD")).unwrap();
        std::fs::create_dir(dir.path().join("c@#HEAD")).unwrap();

        let root = Manifest::from_str(
            r#"[[dependencies]]
name = "a"
repo = "https://x/a.git"
version = "v1.0"
"#,
        )
        .unwrap();
        let reconciler = Reconciler::new(&store);
        assert_eq!(
            names(&reconciler.reachable(&root).unwrap()),
            vec!["a@v1.0", "b@#HEAD"]
        );

        reconciler.reconcile(&root).unwrap();
        let mut left = store.entries().unwrap();
        left.sort();
        assert_eq!(left, vec!["a@v1.0", "b@#HEAD"]);
    }

    #[test]
    fn uninstalled_dependency_hides_its_children() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());
        // "b" would be reachable through "foo" if "foo" were installed
        std::fs::create_dir(dir.path().join("b@#HEAD")).unwrap();

        let reconciler = Reconciler::new(&store);
        let root = Manifest::from_str(FOO).unwrap();
        assert_eq!(names(&reconciler.reachable(&root).unwrap()), vec!["foo@v1.2.0"]);

        reconciler.reconcile(&root).unwrap();
        assert_eq!(store.entries().unwrap().len(), 0);
    }

    #[test]
    fn cyclic_manifests_terminate() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());
        for (name, needs) in [("a", "b"), ("b", "a")] {
            let entry = dir.path().join(format!("{}@#HEAD", name));
            std::fs::create_dir(&entry).unwrap();
            std::fs::write(
                entry.join(MANIFEST_FILE),
                format!(
                    "[[dependencies]]\nname = \"{0}\"\nrepo = \"https://x/{0}.git\"\n",
                    needs
                ),
            )
            .unwrap();
        }
        let root = Manifest::from_str(
            "[[dependencies]]\nname = \"a\"\nrepo = \"https://x/a.git\"\n",
        )
        .unwrap();

        let reachable = Reconciler::new(&store).reachable(&root).unwrap();
        assert_eq!(names(&reachable), vec!["a@#HEAD", "b@#HEAD"]);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn undecodable_entry_is_reported() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());
        let stray = dir.path().join(OsStr::from_bytes(b"bar\xff@#HEAD"));
        std::fs::create_dir(&stray).unwrap();

        let result = Reconciler::new(&store).reconcile(&Manifest::from_str(FOO).unwrap());
        assert!(matches!(result, Err(Error::DirectoryOperationFailed(_, _, _))));
        assert_eq!(stray.exists(), true);
    }

    #[test]
    fn missing_store_removes_nothing() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("lunar_modules");
        let store = Store::new(&root);
        let removed = Reconciler::new(&store)
            .reconcile(&Manifest::from_str(FOO).unwrap())
            .unwrap();
        assert_eq!(removed.len(), 0);
        assert_eq!(root.exists(), false);
    }
}
