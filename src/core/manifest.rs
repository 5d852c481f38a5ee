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

use crate::error::{Error, Hint, LastError};
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const MANIFEST_FILE: &str = "Lunar.toml";

type Dependencies = Vec<Dependency>;
type Scripts = HashMap<String, String>;

#[derive(Deserialize, Serialize, Debug, PartialEq, Default)]
pub struct Manifest {
    dependencies: Option<Dependencies>,
    scripts: Option<Scripts>,
}

impl FromStr for Manifest {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl Manifest {
    /// Loads the manifest that lives directly inside `dir`.
    ///
    /// Returns `None` when the directory has no manifest file. A manifest file
    /// that exists but cannot be read or parsed is an error.
    pub fn load(dir: &Path) -> Result<Option<Self>, Error> {
        let path = dir.join(MANIFEST_FILE);
        if path.is_file() == false {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::ManifestLoadFailed(path.clone(), LastError(e.to_string())))?;
        match Self::from_str(&contents) {
            Ok(man) => Ok(Some(man)),
            Err(e) => Err(Error::ManifestLoadFailed(path, LastError(e.to_string()))),
        }
    }

    /// Loads the manifest inside `dir`, treating its absence as an error.
    pub fn require(dir: &Path) -> Result<Self, Error> {
        match Self::load(dir)? {
            Some(man) => Ok(man),
            None => Err(Error::ManifestMissing(
                MANIFEST_FILE.to_string(),
                dir.to_path_buf(),
                Hint::InitManifest,
            )),
        }
    }

    /// Finds the nearest directory at or above `start` that contains a
    /// manifest file.
    pub fn find_root(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join(MANIFEST_FILE).is_file())
            .map(|dir| dir.to_path_buf())
    }

    /// References the dependencies in the order they were written.
    pub fn get_deps(&self) -> &[Dependency] {
        match &self.dependencies {
            Some(deps) => deps.as_slice(),
            None => &[],
        }
    }

    pub fn get_script(&self, name: &str) -> Option<&String> {
        self.scripts.as_ref()?.get(name)
    }

    /// Lists the script names in alphabetical order.
    pub fn list_scripts(&self) -> Vec<&String> {
        let mut names: Vec<&String> = match &self.scripts {
            Some(map) => map.keys().collect(),
            None => Vec::new(),
        };
        names.sort();
        names
    }
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Dependency {
    name: String,
    repo: String,
    version: Option<String>,
}

impl Dependency {
    pub fn new(name: &str, repo: &str, version: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            repo: repo.to_string(),
            version: version.map(|v| v.to_string()),
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_repo(&self) -> &str {
        &self.repo
    }

    pub fn get_version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl std::fmt::Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{} {}", self.name, v),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::tempdir;

    mod deser {
        use super::*;

        #[test]
        fn ut_complete() {
            let man = Manifest::from_str(EX1).unwrap();
            assert_eq!(man.get_deps().len(), 2);
            assert_eq!(
                man.get_deps()[0],
                Dependency::new("foo", "https://x/foo.git", Some("v1.2.0"))
            );
            assert_eq!(man.get_deps()[1].get_version(), None);
            assert_eq!(man.get_script("test"), Some(&String::from("busted spec")));
            assert_eq!(man.list_scripts(), vec!["lint", "test"]);
        }

        #[test]
        fn ut_empty() {
            let man = Manifest::from_str("").unwrap();
            assert_eq!(man.get_deps().len(), 0);
            assert_eq!(man.get_script("test"), None);
            assert_eq!(man, Manifest::default());
        }

        #[test]
        fn ut_keeps_order() {
            let man = Manifest::from_str(EX2).unwrap();
            let names: Vec<&str> = man.get_deps().iter().map(|d| d.get_name()).collect();
            assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        }

        #[test]
        fn ut_bad() {
            assert!(Manifest::from_str(ERR1).is_err());
            assert!(Manifest::from_str(ERR2).is_err());
        }
    }

    #[test]
    fn load_absent_and_present() {
        let dir = tempdir().unwrap();
        assert_eq!(Manifest::load(dir.path()).unwrap(), None);

        std::fs::write(dir.path().join(MANIFEST_FILE), EX1).unwrap();
        let man = Manifest::load(dir.path()).unwrap().unwrap();
        assert_eq!(man.get_deps().len(), 2);
    }

    #[test]
    fn load_failure_is_not_absence() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), ERR1).unwrap();
        assert!(matches!(
            Manifest::load(dir.path()),
            Err(Error::ManifestLoadFailed(_, _))
        ));
    }

    #[test]
    fn require_missing() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Manifest::require(dir.path()),
            Err(Error::ManifestMissing(_, _, _))
        ));
    }

    #[test]
    fn find_root_walks_up() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("src").join("util");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(Manifest::find_root(&nested), None);

        std::fs::write(dir.path().join(MANIFEST_FILE), "").unwrap();
        assert_eq!(Manifest::find_root(&nested), Some(dir.path().to_path_buf()));
    }

    const EX1: &str = r#"[[dependencies]]
name = "foo"
repo = "https://x/foo.git"
version = "v1.2.0"

[[dependencies]]
name = "bar"
repo = "https://x/bar.git"

[scripts]
test = "busted spec"
lint = "luacheck src"
"#;

    const EX2: &str = r##"[package]
name = "app"

[[dependencies]]
name = "zeta"
repo = "https://x/zeta.git"

[[dependencies]]
name = "alpha"
repo = "https://x/alpha.git"
version = "#abc123"

[[dependencies]]
name = "mid"
repo = "https://x/mid.git"
"##;

    // missing the repository
    const ERR1: &str = r#"[[dependencies]]
name = "foo"
"#;

    // unknown key inside a dependency
    const ERR2: &str = r#"[[dependencies]]
name = "foo"
repo = "https://x/foo.git"
tag = "1.0"
"#;
}
