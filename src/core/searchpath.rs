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

//! Module search patterns contributed by the store's entries.

use crate::core::store::Store;
use crate::error::Error;
use crate::util::filesystem;

/// Extension of Lua source modules.
pub const LUA_EXT: &str = "lua";

/// Extension of native modules on this platform.
#[cfg(windows)]
pub const NATIVE_EXT: &str = "dll";
#[cfg(not(windows))]
pub const NATIVE_EXT: &str = "so";

pub const DEFAULT_LUA_PATH: [&str; 6] = [
    "./?.lua",
    "./?/init.lua",
    "/usr/local/share/lua/5.1/?.lua",
    "/usr/local/share/lua/5.1/?/init.lua",
    "/usr/share/lua/5.1/?.lua",
    "/usr/share/lua/5.1/?/init.lua",
];

#[cfg(windows)]
pub const DEFAULT_LUA_CPATH: [&str; 2] = ["./?.dll", "./loadall.dll"];
#[cfg(not(windows))]
pub const DEFAULT_LUA_CPATH: [&str; 4] = [
    "./?.so",
    "/usr/local/lib/lua/5.1/?.so",
    "/usr/lib/lua/5.1/?.so",
    "/usr/local/lib/lua/5.1/loadall.so",
];

#[derive(Debug, PartialEq)]
pub struct SearchPaths {
    defaults: Vec<String>,
    ext: String,
}

impl SearchPaths {
    /// Creates a builder that places `defaults` ahead of every store pattern.
    pub fn new<T: AsRef<str>>(defaults: &[T]) -> Self {
        Self {
            defaults: defaults.iter().map(|d| d.as_ref().to_string()).collect(),
            ext: String::from(LUA_EXT),
        }
    }

    /// Sets the file extension of the modules being searched for.
    pub fn extension(mut self, ext: &str) -> Self {
        self.ext = ext.to_string();
        self
    }

    /// Computes the ordered list of patterns: the defaults, followed by a
    /// flat-module pattern and a nested-init-module pattern for each
    /// directory in the `store`.
    pub fn build(&self, store: &Store) -> Result<Vec<String>, Error> {
        let mut patterns = self.defaults.clone();
        for name in store.entries()? {
            let entry = store.get_root().join(&name);
            if entry.is_dir() == false {
                continue;
            }
            let root = filesystem::into_std_str(&entry);
            patterns.push(format!("{}/?.{}", root, self.ext));
            patterns.push(format!("{}/?/init.{}", root, self.ext));
        }
        Ok(patterns)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_come_first() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("missing");
        let paths = SearchPaths::new(&DEFAULT_LUA_PATH)
            .build(&Store::new(&root))
            .unwrap();
        assert_eq!(paths, DEFAULT_LUA_PATH.to_vec());
    }

    #[test]
    fn two_patterns_per_entry() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("foo@v1.0")).unwrap();
        std::fs::create_dir(dir.path().join("bar@#HEAD")).unwrap();
        // loose files are not packages
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let paths = SearchPaths::new(&["/sys/?.lua"])
            .build(&Store::new(dir.path()))
            .unwrap();
        assert_eq!(paths.len(), 5);
        assert_eq!(paths[0], "/sys/?.lua");

        for name in ["foo@v1.0", "bar@#HEAD"] {
            let root = filesystem::into_std_str(&dir.path().join(name));
            let flat = paths
                .iter()
                .position(|p| p == &format!("{}/?.lua", root))
                .unwrap();
            // patterns for one entry are contiguous
            assert_eq!(paths[flat + 1], format!("{}/?/init.lua", root));
        }
    }

    #[test]
    fn native_extension() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("cjson@v2.1")).unwrap();
        let paths = SearchPaths::new::<&str>(&[])
            .extension("so")
            .build(&Store::new(dir.path()))
            .unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("cjson@v2.1/?.so"));
        assert!(paths[1].ends_with("cjson@v2.1/?/init.so"));
    }
}
