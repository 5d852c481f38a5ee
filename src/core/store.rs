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

use crate::core::vcs::METADATA_DIR;
use crate::core::version::Key;
use crate::error::Error;
use crate::util::filesystem;
use std::path::{Path, PathBuf};

/// The flat directory that holds one subdirectory per installed [Key].
#[derive(Debug, PartialEq)]
pub struct Store<'a> {
    root: &'a Path,
}

impl<'a> Store<'a> {
    /// Creates a handle to the store at the absolute path `root`.
    pub fn new(root: &'a Path) -> Self {
        Store { root: root }
    }

    /// Creates the store's directory if it does not exist yet.
    pub fn create(&self) -> Result<(), Error> {
        filesystem::create_dir(self.root)
    }

    pub fn get_root(&self) -> &Path {
        self.root
    }

    /// Computes the directory for the `key`, whether or not it exists.
    pub fn path_of(&self, key: &Key) -> PathBuf {
        self.root.join(key.as_str())
    }

    /// Checks if an entry for the `key` is already in the store.
    pub fn is_stored(&self, key: &Key) -> bool {
        self.path_of(key).exists()
    }

    /// Lists the names of the store's immediate entries in directory-listing order.
    ///
    /// A store that has not been created yet has no entries.
    pub fn entries(&self) -> Result<Vec<String>, Error> {
        match self.root.exists() {
            true => filesystem::list_entries(self.root),
            false => Ok(Vec::new()),
        }
    }

    /// Deletes the entry named `name` along with all of its contents.
    pub fn remove(&self, name: &str) -> Result<PathBuf, Error> {
        let path = self.root.join(name);
        filesystem::remove_entry(&path)?;
        Ok(path)
    }

    /// Removes the version-control bookkeeping from the entry for `key`.
    pub fn strip_metadata(&self, key: &Key) -> Result<(), Error> {
        filesystem::remove_entry(&self.path_of(key).join(METADATA_DIR))
    }
}
