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

use crate::error::{DirOp, Error, LastError};
use std::path::{Path, PathBuf};

/// Resolves a path into a full path if given relative to some `root` path.
///
/// Absolute paths are returned unchanged.
pub fn resolve_rel_path(root: &Path, s: &str) -> PathBuf {
    let p = PathBuf::from(s);
    match p.is_relative() {
        true => root.join(p),
        false => p,
    }
}

/// Converts the path into a string using the platform's separators.
pub fn into_std_str(p: &Path) -> String {
    p.display().to_string()
}

/// Creates the directory at `path` along with any missing parents.
pub fn create_dir(path: &Path) -> Result<(), Error> {
    std::fs::create_dir_all(path).map_err(|e| {
        Error::DirectoryOperationFailed(DirOp::Create, path.to_path_buf(), LastError(e.to_string()))
    })
}

/// Deletes whatever lives at `path`: directories are removed along with their
/// full contents, anything else is unlinked.
///
/// Does nothing if the path does not exist.
pub fn remove_entry(path: &Path) -> Result<(), Error> {
    let result = match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(path),
        Ok(_) => std::fs::remove_file(path),
        Err(_) => return Ok(()),
    };
    result.map_err(|e| {
        Error::DirectoryOperationFailed(DirOp::Remove, path.to_path_buf(), LastError(e.to_string()))
    })
}

/// Lists the file names of the immediate entries of the directory `path` in
/// the order the platform reports them.
///
/// A name that is not valid UTF-8 is an error.
pub fn list_entries(path: &Path) -> Result<Vec<String>, Error> {
    let read_err = |e: String| {
        Error::DirectoryOperationFailed(DirOp::Read, path.to_path_buf(), LastError(e))
    };
    let mut names = Vec::new();
    for entry in std::fs::read_dir(path).map_err(|e| read_err(e.to_string()))? {
        let entry = entry.map_err(|e| read_err(e.to_string()))?;
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => return Err(read_err(format!("entry {:?} is not valid UTF-8", name))),
        }
    }
    Ok(names)
}
