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

use crate::error::{Error, LastError};
use serde_derive::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

pub const CONFIG_FILE: &str = "config.toml";

/// User-level settings read from `$LUNAR_HOME/config.toml`.
#[derive(Deserialize, Serialize, Debug, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    vcs: Option<VcsSection>,
    store: Option<StoreSection>,
    lua: Option<LuaSection>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Default)]
#[serde(deny_unknown_fields)]
struct VcsSection {
    command: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Default)]
#[serde(deny_unknown_fields)]
struct StoreSection {
    dir: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Default)]
#[serde(deny_unknown_fields)]
struct LuaSection {
    path: Option<Vec<String>>,
    cpath: Option<Vec<String>>,
}

impl FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the configuration file at `path`.
    ///
    /// A missing file is the same as an empty one.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if path.is_file() == false {
            return Ok(Self::new());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigLoadFailed(path.to_path_buf(), LastError(e.to_string())))?;
        Self::from_str(&contents)
            .map_err(|e| Error::ConfigLoadFailed(path.to_path_buf(), LastError(e.to_string())))
    }

    /// The executable to run for version control, if configured.
    pub fn get_vcs_command(&self) -> Option<&str> {
        self.vcs.as_ref()?.command.as_deref()
    }

    /// The store directory, if configured.
    pub fn get_store_dir(&self) -> Option<&str> {
        self.store.as_ref()?.dir.as_deref()
    }

    /// The system locations searched for Lua modules, if configured.
    pub fn get_lua_path(&self) -> Option<&Vec<String>> {
        self.lua.as_ref()?.path.as_ref()
    }

    /// The system locations searched for native modules, if configured.
    pub fn get_lua_cpath(&self) -> Option<&Vec<String>> {
        self.lua.as_ref()?.cpath.as_ref()
    }
}
