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

use crate::core::config::Config;
use crate::core::manifest::{Manifest, MANIFEST_FILE};
use crate::core::searchpath::{DEFAULT_LUA_CPATH, DEFAULT_LUA_PATH};
use crate::error::{Error, Hint};
use crate::util::anyerror::{AnyError, Fault};
use crate::util::environment::Environment;
use crate::util::filesystem;
use std::path::{Path, PathBuf};

/// Name of the home directory created under the user's home.
pub const HOME_DIR: &str = ".lunar";

/// Store directory used when neither the environment nor the configuration sets one.
pub const DEFAULT_STORE_DIR: &str = "lunar_modules";

/// Everything a command needs to know about where it is running.
#[derive(Debug)]
pub struct Context {
    home_path: PathBuf,
    work_dir: PathBuf,
    root_path: Option<PathBuf>,
    store_path: PathBuf,
    git: Option<String>,
    config: Config,
}

impl Context {
    pub fn new() -> Result<Context, Fault> {
        let work_dir = std::env::current_dir()?;
        Ok(Context {
            home_path: PathBuf::new(),
            store_path: work_dir.join(DEFAULT_STORE_DIR),
            work_dir: work_dir,
            root_path: None,
            git: None,
            config: Config::new(),
        })
    }

    /// Sets the home directory. By default this is `$HOME/.lunar`. The directory
    /// does not need to exist.
    pub fn home(mut self, key: &str) -> Result<Context, Fault> {
        self.home_path = match Environment::read(key) {
            Some(s) => PathBuf::from(s),
            None => match home::home_dir() {
                Some(p) => p.join(HOME_DIR),
                None => {
                    return Err(AnyError(format!(
                        "failed to detect user's home directory; please set the {} environment variable",
                        key
                    )))?
                }
            },
        };
        Ok(self)
    }

    /// Reads the configuration file `s` from directly under the home directory.
    pub fn settings(mut self, s: &str) -> Result<Context, Fault> {
        self.config = Config::load(&self.home_path.join(s))?;
        Ok(self)
    }

    /// Detects the project root from the working directory.
    pub fn current_root(mut self) -> Context {
        self.root_path = Manifest::find_root(&self.work_dir);
        self
    }

    /// Sets the store directory from the environment variable `key`, then the
    /// configuration, then the default. Relative paths are taken from the
    /// project root, or the working directory when outside of a project.
    pub fn store(mut self, key: &str) -> Context {
        let dir = match Environment::read(key) {
            Some(s) => s,
            None => self
                .config
                .get_store_dir()
                .unwrap_or(DEFAULT_STORE_DIR)
                .to_string(),
        };
        let base = self.root_path.as_ref().unwrap_or(&self.work_dir);
        self.store_path = filesystem::resolve_rel_path(base, &dir);
        self
    }

    /// Sets the version control executable from the environment variable `key`
    /// or the configuration.
    pub fn git(mut self, key: &str) -> Context {
        self.git = match Environment::read(key) {
            Some(s) => Some(s),
            None => self.config.get_vcs_command().map(|s| s.to_string()),
        };
        self
    }

    pub fn get_store_path(&self) -> &PathBuf {
        &self.store_path
    }

    pub fn get_git(&self) -> Option<&String> {
        self.git.as_ref()
    }

    /// Access the project root, failing when the working directory is not
    /// inside a project.
    pub fn require_root(&self) -> Result<&Path, Error> {
        match &self.root_path {
            Some(p) => Ok(p.as_path()),
            None => Err(Error::ManifestMissing(
                MANIFEST_FILE.to_string(),
                self.work_dir.clone(),
                Hint::InitManifest,
            )),
        }
    }

    /// System locations searched for Lua modules ahead of the store.
    pub fn get_lua_path(&self) -> Vec<String> {
        match self.config.get_lua_path() {
            Some(list) => list.clone(),
            None => DEFAULT_LUA_PATH.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// System locations searched for native modules ahead of the store.
    pub fn get_lua_cpath(&self) -> Vec<String> {
        match self.config.get_lua_cpath() {
            Some(list) => list.clone(),
            None => DEFAULT_LUA_CPATH.iter().map(|s| s.to_string()).collect(),
        }
    }
}
