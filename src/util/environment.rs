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

use std::collections::btree_set::BTreeSet;
use std::collections::btree_set::Iter;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Eq)]
pub struct EnvVar {
    key: String,
    value: String,
}

impl PartialEq for EnvVar {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Ord for EnvVar {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for EnvVar {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for EnvVar {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // only hash by the key name
        self.key.hash(state);
    }
}

impl EnvVar {
    pub fn with(key: &str, value: &str) -> Self {
        Self::new().key(key).value(value)
    }

    pub fn new() -> Self {
        Self {
            key: String::new(),
            value: String::new(),
        }
    }

    /// Sets the environment key.
    pub fn key(mut self, s: &str) -> Self {
        // normalize the key name upon entry
        self.key = s.to_ascii_uppercase().replace('-', "_");
        self
    }

    /// Sets the environment value.
    pub fn value(mut self, s: &str) -> Self {
        self.value = s.to_owned();
        self
    }

    /// Places `patterns` in front of the value, separated by the Lua path
    /// delimiter `;`.
    ///
    /// An empty existing value is replaced rather than appended to.
    pub fn prepend(mut self, patterns: &[String]) -> Self {
        let head = patterns.join(PATH_DELIMITER);
        self.value = match (head.is_empty(), self.value.is_empty()) {
            (_, true) => head,
            (true, false) => self.value,
            (false, false) => format!("{}{}{}", head, PATH_DELIMITER, self.value),
        };
        self
    }

    pub fn get_value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for EnvVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}=\"{}\"", self.key, self.value)
    }
}

impl std::fmt::Display for EnvVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

pub struct Environment(BTreeSet<EnvVar>);

impl Environment {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn add(mut self, var: EnvVar) -> Self {
        self.0.insert(var);
        self
    }

    pub fn iter(&self) -> Iter<'_, EnvVar> {
        self.0.iter()
    }

    pub fn get(&self, key: &str) -> Option<&EnvVar> {
        self.0.get(&EnvVar::new().key(key))
    }

    pub fn into_map(&self) -> HashMap<&String, &String> {
        self.0.iter().map(|v| (&v.key, &v.value)).collect()
    }

    pub fn read(key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(v) => Some(v),
            Err(_) => None,
        }
    }

    /// Captures the current process's values for each of the `keys` that is set.
    pub fn inherit(keys: &[&str]) -> Self {
        keys.iter().fold(Self::new(), |env, key| match Self::read(key) {
            Some(v) => env.add(EnvVar::with(key, &v)),
            None => env,
        })
    }
}

pub const PATH_DELIMITER: &str = ";";

pub const LUNAR_HOME: &str = "LUNAR_HOME";
pub const LUNAR_STORE: &str = "LUNAR_STORE";
pub const LUNAR_GIT: &str = "LUNAR_GIT";

pub const LUA_PATH: &str = "LUA_PATH";
pub const LUA_CPATH: &str = "LUA_CPATH";

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize_key() {
        let var = EnvVar::with("lunar-store", "/tmp/x");
        assert_eq!(var.to_string(), "LUNAR_STORE=/tmp/x");
    }

    #[test]
    fn prepend_patterns() {
        let patterns = vec![String::from("/a/?.lua"), String::from("/a/?/init.lua")];
        let var = EnvVar::with(LUA_PATH, "./?.lua").prepend(&patterns);
        assert_eq!(var.get_value(), "/a/?.lua;/a/?/init.lua;./?.lua");

        let var = EnvVar::with(LUA_PATH, "").prepend(&patterns);
        assert_eq!(var.get_value(), "/a/?.lua;/a/?/init.lua");

        let var = EnvVar::with(LUA_PATH, "./?.lua").prepend(&[]);
        assert_eq!(var.get_value(), "./?.lua");
    }
}
