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

//! Version descriptors and the store keys derived from them.
//!
//! A dependency's `version` is either absent (track the latest `HEAD`), a
//! commit pin written `#<hash>`, or a tag pin written `v<tag>`. The pair of
//! a dependency name and its descriptor produces a [Key], which is also the
//! name of the dependency's directory inside the store.

use crate::core::manifest::Dependency;
use crate::error::Error;
use std::fmt::Display;

/// The latest state of a repository's default branch.
pub const HEAD: &str = "HEAD";

const KEY_SEPARATOR: char = '@';

/// Characters that cannot appear in a directory name on at least one
/// supported platform.
const RESERVED_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Kind {
    Commit,
    Tag,
}

impl Kind {
    pub fn as_char(&self) -> char {
        match self {
            Self::Commit => '#',
            Self::Tag => 'v',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Self::Commit),
            'v' => Some(Self::Tag),
            _ => None,
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Commit => write!(f, "commit"),
            Self::Tag => write!(f, "tag"),
        }
    }
}

/// The parsed form of a dependency's requested version.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Descriptor {
    kind: Kind,
    value: String,
}

impl Descriptor {
    /// The descriptor used when a dependency does not request a version.
    pub fn head() -> Self {
        Self {
            kind: Kind::Commit,
            value: HEAD.to_string(),
        }
    }

    /// Parses the version string `s` requested by the dependency `name`.
    pub fn parse(name: &str, s: &str) -> Result<Self, Error> {
        let mut chars = s.chars();
        let kind = chars.next().and_then(Kind::from_char);
        let value = chars.as_str();
        match kind {
            Some(kind) if value.is_empty() == false => Ok(Self {
                kind: kind,
                value: value.to_string(),
            }),
            _ => Err(Error::InvalidVersionFormat(name.to_string(), s.to_string())),
        }
    }

    /// Reads the descriptor for the `dependency`, defaulting to `#HEAD` when
    /// no version is requested.
    pub fn resolve(dep: &Dependency) -> Result<Self, Error> {
        match dep.get_version() {
            Some(v) => Self::parse(dep.get_name(), v),
            None => Ok(Self::head()),
        }
    }

    pub fn get_kind(&self) -> Kind {
        self.kind
    }

    pub fn get_value(&self) -> &str {
        &self.value
    }

    /// Checks if the descriptor tracks the latest state instead of a fixed ref.
    pub fn is_head(&self) -> bool {
        self.kind == Kind::Commit && self.value == HEAD
    }

    /// Checks if the descriptor names a specific commit or tag.
    pub fn is_pinned(&self) -> bool {
        self.is_head() == false
    }

    /// Builds the store key for the dependency `name` at this descriptor.
    pub fn key(&self, name: &str) -> Result<Key, Error> {
        Key::new(name, self)
    }
}

impl Display for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind.as_char(), self.value)
    }
}

/// Resolves the `dependency` into its store key and descriptor.
pub fn resolve(dep: &Dependency) -> Result<(Key, Descriptor), Error> {
    let desc = Descriptor::resolve(dep)?;
    let key = desc.key(dep.get_name())?;
    Ok((key, desc))
}

/// The identity of one installed (name, version) pair: `<name>@<kind><value>`.
///
/// A key is always a legal directory name.
#[derive(Debug, PartialEq, Eq, Clone, Hash, PartialOrd, Ord)]
pub struct Key(String);

impl Key {
    pub fn new(name: &str, desc: &Descriptor) -> Result<Self, Error> {
        let text = format!("{}{}{}", name, KEY_SEPARATOR, desc);
        let reject = |reason: &str| Error::InvalidKey(name.to_string(), text.clone(), reason.to_string());

        if name.is_empty() == true {
            return Err(reject("name is empty"));
        }
        if let Some(c) = name
            .chars()
            .chain(desc.get_value().chars())
            .find(|c| RESERVED_CHARS.contains(c) || c.is_control())
        {
            return Err(reject(&format!("character {:?} is not allowed", c)));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
