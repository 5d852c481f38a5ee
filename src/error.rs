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

use colored::Colorize;
use std::{fmt::Display, path::PathBuf};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("dependency {0:?} has invalid version {1:?}: expected '#<commit>' or 'v<tag>'")]
    InvalidVersionFormat(String, String),
    #[error("dependency {0:?} resolves to unusable store key {1:?}: {2}")]
    InvalidKey(String, String, String),
    #[error("failed to clone dependency {0:?} from {1:?}")]
    CloneFailed(String, String),
    #[error("failed to clone dependency {0:?}: partial clone left at {1:?}{2}")]
    PartialClone(String, PathBuf, Hint),
    #[error("failed to fetch {0} {1:?} for dependency {2:?}")]
    FetchFailed(String, String, String),
    #[error("failed to checkout {0} {1:?} for dependency {2:?}")]
    CheckoutFailed(String, String, String),
    #[error("no {0} file found in {1:?} or any parent directory{2}")]
    ManifestMissing(String, PathBuf, Hint),
    #[error("failed to load manifest {0:?}: {1}")]
    ManifestLoadFailed(PathBuf, LastError),
    #[error("failed to {0} directory {1:?}: {2}")]
    DirectoryOperationFailed(DirOp, PathBuf, LastError),
    #[error("no script named {0:?}{1}")]
    ScriptNotFound(String, Hint),
    #[error("script {0:?} did not complete successfully")]
    ScriptFailed(String),
    #[error("failed to load configuration {0:?}: {1}")]
    ConfigLoadFailed(PathBuf, LastError),
}

/// The filesystem action that was attempted on a directory.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum DirOp {
    Create,
    Read,
    Remove,
}

impl Display for DirOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Read => write!(f, "read"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct LastError(pub String);

impl Display for LastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Error::lowerize(self.0.to_string()))
    }
}

impl Error {
    pub fn lowerize(s: String) -> String {
        // get the first word
        let first_word = match s.split_whitespace().next() {
            Some(w) => w,
            None => return s,
        };
        // retain punctuation if the first word is all-caps and longer than 1 character
        if first_word.len() > 1
            && first_word
                .chars()
                .find(|c| c.is_ascii_lowercase() == true)
                .is_none()
        {
            s.to_string()
        } else {
            s.char_indices()
                .map(|(i, c)| if i == 0 { c.to_ascii_lowercase() } else { c })
                .collect()
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Hint {
    ScriptsList,
    InitManifest,
    RemovePartial,
}

impl Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::ScriptsList => "use `lunar run --list` to see the list of defined scripts",
            Self::InitManifest => "create a Lunar.toml file at the root of the project",
            Self::RemovePartial => "delete the directory and try the installation again",
        };
        write!(
            f,
            "\n\n{}: {}",
            "hint".green(),
            Error::lowerize(message.to_string())
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lowerize_first_letter() {
        assert_eq!(
            Error::lowerize(String::from("Permission denied")),
            "permission denied"
        );
        // acronyms are left alone
        assert_eq!(
            Error::lowerize(String::from("TOML parse error")),
            "TOML parse error"
        );
        assert_eq!(Error::lowerize(String::new()), "");
    }

    #[test]
    fn messages_name_the_dependency() {
        let err = Error::InvalidVersionFormat(String::from("foo"), String::from("1.0"));
        assert!(err.to_string().contains("\"foo\""));
        assert!(err.to_string().contains("\"1.0\""));

        let err = Error::CheckoutFailed(
            String::from("tag"),
            String::from("v1.2.0"),
            String::from("foo"),
        );
        assert_eq!(
            err.to_string(),
            "failed to checkout tag \"v1.2.0\" for dependency \"foo\""
        );

        let err = Error::DirectoryOperationFailed(
            DirOp::Remove,
            PathBuf::from("/store/foo@#HEAD"),
            LastError(String::from("Permission denied")),
        );
        assert!(err.to_string().starts_with("failed to remove directory"));
        assert!(err.to_string().ends_with("permission denied"));
    }
}
