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

use crate::core::searchpath::{SearchPaths, LUA_EXT, NATIVE_EXT};
use crate::core::store::Store;
use crate::error::Error;
use crate::util::environment::{EnvVar, Environment, LUA_CPATH, LUA_PATH};
use std::path::Path;
use std::process::Command;

/// Computes `LUA_PATH` and `LUA_CPATH` for the modules in `store`.
///
/// Values already present in `inherited` are kept after the generated patterns.
pub fn search_vars(
    store: &Store,
    path_defaults: &[String],
    cpath_defaults: &[String],
    inherited: &Environment,
) -> Result<Environment, Error> {
    let path = SearchPaths::new(path_defaults)
        .extension(LUA_EXT)
        .build(store)?;
    let cpath = SearchPaths::new(cpath_defaults)
        .extension(NATIVE_EXT)
        .build(store)?;

    let existing = |key: &str| match inherited.get(key) {
        Some(var) => var.get_value().to_string(),
        None => String::new(),
    };
    Ok(Environment::new()
        .add(EnvVar::with(LUA_PATH, &existing(LUA_PATH)).prepend(&path))
        .add(EnvVar::with(LUA_CPATH, &existing(LUA_CPATH)).prepend(&cpath)))
}

/// A named command from the manifest's `[scripts]` table.
#[derive(Debug, PartialEq)]
pub struct Script<'a> {
    name: &'a str,
    command: &'a str,
}

impl<'a> Script<'a> {
    pub fn new(name: &'a str, command: &'a str) -> Self {
        Self {
            name: name,
            command: command,
        }
    }

    /// Composes the full command line with `args` appended, each quoted for
    /// the platform shell so that it arrives as a single word.
    fn line(&self, args: &[String]) -> Result<String, Error> {
        let mut line = self.command.to_string();
        for arg in args {
            let quoted = Self::quote(arg)
                .ok_or_else(|| Error::ScriptFailed(self.name.to_string()))?;
            line.push(' ');
            line.push_str(&quoted);
        }
        Ok(line)
    }

    #[cfg(not(windows))]
    fn quote(arg: &str) -> Option<String> {
        shlex::try_quote(arg).ok().map(|q| q.into_owned())
    }

    #[cfg(windows)]
    fn quote(arg: &str) -> Option<String> {
        let plain = arg.is_empty() == false
            && arg
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "-_./\\:=,+@".contains(c));
        match plain {
            true => Some(arg.to_string()),
            false => Some(format!("\"{}\"", arg.replace('"', "\\\""))),
        }
    }

    #[cfg(not(windows))]
    fn shell(line: &str) -> Command {
        let mut proc = Command::new("sh");
        proc.arg("-c").arg(line);
        proc
    }

    #[cfg(windows)]
    fn shell(line: &str) -> Command {
        let mut proc = Command::new("cmd");
        proc.arg("/C").arg(line);
        proc
    }

    /// Runs the script through the platform shell from the directory `root`.
    ///
    /// Only success or failure is reported; the script's output goes straight
    /// to the terminal.
    pub fn run(&self, root: &Path, args: &[String], env: &Environment) -> Result<(), Error> {
        let status = Self::shell(&self.line(args)?)
            .current_dir(root)
            .envs(env.into_map())
            .status();
        match status {
            Ok(s) if s.success() == true => Ok(()),
            _ => Err(Error::ScriptFailed(self.name.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn vars_prepend_store_patterns() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("foo@v1.0")).unwrap();
        let store = Store::new(dir.path());
        let inherited = Environment::new().add(EnvVar::with(LUA_PATH, "/home/?.lua"));

        let env = search_vars(
            &store,
            &[String::from("/sys/?.lua")],
            &[],
            &inherited,
        )
        .unwrap();

        let path = env.get(LUA_PATH).unwrap().get_value().to_string();
        assert!(path.starts_with("/sys/?.lua;"));
        assert!(path.ends_with(";/home/?.lua"));
        assert!(path.contains("foo@v1.0"));

        let cpath = env.get(LUA_CPATH).unwrap().get_value().to_string();
        assert_eq!(cpath.split(';').count(), 2);
        assert!(cpath.ends_with(&format!("?/init.{}", NATIVE_EXT)));
    }

    #[test]
    #[cfg(not(windows))]
    fn arguments_are_appended_as_words() {
        let script = Script::new("test", "busted spec");
        assert_eq!(script.line(&[]).unwrap(), "busted spec");

        let args = [
            String::from("--verbose"),
            String::from("a b"),
            String::from("it's"),
        ];
        let line = script.line(&args).unwrap();
        assert_eq!(
            shlex::split(&line).unwrap(),
            vec!["busted", "spec", "--verbose", "a b", "it's"]
        );
    }

    #[test]
    #[cfg(unix)]
    fn run_reports_status() {
        let dir = tempdir().unwrap();
        let env = Environment::new().add(EnvVar::with(LUA_PATH, "/x/?.lua"));

        let script = Script::new("echo", "printf \"$LUA_PATH\" > out.txt");
        script.run(dir.path(), &[], &env).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("out.txt")).unwrap(),
            "/x/?.lua"
        );

        let script = Script::new("args", "printf '%s|' > args.txt");
        script
            .run(dir.path(), &[String::from("a b"), String::from("c")], &env)
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("args.txt")).unwrap(),
            "a b|c|"
        );

        let script = Script::new("fail", "exit 3");
        assert_eq!(
            script.run(dir.path(), &[], &env),
            Err(Error::ScriptFailed(String::from("fail")))
        );
    }
}
