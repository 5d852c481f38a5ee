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

use crate::commands::helps::env;
use crate::core::context::Context;
use crate::core::script;
use crate::core::store::Store;
use crate::util::anyerror::Fault;
use crate::util::environment::{Environment, LUA_CPATH, LUA_PATH};

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Env {
    path: bool,
    cpath: bool,
}

impl Subcommand<Context> for Env {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(env::HELP))?;
        Ok(Env {
            path: cli.check(Arg::flag("path"))?,
            cpath: cli.check(Arg::flag("cpath"))?,
        })
    }

    fn execute(self, c: &Context) -> proc::Result {
        let env = script::search_vars(
            &Store::new(c.get_store_path()),
            &c.get_lua_path(),
            &c.get_lua_cpath(),
            &Environment::inherit(&[LUA_PATH, LUA_CPATH]),
        )?;
        println!("{}", self.run(&env)?);
        Ok(())
    }
}

impl Env {
    fn run(&self, env: &Environment) -> Result<String, Fault> {
        let mut result = String::new();
        match self.path == false && self.cpath == false {
            // print every variable as an assignment
            true => env.iter().for_each(|e| {
                if result.is_empty() == false {
                    result.push('\n');
                }
                result.push_str(&format!("{:?}", e));
            }),
            // print values only
            false => {
                let keys = [(self.path, LUA_PATH), (self.cpath, LUA_CPATH)];
                for (_, key) in keys.iter().filter(|(on, _)| *on == true) {
                    if result.is_empty() == false {
                        result.push('\n');
                    }
                    if let Some(entry) = env.get(key) {
                        result.push_str(entry.get_value());
                    }
                }
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::environment::EnvVar;

    fn sample() -> Environment {
        Environment::new()
            .add(EnvVar::with(LUA_PATH, "/a/?.lua"))
            .add(EnvVar::with(LUA_CPATH, "/a/?.so"))
    }

    #[test]
    fn print_assignments() {
        let cmd = Env {
            path: false,
            cpath: false,
        };
        assert_eq!(
            cmd.run(&sample()).unwrap(),
            "LUA_CPATH=\"/a/?.so\"\nLUA_PATH=\"/a/?.lua\""
        );
    }

    #[test]
    fn print_values_only() {
        let cmd = Env {
            path: true,
            cpath: false,
        };
        assert_eq!(cmd.run(&sample()).unwrap(), "/a/?.lua");

        let cmd = Env {
            path: true,
            cpath: true,
        };
        assert_eq!(cmd.run(&sample()).unwrap(), "/a/?.lua\n/a/?.so");
    }
}
