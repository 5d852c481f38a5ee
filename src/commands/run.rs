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

use crate::commands::helps::run;
use crate::core::context::Context;
use crate::core::manifest::Manifest;
use crate::core::script::{self, Script};
use crate::core::store::Store;
use crate::error::{Error, Hint};
use crate::util::anyerror::Fault;
use crate::util::environment::{Environment, LUA_CPATH, LUA_PATH};
use colored::Colorize;
use std::path::Path;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Run {
    script: Option<String>,
    list: bool,
    args: Vec<String>,
}

impl Subcommand<Context> for Run {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(run::HELP))?;
        Ok(Run {
            // Flags
            list: cli.check(Arg::flag("list"))?,
            // Positionals
            script: cli.get(Arg::positional("script"))?,
            // Remaining args
            args: cli.remainder()?,
        })
    }

    fn execute(self, c: &Context) -> proc::Result {
        let root = c.require_root()?;
        let manifest = Manifest::require(root)?;

        // display script list and exit
        let name = match (&self.script, self.list) {
            (Some(name), false) => name,
            _ => {
                println!("{}", Self::list_scripts(&manifest));
                return Ok(());
            }
        };

        let store = Store::new(c.get_store_path());
        if store.get_root().exists() == false && manifest.get_deps().is_empty() == false {
            println!(
                "{}: no modules are installed yet; run `lunar install` first",
                "warning".yellow()
            );
        }
        let env = script::search_vars(
            &store,
            &c.get_lua_path(),
            &c.get_lua_cpath(),
            &Environment::inherit(&[LUA_PATH, LUA_CPATH]),
        )?;
        self.run(&manifest, name, root, &env)
    }
}

impl Run {
    fn run(&self, manifest: &Manifest, name: &str, root: &Path, env: &Environment) -> Result<(), Fault> {
        let command = match manifest.get_script(name) {
            Some(cmd) => cmd,
            None => return Err(Error::ScriptNotFound(name.to_string(), Hint::ScriptsList))?,
        };
        Script::new(name, command).run(root, &self.args, env)?;
        Ok(())
    }

    fn list_scripts(manifest: &Manifest) -> String {
        manifest
            .list_scripts()
            .into_iter()
            .fold(String::new(), |mut acc, x| {
                if acc.is_empty() == false {
                    acc.push('\n');
                }
                acc.push_str(x);
                acc
            })
    }
}
