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

use crate::commands::helps::lunar;
use crate::core::config::CONFIG_FILE;
use crate::core::context::Context;
use crate::util::environment;

use crate::commands::clean::Clean;
use crate::commands::env::Env;
use crate::commands::install::Install;
use crate::commands::run::Run;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Command, Help, Subcommand};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, PartialEq)]
pub struct Lunar {
    version: bool,
    command: Option<LunarSubcommand>,
}

impl Command for Lunar {
    fn interpret(cli: &mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(lunar::HELP))?;
        Ok(Lunar {
            version: cli.check(Arg::flag("version"))?,
            command: cli.nest(Arg::subcommand("command"))?,
        })
    }

    fn execute(self) -> proc::Result {
        // prioritize version information
        if self.version == true {
            println!("lunar {}", VERSION);
            Ok(())
        // run the specified command
        } else if let Some(c) = self.command {
            let context = Context::new()?
                .home(environment::LUNAR_HOME)?
                .settings(CONFIG_FILE)?
                .current_root()
                .store(environment::LUNAR_STORE)
                .git(environment::LUNAR_GIT);
            c.execute(&context)
        // if no command is given then print default help
        } else {
            Ok(println!("{}", lunar::HELP))
        }
    }
}

#[derive(Debug, PartialEq)]
enum LunarSubcommand {
    Install(Install),
    Clean(Clean),
    Run(Run),
    Env(Env),
}

impl Subcommand<Context> for LunarSubcommand {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        match cli.select(&["install", "clean", "run", "env"])?.as_ref() {
            "install" => Ok(Self::Install(Install::interpret(cli)?)),
            "clean" => Ok(Self::Clean(Clean::interpret(cli)?)),
            "run" => Ok(Self::Run(Run::interpret(cli)?)),
            "env" => Ok(Self::Env(Env::interpret(cli)?)),
            _ => panic!("an unimplemented command was passed through!"),
        }
    }

    fn execute(self, c: &Context) -> proc::Result {
        match self {
            Self::Install(sub) => sub.execute(c),
            Self::Clean(sub) => sub.execute(c),
            Self::Run(sub) => sub.execute(c),
            Self::Env(sub) => sub.execute(c),
        }
    }
}
