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

use crate::commands::helps::clean;
use crate::core::context::Context;
use crate::core::manifest::Manifest;
use crate::core::reconciler::Reconciler;
use crate::core::store::Store;
use crate::util::anyerror::Fault;

use cliproc::{cli, proc, stage::*};
use cliproc::{Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Clean;

impl Subcommand<Context> for Clean {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(clean::HELP))?;
        Ok(Clean)
    }

    fn execute(self, c: &Context) -> proc::Result {
        let manifest = Manifest::require(c.require_root()?)?;
        self.run(&manifest, &Store::new(c.get_store_path()))
    }
}

impl Clean {
    fn run(&self, manifest: &Manifest, store: &Store) -> Result<(), Fault> {
        if Reconciler::new(store).reconcile(manifest)?.is_empty() == true {
            println!("info: nothing to remove");
        }
        Ok(())
    }
}
