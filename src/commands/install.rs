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

use crate::commands::helps::install;
use crate::core::context::Context;
use crate::core::extgit::ExtGit;
use crate::core::installer::{Installer, Outcome};
use crate::core::manifest::Manifest;
use crate::core::reconciler::Reconciler;
use crate::core::store::Store;
use crate::core::vcs::Vcs;
use crate::util::anyerror::Fault;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Install {
    verbose: bool,
}

impl Subcommand<Context> for Install {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(install::HELP))?;
        Ok(Install {
            verbose: cli.check(Arg::flag("verbose"))?,
        })
    }

    fn execute(self, c: &Context) -> proc::Result {
        let manifest = Manifest::require(c.require_root()?)?;
        let store = Store::new(c.get_store_path());
        let git = ExtGit::new()
            .command(c.get_git().cloned())
            .verbose(self.verbose);
        self.run(&manifest, &store, &git)
    }
}

impl Install {
    fn run(&self, manifest: &Manifest, store: &Store, vcs: &dyn Vcs) -> Result<(), Fault> {
        let outcomes = Installer::new(store, vcs).install_all(manifest)?;
        let removed = Reconciler::new(store).reconcile(manifest)?;

        let installed = outcomes
            .iter()
            .filter(|o| o == &&Outcome::Installed)
            .count();
        println!(
            "info: {} of {} dependencies installed, {} removed",
            installed,
            outcomes.len(),
            removed.len()
        );
        Ok(())
    }
}
