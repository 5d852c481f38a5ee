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

//! The installation process:
//! 1. Resolve the dependency's version into its store key
//! 2. Refresh an unpinned dependency requested directly by the project
//! 3. Shallow-clone the repository into the store under its key
//! 4. Install the dependencies listed by the clone's own manifest as siblings
//! 5. Fetch and check out the pinned commit or tag
//! 6. Remove the version-control metadata from the installed directory
//!
//! A fresh clone is deleted again if any step after the clone fails.
//!
//! Existing pinned entries are never modified; changing a pin creates a new key.

use crate::core::manifest::{Dependency, Manifest};
use crate::core::store::Store;
use crate::core::vcs::Vcs;
use crate::core::version::{self, Descriptor, Key};
use crate::error::{Error, Hint};

/// Number of commits of history kept for each clone.
pub const CLONE_DEPTH: u32 = 1;

/// Where the request to install a dependency came from.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Scope {
    /// Listed by the project's own manifest.
    Root,
    /// Discovered in the manifest of an installed dependency.
    Transitive,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Outcome {
    Installed,
    Skipped,
}

pub struct Installer<'a> {
    store: &'a Store<'a>,
    vcs: &'a dyn Vcs,
}

impl<'a> Installer<'a> {
    pub fn new(store: &'a Store<'a>, vcs: &'a dyn Vcs) -> Self {
        Self {
            store: store,
            vcs: vcs,
        }
    }

    /// Installs every dependency listed in `manifest` as a root-level request.
    pub fn install_all(&self, manifest: &Manifest) -> Result<Vec<Outcome>, Error> {
        self.store.create()?;
        manifest
            .get_deps()
            .iter()
            .map(|dep| self.install(dep, Scope::Root))
            .collect()
    }

    /// Installs the `dep` into the store along with every dependency its
    /// manifest lists, recursively.
    pub fn install(&self, dep: &Dependency, scope: Scope) -> Result<Outcome, Error> {
        let (key, desc) = version::resolve(dep)?;

        // always refresh unpinned dependencies explicitly requested by the project
        if desc.is_head() == true && scope == Scope::Root && self.store.is_stored(&key) == true {
            println!("info: refreshing {} ...", key);
            self.store.remove(key.as_str())?;
        }

        if self.store.is_stored(&key) == true {
            println!("info: {} already exists", key);
            return Ok(Outcome::Skipped);
        }

        println!("info: installing {} ...", key);
        self.clone(dep, &key)?;

        // the entry only stays in the store once every remaining step succeeds
        if let Err(e) = self.complete(dep, &key, &desc) {
            self.store.remove(key.as_str())?;
            return Err(e);
        }
        Ok(Outcome::Installed)
    }

    /// Finishes the fresh clone for `key`: installs its own dependencies,
    /// pins it to `desc`, and drops its version-control metadata.
    fn complete(&self, dep: &Dependency, key: &Key, desc: &Descriptor) -> Result<(), Error> {
        // dependencies of the dependency are placed alongside it in the store
        if let Some(nested) = Manifest::load(&self.store.path_of(key))? {
            for sub_dep in nested.get_deps() {
                self.install(sub_dep, Scope::Transitive)?;
            }
        }

        if desc.is_pinned() == true {
            self.pin(dep, key, desc)?;
        }

        self.store.strip_metadata(key)
    }

    fn clone(&self, dep: &Dependency, key: &Key) -> Result<(), Error> {
        let dest = self.store.path_of(key);
        if self.vcs.clone_into(dep.get_repo(), &dest, CLONE_DEPTH) == false {
            return match dest.exists() {
                true => Err(Error::PartialClone(
                    dep.get_name().to_string(),
                    dest,
                    Hint::RemovePartial,
                )),
                false => Err(Error::CloneFailed(
                    dep.get_name().to_string(),
                    dep.get_repo().to_string(),
                )),
            };
        }
        Ok(())
    }

    /// Moves the fresh clone for `key` to the commit or tag in `desc`.
    fn pin(&self, dep: &Dependency, key: &Key, desc: &Descriptor) -> Result<(), Error> {
        let dir = self.store.path_of(key);
        if self.vcs.fetch_ref(&dir, desc) == false {
            return Err(Error::FetchFailed(
                desc.get_kind().to_string(),
                desc.get_value().to_string(),
                dep.get_name().to_string(),
            ));
        }
        if self.vcs.checkout_ref(&dir, desc) == false {
            return Err(Error::CheckoutFailed(
                desc.get_kind().to_string(),
                desc.get_value().to_string(),
                dep.get_name().to_string(),
            ));
        }
        Ok(())
    }
}
