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

pub const HELP: &str = r#"Lunar is a dependency manager for Lua projects.

Usage:
    lunar [options] [command]

Commands:
    install         install the dependencies listed in Lunar.toml
    clean           remove installed modules no longer required
    run             run a script defined in Lunar.toml
    env             print the module search paths for the store

Options:
    --version       print version information and exit
    --help, -h      print help information

Use 'lunar <command> --help' for more information about a command.
"#;
