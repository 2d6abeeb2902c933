// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::learn::queue::DEFAULT_SESSION_CAP;

pub const CONFIG_FILE: &str = "flashdeck.toml";

#[derive(Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The maximum number of cards in a learning session.
    pub session_cap: usize,
    /// The database file name, relative to the collection directory.
    pub database: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_cap: DEFAULT_SESSION_CAP,
            database: "flashdeck.db".to_string(),
        }
    }
}

impl Config {
    /// Load the configuration in a directory, or the defaults if there is no
    /// configuration file.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE}, using defaults.");
            return Ok(Self::default());
        }
        let content = read_to_string(&path)?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        if config.session_cap == 0 {
            return fail("session_cap must be at least 1.");
        }
        if config.database.trim().is_empty() {
            return fail("database must not be empty.");
        }
        Ok(config)
    }
}
