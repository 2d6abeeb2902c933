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

use std::fmt::Display;
use std::fmt::Formatter;

use crate::types::timestamp::Timestamp;

/// A card's stable identifier. Imported cards keep whatever identifier they
/// were stored with; cards created here get a content hash.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an identifier for a newly created card. The creation time is
    /// mixed in so that two identical cards in one deck still differ.
    pub fn generate(deck_id: &str, term: &str, definition: &str, created_at: Timestamp) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(deck_id.as_bytes());
        hasher.update(&[0]);
        hasher.update(term.as_bytes());
        hasher.update(&[0]);
        hasher.update(definition.as_bytes());
        hasher.update(&created_at.into_millis().to_le_bytes());
        Self(hasher.finalize().to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A prefix of the identifier, for log lines.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
