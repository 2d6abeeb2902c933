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

use crate::types::card_id::CardId;
use crate::types::timestamp::Timestamp;

/// The ease factor of a card that has never been reviewed.
pub const DEFAULT_EASE: f64 = 2.3;

pub const MIN_EASE: f64 = 1.3;

pub const MAX_EASE: f64 = 3.0;

pub fn clamp_ease(ef: f64) -> f64 {
    ef.clamp(MIN_EASE, MAX_EASE)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    id: CardId,
    term: String,
    definition: String,
    /// The card can be reviewed at or after this instant.
    pub due: Timestamp,
    /// The ease factor. Always within `[MIN_EASE, MAX_EASE]`.
    pub ef: f64,
    /// Consecutive successful reviews since the last lapse.
    pub reps: u32,
    /// Days from a successful review to the next due date. Zero only while
    /// `reps` is zero.
    pub interval: u32,
    /// Lifetime count of `Again` grades.
    pub lapses: u32,
    pub last_reviewed: Option<Timestamp>,
}

impl Card {
    /// Create a card that is due immediately.
    pub fn new(
        id: CardId,
        term: impl Into<String>,
        definition: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            term: term.into(),
            definition: definition.into(),
            due: now,
            ef: DEFAULT_EASE,
            reps: 0,
            interval: 0,
            lapses: 0,
            last_reviewed: None,
        }
    }

    pub fn id(&self) -> &CardId {
        &self.id
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn is_new(&self) -> bool {
        self.last_reviewed.is_none()
    }

    /// Forget all review history, as if the card had just been created.
    pub fn reset_progress(&mut self, now: Timestamp) {
        self.due = now;
        self.ef = DEFAULT_EASE;
        self.reps = 0;
        self.interval = 0;
        self.lapses = 0;
        self.last_reviewed = None;
    }
}
