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

use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::timestamp::Timestamp;

/// Where decks of cards live between sessions.
pub trait CardStore {
    /// Load every card in a deck.
    fn get(&self, deck_id: &str) -> Fallible<Vec<Card>>;

    /// Overwrite the scheduling state of one card.
    fn update(&mut self, deck_id: &str, card_id: &CardId, patch: &CardPatch) -> Fallible<()>;
}

/// The scheduling fields of a card, i.e. everything grading can change.
#[derive(Clone, Debug, PartialEq)]
pub struct CardPatch {
    pub due: Timestamp,
    pub ef: f64,
    pub reps: u32,
    pub interval: u32,
    pub lapses: u32,
    pub last_reviewed: Option<Timestamp>,
}

impl CardPatch {
    pub fn apply(&self, card: &mut Card) {
        card.due = self.due;
        card.ef = self.ef;
        card.reps = self.reps;
        card.interval = self.interval;
        card.lapses = self.lapses;
        card.last_reviewed = self.last_reviewed;
    }
}

impl From<&Card> for CardPatch {
    fn from(card: &Card) -> Self {
        Self {
            due: card.due,
            ef: card.ef,
            reps: card.reps,
            interval: card.interval,
            lapses: card.lapses,
            last_reviewed: card.last_reviewed,
        }
    }
}
