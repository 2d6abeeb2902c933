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

use rand::rngs::StdRng;

use crate::clock::Clock;
use crate::error::Fallible;
use crate::learn::queue::LearnQueue;
use crate::learn::queue::QueueState;
use crate::learn::queue::Rejection;
use crate::learn::queue::SessionSummary;
use crate::scheduler::preview;
use crate::store::CardPatch;
use crate::store::CardStore;
use crate::types::card::Card;
use crate::types::grade::Grade;

/// A learning session over one deck. Ties the queue to the store the cards
/// are loaded from and written back to, and to the clock that stamps reviews.
pub struct Session<S: CardStore, C: Clock> {
    deck_id: String,
    store: S,
    clock: C,
    rng: StdRng,
    queue: LearnQueue,
}

impl<S: CardStore, C: Clock> Session<S, C> {
    pub fn new(deck_id: impl Into<String>, store: S, clock: C, rng: StdRng, cap: usize) -> Self {
        Self {
            deck_id: deck_id.into(),
            store,
            clock,
            rng,
            queue: LearnQueue::new(cap),
        }
    }

    pub fn queue(&self) -> &LearnQueue {
        &self.queue
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub fn current(&self) -> Option<&Card> {
        self.queue.current()
    }

    pub fn is_completed(&self) -> bool {
        self.queue.state() == QueueState::Completed
    }

    /// Load the deck and build the queue.
    pub fn start(&mut self) -> Fallible<Result<(), Rejection>> {
        if self.queue.state() != QueueState::NotStarted {
            return Ok(Err(Rejection::AlreadyStarted));
        }
        let cards = self.store.get(&self.deck_id)?;
        log::debug!("Loaded {} cards from deck {}.", cards.len(), self.deck_id);
        let now = self.clock.now();
        Ok(self.queue.start(cards, now, &mut self.rng))
    }

    pub fn reveal(&mut self) -> Result<(), Rejection> {
        let result = self.queue.reveal();
        if let Err(rejection) = result {
            log::warn!("Reveal rejected: {rejection}.");
        }
        result
    }

    /// Grade the current card and write its new schedule to the store. The
    /// queue only moves on once the write has succeeded.
    pub fn grade(&mut self, grade: Grade) -> Fallible<Result<Card, Rejection>> {
        let now = self.clock.now();
        let card = match self.queue.prepare(grade, now) {
            Ok(card) => card,
            Err(rejection) => {
                log::warn!("Grade rejected: {rejection}.");
                return Ok(Err(rejection));
            }
        };
        log::debug!(
            "{} {} ef={:.2} interval={}d due={}",
            card.id().short(),
            grade.as_str(),
            card.ef,
            card.interval,
            card.due
        );
        self.store
            .update(&self.deck_id, card.id(), &CardPatch::from(&card))?;
        Ok(self.queue.commit(grade, card.clone()).map(|()| card))
    }

    /// The interval each grade would give the current card right now.
    pub fn preview(&self) -> Option<[u32; 4]> {
        self.current().map(|card| preview(card, self.clock.now()))
    }

    pub fn summary(&self) -> SessionSummary {
        self.queue.summary()
    }

    /// Abandon the session. Cards graded so far have already been saved.
    pub fn end(&mut self) {
        log::debug!(
            "Ending session after {} of {} cards.",
            self.queue.graded(),
            self.queue.total()
        );
        self.queue.end();
    }
}
