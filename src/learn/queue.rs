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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::due::partition;
use crate::scheduler::schedule;
use crate::types::card::Card;
use crate::types::grade::Grade;
use crate::types::timestamp::Timestamp;

pub const DEFAULT_SESSION_CAP: usize = 50;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QueueState {
    NotStarted,
    InProgress,
    Completed,
}

/// Why a queue operation was refused. A refused operation changes nothing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rejection {
    AlreadyStarted,
    NotInProgress,
    NoCurrentCard,
    AlreadyRevealed,
    NotRevealed,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Rejection::AlreadyStarted => "the session has already started",
            Rejection::NotInProgress => "no session is in progress",
            Rejection::NoCurrentCard => "there is no current card",
            Rejection::AlreadyRevealed => "the card is already revealed",
            Rejection::NotRevealed => "the card must be revealed before grading",
        };
        write!(f, "{msg}")
    }
}

impl Error for Rejection {}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub started_at: Option<Timestamp>,
    pub total: usize,
    pub graded: usize,
    pub again: usize,
    pub hard: usize,
    pub good: usize,
    pub easy: usize,
}

/// The cards of one learning session, and how far through them we are.
pub struct LearnQueue {
    cap: usize,
    state: QueueState,
    cards: Vec<Card>,
    position: usize,
    graded: usize,
    revealed: bool,
    started_at: Option<Timestamp>,
    /// Grades given so far, indexed by ordinal.
    tally: [usize; 4],
}

impl LearnQueue {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            state: QueueState::NotStarted,
            cards: Vec::new(),
            position: 0,
            graded: 0,
            revealed: false,
            started_at: None,
            tally: [0; 4],
        }
    }

    pub fn state(&self) -> QueueState {
        self.state
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total(&self) -> usize {
        self.cards.len()
    }

    pub fn graded(&self) -> usize {
        self.graded
    }

    #[cfg(test)]
    pub(crate) fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[cfg(test)]
    pub(crate) fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The card being reviewed, if a session is in progress.
    pub fn current(&self) -> Option<&Card> {
        match self.state {
            QueueState::InProgress => self.cards.get(self.position),
            _ => None,
        }
    }

    /// Build the queue: due cards first, then the rest, each group in random
    /// order, truncated to the session cap.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        cards: Vec<Card>,
        now: Timestamp,
        rng: &mut R,
    ) -> Result<(), Rejection> {
        if self.state != QueueState::NotStarted {
            return Err(Rejection::AlreadyStarted);
        }
        let (mut due, mut not_due) = partition(cards, now);
        log::debug!(
            "Building queue from {} due and {} not due cards.",
            due.len(),
            not_due.len()
        );
        due.shuffle(rng);
        not_due.shuffle(rng);
        let mut queue = due;
        queue.append(&mut not_due);
        queue.truncate(self.cap);

        self.cards = queue;
        self.position = 0;
        self.graded = 0;
        self.revealed = false;
        self.started_at = Some(now);
        self.tally = [0; 4];
        self.state = if self.cards.is_empty() {
            QueueState::Completed
        } else {
            QueueState::InProgress
        };
        Ok(())
    }

    pub fn reveal(&mut self) -> Result<(), Rejection> {
        self.check_current()?;
        if self.revealed {
            return Err(Rejection::AlreadyRevealed);
        }
        self.revealed = true;
        Ok(())
    }

    /// Reschedule the current card as `grade` would, without moving on. The
    /// caller persists the result and then hands it to [`LearnQueue::commit`].
    pub fn prepare(&self, grade: Grade, now: Timestamp) -> Result<Card, Rejection> {
        self.check_revealed()?;
        Ok(schedule(&self.cards[self.position], grade, now))
    }

    /// Store a graded card in its slot and advance to the next one.
    pub fn commit(&mut self, grade: Grade, next: Card) -> Result<(), Rejection> {
        self.check_revealed()?;
        self.cards[self.position] = next;
        self.position += 1;
        self.graded += 1;
        self.tally[usize::from(grade.ordinal())] += 1;
        self.revealed = false;
        if self.position == self.cards.len() {
            log::debug!("Session completed.");
            self.state = QueueState::Completed;
        }
        Ok(())
    }

    /// Abandon the session. Always allowed.
    pub fn end(&mut self) {
        *self = Self::new(self.cap);
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            started_at: self.started_at,
            total: self.total(),
            graded: self.graded,
            again: self.tally[0],
            hard: self.tally[1],
            good: self.tally[2],
            easy: self.tally[3],
        }
    }

    fn check_current(&self) -> Result<(), Rejection> {
        if self.state != QueueState::InProgress {
            return Err(Rejection::NotInProgress);
        }
        if self.position >= self.cards.len() {
            return Err(Rejection::NoCurrentCard);
        }
        Ok(())
    }

    fn check_revealed(&self) -> Result<(), Rejection> {
        self.check_current()?;
        if !self.revealed {
            return Err(Rejection::NotRevealed);
        }
        Ok(())
    }
}
