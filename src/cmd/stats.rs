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

use clap::ValueEnum;
use serde::Serialize;

use crate::collection::Collection;
use crate::due::partition;
use crate::error::Fallible;
use crate::store::CardStore;
use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// Plain text output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_deck_stats(directory: Option<String>, deck: &str, format: StatsFormat) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let cards = coll.db.get(deck)?;
    let stats = Stats::new(cards, Timestamp::now());
    match format {
        StatsFormat::Text => {
            println!("Cards:    {}", stats.total_cards);
            println!("Due:      {}", stats.due_cards);
            println!("New:      {}", stats.new_cards);
            println!("Learning: {}", stats.learning_cards);
            println!("Lapses:   {}", stats.lapse_count);
        }
        StatsFormat::Json => {
            let stats_json = serde_json::to_string_pretty(&stats)?;
            println!("{}", stats_json);
        }
    }
    Ok(())
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    total_cards: usize,
    due_cards: usize,
    /// Cards that have never been reviewed.
    new_cards: usize,
    /// Cards with at least one success since their last lapse.
    learning_cards: usize,
    lapse_count: u64,
}

impl Stats {
    fn new(cards: Vec<Card>, now: Timestamp) -> Self {
        let total_cards = cards.len();
        let new_cards = cards.iter().filter(|card| card.is_new()).count();
        let learning_cards = cards.iter().filter(|card| card.reps > 0).count();
        let lapse_count = cards.iter().map(|card| u64::from(card.lapses)).sum();
        let (due, _) = partition(cards, now);
        Self {
            total_cards,
            due_cards: due.len(),
            new_cards,
            learning_cards,
            lapse_count,
        }
    }
}
