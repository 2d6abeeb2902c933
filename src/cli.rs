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

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::add::add_card;
use crate::cmd::decks::list_decks;
use crate::cmd::export::export_deck;
use crate::cmd::import::import_deck;
use crate::cmd::learn::learn_deck;
use crate::cmd::reset::reset_deck;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_deck_stats;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Learn the cards in a deck.
    Learn {
        /// The deck to learn.
        deck: String,
        /// Path to the collection directory. Defaults to the current directory.
        #[arg(long)]
        directory: Option<String>,
        /// Seed for the card order, for a reproducible session.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the decks in the collection.
    Decks {
        #[arg(long)]
        directory: Option<String>,
    },
    /// Add a new card to a deck.
    Add {
        deck: String,
        term: String,
        definition: String,
        #[arg(long)]
        directory: Option<String>,
    },
    /// Replace a deck with the cards in a JSON file.
    Import {
        deck: String,
        /// A JSON array of card records.
        file: PathBuf,
        #[arg(long)]
        directory: Option<String>,
    },
    /// Print a deck as JSON.
    Export {
        deck: String,
        #[arg(long)]
        directory: Option<String>,
    },
    /// Print statistics about a deck.
    Stats {
        deck: String,
        #[arg(long)]
        directory: Option<String>,
        #[arg(long, default_value_t = StatsFormat::Json)]
        format: StatsFormat,
    },
    /// Forget all review history in a deck.
    Reset {
        deck: String,
        #[arg(long)]
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Learn {
            deck,
            directory,
            seed,
        } => learn_deck(directory, &deck, seed),
        Command::Decks { directory } => list_decks(directory),
        Command::Add {
            deck,
            term,
            definition,
            directory,
        } => add_card(directory, &deck, &term, &definition),
        Command::Import {
            deck,
            file,
            directory,
        } => import_deck(directory, &deck, &file),
        Command::Export { deck, directory } => export_deck(directory, &deck),
        Command::Stats {
            deck,
            directory,
            format,
        } => print_deck_stats(directory, &deck, format),
        Command::Reset { deck, directory } => reset_deck(directory, &deck),
    }
}
