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

use crate::collection::Collection;
use crate::db::Database;
use crate::error::Fallible;
use crate::store::CardStore;
use crate::types::timestamp::Timestamp;

pub fn reset_deck(directory: Option<String>, deck: &str) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    let count = reset_progress(&mut coll.db, deck, Timestamp::now())?;
    println!("Reset {count} cards in {deck}.");
    Ok(())
}

fn reset_progress(db: &mut Database, deck: &str, now: Timestamp) -> Fallible<usize> {
    let mut cards = db.get(deck)?;
    for card in cards.iter_mut() {
        card.reset_progress(now);
    }
    db.put_deck(deck, &cards)?;
    Ok(cards.len())
}
