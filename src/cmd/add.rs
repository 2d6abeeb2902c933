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
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::timestamp::Timestamp;

pub fn add_card(directory: Option<String>, deck: &str, term: &str, definition: &str) -> Fallible<()> {
    let term = term.trim();
    let definition = definition.trim();
    if term.is_empty() || definition.is_empty() {
        return fail("term and definition must not be empty.");
    }
    let mut coll: Collection = Collection::new(directory)?;
    let now = Timestamp::now();
    let card = Card::new(CardId::generate(deck, term, definition, now), term, definition, now);
    coll.db.insert_card(deck, &card)?;
    println!("{}", card.id());
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::store::CardStore;

    #[test]
    fn test_add_card() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = dir.path().display().to_string();
        add_card(Some(directory.clone()), "spanish", " perro ", "dog")?;
        let coll = Collection::new(Some(directory))?;
        let cards = coll.db.get("spanish")?;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].term(), "perro");
        assert!(cards[0].is_new());
        Ok(())
    }

    #[test]
    fn test_add_empty_card() {
        assert!(add_card(None, "spanish", "", "dog").is_err());
    }
}
