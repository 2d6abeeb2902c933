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

use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;

use crate::collection::Collection;
use crate::db::Database;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::record::CardRecord;
use crate::types::record::load_deck;

pub fn import_deck(directory: Option<String>, deck: &str, file: &Path) -> Fallible<()> {
    if !file.exists() {
        return fail("file does not exist.");
    }
    let mut coll: Collection = Collection::new(directory)?;
    let content = read_to_string(file)?;
    let (imported, dropped) = import_json(&mut coll.db, deck, &content)?;
    println!("Imported {imported} cards into {deck}.");
    if dropped > 0 {
        println!("Skipped {dropped} records without an id.");
    }
    Ok(())
}

/// Replace a deck with the records in a JSON array. Returns the number of
/// cards imported and the number of records dropped.
fn import_json(db: &mut Database, deck: &str, content: &str) -> Fallible<(usize, usize)> {
    let records: Vec<CardRecord> = serde_json::from_str(content)?;
    let cards = load_deck(&records);
    let mut seen = HashSet::new();
    for card in &cards {
        if !seen.insert(card.id()) {
            return fail(format!("duplicate card id: {}.", card.id()));
        }
    }
    db.put_deck(deck, &cards)?;
    Ok((cards.len(), records.len() - cards.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CardStore;
    use crate::types::card::DEFAULT_EASE;

    #[test]
    fn test_import() -> Fallible<()> {
        let mut db = Database::in_memory()?;
        let content = r#"[
            {"id": "a", "term": "uno", "definition": "one", "due": 0, "ef": 2.5,
             "reps": 2, "interval": 3, "lapses": 0, "lastReviewed": 0},
            {"id": "b", "term": "dos", "definition": "two"},
            {"term": "tres", "definition": "three"}
        ]"#;
        assert_eq!(import_json(&mut db, "numbers", content)?, (2, 1));
        let cards = db.get("numbers")?;
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].ef, 2.5);
        assert_eq!(cards[0].reps, 2);
        assert_eq!(cards[1].ef, DEFAULT_EASE);
        assert!(cards[1].is_new());
        Ok(())
    }

    #[test]
    fn test_import_rejects_duplicates() -> Fallible<()> {
        let mut db = Database::in_memory()?;
        let content = r#"[{"id": "a", "term": "x"}, {"id": "a", "term": "y"}]"#;
        assert!(import_json(&mut db, "d", content).is_err());
        assert_eq!(db.get_records("d")?, None);
        Ok(())
    }

    #[test]
    fn test_import_rejects_non_array() -> Fallible<()> {
        let mut db = Database::in_memory()?;
        assert!(import_json(&mut db, "d", r#"{"id": "a"}"#).is_err());
        Ok(())
    }
}
