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

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;

use crate::error::Fallible;
use crate::error::fail;
use crate::store::CardPatch;
use crate::store::CardStore;
use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::record::CardRecord;
use crate::types::record::load_card;
use crate::types::record::load_deck;

/// A key-value store of decks. Each deck is stored as a JSON array of card
/// records under its identifier.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        Self::init(Connection::open(database_path)?)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(mut conn: Connection) -> Fallible<Self> {
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating database schema.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// Return the identifiers of all decks, sorted.
    pub fn deck_ids(&self) -> Fallible<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("select deck_id from decks order by deck_id;")?;
        let mut rows = stmt.query([])?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            ids.push(row.get(0)?);
        }
        Ok(ids)
    }

    /// Return the raw records of a deck, or `None` if there is no such deck.
    pub fn get_records(&self, deck_id: &str) -> Fallible<Option<Vec<CardRecord>>> {
        read_records(&self.conn, deck_id)
    }

    /// Replace the contents of a deck, creating it if needed.
    pub fn put_deck(&mut self, deck_id: &str, cards: &[Card]) -> Fallible<()> {
        let records: Vec<CardRecord> = cards.iter().map(CardRecord::from).collect();
        let tx = self.conn.transaction()?;
        write_records(&tx, deck_id, &records)?;
        tx.commit()?;
        Ok(())
    }

    /// Append a card to a deck, creating the deck if needed. Existing records
    /// are kept as they are, even unreadable ones.
    pub fn insert_card(&mut self, deck_id: &str, card: &Card) -> Fallible<()> {
        log::debug!("Adding card {} to deck {deck_id}.", card.id().short());
        let tx = self.conn.transaction()?;
        let mut records = read_records(&tx, deck_id)?.unwrap_or_default();
        if records.iter().any(|r| r.card_id().as_ref() == Some(card.id())) {
            return fail(format!("card {} already exists in deck {deck_id}.", card.id()));
        }
        records.push(CardRecord::from(card));
        write_records(&tx, deck_id, &records)?;
        tx.commit()?;
        Ok(())
    }
}

impl CardStore for Database {
    fn get(&self, deck_id: &str) -> Fallible<Vec<Card>> {
        match self.get_records(deck_id)? {
            Some(records) => Ok(load_deck(&records)),
            None => fail(format!("no such deck: {deck_id}.")),
        }
    }

    fn update(&mut self, deck_id: &str, card_id: &CardId, patch: &CardPatch) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        let Some(mut records) = read_records(&tx, deck_id)? else {
            return fail(format!("no such deck: {deck_id}."));
        };
        let Some(record) = records
            .iter_mut()
            .find(|r| r.card_id().as_ref() == Some(card_id))
        else {
            return fail(format!("no such card in deck {deck_id}: {card_id}."));
        };
        let Some(mut card) = load_card(record) else {
            return fail(format!("unreadable card record: {card_id}."));
        };
        patch.apply(&mut card);
        *record = CardRecord::from(&card);
        write_records(&tx, deck_id, &records)?;
        tx.commit()?;
        Ok(())
    }
}

fn read_records(conn: &Connection, deck_id: &str) -> Fallible<Option<Vec<CardRecord>>> {
    let sql = "select cards from decks where deck_id = ?;";
    let json: Option<String> = conn
        .query_row(sql, [deck_id], |row| row.get(0))
        .optional()?;
    match json {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

fn write_records(tx: &Transaction, deck_id: &str, records: &[CardRecord]) -> Fallible<()> {
    let json = serde_json::to_string(records)?;
    let sql = "insert into decks (deck_id, cards) values (?, ?) on conflict (deck_id) do update set cards = excluded.cards;";
    tx.execute(sql, (deck_id, &json))?;
    Ok(())
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["decks"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::types::timestamp::Timestamp;

    fn card(id: &str) -> Card {
        Card::new(CardId::new(id), id, id, Timestamp::from_millis(0))
    }

    #[test]
    fn test_unknown_deck() -> Fallible<()> {
        let db = Database::in_memory()?;
        assert_eq!(db.get_records("nope")?, None);
        let err = db.get("nope").unwrap_err();
        assert_eq!(err.to_string(), "error: no such deck: nope.");
        Ok(())
    }

    #[test]
    fn test_put_and_get() -> Fallible<()> {
        let mut db = Database::in_memory()?;
        let cards = vec![card("a"), card("b")];
        db.put_deck("spanish", &cards)?;
        assert_eq!(db.get("spanish")?, cards);
        db.put_deck("spanish", &cards[..1])?;
        assert_eq!(db.get("spanish")?, vec![card("a")]);
        assert_eq!(db.deck_ids()?, vec!["spanish".to_string()]);
        Ok(())
    }

    #[test]
    fn test_update_by_id() -> Fallible<()> {
        let mut db = Database::in_memory()?;
        db.put_deck("d", &[card("a"), card("b"), card("c")])?;
        let mut changed = card("b");
        changed.reps = 2;
        changed.interval = 3;
        changed.ef = 2.34;
        changed.due = Timestamp::from_millis(4_000);
        changed.last_reviewed = Some(Timestamp::from_millis(1_000));
        db.update("d", changed.id(), &CardPatch::from(&changed))?;
        assert_eq!(db.get("d")?, vec![card("a"), changed, card("c")]);
        Ok(())
    }

    #[test]
    fn test_update_missing_card() -> Fallible<()> {
        let mut db = Database::in_memory()?;
        db.put_deck("d", &[card("a")])?;
        let patch = CardPatch::from(&card("z"));
        assert!(db.update("d", &CardId::new("z"), &patch).is_err());
        assert!(db.update("e", &CardId::new("a"), &patch).is_err());
        Ok(())
    }

    #[test]
    fn test_insert_card() -> Fallible<()> {
        let mut db = Database::in_memory()?;
        db.insert_card("d", &card("a"))?;
        db.insert_card("d", &card("b"))?;
        assert!(db.insert_card("d", &card("a")).is_err());
        assert_eq!(db.get("d")?, vec![card("a"), card("b")]);
        Ok(())
    }

    #[test]
    fn test_persists_across_connections() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("test.db");
        let path = path.to_str().unwrap();
        {
            let mut db = Database::new(path)?;
            db.put_deck("d", &[card("a")])?;
        }
        let db = Database::new(path)?;
        assert_eq!(db.get("d")?, vec![card("a")]);
        Ok(())
    }
}
