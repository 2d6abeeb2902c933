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

//! The persisted form of a card, and the lenient parse from it.
//!
//! Records come from storage that may have been written by older versions or
//! edited by hand, so every field is read as a raw JSON value. Missing or
//! malformed scheduling fields are replaced with defaults and reported; only a
//! record without an identifier is unusable.

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::types::card::Card;
use crate::types::card::DEFAULT_EASE;
use crate::types::card::MAX_EASE;
use crate::types::card::MIN_EASE;
use crate::types::card::clamp_ease;
use crate::types::card_id::CardId;
use crate::types::timestamp::Timestamp;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub term: Option<Value>,
    #[serde(default)]
    pub definition: Option<Value>,
    #[serde(default)]
    pub due: Option<Value>,
    #[serde(default)]
    pub ef: Option<Value>,
    #[serde(default)]
    pub reps: Option<Value>,
    #[serde(default)]
    pub interval: Option<Value>,
    #[serde(default)]
    pub lapses: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<Value>,
}

impl CardRecord {
    /// The record's identifier, if it has a usable one.
    pub fn card_id(&self) -> Option<CardId> {
        self.id
            .as_ref()
            .and_then(as_text)
            .filter(|id| !id.is_empty())
            .map(CardId::new)
    }
}

impl From<&Card> for CardRecord {
    fn from(card: &Card) -> Self {
        Self {
            id: Some(Value::from(card.id().as_str())),
            term: Some(Value::from(card.term())),
            definition: Some(Value::from(card.definition())),
            due: Some(Value::from(card.due.into_millis())),
            ef: Some(Value::from(card.ef)),
            reps: Some(Value::from(card.reps)),
            interval: Some(Value::from(card.interval)),
            lapses: Some(Value::from(card.lapses)),
            last_reviewed: card.last_reviewed.map(|ts| Value::from(ts.into_millis())),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ValidationIssue {
    /// The record has no identifier, so it cannot be tracked.
    MissingId,
    /// The record was usable, but the named fields were replaced.
    Defaulted {
        card: Card,
        fields: Vec<&'static str>,
    },
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::MissingId => write!(f, "card record has no identifier"),
            ValidationIssue::Defaulted { card, fields } => write!(
                f,
                "card {} had invalid fields, using defaults for: {}",
                card.id(),
                fields.join(", ")
            ),
        }
    }
}

impl Error for ValidationIssue {}

/// Parse a record strictly: `Ok` only if every field was present and valid.
pub fn parse_record(record: &CardRecord) -> Result<Card, ValidationIssue> {
    let id = record.card_id().ok_or(ValidationIssue::MissingId)?;
    let mut fields: Vec<&'static str> = Vec::new();

    let term = or_default(record.term.as_ref().and_then(as_text), "term", &mut fields);
    let definition = or_default(
        record.definition.as_ref().and_then(as_text),
        "definition",
        &mut fields,
    );
    let mut card = Card::new(id, term, definition, Timestamp::EPOCH);

    card.due = record
        .due
        .as_ref()
        .and_then(as_millis)
        .unwrap_or_else(|| {
            fields.push("due");
            Timestamp::EPOCH
        });
    card.ef = match record.ef.as_ref().and_then(as_finite) {
        Some(ef) if (MIN_EASE..=MAX_EASE).contains(&ef) => ef,
        Some(ef) => {
            fields.push("ef");
            clamp_ease(ef)
        }
        None => {
            fields.push("ef");
            DEFAULT_EASE
        }
    };
    // Progress is only trusted as a pair: a rep count needs a positive interval.
    let reps = record.reps.as_ref().and_then(as_count);
    let interval = record.interval.as_ref().and_then(as_count);
    match (reps, interval) {
        (Some(reps), Some(interval)) if reps == 0 || interval > 0 => {
            card.reps = reps;
            card.interval = interval;
        }
        _ => fields.extend(["reps", "interval"]),
    }
    card.lapses = or_default(record.lapses.as_ref().and_then(as_count), "lapses", &mut fields);
    // Absent means never reviewed; only a present, non-numeric value is bad.
    card.last_reviewed = match &record.last_reviewed {
        None | Some(Value::Null) => None,
        Some(value) => {
            let ts = as_millis(value);
            if ts.is_none() {
                fields.push("lastReviewed");
            }
            ts
        }
    };

    if fields.is_empty() {
        Ok(card)
    } else {
        Err(ValidationIssue::Defaulted { card, fields })
    }
}

/// Parse a record, recovering defaulted cards and dropping unusable ones.
pub fn load_card(record: &CardRecord) -> Option<Card> {
    match parse_record(record) {
        Ok(card) => Some(card),
        Err(ValidationIssue::Defaulted { card, fields }) => {
            log::warn!(
                "Card {}: using defaults for {}.",
                card.id().short(),
                fields.join(", ")
            );
            Some(card)
        }
        Err(ValidationIssue::MissingId) => {
            log::warn!("Dropping card record without an identifier.");
            None
        }
    }
}

pub fn load_deck(records: &[CardRecord]) -> Vec<Card> {
    records.iter().filter_map(load_card).collect()
}

fn or_default<T: Default>(value: Option<T>, name: &'static str, fields: &mut Vec<&'static str>) -> T {
    match value {
        Some(value) => value,
        None => {
            fields.push(name);
            T::default()
        }
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        // Identifiers generated from clocks are sometimes stored as numbers.
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_finite(value: &Value) -> Option<f64> {
    value.as_f64().filter(|f| f.is_finite())
}

fn as_millis(value: &Value) -> Option<Timestamp> {
    if let Some(millis) = value.as_i64() {
        return Some(Timestamp::from_millis(millis));
    }
    as_finite(value)
        .filter(|f| f.abs() < i64::MAX as f64)
        .map(|f| Timestamp::from_millis(f.trunc() as i64))
}

fn as_count(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    as_finite(value)
        .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= f64::from(u32::MAX))
        .map(|f| f as u32)
}
