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
use crate::types::record::CardRecord;

pub fn export_deck(directory: Option<String>, deck: &str) -> Fallible<()> {
    let coll: Collection = Collection::new(directory)?;
    let json = get_export(&coll, deck)?;
    println!("{json}");
    Ok(())
}

/// Export the stored records as-is, so that nothing is lost even if some
/// records are unreadable.
fn get_export(coll: &Collection, deck: &str) -> Fallible<String> {
    let records: Vec<CardRecord> = match coll.db.get_records(deck)? {
        Some(records) => records,
        None => return fail(format!("no such deck: {deck}.")),
    };
    Ok(serde_json::to_string_pretty(&records)?)
}
