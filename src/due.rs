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

use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

pub fn is_due(card: &Card, now: Timestamp) -> bool {
    card.due <= now
}

/// Split cards into those due at `now` and the rest. Relative order is
/// preserved within each half.
pub fn partition(cards: Vec<Card>, now: Timestamp) -> (Vec<Card>, Vec<Card>) {
    cards.into_iter().partition(|card| is_due(card, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::card_id::CardId;

    fn card(id: &str, due: i64) -> Card {
        Card::new(CardId::new(id), id, id, Timestamp::from_millis(due))
    }

    fn ids(cards: &[Card]) -> Vec<&str> {
        cards.iter().map(|card| card.id().as_str()).collect()
    }

    #[test]
    fn test_due_at_exactly_now() {
        let now = Timestamp::from_millis(100);
        assert!(is_due(&card("a", 100), now));
        assert!(is_due(&card("b", 99), now));
        assert!(!is_due(&card("c", 101), now));
    }

    #[test]
    fn test_partition_is_stable() {
        let cards = vec![
            card("a", 50),
            card("b", 500),
            card("c", 10),
            card("d", 100),
            card("e", 101),
        ];
        let (due, not_due) = partition(cards, Timestamp::from_millis(100));
        assert_eq!(ids(&due), vec!["a", "c", "d"]);
        assert_eq!(ids(&not_due), vec!["b", "e"]);
    }

    #[test]
    fn test_partition_is_total() {
        let cards: Vec<Card> = (0..20)
            .map(|i| card(&format!("c{i}"), (i * 37) % 11))
            .collect();
        for now in [-1, 0, 5, 10, 11] {
            let (due, not_due) = partition(cards.clone(), Timestamp::from_millis(now));
            assert_eq!(due.len() + not_due.len(), cards.len());
            let mut seen: Vec<&str> = ids(&due);
            seen.extend(ids(&not_due));
            seen.sort();
            let mut expected = ids(&cards);
            expected.sort();
            assert_eq!(seen, expected);
        }
    }

    #[test]
    fn test_partition_empty() {
        let (due, not_due) = partition(Vec::new(), Timestamp::from_millis(0));
        assert!(due.is_empty());
        assert!(not_due.is_empty());
    }
}
