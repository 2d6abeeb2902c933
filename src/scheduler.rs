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

//! The ease-factor scheduler.
//!
//! A successful review grows the interval multiplicatively, scaled by the
//! card's ease factor and a per-grade multiplier. `Again` is a lapse: the card
//! restarts the 1, 2-or-3, multiplicative interval progression from scratch.

use crate::types::card::Card;
use crate::types::card::DEFAULT_EASE;
use crate::types::card::clamp_ease;
use crate::types::grade::Grade;
use crate::types::timestamp::Timestamp;

const LAPSE_PENALTY: f64 = 0.20;

fn ease_delta(grade: Grade) -> f64 {
    match grade {
        Grade::Again => -LAPSE_PENALTY,
        Grade::Hard => -0.05,
        Grade::Good => 0.02,
        Grade::Easy => 0.08,
    }
}

fn interval_multiplier(grade: Grade) -> f64 {
    match grade {
        Grade::Again => 0.0,
        Grade::Hard => 1.15,
        Grade::Good => 1.35,
        Grade::Easy => 1.7,
    }
}

/// Apply a grade to a card reviewed at `now`, returning the updated card.
pub fn schedule(card: &Card, grade: Grade, now: Timestamp) -> Card {
    let mut next = card.clone();
    let ef = if card.ef.is_finite() {
        card.ef
    } else {
        DEFAULT_EASE
    };
    // The new ease is computed first: the interval uses the post-grade value.
    next.ef = clamp_ease(ef + ease_delta(grade));
    match grade {
        Grade::Again => {
            next.reps = 0;
            next.interval = 0;
            next.lapses = card.lapses.saturating_add(1);
            next.due = now;
        }
        Grade::Hard | Grade::Good | Grade::Easy => {
            next.reps = card.reps.saturating_add(1);
            next.interval = match next.reps {
                1 => 1,
                2 => {
                    if grade == Grade::Hard {
                        2
                    } else {
                        3
                    }
                }
                _ => {
                    let raw = f64::from(card.interval) * next.ef * interval_multiplier(grade);
                    // `as` saturates, so absurd intervals cap at u32::MAX days.
                    raw.round().max(1.0) as u32
                }
            };
            next.due = now.plus_days(next.interval);
        }
    }
    next.last_reviewed = Some(now);
    next
}

/// The interval, in days, that each grade would give the card, in the order
/// `Again`, `Hard`, `Good`, `Easy`.
pub fn preview(card: &Card, now: Timestamp) -> [u32; 4] {
    Grade::ALL.map(|grade| schedule(card, grade, now).interval)
}

/// Format an interval in days compactly, e.g. for labelling grade buttons.
pub fn format_interval(days: u32) -> String {
    match days {
        0 => "now".to_string(),
        1..=6 => format!("{days}d"),
        7..=29 => format!("{}w", days / 7),
        30..=364 => format!("{}mo", days / 30),
        _ => format!("{}y", days / 365),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::card::MAX_EASE;
    use crate::types::card::MIN_EASE;
    use crate::types::card_id::CardId;
    use crate::types::timestamp::MILLIS_PER_DAY;

    const T: Timestamp = Timestamp::from_millis(1_700_000_000_000);

    fn card(reps: u32, interval: u32, ef: f64, lapses: u32) -> Card {
        let mut card = Card::new(CardId::new("c"), "term", "definition", Timestamp::EPOCH);
        card.reps = reps;
        card.interval = interval;
        card.ef = ef;
        card.lapses = lapses;
        card
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_fresh_card_graded_good() {
        let next = schedule(&card(0, 0, 2.3, 0), Grade::Good, T);
        assert_eq!(next.reps, 1);
        assert_eq!(next.interval, 1);
        assert_close(next.ef, 2.32);
        assert_eq!(next.due.into_millis(), T.into_millis() + MILLIS_PER_DAY);
        assert_eq!(next.last_reviewed, Some(T));
        assert_eq!(next.lapses, 0);
    }

    #[test]
    fn test_third_success_graded_hard() {
        let next = schedule(&card(2, 3, 2.3, 0), Grade::Hard, T);
        assert_close(next.ef, 2.25);
        assert_eq!(next.reps, 3);
        // round(3 * 2.25 * 1.15) = round(7.7625)
        assert_eq!(next.interval, 8);
        assert_eq!(next.due, T.plus_days(8));
        assert_eq!(next.last_reviewed, Some(T));
    }

    #[test]
    fn test_lapse_resets_progress() {
        let next = schedule(&card(5, 20, 2.5, 1), Grade::Again, T);
        assert_eq!(next.reps, 0);
        assert_eq!(next.interval, 0);
        assert_close(next.ef, 2.3);
        assert_eq!(next.lapses, 2);
        assert_eq!(next.due, T);
        assert_eq!(next.last_reviewed, Some(T));
    }

    #[test]
    fn test_third_success_good_and_easy() {
        let good = schedule(&card(2, 3, 2.3, 0), Grade::Good, T);
        // round(3 * 2.32 * 1.35) = round(9.396)
        assert_eq!(good.interval, 9);
        let easy = schedule(&card(2, 3, 2.3, 0), Grade::Easy, T);
        // round(3 * 2.38 * 1.7) = round(12.138)
        assert_eq!(easy.interval, 12);
    }

    #[test]
    fn test_second_success_interval() {
        assert_eq!(schedule(&card(1, 1, 2.3, 0), Grade::Hard, T).interval, 2);
        assert_eq!(schedule(&card(1, 1, 2.3, 0), Grade::Good, T).interval, 3);
        assert_eq!(schedule(&card(1, 1, 2.3, 0), Grade::Easy, T).interval, 3);
    }

    #[test]
    fn test_first_success_ignores_ease_and_time() {
        for now in [0, 1, 86_399_999, 1_700_000_000_000] {
            let now = Timestamp::from_millis(now);
            for ef in [MIN_EASE, DEFAULT_EASE, MAX_EASE] {
                for grade in [Grade::Hard, Grade::Good, Grade::Easy] {
                    let next = schedule(&card(0, 0, ef, 3), grade, now);
                    assert_eq!(next.reps, 1);
                    assert_eq!(next.interval, 1);
                    assert_eq!(next.due, now.plus_days(1));
                }
            }
        }
    }

    #[test]
    fn test_relearning_restarts_progression() {
        let lapsed = schedule(&card(6, 40, 2.6, 0), Grade::Again, T);
        let first = schedule(&lapsed, Grade::Good, T);
        assert_eq!((first.reps, first.interval), (1, 1));
        let second = schedule(&first, Grade::Good, T);
        assert_eq!((second.reps, second.interval), (2, 3));
    }

    #[test]
    fn test_ease_is_clamped() {
        let next = schedule(&card(4, 10, MAX_EASE, 0), Grade::Easy, T);
        assert_eq!(next.ef, MAX_EASE);
        let next = schedule(&card(4, 10, MIN_EASE, 0), Grade::Hard, T);
        assert_eq!(next.ef, MIN_EASE);
        let next = schedule(&card(4, 10, 1.4, 0), Grade::Again, T);
        assert_eq!(next.ef, MIN_EASE);
    }

    #[test]
    fn test_non_finite_ease_falls_back_to_default() {
        for ef in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let next = schedule(&card(2, 3, ef, 0), Grade::Good, T);
            assert_close(next.ef, 2.32);
            assert_eq!(next.interval, 9);
            let lapsed = schedule(&card(2, 3, ef, 0), Grade::Again, T);
            assert_close(lapsed.ef, 2.1);
        }
    }

    #[test]
    fn test_interval_is_at_least_one_day() {
        // Only reachable for cards built directly, never for loaded ones.
        let next = schedule(&card(2, 0, MIN_EASE, 0), Grade::Hard, T);
        assert_eq!(next.reps, 3);
        assert_eq!(next.interval, 1);
    }

    #[test]
    fn test_success_bounds() {
        for reps in [0, 1, 2, 3, 10] {
            for interval in [0, 1, 3, 25, 400] {
                for ef in [MIN_EASE, 1.5, DEFAULT_EASE, 2.75, MAX_EASE] {
                    for grade in [Grade::Hard, Grade::Good, Grade::Easy] {
                        let next = schedule(&card(reps, interval, ef, 0), grade, T);
                        assert!((MIN_EASE..=MAX_EASE).contains(&next.ef));
                        assert!(next.interval >= 1);
                        assert!(next.due > T);
                    }
                }
            }
        }
    }

    #[test]
    fn test_lapse_law() {
        for reps in [0, 1, 5] {
            for ef in [MIN_EASE, 1.45, DEFAULT_EASE, MAX_EASE] {
                let before = card(reps, reps * 4, ef, 7);
                let next = schedule(&before, Grade::Again, T);
                assert_eq!(next.reps, 0);
                assert_eq!(next.interval, 0);
                assert_eq!(next.due, T);
                assert_eq!(next.lapses, 8);
                assert_close(next.ef, (ef - 0.2).max(MIN_EASE));
            }
        }
    }

    #[test]
    fn test_easy_never_shorter_than_hard() {
        for reps in [2, 3, 8] {
            for interval in [1, 2, 9, 60] {
                for ef in [MIN_EASE, DEFAULT_EASE, MAX_EASE] {
                    let before = card(reps, interval, ef, 0);
                    let hard = schedule(&before, Grade::Hard, T);
                    let easy = schedule(&before, Grade::Easy, T);
                    assert!(easy.interval >= hard.interval);
                }
            }
        }
    }

    #[test]
    fn test_schedule_keeps_identity() {
        let before = card(3, 9, 2.4, 1);
        let next = schedule(&before, Grade::Good, T);
        assert_eq!(next.id(), before.id());
        assert_eq!(next.term(), before.term());
        assert_eq!(next.definition(), before.definition());
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview(&card(0, 0, 2.3, 0), T), [0, 1, 1, 1]);
        assert_eq!(preview(&card(2, 3, 2.3, 0), T), [0, 8, 9, 12]);
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "now");
        assert_eq!(format_interval(1), "1d");
        assert_eq!(format_interval(6), "6d");
        assert_eq!(format_interval(14), "2w");
        assert_eq!(format_interval(95), "3mo");
        assert_eq!(format_interval(800), "2y");
    }
}
