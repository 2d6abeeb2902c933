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

use crate::types::timestamp::Timestamp;

pub trait Clock {
    fn now(&self) -> Timestamp;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

#[cfg(test)]
pub use fixed::FixedClock;

#[cfg(test)]
mod fixed {
    use std::cell::Cell;

    use super::Clock;
    use crate::types::timestamp::Timestamp;

    /// A clock that only moves when told to.
    pub struct FixedClock {
        now: Cell<Timestamp>,
    }

    impl FixedClock {
        pub fn new(now: Timestamp) -> Self {
            Self {
                now: Cell::new(now),
            }
        }

        pub fn advance_millis(&self, millis: i64) {
            let now = self.now.get().into_millis() + millis;
            self.now.set(Timestamp::from_millis(now));
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> Timestamp {
            self.now.get()
        }
    }
}
