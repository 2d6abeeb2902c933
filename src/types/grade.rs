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

use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;

/// How well the user remembered a card.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Again => "again",
            Grade::Hard => "hard",
            Grade::Good => "good",
            Grade::Easy => "easy",
        }
    }

    pub fn ordinal(self) -> u8 {
        match self {
            Grade::Again => 0,
            Grade::Hard => 1,
            Grade::Good => 2,
            Grade::Easy => 3,
        }
    }
}

impl TryFrom<u8> for Grade {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Grade::Again),
            1 => Ok(Grade::Hard),
            2 => Ok(Grade::Good),
            3 => Ok(Grade::Easy),
            _ => fail(format!("invalid grade: {value}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_round_trip() {
        for grade in Grade::ALL {
            assert_eq!(Grade::try_from(grade.ordinal()), Ok(grade));
        }
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let err = Grade::try_from(4).unwrap_err();
        assert_eq!(err.to_string(), "error: invalid grade: 4");
        assert!(Grade::try_from(u8::MAX).is_err());
    }
}
