// Copyright 2026 The Sonoglyph Authors
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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

/// The easiness factor never drops below this.
pub const MIN_EASINESS_FACTOR: f64 = 1.3;

/// The easiness factor of a card that has never been rated.
pub const INITIAL_EASINESS_FACTOR: f64 = 2.5;

/// Interval after a failure, and after the first success.
const FIRST_INTERVAL: u32 = 1;

/// Interval after the second consecutive success.
const SECOND_INTERVAL: u32 = 6;

pub type EasinessFactor = f64;

/// A recall rating on the 1-5 scale. Ratings of 3 and above pass.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Quality {
    Again = 1,
    Hard = 2,
    Ok = 3,
    Good = 4,
    Easy = 5,
}

impl Quality {
    pub const ALL: [Quality; 5] = [
        Quality::Again,
        Quality::Hard,
        Quality::Ok,
        Quality::Good,
        Quality::Easy,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Quality::Again => "again",
            Quality::Hard => "hard",
            Quality::Ok => "ok",
            Quality::Good => "good",
            Quality::Easy => "easy",
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn is_pass(self) -> bool {
        self >= Quality::Ok
    }
}

impl From<Quality> for u8 {
    fn from(q: Quality) -> u8 {
        q.value()
    }
}

impl TryFrom<u8> for Quality {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Quality::Again),
            2 => Ok(Quality::Hard),
            3 => Ok(Quality::Ok),
            4 => Ok(Quality::Good),
            5 => Ok(Quality::Easy),
            _ => fail(format!("quality must be between 1 and 5, got {value}")),
        }
    }
}

/// Accepts either a digit or one of the rating labels.
impl TryFrom<String> for Quality {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim().to_lowercase();
        if let Ok(n) = trimmed.parse::<u8>() {
            return Quality::try_from(n);
        }
        Quality::ALL
            .into_iter()
            .find(|q| q.as_str() == trimmed)
            .ok_or_else(|| ErrorReport::new(format!("invalid quality: '{value}'")))
    }
}

/// The scheduling state of a card.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheduling {
    #[serde(alias = "ef")]
    pub easiness_factor: EasinessFactor,
    #[serde(alias = "interval")]
    pub interval_days: u32,
    #[serde(alias = "reps")]
    pub consecutive_correct_reps: u32,
    #[serde(alias = "nextReview")]
    pub next_review_at: Timestamp,
}

impl Scheduling {
    /// Scheduling for a card created at `created_at`. It first comes due a
    /// day later.
    pub fn initial(created_at: Timestamp) -> Self {
        Self {
            easiness_factor: INITIAL_EASINESS_FACTOR,
            interval_days: FIRST_INTERVAL,
            consecutive_correct_reps: 0,
            next_review_at: created_at.plus_days(FIRST_INTERVAL),
        }
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review_at <= now
    }
}

/// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floored at 1.3.
pub fn new_easiness_factor(ef: EasinessFactor, quality: Quality) -> EasinessFactor {
    let d = 5.0 - f64::from(quality.value());
    f64::max(MIN_EASINESS_FACTOR, ef + (0.1 - d * (0.08 + d * 0.02)))
}

pub fn update_scheduling(state: Scheduling, quality: Quality, now: Timestamp) -> Scheduling {
    let Scheduling {
        easiness_factor,
        interval_days,
        consecutive_correct_reps,
        ..
    } = state;
    let (interval_days, consecutive_correct_reps) = if quality.is_pass() {
        let interval = match consecutive_correct_reps {
            0 => FIRST_INTERVAL,
            1 => SECOND_INTERVAL,
            _ => {
                let grown = (f64::from(interval_days) * easiness_factor).round();
                (grown as u32).max(FIRST_INTERVAL)
            }
        };
        (interval, consecutive_correct_reps + 1)
    } else {
        (FIRST_INTERVAL, 0)
    };
    Scheduling {
        easiness_factor: new_easiness_factor(easiness_factor, quality),
        interval_days,
        consecutive_correct_reps,
        next_review_at: now.plus_days(interval_days),
    }
}

/// Rate a card. Only the scheduling fields change.
pub fn apply_rating<C: Clone>(card: &Card<C>, quality: Quality, now: Timestamp) -> Card<C> {
    Card {
        scheduling: update_scheduling(card.scheduling, quality, now),
        ..card.clone()
    }
}

/// The interval each rating would produce, indexed by `quality - 1`.
pub fn preview_intervals(state: Scheduling) -> [u32; 5] {
    let epoch = Timestamp::from_millis(0);
    Quality::ALL.map(|q| update_scheduling(state, q, epoch).interval_days)
}

/// Format an interval in days as a short human-readable string.
pub fn format_interval(days: u32) -> String {
    match days {
        0 => "now".to_string(),
        1..=6 => format!("{days}d"),
        7..=29 => format!("{}w", days / 7),
        30..=364 => format!("{}mo", days / 30),
        _ => format!("{}y", days / 365),
    }
}
