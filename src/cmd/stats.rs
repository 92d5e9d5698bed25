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

use std::fmt::Display;
use std::fmt::Formatter;
use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;
use sonoglyph_core::Collection;
use sonoglyph_core::Fallible;
use sonoglyph_core::Timestamp;

use crate::content::Mnemonic;
use crate::repository::load_cards;
use crate::repository::load_history;
use crate::storage::Storage;

/// Cards with an interval at least this long count as mature.
const MATURE_INTERVAL_DAYS: u32 = 21;

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum StatsFormat {
    /// Human-readable text.
    Plain,
    /// A JSON object.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Plain => write!(f, "plain"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Stats {
    pub total_cards: usize,
    pub due_now: usize,
    pub new_cards: usize,
    pub mature_cards: usize,
    pub average_easiness: Option<f64>,
    pub history_entries: usize,
}

pub fn compute_stats<C>(cards: &Collection<C>, history_entries: usize, now: Timestamp) -> Stats {
    let total_cards = cards.len();
    let average_easiness = if total_cards == 0 {
        None
    } else {
        let sum: f64 = cards.iter().map(|c| c.scheduling.easiness_factor).sum();
        Some(sum / total_cards as f64)
    };
    Stats {
        total_cards,
        due_now: cards.due_count(now),
        new_cards: cards.iter().filter(|c| c.is_new()).count(),
        mature_cards: cards
            .iter()
            .filter(|c| c.scheduling.interval_days >= MATURE_INTERVAL_DAYS)
            .count(),
        average_easiness,
        history_entries,
    }
}

pub fn print_stats(
    storage: &impl Storage,
    format: StatsFormat,
    now: Timestamp,
    out: &mut impl Write,
) -> Fallible<()> {
    let cards: Collection<Mnemonic> = load_cards(storage)?;
    let history = load_history(storage)?;
    let stats = compute_stats(&cards, history.len(), now);
    match format {
        StatsFormat::Plain => {
            writeln!(out, "Cards:          {}", stats.total_cards)?;
            writeln!(out, "Due now:        {}", stats.due_now)?;
            writeln!(out, "New:            {}", stats.new_cards)?;
            writeln!(out, "Mature:         {}", stats.mature_cards)?;
            match stats.average_easiness {
                Some(ef) => writeln!(out, "Avg. easiness:  {ef:.2}")?,
                None => writeln!(out, "Avg. easiness:  -")?,
            }
            writeln!(out, "History:        {}", stats.history_entries)?;
        }
        StatsFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
        }
    }
    Ok(())
}
