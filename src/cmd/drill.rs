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

//! Drilling cards in the terminal.

use std::io::BufRead;
use std::io::Write;

use sonoglyph_core::Card;
use sonoglyph_core::Collection;
use sonoglyph_core::Fallible;
use sonoglyph_core::Quality;
use sonoglyph_core::RateOutcome;
use sonoglyph_core::ReviewMode;
use sonoglyph_core::Session;
use sonoglyph_core::Timestamp;
use sonoglyph_core::TinyRng;
use sonoglyph_core::sm2::format_interval;
use sonoglyph_core::sm2::preview_intervals;

use crate::content::Mnemonic;
use crate::repository::load_cards;
use crate::repository::save_cards;
use crate::storage::Storage;

#[derive(Debug, PartialEq)]
pub struct DrillSummary {
    pub reviewed: usize,
    pub remaining: usize,
}

impl DrillSummary {
    pub fn completed(&self) -> bool {
        self.remaining == 0
    }
}

/// What the user typed at a prompt.
enum Reply {
    Line(String),
    Quit,
}

fn prompt(input: &mut impl BufRead, out: &mut impl Write, text: &str) -> Fallible<Reply> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(Reply::Quit);
    }
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        Ok(Reply::Quit)
    } else {
        Ok(Reply::Line(line.to_string()))
    }
}

fn previews(card: &Card<Mnemonic>) -> String {
    let intervals = preview_intervals(card.scheduling);
    Quality::ALL
        .iter()
        .zip(intervals)
        .map(|(q, days)| format!("{} {}={}", q.value(), q.as_str(), format_interval(days)))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Run a review session over the stored collection. In due-only mode the
/// collection is saved after every rating.
pub fn drill<S, R, W, F>(
    storage: &mut S,
    mode: ReviewMode,
    input: &mut R,
    out: &mut W,
    clock: F,
    rng: &mut TinyRng,
) -> Fallible<DrillSummary>
where
    S: Storage,
    R: BufRead,
    W: Write,
    F: Fn() -> Timestamp,
{
    let mut cards: Collection<Mnemonic> = load_cards(storage)?;
    if cards.is_empty() {
        writeln!(out, "No cards yet -- add some words first!")?;
        return Ok(DrillSummary {
            reviewed: 0,
            remaining: 0,
        });
    }

    let mut session = Session::start(&cards, mode, clock(), rng);
    if session.is_exhausted() {
        writeln!(out, "All caught up! No cards due for review.")?;
        return Ok(DrillSummary {
            reviewed: 0,
            remaining: 0,
        });
    }
    writeln!(out, "{} card(s) in this {mode} session.", session.remaining())?;

    'session: while let Some(card) = session.current().cloned() {
        writeln!(out)?;
        writeln!(out, "[{} left] Recall the {}:", session.remaining(), card.content.source)?;
        writeln!(out, "{}", card.content.scene_description)?;
        match prompt(input, out, "Press Enter to reveal (q to quit): ")? {
            Reply::Quit => break 'session,
            Reply::Line(_) => session.reveal(),
        }

        writeln!(out, "{}", card.identity)?;
        writeln!(out, "{}", card.content.definition)?;
        if let Some(url) = &card.content.image_url {
            writeln!(out, "{url}")?;
        }
        if mode == ReviewMode::DueOnly {
            writeln!(out, "{}", previews(&card))?;
        }

        let quality = loop {
            match prompt(input, out, "How well did you recall it? [1-5]: ")? {
                Reply::Quit => break 'session,
                Reply::Line(line) => match Quality::try_from(line) {
                    Ok(q) => break q,
                    Err(e) => writeln!(out, "{e}")?,
                },
            }
        };

        match session.rate(&mut cards, quality, clock()) {
            RateOutcome::Scheduled(updated) => {
                save_cards(storage, &cards)?;
                writeln!(
                    out,
                    "Next review in {}.",
                    format_interval(updated.scheduling.interval_days)
                )?;
            }
            RateOutcome::Practiced => {}
            RateOutcome::Ignored => log::warn!("Rating for '{}' was ignored", card.identity),
        }
    }

    let summary = DrillSummary {
        reviewed: session.reviewed(),
        remaining: session.remaining(),
    };
    writeln!(out)?;
    if summary.completed() {
        writeln!(out, "Session complete: {} card(s) reviewed.", summary.reviewed)?;
    } else {
        writeln!(
            out,
            "Session ended: {} reviewed, {} remaining.",
            summary.reviewed, summary.remaining
        )?;
    }
    Ok(summary)
}
