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

//! Registering generated results as new cards.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Deserialize;
use sonoglyph_core::Card;
use sonoglyph_core::Collection;
use sonoglyph_core::Fallible;
use sonoglyph_core::Timestamp;
use sonoglyph_core::fail;

use crate::content::Mnemonic;
use crate::history::HistoryEntry;
use crate::repository::load_cards;
use crate::repository::load_history;
use crate::repository::save_cards;
use crate::repository::save_history;
use crate::storage::Storage;

/// A generator export: one result or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportFile {
    One(Box<Mnemonic>),
    Many(Vec<Mnemonic>),
}

/// Trim the word and reject results without one.
fn normalize(result: Mnemonic) -> Fallible<Mnemonic> {
    let word = result.word.trim().to_string();
    if word.is_empty() {
        return fail("word must not be empty.");
    }
    Ok(Mnemonic { word, ..result })
}

/// Record generated results: a new card for each word not already in the
/// collection, and a history entry for every result. Nothing is written
/// unless every result is valid. Returns the number of cards created.
pub fn register_all(
    storage: &mut impl Storage,
    results: Vec<Mnemonic>,
    now: Timestamp,
    history_limit: usize,
) -> Fallible<usize> {
    let results = results
        .into_iter()
        .map(normalize)
        .collect::<Fallible<Vec<_>>>()?;

    let mut cards: Collection<Mnemonic> = load_cards(storage)?;
    let mut history = load_history(storage)?;
    let mut added = 0;
    for result in results {
        if cards.insert(Card::new(result.word.clone(), result.clone(), now)) {
            log::info!("Added card '{}'", result.word);
            added += 1;
        } else {
            log::debug!("Card '{}' already exists", result.word);
        }
        history.record(HistoryEntry::new(result, now), history_limit);
    }

    if added > 0 {
        save_cards(storage, &cards)?;
    }
    save_history(storage, &history)?;
    Ok(added)
}

/// Record a single generated result. Returns whether a card was created.
pub fn register(
    storage: &mut impl Storage,
    result: Mnemonic,
    now: Timestamp,
    history_limit: usize,
) -> Fallible<bool> {
    Ok(register_all(storage, vec![result], now, history_limit)? > 0)
}

pub fn add_card(
    storage: &mut impl Storage,
    result: Mnemonic,
    now: Timestamp,
    history_limit: usize,
    out: &mut impl Write,
) -> Fallible<()> {
    let word = result.word.trim().to_string();
    if register(storage, result, now, history_limit)? {
        writeln!(out, "Added '{word}'. First review in 1 day.")?;
    } else {
        writeln!(out, "'{word}' is already in the collection.")?;
    }
    Ok(())
}

pub fn import_results(
    storage: &mut impl Storage,
    path: &Path,
    now: Timestamp,
    history_limit: usize,
    out: &mut impl Write,
) -> Fallible<()> {
    if !path.exists() {
        return fail(format!("file {} does not exist.", path.display()));
    }
    let parsed: ImportFile = serde_json::from_str(&fs::read_to_string(path)?)?;
    let results = match parsed {
        ImportFile::One(result) => vec![*result],
        ImportFile::Many(results) => results,
    };
    let total = results.len();
    let added = register_all(storage, results, now, history_limit)?;
    writeln!(out, "Imported {total} result(s), {added} new card(s).")?;
    Ok(())
}
