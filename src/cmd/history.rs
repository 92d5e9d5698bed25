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

use std::io::Write;

use sonoglyph_core::Fallible;

use crate::repository;
use crate::repository::load_history;
use crate::storage::Storage;

pub fn list_history(
    storage: &impl Storage,
    limit: Option<usize>,
    out: &mut impl Write,
) -> Fallible<()> {
    let history = load_history(storage)?;
    if history.is_empty() {
        writeln!(out, "No history yet.")?;
        return Ok(());
    }
    let limit = limit.unwrap_or(history.len());
    for entry in history.iter().take(limit) {
        writeln!(
            out,
            "{}  {:<20} {:<10} {}",
            entry.timestamp,
            entry.word,
            entry.mode.to_string(),
            entry.result.definition
        )?;
    }
    Ok(())
}

pub fn clear_history(storage: &mut impl Storage, out: &mut impl Write) -> Fallible<()> {
    let count = load_history(storage).map(|h| h.len()).unwrap_or(0);
    repository::clear_history(storage)?;
    writeln!(out, "Cleared {count} history entr{}.", if count == 1 { "y" } else { "ies" })?;
    Ok(())
}
