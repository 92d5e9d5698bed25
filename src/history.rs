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
use sonoglyph_core::Timestamp;

use crate::content::Mnemonic;
use crate::content::Mode;

/// Default number of entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub word: String,
    pub mode: Mode,
    pub result: Mnemonic,
    pub timestamp: Timestamp,
}

impl HistoryEntry {
    pub fn new(result: Mnemonic, timestamp: Timestamp) -> Self {
        Self {
            word: result.word.clone(),
            mode: result.mode,
            result,
            timestamp,
        }
    }
}

/// Recently generated results, newest first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Put an entry at the front, dropping any older entry for the same word
    /// (ignoring case), and keep at most `limit` entries.
    pub fn record(&mut self, entry: HistoryEntry, limit: usize) {
        let word = entry.word.to_lowercase();
        self.entries.retain(|e| e.word.to_lowercase() != word);
        self.entries.insert(0, entry);
        self.entries.truncate(limit);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
