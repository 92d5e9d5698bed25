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

use serde::Serialize;
use serde::de::DeserializeOwned;
use sonoglyph_core::Collection;
use sonoglyph_core::ErrorReport;
use sonoglyph_core::Fallible;

use crate::history::History;
use crate::storage::Storage;

pub const CARDS_KEY: &str = "sonoglyph_cards";
pub const HISTORY_KEY: &str = "sonoglyph_history";

fn load<T: DeserializeOwned + Default>(storage: &impl Storage, key: &str) -> Fallible<T> {
    match storage.get(key)? {
        Some(data) => serde_json::from_str(&data)
            .map_err(|e| ErrorReport::new(format!("failed to load '{key}': {e}"))),
        None => Ok(T::default()),
    }
}

fn save<T: Serialize>(storage: &mut impl Storage, key: &str, value: &T) -> Fallible<()> {
    let data = serde_json::to_string(value)?;
    storage.set(key, &data)
}

pub fn load_cards<C: DeserializeOwned>(storage: &impl Storage) -> Fallible<Collection<C>> {
    load(storage, CARDS_KEY)
}

pub fn save_cards<C: Serialize>(storage: &mut impl Storage, cards: &Collection<C>) -> Fallible<()> {
    save(storage, CARDS_KEY, cards)?;
    log::debug!("Saved {} cards", cards.len());
    Ok(())
}

pub fn load_history(storage: &impl Storage) -> Fallible<History> {
    load(storage, HISTORY_KEY)
}

pub fn save_history(storage: &mut impl Storage, history: &History) -> Fallible<()> {
    save(storage, HISTORY_KEY, history)
}

/// Forget every history entry. Cards are untouched.
pub fn clear_history(storage: &mut impl Storage) -> Fallible<()> {
    storage.remove(HISTORY_KEY)?;
    log::debug!("Cleared history");
    Ok(())
}
