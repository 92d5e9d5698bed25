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

//! Key/value persistence for the card collection and history.

#[cfg(test)]
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::io::Write;
use std::path::PathBuf;

use sonoglyph_core::Fallible;
use sonoglyph_core::fail;
use tempfile::NamedTempFile;

pub trait Storage {
    fn get(&self, key: &str) -> Fallible<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Fallible<()>;

    fn remove(&mut self, key: &str) -> Fallible<()>;
}

/// Stores each key as `<key>.json` in a directory.
pub struct FileStorage {
    directory: PathBuf,
}

impl FileStorage {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn path(&self, key: &str) -> Fallible<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return fail(format!("invalid storage key: '{key}'"));
        }
        Ok(self.directory.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        let path = self.path(key)?;
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Fallible<()> {
        let path = self.path(key)?;
        fs::create_dir_all(&self.directory)?;
        // Replace atomically through a sibling temp file. The temp file is
        // deleted if anything fails before the rename.
        let mut tmp = NamedTempFile::new_in(&self.directory)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(&path).map_err(|e| e.error)?;
        log::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Fallible<()> {
        let path = self.path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory storage for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStorage {
    inner: HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        Ok(self.inner.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Fallible<()> {
        self.inner.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Fallible<()> {
        self.inner.remove(key);
        Ok(())
    }
}
