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

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use sonoglyph_core::Fallible;
use sonoglyph_core::fail;

use crate::history::DEFAULT_HISTORY_LIMIT;

/// Read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "sonoglyph.toml";

pub const DEFAULT_STORE_DIR: &str = ".sonoglyph";

/// Contents of the config file. Every field is optional.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub store_dir: Option<PathBuf>,
    pub history_limit: Option<usize>,
}

impl ConfigFile {
    pub fn parse(text: &str) -> Fallible<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load an explicitly named config file, or the default one if present.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return fail(format!("config file {} does not exist.", path.display()));
                }
                Self::parse(&fs::read_to_string(path)?)
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    log::debug!("Reading {DEFAULT_CONFIG_FILE}");
                    Self::parse(&fs::read_to_string(path)?)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Effective settings after merging the config file with flags.
#[derive(Debug, PartialEq)]
pub struct Settings {
    pub store_dir: PathBuf,
    pub history_limit: usize,
}

impl Settings {
    pub fn resolve(file: ConfigFile, store_flag: Option<PathBuf>) -> Fallible<Self> {
        let history_limit = file.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        if history_limit == 0 {
            return fail("history_limit must be at least 1.");
        }
        let store_dir = store_flag
            .or(file.store_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR));
        Ok(Self {
            store_dir,
            history_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_parse_full() -> Fallible<()> {
        let file = ConfigFile::parse("store_dir = \"/tmp/cards\"\nhistory_limit = 20\n")?;
        assert_eq!(file.store_dir, Some(PathBuf::from("/tmp/cards")));
        assert_eq!(file.history_limit, Some(20));
        Ok(())
    }

    #[test]
    fn test_parse_empty() -> Fallible<()> {
        assert_eq!(ConfigFile::parse("")?, ConfigFile::default());
        Ok(())
    }

    #[test]
    fn test_parse_unknown_key() {
        assert!(ConfigFile::parse("colour = \"red\"").is_err());
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = ConfigFile::load(Some(Path::new("./no-such-config.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_explicit_file() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("sonoglyph.toml");
        fs::write(&path, "history_limit = 5")?;
        let file = ConfigFile::load(Some(&path))?;
        assert_eq!(file.history_limit, Some(5));
        Ok(())
    }

    #[test]
    fn test_resolve_defaults() -> Fallible<()> {
        let settings = Settings::resolve(ConfigFile::default(), None)?;
        assert_eq!(settings.store_dir, PathBuf::from(DEFAULT_STORE_DIR));
        assert_eq!(settings.history_limit, DEFAULT_HISTORY_LIMIT);
        Ok(())
    }

    #[test]
    fn test_flag_overrides_file() -> Fallible<()> {
        let file = ConfigFile {
            store_dir: Some(PathBuf::from("from-file")),
            history_limit: None,
        };
        let settings = Settings::resolve(file, Some(PathBuf::from("from-flag")))?;
        assert_eq!(settings.store_dir, PathBuf::from("from-flag"));
        Ok(())
    }

    #[test]
    fn test_zero_history_limit() {
        let file = ConfigFile {
            store_dir: None,
            history_limit: Some(0),
        };
        assert!(Settings::resolve(file, None).is_err());
    }
}
