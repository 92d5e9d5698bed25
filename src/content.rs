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

//! The payload produced by the mnemonic generator. The scheduler treats it
//! as opaque; only the drill loop and the history list look inside.

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;

/// Aesthetic mode of a generated scene.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Cinematic,
    Ethereal,
    Industrial,
    Organic,
    Geometric,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Cinematic => write!(f, "cinematic"),
            Mode::Ethereal => write!(f, "ethereal"),
            Mode::Industrial => write!(f, "industrial"),
            Mode::Organic => write!(f, "organic"),
            Mode::Geometric => write!(f, "geometric"),
        }
    }
}

/// What kind of item a card teaches.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[default]
    Word,
    Character,
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Word => write!(f, "word"),
            Source::Character => write!(f, "character"),
        }
    }
}

/// One sound of the word and the object standing in for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhoneticMap {
    pub sound: String,
    pub object: String,
    pub role: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mnemonic {
    pub word: String,
    #[serde(default)]
    pub mode: Mode,
    pub definition: String,
    #[serde(default)]
    pub phonetic_mapping: Vec<PhoneticMap>,
    #[serde(default)]
    pub functional_extraction: Vec<String>,
    pub scene_description: String,
    #[serde(default)]
    pub render_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub source: Source,
}

impl Mnemonic {
    pub fn new(
        word: impl Into<String>,
        definition: impl Into<String>,
        scene_description: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            mode: Mode::default(),
            definition: definition.into(),
            phonetic_mapping: Vec::new(),
            functional_extraction: Vec::new(),
            scene_description: scene_description.into(),
            render_prompt: String::new(),
            image_url: None,
            source: Source::default(),
        }
    }
}
