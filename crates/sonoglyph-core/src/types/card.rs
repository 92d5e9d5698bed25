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

use crate::sm2::Scheduling;
use crate::types::timestamp::Timestamp;

/// A memorized item with its own scheduling state. The content payload is
/// never inspected here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card<C> {
    /// Unique key within a collection, e.g. the word itself.
    #[serde(alias = "word")]
    pub identity: String,
    #[serde(flatten)]
    pub scheduling: Scheduling,
    #[serde(alias = "result")]
    pub content: C,
}

impl<C> Card<C> {
    pub fn new(identity: impl Into<String>, content: C, created_at: Timestamp) -> Self {
        Self {
            identity: identity.into(),
            scheduling: Scheduling::initial(created_at),
            content,
        }
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.scheduling.is_due(now)
    }

    pub fn is_new(&self) -> bool {
        self.scheduling.consecutive_correct_reps == 0
    }

    /// Case-insensitive identity comparison, used for deduplication.
    pub fn same_identity(&self, identity: &str) -> bool {
        self.identity.to_lowercase() == identity.to_lowercase()
    }
}
