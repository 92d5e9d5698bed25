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

use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

/// An ordered set of cards keyed by identity. Order matters: due cards are
/// presented in collection order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<C> {
    cards: Vec<Card<C>>,
}

impl<C> Collection<C> {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Append a card, unless one with the same identity (ignoring case) is
    /// already present. Returns whether the card was added.
    pub fn insert(&mut self, card: Card<C>) -> bool {
        if self.contains(&card.identity) {
            return false;
        }
        self.cards.push(card);
        true
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.cards.iter().any(|c| c.same_identity(identity))
    }

    pub fn get(&self, identity: &str) -> Option<&Card<C>> {
        self.cards.iter().find(|c| c.identity == identity)
    }

    /// Overwrite the first card whose identity matches exactly. Returns
    /// false if there is no such card.
    pub fn replace(&mut self, card: Card<C>) -> bool {
        match self.cards.iter_mut().find(|c| c.identity == card.identity) {
            Some(slot) => {
                *slot = card;
                true
            }
            None => false,
        }
    }

    /// Cards due at `now`, in collection order.
    pub fn due(&self, now: Timestamp) -> impl Iterator<Item = &Card<C>> {
        self.cards.iter().filter(move |c| c.is_due(now))
    }

    pub fn due_count(&self, now: Timestamp) -> usize {
        self.due(now).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card<C>> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl<C> Default for Collection<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> From<Vec<Card<C>>> for Collection<C> {
    fn from(cards: Vec<Card<C>>) -> Self {
        Self { cards }
    }
}

impl<'a, C> IntoIterator for &'a Collection<C> {
    type Item = &'a Card<C>;
    type IntoIter = std::slice::Iter<'a, Card<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
