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

//! Review sessions over a card collection.
//!
//! A due-only session presents every card whose review time has passed, in
//! collection order, and commits each rating through the scheduler. After
//! every rating the remaining pool is recomputed from the live collection,
//! excluding the card just rated. A practice session walks a shuffled copy
//! of the whole collection and never touches scheduling state.

use std::collections::VecDeque;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::collection::Collection;
use crate::rng::TinyRng;
use crate::rng::shuffle;
use crate::sm2::Quality;
use crate::sm2::apply_rating;
use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewMode {
    /// Only cards that are due, and ratings are scheduled.
    DueOnly,
    /// Every card, shuffled, and ratings are discarded.
    PracticeAll,
}

impl Display for ReviewMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewMode::DueOnly => write!(f, "due-only"),
            ReviewMode::PracticeAll => write!(f, "practice-all"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Showing the prompt side of the current card.
    Prompt,
    /// The answer of the current card is visible.
    Revealed,
    /// No cards left.
    Exhausted,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RateOutcome<C> {
    /// Nothing to rate, or the answer was not revealed yet.
    Ignored,
    /// The card was rescheduled and written back to the collection.
    Scheduled(Card<C>),
    /// Practice rating; nothing was written.
    Practiced,
}

pub struct Session<C> {
    mode: ReviewMode,
    current: Option<Card<C>>,
    pending: VecDeque<Card<C>>,
    revealed: bool,
    reviewed: usize,
}

impl<C: Clone> Session<C> {
    pub fn start(
        cards: &Collection<C>,
        mode: ReviewMode,
        now: Timestamp,
        rng: &mut TinyRng,
    ) -> Self {
        let queue: Vec<Card<C>> = match mode {
            ReviewMode::DueOnly => cards.due(now).cloned().collect(),
            ReviewMode::PracticeAll => shuffle(cards.iter().cloned().collect(), rng),
        };
        log::debug!(
            "Starting {mode} session with {} of {} cards",
            queue.len(),
            cards.len()
        );
        let mut pending: VecDeque<Card<C>> = queue.into();
        Self {
            mode,
            current: pending.pop_front(),
            pending,
            revealed: false,
            reviewed: 0,
        }
    }

    pub fn reveal(&mut self) {
        if self.current.is_some() {
            self.revealed = true;
        }
    }

    /// Rate the current card and advance to the next one.
    pub fn rate(
        &mut self,
        cards: &mut Collection<C>,
        quality: Quality,
        now: Timestamp,
    ) -> RateOutcome<C> {
        if !self.revealed {
            return RateOutcome::Ignored;
        }
        let current = match self.current.take() {
            Some(card) => card,
            None => return RateOutcome::Ignored,
        };
        let outcome = match self.mode {
            ReviewMode::DueOnly => {
                let base = cards.get(&current.identity).unwrap_or(&current);
                let updated = apply_rating(base, quality, now);
                if !cards.replace(updated.clone()) {
                    log::warn!("Card '{}' is no longer in the collection", updated.identity);
                }
                log::debug!(
                    "Rated '{}' {}: next review in {} day(s)",
                    updated.identity,
                    quality.as_str(),
                    updated.scheduling.interval_days
                );
                let mut pool: VecDeque<Card<C>> = cards
                    .due(now)
                    .filter(|c| c.identity != current.identity)
                    .cloned()
                    .collect();
                self.current = pool.pop_front();
                self.pending = pool;
                RateOutcome::Scheduled(updated)
            }
            ReviewMode::PracticeAll => {
                self.current = self.pending.pop_front();
                RateOutcome::Practiced
            }
        };
        self.revealed = false;
        self.reviewed += 1;
        outcome
    }
}

impl<C> Session<C> {
    pub fn mode(&self) -> ReviewMode {
        self.mode
    }

    pub fn current(&self) -> Option<&Card<C>> {
        self.current.as_ref()
    }

    /// Cards still queued after the current one.
    pub fn pending(&self) -> impl Iterator<Item = &Card<C>> {
        self.pending.iter()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Cards left to present, including the current one.
    pub fn remaining(&self) -> usize {
        self.pending.len() + usize::from(self.current.is_some())
    }

    /// Ratings accepted so far.
    pub fn reviewed(&self) -> usize {
        self.reviewed
    }

    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    pub fn phase(&self) -> Phase {
        match (&self.current, self.revealed) {
            (None, _) => Phase::Exhausted,
            (Some(_), false) => Phase::Prompt,
            (Some(_), true) => Phase::Revealed,
        }
    }

    /// Fraction of the session completed.
    pub fn progress(&self) -> f64 {
        let total = self.reviewed + self.remaining();
        if total == 0 {
            1.0
        } else {
            self.reviewed as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::types::timestamp::MS_PER_DAY;

    fn ts(millis: i64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    /// Build a collection from (identity, next review) pairs.
    fn collection(cards: &[(&str, i64)]) -> Collection<String> {
        let mut coll = Collection::new();
        for (id, due) in cards {
            let mut card = Card::new(*id, format!("content of {id}"), ts(0));
            card.scheduling.next_review_at = ts(*due);
            coll.insert(card);
        }
        coll
    }

    fn current_id<C>(session: &Session<C>) -> Option<String> {
        session.current().map(|c| c.identity.clone())
    }

    #[test]
    fn test_due_only_selects_due_cards_in_order() {
        let coll = collection(&[("a", 10), ("b", 500), ("c", 0), ("d", 100)]);
        let mut rng = TinyRng::from_seed(0);
        let session = Session::start(&coll, ReviewMode::DueOnly, ts(100), &mut rng);
        assert_eq!(current_id(&session), Some("a".to_string()));
        let pending: Vec<&str> = session.pending().map(|c| c.identity.as_str()).collect();
        assert_eq!(pending, vec!["c", "d"]);
        assert_eq!(session.remaining(), 3);
        assert_eq!(session.phase(), Phase::Prompt);
    }

    #[test]
    fn test_due_only_with_nothing_due() {
        let coll = collection(&[("a", 1000)]);
        let mut rng = TinyRng::from_seed(0);
        let mut session = Session::start(&coll, ReviewMode::DueOnly, ts(0), &mut rng);
        assert!(session.is_exhausted());
        assert_eq!(session.phase(), Phase::Exhausted);
        session.reveal();
        assert!(!session.is_revealed());
        assert_eq!(session.progress(), 1.0);
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let coll = collection(&[("a", 0)]);
        let mut rng = TinyRng::from_seed(0);
        let mut session = Session::start(&coll, ReviewMode::DueOnly, ts(0), &mut rng);
        session.reveal();
        session.reveal();
        assert!(session.is_revealed());
        assert_eq!(session.phase(), Phase::Revealed);
    }

    #[test]
    fn test_rate_before_reveal_is_ignored() {
        let mut coll = collection(&[("a", 0)]);
        let before = coll.clone();
        let mut rng = TinyRng::from_seed(0);
        let mut session = Session::start(&coll, ReviewMode::DueOnly, ts(0), &mut rng);
        assert_eq!(
            session.rate(&mut coll, Quality::Good, ts(0)),
            RateOutcome::Ignored
        );
        assert_eq!(coll, before);
        assert_eq!(current_id(&session), Some("a".to_string()));
        assert_eq!(session.reviewed(), 0);
    }

    #[test]
    fn test_rate_exhausted_session_is_ignored() {
        let mut coll = collection(&[]);
        let mut rng = TinyRng::from_seed(0);
        let mut session = Session::start(&coll, ReviewMode::DueOnly, ts(0), &mut rng);
        session.reveal();
        assert_eq!(
            session.rate(&mut coll, Quality::Good, ts(0)),
            RateOutcome::Ignored
        );
    }

    #[test]
    fn test_due_only_rating_updates_exactly_one_card() {
        let mut coll = collection(&[("a", 0), ("b", 0), ("c", 0)]);
        let before = coll.clone();
        let mut rng = TinyRng::from_seed(0);
        let now = ts(10);
        let mut session = Session::start(&coll, ReviewMode::DueOnly, now, &mut rng);
        session.reveal();
        let outcome = session.rate(&mut coll, Quality::Good, now);
        let updated = match outcome {
            RateOutcome::Scheduled(card) => card,
            other => panic!("unexpected outcome: {other:?}"),
        };
        assert_eq!(updated.identity, "a");
        assert_eq!(updated.scheduling.consecutive_correct_reps, 1);
        assert_eq!(updated.scheduling.next_review_at, ts(10 + MS_PER_DAY));
        assert_eq!(coll.get("a"), Some(&updated));
        assert_eq!(coll.get("b"), before.get("b"));
        assert_eq!(coll.get("c"), before.get("c"));
        assert_eq!(current_id(&session), Some("b".to_string()));
        assert!(!session.is_revealed());
        assert_eq!(session.reviewed(), 1);
    }

    #[test]
    fn test_due_only_runs_to_exhaustion() {
        let mut coll = collection(&[("a", 0), ("b", 50), ("later", 10_000), ("c", 20)]);
        let mut rng = TinyRng::from_seed(0);
        let now = ts(100);
        let mut session = Session::start(&coll, ReviewMode::DueOnly, now, &mut rng);
        let mut seen = vec![];
        while let Some(id) = current_id(&session) {
            seen.push(id);
            session.reveal();
            session.rate(&mut coll, Quality::Again, now);
        }
        assert_eq!(seen, vec!["a", "b", "c"]);
        assert_eq!(coll.due_count(now), 0);
        assert_eq!(session.progress(), 1.0);
        assert_eq!(session.reviewed(), 3);
    }

    /// A card that left the collection mid-session is rated from the
    /// session's copy and the session moves on.
    #[test]
    fn test_due_only_rates_card_missing_from_collection() {
        let coll = collection(&[("a", 0), ("b", 0)]);
        let mut rng = TinyRng::from_seed(0);
        let now = ts(10);
        let mut session = Session::start(&coll, ReviewMode::DueOnly, now, &mut rng);
        assert_eq!(current_id(&session), Some("a".to_string()));

        let mut coll = collection(&[("b", 0)]);
        let before = coll.clone();
        session.reveal();
        let updated = match session.rate(&mut coll, Quality::Good, now) {
            RateOutcome::Scheduled(card) => card,
            other => panic!("unexpected outcome: {other:?}"),
        };
        assert_eq!(updated.identity, "a");
        assert_eq!(updated.scheduling.consecutive_correct_reps, 1);
        assert_eq!(coll, before);
        assert_eq!(current_id(&session), Some("b".to_string()));
        assert_eq!(session.reviewed(), 1);
    }

    /// Ratings start from the collection's entry, not the copy taken when
    /// the session started.
    #[test]
    fn test_due_only_rates_live_entry() {
        let mut coll = collection(&[("a", 0), ("b", 0)]);
        let mut rng = TinyRng::from_seed(0);
        let now = ts(10);
        let mut session = Session::start(&coll, ReviewMode::DueOnly, now, &mut rng);

        let mut live = coll.get("a").cloned().unwrap();
        live.scheduling.consecutive_correct_reps = 1;
        live.scheduling.interval_days = 1;
        assert!(coll.replace(live));
        assert_eq!(session.current().map(|c| c.scheduling.consecutive_correct_reps), Some(0));

        session.reveal();
        let updated = match session.rate(&mut coll, Quality::Good, now) {
            RateOutcome::Scheduled(card) => card,
            other => panic!("unexpected outcome: {other:?}"),
        };
        assert_eq!(updated.scheduling.consecutive_correct_reps, 2);
        assert_eq!(updated.scheduling.interval_days, 6);
        assert_eq!(coll.get("a"), Some(&updated));
    }

    /// The pool is recomputed from the live collection, so a card that
    /// became due after the session started is picked up.
    #[test]
    fn test_due_only_recomputes_from_collection() {
        let mut coll = collection(&[("a", 0), ("b", 0)]);
        let mut rng = TinyRng::from_seed(0);
        let now = ts(100);
        let mut session = Session::start(&coll, ReviewMode::DueOnly, now, &mut rng);
        coll.insert(Card {
            identity: "fresh".to_string(),
            scheduling: crate::sm2::Scheduling {
                next_review_at: ts(0),
                ..crate::sm2::Scheduling::initial(ts(0))
            },
            content: "added mid-session".to_string(),
        });
        let mut seen = vec![];
        while let Some(id) = current_id(&session) {
            seen.push(id);
            session.reveal();
            session.rate(&mut coll, Quality::Good, now);
        }
        assert_eq!(seen, vec!["a", "b", "fresh"]);
    }

    /// The identity just rated is excluded from the recomputed pool, even
    /// when another entry under that identity is still due.
    #[test]
    fn test_due_only_never_repeats_just_rated() {
        let mut first = Card::new("a", "first".to_string(), ts(0));
        first.scheduling.next_review_at = ts(0);
        let mut shadow = first.clone();
        shadow.content = "shadow".to_string();
        let mut other = Card::new("b", "other".to_string(), ts(0));
        other.scheduling.next_review_at = ts(0);
        let mut coll = Collection::from(vec![first, shadow, other]);
        let mut rng = TinyRng::from_seed(0);
        let mut session = Session::start(&coll, ReviewMode::DueOnly, ts(0), &mut rng);
        session.reveal();
        session.rate(&mut coll, Quality::Good, ts(0));
        assert_eq!(current_id(&session), Some("b".to_string()));
        assert_eq!(session.remaining(), 1);
    }

    #[test]
    fn test_practice_presents_every_card_once() {
        let mut coll = collection(&[("a", 0), ("b", 1_000_000), ("c", 5), ("d", 999)]);
        let mut rng = TinyRng::from_seed(3);
        let now = ts(0);
        let mut session = Session::start(&coll, ReviewMode::PracticeAll, now, &mut rng);
        assert_eq!(session.remaining(), 4);
        let mut seen = HashSet::new();
        while let Some(id) = current_id(&session) {
            assert!(seen.insert(id));
            session.reveal();
            assert_eq!(
                session.rate(&mut coll, Quality::Easy, now),
                RateOutcome::Practiced
            );
        }
        assert_eq!(seen.len(), 4);
        assert!(session.is_exhausted());
    }

    #[test]
    fn test_practice_never_mutates_collection() {
        let mut coll = collection(&[("a", 0), ("b", 0), ("c", 1_000)]);
        let before = coll.clone();
        let mut rng = TinyRng::from_seed(11);
        for round in 0..5 {
            let mut session = Session::start(&coll, ReviewMode::PracticeAll, ts(0), &mut rng);
            while !session.is_exhausted() {
                session.reveal();
                let q = Quality::ALL[round % 5];
                session.rate(&mut coll, q, ts(round as i64));
            }
        }
        assert_eq!(coll, before);
    }

    #[test]
    fn test_practice_order_is_shuffled() {
        let ids: Vec<String> = (0..20).map(|i| format!("card{i}")).collect();
        let pairs: Vec<(&str, i64)> = ids.iter().map(|id| (id.as_str(), 0)).collect();
        let coll = collection(&pairs);
        let mut rng = TinyRng::from_seed(99);
        let session = Session::start(&coll, ReviewMode::PracticeAll, ts(0), &mut rng);
        let order: Vec<String> = session
            .current()
            .into_iter()
            .chain(session.pending())
            .map(|c| c.identity.clone())
            .collect();
        assert_eq!(order.len(), 20);
        assert_ne!(order, ids);
    }

    #[test]
    fn test_progress() {
        let mut coll = collection(&[("a", 0), ("b", 0), ("c", 0), ("d", 0)]);
        let mut rng = TinyRng::from_seed(0);
        let mut session = Session::start(&coll, ReviewMode::DueOnly, ts(0), &mut rng);
        assert_eq!(session.progress(), 0.0);
        session.reveal();
        session.rate(&mut coll, Quality::Good, ts(0));
        assert_eq!(session.progress(), 0.25);
    }
}
