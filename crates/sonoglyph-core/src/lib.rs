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

//! sonoglyph-core: scheduling and review sessions for mnemonic flashcards.
//!
//! This library provides:
//! - The SM-2 scheduler
//! - Card and collection types, generic over the card content
//! - Review sessions in due-only and practice modes

pub mod collection;
pub mod error;
pub mod rng;
pub mod session;
pub mod sm2;
pub mod types;

// Re-exports for convenience
pub use collection::Collection;
pub use error::{ErrorReport, Fallible, fail};
pub use rng::TinyRng;
pub use session::{Phase, RateOutcome, ReviewMode, Session};
pub use sm2::{Quality, Scheduling, apply_rating, update_scheduling};
pub use types::card::Card;
pub use types::timestamp::Timestamp;
