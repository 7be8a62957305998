//! docunit-match: the structural dataset matcher.
//!
//! Compares an expected dataset (developer-authored, possibly carrying
//! typed-value kinds and comparison operators) against an actual dataset
//! extracted from a live store, under expected-subset semantics. Produces a
//! [`MatchResult`] whose failure message reads as a test-failure
//! explanation; configuration mistakes in the expected data surface as
//! [`docunit_core::DocUnitError`] instead.

mod compare;
pub mod matcher;

pub use matcher::{assert_matches, MatchResult};
