//! Core models and readers shared by the covsum crates.
//!
//! The models here describe read alignments projected onto reference sequences:
//! [`Interval`](models::Interval) is one aligned span, [`Region`](models::Region)
//! is a window of a reference, and [`ReferenceIntervals`](models::ReferenceIntervals)
//! bundles everything known about a single reference.
pub mod errors;
pub mod models;
pub mod utils;
