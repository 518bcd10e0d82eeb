//! Interval overlap index for covsum.
//!
//! Coverage projection needs, for every region of a reference, the alignments
//! touching that region. [`IntervalTree`] answers those queries without scanning
//! the full interval list each time.
//!
//! ## Quick Start
//!
//! ```rust
//! use covsum_overlaprs::{IntervalTree, Overlapper, Interval};
//!
//! let reads = vec![
//!     Interval { start: 100u32, end: 200, val: "read1" },
//!     Interval { start: 150, end: 300, val: "read2" },
//!     Interval { start: 400, end: 500, val: "read3" },
//! ];
//!
//! let tree = IntervalTree::build(reads);
//!
//! let overlaps = tree.find(180, 250);
//! assert_eq!(overlaps.len(), 2);
//!
//! for interval in tree.find_iter(180, 250) {
//!     println!("Found overlap: {:?}", interval);
//! }
//! ```

/// Centered interval tree.
///
/// See [`IntervalTree`] for details.
pub mod interval_tree;

/// Core traits for overlap operations.
///
/// See [`Overlapper`] for the main trait.
pub mod traits;

// re-exports
pub use self::interval_tree::IntervalTree;
pub use self::traits::{Interval, Overlapper};
