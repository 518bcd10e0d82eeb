pub mod interval;
pub mod reference;
pub mod region;

// re-export for cleaner imports
pub use self::interval::Interval;
pub use self::reference::ReferenceIntervals;
pub use self::region::Region;
