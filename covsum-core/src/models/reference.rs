use crate::models::Interval;

///
/// All alignment intervals collected for one reference sequence, along with
/// the reference's total length.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceIntervals {
    pub name: String,
    pub length: u32,
    pub intervals: Vec<Interval<u32, ()>>,
}

impl ReferenceIntervals {
    pub fn new(name: impl Into<String>, length: u32) -> Self {
        ReferenceIntervals {
            name: name.into(),
            length,
            intervals: Vec::new(),
        }
    }

    pub fn with_intervals(
        name: impl Into<String>,
        length: u32,
        intervals: Vec<Interval<u32, ()>>,
    ) -> Self {
        ReferenceIntervals {
            name: name.into(),
            length,
            intervals,
        }
    }

    pub fn push(&mut self, start: u32, end: u32) {
        self.intervals.push(Interval {
            start,
            end,
            val: (),
        });
    }
}
