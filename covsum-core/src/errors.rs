use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IntervalError {
    #[error("Interval is empty or inverted: start={start}, end={end}")]
    Empty { start: u64, end: u64 },
}

pub type IntervalResult<T> = std::result::Result<T, IntervalError>;
