// src/error.rs

/// Everything that can go wrong while building, filling or rendering a
/// measurement record.
#[derive(thiserror::Error, Debug)]
pub enum MeasureError {
    #[error("failed to allocate frequency table of {slots} slots")]
    Alloc { slots: usize },
    #[error("Invalid qubit number: {0}")]
    InvalidQubitNum(usize),
    #[error("shot number must be at least 1")]
    InvalidShotNum,
    #[error("state number must be at least 1")]
    InvalidStateNum,
    #[error("too many qubit ids: {0}")]
    TooManyQubitIds(usize),
    #[error("bell measurement needs exactly two distinct qubit ids")]
    InvalidBellQubits,
    #[error("outcome {index} out of range for {state_num} states")]
    OutcomeOutOfRange { index: usize, state_num: usize },
    #[error("frequency counter for outcome {0} is full")]
    CountOverflow(usize),
    #[error("no shots recorded")]
    NoShots,
    #[error("bell measurement needs 4 states, record has {0}")]
    BellStateNum(usize),
    #[error("index {0} is not a bell state")]
    MalformedBell(usize),
    #[error("index {index} does not fit in {width} digits")]
    Format { width: usize, index: usize },
    #[error("expected {expected} amplitudes, got {actual}")]
    AmplitudeCount { expected: usize, actual: usize },
    #[error("bad amplitude {0}")]
    Amplitude(String),
    #[error("invalid outcome distribution: {0}")]
    Distribution(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MeasureError>;
