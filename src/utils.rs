use std::num::ParseFloatError;

use thiserror::Error;

use crate::SignalRange;

/// Fixed-point rendering of `val` with `n` digits after the decimal point.
pub fn precise_to_string(val: f64, n: usize) -> String {
    format!("{val:.n$}")
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseRangeError {
    #[error("could not find '..' in range `{0}`")]
    MissingSeparator(String),

    #[error(transparent)]
    Float(#[from] ParseFloatError),
}

/// Parse `"low..high"` into the half-open signal range `(low, high]`.
pub fn parse_signal_range(s: &str) -> Result<SignalRange, ParseRangeError> {
    let v = s.split("..").collect::<Vec<_>>();
    if v.len() != 2 {
        return Err(ParseRangeError::MissingSeparator(s.to_string()));
    }
    let low  = v[0].trim().parse()?;
    let high = v[1].trim().parse()?;
    Ok(SignalRange::new(low, high))
}
