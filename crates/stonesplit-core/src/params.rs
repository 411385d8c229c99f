//! Parameter validation shared by the stage crates.

/// A configuration value outside its accepted range.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid parameter `{name}`: {reason}")]
pub struct ParamError {
    pub name: &'static str,
    pub reason: &'static str,
}

impl ParamError {
    pub const fn new(name: &'static str, reason: &'static str) -> Self {
        Self { name, reason }
    }
}

pub fn ensure_finite_non_negative(name: &'static str, v: f32) -> Result<(), ParamError> {
    if !v.is_finite() {
        return Err(ParamError::new(name, "must be finite"));
    }
    if v < 0.0 {
        return Err(ParamError::new(name, "must not be negative"));
    }
    Ok(())
}

pub fn ensure_positive(name: &'static str, v: f32) -> Result<(), ParamError> {
    if !v.is_finite() || v <= 0.0 {
        return Err(ParamError::new(name, "must be a positive finite number"));
    }
    Ok(())
}

pub fn ensure_unit_interval(name: &'static str, v: f32) -> Result<(), ParamError> {
    if !(0.0..=1.0).contains(&v) {
        return Err(ParamError::new(name, "must lie in [0, 1]"));
    }
    Ok(())
}

pub fn ensure_at_least_one(name: &'static str, v: usize) -> Result<(), ParamError> {
    if v == 0 {
        return Err(ParamError::new(name, "must be at least 1"));
    }
    Ok(())
}
