//! Validation utilities for decoders and batch operations

use super::{Error, Result};

/// Validate an argument condition
#[inline(always)]
pub fn parameter(condition: bool, name: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        debug_event!(name, reason, "argument rejected");
        return Err(Error::argument(name, reason));
    }
    Ok(())
}

/// Validate a length
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        debug_event!(context, expected, actual, "length rejected");
        return Err(Error::Length {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate an encoding check
///
/// `condition` must already be a public value: decoders evaluate every check
/// in constant time and only collapse the combined result here.
#[inline(always)]
pub fn format(condition: bool, context: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        debug_event!(context, reason, "encoding rejected");
        return Err(Error::format(context, reason));
    }
    Ok(())
}
