//! Error handling for BLS12-381 operations
//!
//! Arithmetic on field and group elements never fails; every fallible path is
//! either a decoder, an operation with an undefined result (square root of a
//! non-residue, inverse of zero) or a batch call with mismatched inputs.

#[cfg(not(feature = "std"))]
use core::fmt;

/// Broad category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed, out-of-range, off-curve or wrong-subgroup input bytes
    Format,
    /// A mathematically undefined result was requested of valid values
    Arithmetic,
    /// Inversion of the additive identity
    DivideByZero,
    /// Mismatched or otherwise unusable arguments to a batch operation
    Argument,
}

/// The error type for BLS12-381 operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum Error {
    /// Encoding rejected by a decoder
    #[cfg_attr(feature = "std", error("invalid encoding for {context}: {reason}"))]
    Format {
        /// Type or operation that rejected the input
        context: &'static str,
        /// Which check failed
        reason: &'static str,
    },

    /// Slice-based decoder received the wrong number of bytes
    #[cfg_attr(
        feature = "std",
        error("invalid length for {context}: expected {expected}, got {actual}")
    )]
    Length {
        /// Type or operation that rejected the input
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Undefined arithmetic result
    #[cfg_attr(feature = "std", error("arithmetic error in {operation}: {reason}"))]
    Arithmetic {
        /// Operation that failed
        operation: &'static str,
        /// Additional details about the failure
        reason: &'static str,
    },

    /// Inversion of zero
    #[cfg_attr(feature = "std", error("division by zero in {context}"))]
    DivideByZero {
        /// Operation that attempted the inversion
        context: &'static str,
    },

    /// Invalid argument to a batch operation
    #[cfg_attr(feature = "std", error("invalid argument '{name}': {reason}"))]
    Argument {
        /// Name of the invalid argument
        name: &'static str,
        /// Reason why the argument is invalid
        reason: &'static str,
    },
}

impl Error {
    /// Shorthand to create a Format error
    pub const fn format(context: &'static str, reason: &'static str) -> Self {
        Error::Format { context, reason }
    }

    /// Shorthand to create an Arithmetic error
    pub const fn arithmetic(operation: &'static str, reason: &'static str) -> Self {
        Error::Arithmetic { operation, reason }
    }

    /// Shorthand to create a DivideByZero error
    pub const fn divide_by_zero(context: &'static str) -> Self {
        Error::DivideByZero { context }
    }

    /// Shorthand to create an Argument error
    pub const fn argument(name: &'static str, reason: &'static str) -> Self {
        Error::Argument { name, reason }
    }

    /// The category of this error
    ///
    /// A length mismatch on a decoder is a format failure.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Format { .. } | Error::Length { .. } => ErrorKind::Format,
            Error::Arithmetic { .. } => ErrorKind::Arithmetic,
            Error::DivideByZero { .. } => ErrorKind::DivideByZero,
            Error::Argument { .. } => ErrorKind::Argument,
        }
    }
}

/// Result type for BLS12-381 operations
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(not(feature = "std"))]
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Format { context, reason } => {
                write!(f, "invalid encoding for {}: {}", context, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => write!(
                f,
                "invalid length for {}: expected {}, got {}",
                context, expected, actual
            ),
            Error::Arithmetic { operation, reason } => {
                write!(f, "arithmetic error in {}: {}", operation, reason)
            }
            Error::DivideByZero { context } => write!(f, "division by zero in {}", context),
            Error::Argument { name, reason } => {
                write!(f, "invalid argument '{}': {}", name, reason)
            }
        }
    }
}

// Include the validation submodule
pub mod validate;
