//! Encoding traits shared by the field, group and target-group types
//!
//! Every serializable value also exposes inherent, array-typed encoders and
//! decoders; these traits give slice- and `Vec`-based access for callers that
//! handle encodings generically.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use subtle::{Choice, CtOption};

use crate::error::{Error, Result};

/// Trait for types that have a fixed-size canonical encoding
pub trait FixedSize {
    /// Get the size in bytes
    fn size() -> usize;
}

/// Trait for types that can be serialized to a byte representation
#[cfg(feature = "alloc")]
pub trait ByteSerializable: Sized + FixedSize {
    /// Convert to a byte vector
    fn to_bytes(&self) -> Vec<u8>;

    /// Try to create from a byte slice
    ///
    /// Slices of the wrong length are rejected with [`Error::Length`] before
    /// any decoding takes place.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;
}

/// Collapses the outcome of an inherent decoder into a [`Result`]
pub(crate) trait IntoDecodeResult<T> {
    fn into_decode_result(self, context: &'static str) -> Result<T>;
}

impl<T> IntoDecodeResult<T> for CtOption<T> {
    fn into_decode_result(self, context: &'static str) -> Result<T> {
        Option::<T>::from(self).ok_or_else(|| {
            debug_event!(context, "non-canonical field encoding");
            Error::format(context, "non-canonical field element")
        })
    }
}

impl<T> IntoDecodeResult<T> for Result<T> {
    fn into_decode_result(self, _context: &'static str) -> Result<T> {
        self
    }
}

/// Outcome of the constant-time checks run by a point decoder
///
/// Each flag is computed unconditionally; `finish` is the first place any of
/// them is turned into control flow, and it reports the first failing check.
#[derive(Clone, Copy)]
pub(crate) struct DecodeChecks {
    pub(crate) flags: Choice,
    pub(crate) canonical: Choice,
    pub(crate) on_curve: Choice,
}

impl DecodeChecks {
    pub(crate) fn finish(self, context: &'static str) -> Result<()> {
        use crate::error::validate;

        validate::format(self.flags.into(), context, "invalid flag bits")?;
        validate::format(self.canonical.into(), context, "coordinate not below the field modulus")?;
        validate::format(self.on_curve.into(), context, "point is not on the curve")
    }
}

/// Copy a slice into a fixed-size array after checking its length
pub(crate) fn to_array<const N: usize>(context: &'static str, bytes: &[u8]) -> Result<[u8; N]> {
    crate::error::validate::length(context, bytes.len(), N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    Ok(out)
}

/// Implements `FixedSize` and `ByteSerializable` on top of an inherent
/// array-typed encoder and decoder.
macro_rules! impl_byte_serializable {
    ($t:ty, $size:expr) => {
        impl_byte_serializable!($t, $size, to_bytes, from_bytes);
    };
    ($t:ty, $size:expr, $to:ident, $from:ident) => {
        impl $crate::types::FixedSize for $t {
            fn size() -> usize {
                $size
            }
        }

        #[cfg(feature = "alloc")]
        impl $crate::types::ByteSerializable for $t {
            fn to_bytes(&self) -> alloc::vec::Vec<u8> {
                (*self).$to().to_vec()
            }

            fn from_bytes(bytes: &[u8]) -> $crate::error::Result<Self> {
                use $crate::types::IntoDecodeResult;
                let array = $crate::types::to_array::<{ $size }>(stringify!($t), bytes)?;
                <$t>::$from(&array).into_decode_result(stringify!($t))
            }
        }
    };
}
