//! serde support through the canonical byte encodings
//!
//! Human-readable formats get a lowercase hex string; binary formats get a
//! fixed-length tuple of bytes. Points use their compressed form, and
//! deserialization runs the full validating decoder.

use alloc::string::String;
use core::fmt;
use core::marker::PhantomData;

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeTuple, Serializer};

use crate::error::Result;
use crate::field::{Fp, Fp12, Fp2, Fp6};
use crate::g1::{G1Affine, G1Projective};
use crate::g2::{G2Affine, G2Projective};
use crate::pairings::Gt;
use crate::scalar::Scalar;
use crate::types::IntoDecodeResult;

fn serialize_array<S: Serializer, const N: usize>(
    bytes: &[u8; N],
    serializer: S,
) -> core::result::Result<S::Ok, S::Error> {
    if serializer.is_human_readable() {
        serializer.serialize_str(&hex::encode(bytes))
    } else {
        let mut tup = serializer.serialize_tuple(N)?;
        for byte in bytes.iter() {
            tup.serialize_element(byte)?;
        }
        tup.end()
    }
}

struct ArrayVisitor<const N: usize>(PhantomData<[u8; N]>);

impl<'de, const N: usize> Visitor<'de> for ArrayVisitor<N> {
    type Value = [u8; N];

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} bytes or a hex string of {} characters", N, 2 * N)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> core::result::Result<Self::Value, E> {
        let mut out = [0u8; N];
        hex::decode_to_slice(v, &mut out).map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))?;
        Ok(out)
    }

    fn visit_string<E: de::Error>(self, v: String) -> core::result::Result<Self::Value, E> {
        self.visit_str(&v)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> core::result::Result<Self::Value, A::Error> {
        let mut out = [0u8; N];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(i, &self))?;
        }
        Ok(out)
    }
}

fn deserialize_array<'de, D: Deserializer<'de>, const N: usize>(
    deserializer: D,
) -> core::result::Result<[u8; N], D::Error> {
    if deserializer.is_human_readable() {
        deserializer.deserialize_str(ArrayVisitor::<N>(PhantomData))
    } else {
        deserializer.deserialize_tuple(N, ArrayVisitor::<N>(PhantomData))
    }
}

/// Wires a type's array encoder and decoder into serde
macro_rules! impl_serde {
    ($t:ty, $size:expr, $to:expr, $from:expr) => {
        impl serde::Serialize for $t {
            fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
                let bytes: [u8; $size] = $to(self);
                serialize_array(&bytes, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $t {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
                let bytes = deserialize_array::<D, { $size }>(deserializer)?;
                let decoded: Result<$t> = $from(&bytes).into_decode_result(stringify!($t));
                decoded.map_err(de::Error::custom)
            }
        }
    };
}

impl_serde!(Fp, 48, |v: &Fp| v.to_bytes(), Fp::from_bytes);
impl_serde!(Fp2, 96, |v: &Fp2| v.to_bytes(), Fp2::from_bytes);
impl_serde!(Fp6, 288, |v: &Fp6| v.to_bytes(), Fp6::from_bytes);
impl_serde!(Fp12, 576, |v: &Fp12| v.to_bytes(), Fp12::from_bytes);
impl_serde!(Scalar, 32, Scalar::to_bytes, Scalar::from_bytes);
impl_serde!(G1Affine, 48, G1Affine::to_compressed, G1Affine::from_compressed);
impl_serde!(G2Affine, 96, G2Affine::to_compressed, G2Affine::from_compressed);
impl_serde!(
    G1Projective,
    48,
    |p: &G1Projective| p.to_affine().to_compressed(),
    |b: &[u8; 48]| G1Affine::from_compressed(b).map(G1Projective::from)
);
impl_serde!(
    G2Projective,
    96,
    |p: &G2Projective| p.to_affine().to_compressed(),
    |b: &[u8; 96]| G2Affine::from_compressed(b).map(G2Projective::from)
);
impl_serde!(Gt, 576, Gt::to_bytes, Gt::from_bytes);
