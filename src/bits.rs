//! Boundary values of fixed width integers, as used by the Solidity `uintN` and `intN` types
//!
//! Solidity knows integer types for every multiple of 8 from 8 to 256 bits. For each of those
//! widths, this module holds a [BitValues] record with the power of two and the unsigned and
//! signed limits, computed exactly on [BigInt].
//!
//! The 32 standard widths are computed once, on first use, into [BIT_TABLE]. The named statics
//! [BIT8] through [BIT256] point into that table. [get_bit_values] computes a fresh record.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::ops::Index;

use anyhow::Result;
use lazy_static::lazy_static;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};

use crate::common::interface::{deserialize_decimal, serialize_decimal};
use crate::common::veprintln;
use crate::settings::{Settings, DEFAULT_SETTINGS};

/// Smallest supported bit width
pub const MIN_BITS: u16 = 8;
/// Largest supported bit width
pub const MAX_BITS: u16 = 256;
/// Every supported bit width is a multiple of this
pub const BITS_STEP: u16 = 8;

lazy_static! {
    pub static ref ZERO: BigInt = BigInt::zero();
    pub static ref ONE: BigInt = BigInt::one();
    pub static ref TWO: BigInt = BigInt::from(2u8);
    /// 2^128
    pub static ref BN128: BigInt = BigInt::one() << 128usize;
    /// 2^256
    pub static ref BN256: BigInt = BigInt::one() << 256usize;
    /// All standard widths, built with [DEFAULT_SETTINGS]
    pub static ref BIT_TABLE: BitTable = BitTable::standard();
}

/// A bit length was outside of what Solidity integer types can have.
///
/// Valid bit lengths are the multiples of [BITS_STEP] from [MIN_BITS] to [MAX_BITS], inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidArgument {
    pub bitlen: i64,
}

impl Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid bit length {}: must be a multiple of {BITS_STEP} from {MIN_BITS} to {MAX_BITS}",
            self.bitlen
        )
    }
}

impl std::error::Error for InvalidArgument {}

/// Boundary values for integers of one bit width `n`.
///
/// `value` and `power_of_2` are both 2^n. `value` is the magnitude the other fields were derived
/// from, kept so that consumers can reduce modulo 2^n without recomputing it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitValues {
    /// The width `n` itself
    pub bits: u16,
    #[serde(
        serialize_with = "serialize_decimal",
        deserialize_with = "deserialize_decimal"
    )]
    pub value: BigInt,
    /// 2^n
    #[serde(
        serialize_with = "serialize_decimal",
        deserialize_with = "deserialize_decimal"
    )]
    pub power_of_2: BigInt,
    /// 2^n - 1, the largest `uintN`
    #[serde(
        serialize_with = "serialize_decimal",
        deserialize_with = "deserialize_decimal"
    )]
    pub uintmax: BigInt,
    /// 2^(n-1) - 1, the largest `intN`
    #[serde(
        serialize_with = "serialize_decimal",
        deserialize_with = "deserialize_decimal"
    )]
    pub intmax: BigInt,
    /// -2^(n-1), the smallest `intN`
    #[serde(
        serialize_with = "serialize_decimal",
        deserialize_with = "deserialize_decimal"
    )]
    pub intmin: BigInt,
}

impl BitValues {
    /// Compute the record for a width that is already known to be valid.
    fn compute(bits: u16) -> Self {
        let value: BigInt = BigInt::one() << bits as usize;
        let half: BigInt = BigInt::one() << (bits - 1) as usize;

        Self {
            bits,
            power_of_2: value.clone(),
            uintmax: &value - BigInt::one(),
            intmax: &half - BigInt::one(),
            intmin: -half,
            value,
        }
    }

    /// Can `v` be stored in a `uintN` of this width?
    pub fn fits_unsigned(&self, v: &BigInt) -> bool {
        !v.is_negative() && *v <= self.uintmax
    }

    /// Can `v` be stored in an `intN` of this width?
    pub fn fits_signed(&self, v: &BigInt) -> bool {
        self.intmin <= *v && *v <= self.intmax
    }
}

impl Display for BitValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "uint{0} <= {1}; {2} <= int{0} <= {3}",
            self.bits, self.uintmax, self.intmin, self.intmax
        )
    }
}

/// Check that `bitlen` is a valid Solidity integer width and narrow it.
fn validate(bitlen: i64) -> std::result::Result<u16, InvalidArgument> {
    if bitlen < MIN_BITS as i64 || bitlen > MAX_BITS as i64 || bitlen % BITS_STEP as i64 != 0 {
        return Err(InvalidArgument { bitlen });
    }
    Ok(bitlen as u16)
}

/// Compute the [BitValues] for `bitlen` bits.
///
/// Prefer [lookup] or the named statics like [BIT64] for the standard widths, they are only
/// computed once.
///
/// # Errors
///
/// Fails with [InvalidArgument] if `bitlen` is not a multiple of 8 from 8 to 256.
///
/// ```
/// use num_bigint::BigInt;
/// use solidity_math_bits::bits::{get_bit_values, InvalidArgument};
///
/// let b = get_bit_values(16).unwrap();
/// assert_eq!(b.power_of_2, BigInt::from(65536));
/// assert_eq!(b.uintmax, BigInt::from(65535));
/// assert_eq!(b.intmax, BigInt::from(32767));
/// assert_eq!(b.intmin, BigInt::from(-32768));
///
/// let e = get_bit_values(10).unwrap_err();
/// assert_eq!(e.downcast_ref::<InvalidArgument>(), Some(&InvalidArgument { bitlen: 10 }));
/// ```
pub fn get_bit_values(bitlen: i64) -> Result<BitValues> {
    let bits = validate(bitlen)?;
    Ok(BitValues::compute(bits))
}

/// Get the precomputed [BitValues] for `bitlen` bits from [BIT_TABLE].
///
/// # Errors
///
/// Fails with [InvalidArgument] under the same conditions as [get_bit_values].
pub fn lookup(bitlen: i64) -> Result<&'static BitValues> {
    let bits = validate(bitlen)?;
    Ok(&BIT_TABLE[bits])
}

/// The [BitValues] for every standard width, keyed by width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitTable {
    inner: BTreeMap<u16, BitValues>,
}

impl BitTable {
    /// Build the table for all standard widths, without debug output.
    pub fn standard() -> Self {
        Self::build(&DEFAULT_SETTINGS)
    }

    /// Build the table for all standard widths.
    pub fn build(settings: &Settings) -> Self {
        if settings.verbose {
            eprintln!("* building bit tables for {MIN_BITS}..={MAX_BITS} bits");
        }

        let mut inner = BTreeMap::new();
        for bits in (MIN_BITS..=MAX_BITS).step_by(BITS_STEP as usize) {
            let values = BitValues::compute(bits);
            if settings.verbose {
                veprintln(&format!("bit{bits}"), format_args!("{values}"));
            }
            inner.insert(bits, values);
        }

        Self { inner }
    }

    pub fn get(&self, bits: u16) -> Option<&BitValues> {
        self.inner.get(&bits)
    }

    /// Iterate over all records, by ascending width.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &BitValues)> {
        self.inner.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Index<u16> for BitTable {
    type Output = BitValues;

    /// # Panics
    ///
    /// Panics if `bits` is not a standard width.
    fn index(&self, bits: u16) -> &Self::Output {
        &self.inner[&bits]
    }
}

macro_rules! named_widths {
    ($($name:ident => $bits:literal),* $(,)?) => {
        lazy_static! {
            $(
                #[doc = concat!("Boundary values for `uint", stringify!($bits), "` and `int", stringify!($bits), "`")]
                pub static ref $name: &'static BitValues = &BIT_TABLE[$bits];
            )*
        }
    };
}

named_widths! {
    BIT8 => 8,
    BIT16 => 16,
    BIT24 => 24,
    BIT32 => 32,
    BIT40 => 40,
    BIT48 => 48,
    BIT56 => 56,
    BIT64 => 64,
    BIT72 => 72,
    BIT80 => 80,
    BIT88 => 88,
    BIT96 => 96,
    BIT104 => 104,
    BIT112 => 112,
    BIT120 => 120,
    BIT128 => 128,
    BIT136 => 136,
    BIT144 => 144,
    BIT152 => 152,
    BIT160 => 160,
    BIT168 => 168,
    BIT176 => 176,
    BIT184 => 184,
    BIT192 => 192,
    BIT200 => 200,
    BIT208 => 208,
    BIT216 => 216,
    BIT224 => 224,
    BIT232 => 232,
    BIT240 => 240,
    BIT248 => 248,
    BIT256 => 256,
}
