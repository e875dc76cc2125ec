//! Helps write big integers to JSON and read them back
//!
//! Big integers are written as decimal strings. Most JSON readers parse numbers into `f64`, which
//! silently loses precision for anything above 2^53, and most of the table values are far above
//! that.

use std::str::FromStr;

use num_bigint::BigInt;
use serde::{de, Deserialize, Deserializer, Serializer};

/// Serialize a [BigInt] as a decimal string. Use with `#[serde(serialize_with)]`.
pub fn serialize_decimal<S>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_str_radix(10))
}

/// Deserialize a [BigInt] from a decimal string. Use with `#[serde(deserialize_with)]`.
pub fn deserialize_decimal<'de, D>(deserializer: D) -> Result<BigInt, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    BigInt::from_str(&raw)
        .map_err(|e| de::Error::custom(format!("{raw:?} is not a decimal integer: {e}")))
}

#[cfg(test)]
mod test {
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Wrapper {
        #[serde(
            serialize_with = "serialize_decimal",
            deserialize_with = "deserialize_decimal"
        )]
        n: BigInt,
    }

    #[test]
    fn test_decimal_negative() {
        let w = Wrapper {
            n: BigInt::from(-32768),
        };
        assert_eq!(serde_json::to_value(&w).unwrap(), json!({ "n": "-32768" }));
        let back: Wrapper = serde_json::from_value(json!({ "n": "-32768" })).unwrap();
        assert_eq!(back, w);
    }

    #[test]
    fn test_decimal_beyond_f64() {
        // 2^64 + 1 cannot be held by an f64
        let w: Wrapper = serde_json::from_value(json!({ "n": "18446744073709551617" })).unwrap();
        assert_eq!(w.n, (BigInt::from(1u8) << 64usize) + BigInt::from(1u8));
    }

    #[test]
    fn test_decimal_garbage() {
        assert!(serde_json::from_value::<Wrapper>(json!({ "n": "0x10" })).is_err());
        assert!(serde_json::from_value::<Wrapper>(json!({ "n": 16 })).is_err());
    }
}
