//! # solidity-math-bits
//!
//! Building blocks for emulating Solidity integer math on arbitrary precision integers:
//!
//! - [bits]: the power of two, the unsigned maximum and the signed limits for every Solidity
//!   integer width (`uint8`/`int8` through `uint256`/`int256`), as [BigInt](num_bigint::BigInt).
//! - [unchecked]: a process wide flag for running code in "unchecked" mode, where overflow wraps
//!   around instead of failing, mirroring Solidity's `unchecked { ... }` blocks.
//!
//! The arithmetic itself is left to the consuming library.
//!
//! # Citations
//!
//! - Solidity documentation, "Types: Integers" and "Checked or Unchecked Arithmetic"
//!     <https://docs.soliditylang.org/en/latest/types.html#integers>
//!     <https://docs.soliditylang.org/en/latest/control-structures.html#checked-or-unchecked-arithmetic>
pub mod bits;
pub mod common;
pub mod settings;
pub mod unchecked;

pub use bits::{get_bit_values, lookup, BitTable, BitValues, InvalidArgument};
pub use unchecked::{is_unchecked, run_unchecked, OverflowPolicy};
