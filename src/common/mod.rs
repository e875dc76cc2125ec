//! Helpers that multiple modules need

pub mod interface;

/// Print a key and its value to stderr, aligned so that a series of calls reads like a table.
///
/// Only call this when verbose output was requested in the [Settings](crate::settings::Settings).
#[inline]
pub fn veprintln(key: &str, format_args: std::fmt::Arguments) {
    eprintln!("? {key:<12}: {format_args}");
}
