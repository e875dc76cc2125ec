//! Unchecked mode, like Solidity's `unchecked { ... }` blocks
//!
//! Arithmetic libraries built on top of this crate read [is_unchecked] to decide whether an
//! overflow wraps around or fails.
//!
//! ```
//! use solidity_math_bits::unchecked::{is_unchecked, run_unchecked};
//!
//! assert!(!is_unchecked());
//! run_unchecked(|| {
//!     // perform your unchecked solidity math
//!     assert!(is_unchecked());
//! });
//! assert!(!is_unchecked());
//! ```
//!
//! # Limitations
//!
//! The flag is one value for the whole process, it is not local to a thread or async task. Nested
//! scopes on one call stack are fine. Scopes that overlap on different threads will see each
//! others changes. Code that needs isolation should pass an [OverflowPolicy] explicitly instead of
//! reading the flag.

use std::fmt::{self, Display};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

static UNCHECKED: AtomicBool = AtomicBool::new(false);

/// What to do when an arithmetic operation leaves the range of its type
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Overflow is an error
    #[default]
    Checked,
    /// Overflow wraps around modulo 2^n
    Unchecked,
}

impl OverflowPolicy {
    /// The policy currently set by the process wide flag.
    pub fn current() -> Self {
        is_unchecked().into()
    }

    #[inline]
    pub const fn is_unchecked(self) -> bool {
        matches!(self, Self::Unchecked)
    }

    /// Run `callback` with the process wide flag set to this policy.
    ///
    /// The previous value of the flag is restored when the callback is done, no matter if it
    /// returns normally or panics. Whatever the callback returns, including an `Err`, is passed
    /// through unchanged.
    pub fn scope<T, F>(self, callback: F) -> T
    where
        F: FnOnce() -> T,
    {
        let _guard = FlagGuard::set(self.is_unchecked());
        callback()
    }
}

impl From<bool> for OverflowPolicy {
    fn from(unchecked: bool) -> Self {
        if unchecked {
            Self::Unchecked
        } else {
            Self::Checked
        }
    }
}

impl Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checked => write!(f, "checked"),
            Self::Unchecked => write!(f, "unchecked"),
        }
    }
}

/// Restores the flag to what it was before [FlagGuard::set] when dropped.
struct FlagGuard {
    prior: bool,
}

impl FlagGuard {
    fn set(unchecked: bool) -> Self {
        Self {
            prior: UNCHECKED.swap(unchecked, Ordering::SeqCst),
        }
    }
}

impl Drop for FlagGuard {
    fn drop(&mut self) {
        UNCHECKED.store(self.prior, Ordering::SeqCst);
    }
}

/// Performs the callback under unchecked mode.
///
/// See [OverflowPolicy::scope] for how the flag is restored and the [module docs](self) for the
/// limits of the process wide flag.
pub fn run_unchecked<T, F>(callback: F) -> T
where
    F: FnOnce() -> T,
{
    OverflowPolicy::Unchecked.scope(callback)
}

/// Returns true if unchecked mode is on.
#[inline]
pub fn is_unchecked() -> bool {
    UNCHECKED.load(Ordering::SeqCst)
}

#[cfg(test)]
mod test {
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::{Mutex, MutexGuard};

    use anyhow::{anyhow, Result};

    use super::*;

    // the test harness runs tests on parallel threads, but there is only one flag
    static FLAG_LOCK: Mutex<()> = Mutex::new(());

    fn lock() -> MutexGuard<'static, ()> {
        FLAG_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn test_unchecked_default_off() {
        let _l = lock();
        assert!(!is_unchecked());
        assert_eq!(OverflowPolicy::current(), OverflowPolicy::Checked);
    }

    #[test]
    fn test_unchecked_scope() {
        let _l = lock();
        run_unchecked(|| {
            assert!(is_unchecked());
            assert_eq!(OverflowPolicy::current(), OverflowPolicy::Unchecked);
        });
        assert!(!is_unchecked());
    }

    #[test]
    fn test_unchecked_returns_value() {
        let _l = lock();
        let v = run_unchecked(|| 1337);
        assert_eq!(v, 1337);
        assert!(!is_unchecked());
    }

    #[test]
    fn test_unchecked_nested() {
        let _l = lock();
        run_unchecked(|| {
            run_unchecked(|| assert!(is_unchecked()));
            assert!(is_unchecked(), "inner scope turned the outer scope off");
        });
        assert!(!is_unchecked());
    }

    #[test]
    fn test_unchecked_err_propagates() {
        let _l = lock();
        let r: Result<()> = run_unchecked(|| {
            assert!(is_unchecked());
            Err(anyhow!("overflow in the callback"))
        });
        assert_eq!(r.unwrap_err().to_string(), "overflow in the callback");
        assert!(!is_unchecked());
    }

    #[test]
    fn test_unchecked_panic_restores() {
        let _l = lock();
        let r = panic::catch_unwind(AssertUnwindSafe(|| {
            run_unchecked(|| panic!("boom"));
        }));
        assert!(r.is_err());
        assert!(!is_unchecked());

        run_unchecked(|| {
            let r = panic::catch_unwind(AssertUnwindSafe(|| {
                run_unchecked(|| panic!("boom"));
            }));
            assert!(r.is_err());
            assert!(is_unchecked());
        });
        assert!(!is_unchecked());
    }

    #[test]
    fn test_checked_inside_unchecked() {
        let _l = lock();
        run_unchecked(|| {
            OverflowPolicy::Checked.scope(|| assert!(!is_unchecked()));
            assert!(is_unchecked());
        });
        assert!(!is_unchecked());
    }

    #[test]
    fn test_policy_conversions() {
        assert_eq!(OverflowPolicy::from(true), OverflowPolicy::Unchecked);
        assert_eq!(OverflowPolicy::from(false), OverflowPolicy::Checked);
        assert_eq!(OverflowPolicy::default(), OverflowPolicy::Checked);
        assert_eq!(OverflowPolicy::Unchecked.to_string(), "unchecked");
        assert_eq!(
            serde_json::to_value(OverflowPolicy::Unchecked).unwrap(),
            serde_json::json!("unchecked")
        );
        let p: OverflowPolicy = serde_json::from_str("\"checked\"").unwrap();
        assert!(!p.is_unchecked());
    }
}
