//! `AtomicFlag`, a boolean shared between threads without a lock.
//!
//! The flag is backed by a single 32-bit atomic cell holding `0` (`false`) or
//! `1` (`true`). Every access goes through `SeqCst` atomics, so all threads
//! agree on one order of updates.

mod serde_impl;

use core::fmt;

use crate::sync::{AtomicU32, Ordering::SeqCst};

const FALSE: u32 = 0;
const TRUE: u32 = 1;

#[inline(always)]
const fn encode(value: bool) -> u32 {
    if value {
        TRUE
    } else {
        FALSE
    }
}

#[inline(always)]
const fn decode(raw: u32) -> bool {
    raw == TRUE
}

/// A lock-free boolean flag.
///
/// All operations take `&self`, never block, and are linearizable. Share a
/// flag by reference or through an `Arc`. It cannot be copied, because a copy
/// would be a second, independent cell:
///
/// ```compile_fail
/// use abool::AtomicFlag;
///
/// let ready = AtomicFlag::new(false);
/// let copy = ready.clone();
/// ```
///
/// # Example
///
/// ```rust
/// use abool::AtomicFlag;
///
/// let shutting_down = AtomicFlag::default();
/// assert!(!shutting_down.get());
///
/// // Only the first caller gets to run the shutdown sequence.
/// assert!(shutting_down.compare_and_set(false, true));
/// assert!(!shutting_down.compare_and_set(false, true));
/// ```
#[repr(transparent)]
pub struct AtomicFlag {
    cell: AtomicU32,
}

impl AtomicFlag {
    /// Creates a new flag holding `value`.
    #[cfg(not(loom))]
    #[inline]
    pub const fn new(value: bool) -> Self {
        Self {
            cell: AtomicU32::new(encode(value)),
        }
    }

    /// Creates a new flag holding `value`.
    #[cfg(loom)]
    pub fn new(value: bool) -> Self {
        Self {
            cell: AtomicU32::new(encode(value)),
        }
    }

    /// Creates a new flag holding `false`.
    #[cfg(not(loom))]
    #[inline]
    pub const fn new_false() -> Self {
        Self::new(false)
    }

    /// Creates a new flag holding `false`.
    #[cfg(loom)]
    pub fn new_false() -> Self {
        Self::new(false)
    }

    /// Stores `true`.
    #[inline]
    pub fn set(&self) {
        self.cell.store(TRUE, SeqCst);
    }

    /// Stores `false`.
    #[inline]
    pub fn clear(&self) {
        self.cell.store(FALSE, SeqCst);
    }

    /// Loads the current value.
    #[inline]
    pub fn get(&self) -> bool {
        decode(self.cell.load(SeqCst))
    }

    /// Stores `value`.
    #[inline]
    pub fn set_value(&self, value: bool) {
        self.cell.store(encode(value), SeqCst);
    }

    /// Stores `value` and returns the previous value.
    #[inline]
    pub fn swap(&self, value: bool) -> bool {
        decode(self.cell.swap(encode(value), SeqCst))
    }

    /// Stores `desired` if the flag currently holds `expected`.
    ///
    /// Returns `true` if the store happened. On `false` the flag is left
    /// untouched. This is a single strong compare-exchange, so it never fails
    /// spuriously.
    #[inline]
    pub fn compare_and_set(&self, expected: bool, desired: bool) -> bool {
        self.cell
            .compare_exchange(encode(expected), encode(desired), SeqCst, SeqCst)
            .is_ok()
    }

    /// Flips the value and returns the value that was replaced.
    ///
    /// Implemented as a compare-exchange loop: a lost race reloads the
    /// observed value and tries again, so no concurrent flip is ever dropped.
    /// The loop is lock-free but not wait-free.
    pub fn toggle(&self) -> bool {
        let mut current = self.cell.load(SeqCst);
        #[cfg(feature = "tracing")]
        let mut retries: u32 = 0;

        loop {
            let flipped = encode(!decode(current));
            match self
                .cell
                .compare_exchange_weak(current, flipped, SeqCst, SeqCst)
            {
                Ok(previous) => {
                    #[cfg(feature = "tracing")]
                    {
                        if retries > 0 {
                            tracing::trace!(retries, "toggle retried after losing a race");
                        }
                    }
                    return decode(previous);
                }
                Err(observed) => {
                    current = observed;
                    #[cfg(feature = "tracing")]
                    {
                        retries += 1;
                    }
                }
            }
        }
    }

    /// Consumes the flag and returns its value.
    #[inline]
    pub fn into_inner(self) -> bool {
        self.get()
    }
}

impl Default for AtomicFlag {
    fn default() -> Self {
        Self::new_false()
    }
}

impl From<bool> for AtomicFlag {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for AtomicFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicFlag").field(&self.get()).finish()
    }
}
