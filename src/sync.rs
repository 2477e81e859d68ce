//! Atomic backend selection.
//!
//! Regular builds use `core` atomics. Building with `RUSTFLAGS="--cfg loom"`
//! swaps in loom's instrumented atomics so the flag's operations can be
//! model-checked under every interleaving loom explores.

#[cfg(not(loom))]
pub(crate) use core::sync::atomic::{AtomicU32, Ordering};

#[cfg(loom)]
pub(crate) use loom::sync::atomic::{AtomicU32, Ordering};
