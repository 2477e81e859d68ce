//! # `abool` - Lock-Free Atomic Flag
//!
//! A single concurrency primitive: a boolean that any number of threads can
//! read and update at once without a lock. Embed it where a shared on/off
//! condition ("is shutting down", "is ready") would otherwise sit behind a
//! contended mutex.
//!
//! ## Guarantees
//!
//! - **Lock-free**: every operation is one hardware atomic, except
//!   [`AtomicFlag::toggle`], which is a compare-exchange retry loop where some
//!   thread always makes progress.
//! - **Linearizable**: all accesses use sequentially consistent ordering, so
//!   every thread observes one global sequence of values.
//! - **Non-blocking**: nothing sleeps, parks or yields.
//! - **No copies**: `AtomicFlag` is neither `Clone` nor `Copy`; it is shared by
//!   reference or behind an `Arc`.
//!
//! ## Example
//!
//! ```rust
//! use abool::AtomicFlag;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let ready = Arc::new(AtomicFlag::new(false));
//!
//! let worker = {
//!     let ready = Arc::clone(&ready);
//!     thread::spawn(move || ready.set())
//! };
//! worker.join().unwrap();
//!
//! assert!(ready.get());
//! assert!(ready.toggle());
//! assert!(!ready.get());
//! ```
//!
//! ## Model checking
//!
//! Building with `RUSTFLAGS="--cfg loom"` backs the flag with loom's atomics;
//! `cargo run -p xtask -- loom` runs the loom suite.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod flag;
mod sync;

pub use flag::AtomicFlag;
