//! # breeze-timer
//!
//! Background timer thread and the shared pooled timer resource for the
//! breeze channel stack.
//!
//! This crate provides:
//! - `Timer`, a one-thread delay queue implementing
//!   `breeze_core::ScheduledExecutor`
//! - `TIMER_SERVICE`, the process-wide pooled timer kind that transport
//!   factories share when no executor was supplied

mod timer;

pub use timer::{TIMER_SERVICE, Timer};
