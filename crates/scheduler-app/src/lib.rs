//! Scheduler application layer.
//!
//! Wires the calendar model, persistence and background I/O together behind
//! a single `Scheduler` owned by the presentation layer.

pub mod clock;
pub mod io;
pub mod scheduler;

pub use clock::{spawn_clock, ClockSink};
pub use io::IoMessage;
pub use scheduler::{Notice, NoticeLevel, Outcome, Scheduler, ViewState};
