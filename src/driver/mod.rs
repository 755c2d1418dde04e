//! Headless host for the simulation: turns a fixed frame rate into ticks
//! and feeds commands in between them.

pub mod command;
pub mod scheduler;
pub mod session;

pub use command::{Command, CommandError};
pub use scheduler::run;
pub use session::{Pacing, Session, SessionReport, Status};
