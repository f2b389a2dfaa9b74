//! Command Line Interface (CLI) layer for GDIV.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) that resolves scan options and
//! runs one metric over a list of rasters.
//!
//! If you are embedding GDIV into another application, prefer using
//! the high-level `gdiv::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
