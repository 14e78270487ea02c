//! Command handlers.
//!
//! `spark` has a single command; the handler translates arguments and config
//! into adapters, runs the core service and prints the report.

pub mod scaffold;
