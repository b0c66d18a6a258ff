//! Logging: bracketed event formatting with dual file + stdout output.

mod formatter;
mod setup;

pub use setup::setup_logging;
