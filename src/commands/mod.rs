//! One-shot CLI command handlers.
//!
//! Each subcommand that does not start the scheduler lives here: updating
//! settings, querying reminder state, and the help/version screens.

pub mod help;
pub mod set;
pub mod status;
