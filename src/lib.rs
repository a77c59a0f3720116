//! Administrative tool that resets every generated motivation letter of an
//! account through the Ausbildung API.
//!
//! A run asks for confirmation, sends a single authenticated
//! `DELETE /api/ausbildung/reset-letters` and prints the server's counters.

pub mod client;
pub mod config;
pub mod error;
pub mod prompt;
pub mod report;
pub mod session;
