//! Console rendering of the reset outcome.

use crate::client::ResetResponse;
use crate::error::ApiError;
use crate::session::Outcome;
use std::io::{self, Write};

pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Motivation Letters Reset Tool")?;
    writeln!(out, "{}", "=".repeat(40))
}

pub fn write_started<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Resetting all motivation letters...")?;
    out.flush()
}

/// Print the server's counters and message
pub fn write_success<W: Write>(out: &mut W, reset: &ResetResponse) -> io::Result<()> {
    let stats = &reset.stats;
    writeln!(out, "SUCCESS: All motivation letters have been reset!")?;
    writeln!(out, "Stats:")?;
    writeln!(out, "   - Total jobs: {}", stats.total_jobs)?;
    writeln!(
        out,
        "   - Jobs with letters removed: {}",
        stats.jobs_with_letters_removed
    )?;
    writeln!(out, "   - Jobs updated: {}", stats.jobs_updated)?;
    writeln!(out, "   - Previously pending: {}", stats.previously_pending)?;
    writeln!(out)?;
    writeln!(out, "Message: {}", reset.message)
}

/// HTTP failures show the status and the raw body; anything else shows the error text
pub fn write_failure<W: Write>(out: &mut W, error: &ApiError) -> io::Result<()> {
    match error {
        ApiError::Http { status, body } => {
            writeln!(out, "FAILED: {status}")?;
            writeln!(out, "Error: {body}")
        }
        ApiError::Transport(message) => writeln!(out, "ERROR: {message}"),
        ApiError::InvalidResponse(_) => writeln!(out, "ERROR: {error}"),
    }
}

pub fn write_closing<W: Write>(out: &mut W, outcome: &Outcome) -> io::Result<()> {
    writeln!(out)?;
    match outcome {
        Outcome::Succeeded(_) => writeln!(
            out,
            "All done! You can now generate new motivation letters."
        ),
        Outcome::Failed(_) => writeln!(
            out,
            "Something went wrong. Check your token and server status."
        ),
        Outcome::Cancelled => writeln!(out, "Goodbye!"),
    }
}
