//! One pass of the tool: confirm, reset, report.

use crate::client::{LetterResetApi, ResetResponse};
use crate::error::ApiError;
use crate::{prompt, report};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

/// Final state of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user did not confirm; no request was sent
    Cancelled,
    Succeeded(ResetResponse),
    Failed(ApiError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }
}

/// Run one confirmation-gated reset against `api`, writing all user-facing
/// output to `out`.
///
/// Only console I/O errors are returned; reset failures end in
/// [`Outcome::Failed`] after being printed.
pub async fn run<A, R, W>(api: &A, input: &mut R, out: &mut W) -> io::Result<Outcome>
where
    A: LetterResetApi + ?Sized,
    R: BufRead,
    W: Write,
{
    report::write_banner(out)?;

    let outcome = if prompt::confirm(input, out)? {
        report::write_started(out)?;
        match api.reset_letters().await {
            Ok(reset) => {
                report::write_success(out, &reset)?;
                Outcome::Succeeded(reset)
            }
            Err(e) => {
                if e.is_auth_failure() {
                    warn!("Server rejected the bearer token: {e}");
                } else {
                    warn!("Reset failed: {e}");
                }
                report::write_failure(out, &e)?;
                Outcome::Failed(e)
            }
        }
    } else {
        info!("Reset cancelled by user");
        Outcome::Cancelled
    };

    report::write_closing(out, &outcome)?;
    out.flush()?;
    Ok(outcome)
}
