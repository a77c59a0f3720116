//! Interactive confirmation before the destructive reset.

use std::io::{self, BufRead, Write};
use tracing::debug;

/// The only answer that lets the reset proceed (ASCII case-insensitive)
pub const CONFIRMATION_WORD: &str = "yes";

/// Whether an answer typed at the prompt confirms the reset.
///
/// Only the line ending is removed; padded answers such as `" yes"` do not confirm.
pub fn is_confirmed(answer: &str) -> bool {
    answer
        .trim_end_matches(['\r', '\n'])
        .eq_ignore_ascii_case(CONFIRMATION_WORD)
}

/// Print the warning, ask for confirmation and read one line from `input`.
///
/// End of input is treated as a refusal.
pub fn confirm<R, W>(input: &mut R, out: &mut W) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    writeln!(
        out,
        "WARNING: This will DELETE ALL motivation letters and reset job statuses!"
    )?;
    writeln!(out, "WARNING: This action cannot be undone!")?;
    write!(
        out,
        "\nAre you sure you want to continue? (type '{CONFIRMATION_WORD}' to confirm): "
    )?;
    out.flush()?;

    let mut answer = String::new();
    let read = input.read_line(&mut answer)?;
    if read == 0 {
        writeln!(out)?;
    }

    if read > 0 && is_confirmed(&answer) {
        debug!("Reset confirmed by user");
        return Ok(true);
    }

    debug!("Reset not confirmed");
    writeln!(out, "Operation cancelled.")?;
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_confirm(answer: &str) -> (bool, String) {
        let mut input = Cursor::new(answer.as_bytes().to_vec());
        let mut out = Vec::new();
        let confirmed = confirm(&mut input, &mut out).unwrap();
        (confirmed, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_is_confirmed_accepts_yes_in_any_case() {
        assert!(is_confirmed("yes"));
        assert!(is_confirmed("YES"));
        assert!(is_confirmed("Yes\n"));
        assert!(is_confirmed("yEs\r\n"));
    }

    #[test]
    fn test_is_confirmed_rejects_everything_else() {
        for answer in ["", "y", "no", "yes please", "ja", "yes!", "\n"] {
            assert!(!is_confirmed(answer), "{answer:?} must not confirm");
        }
    }

    #[test]
    fn test_is_confirmed_rejects_padded_answers() {
        for answer in ["  yes\n", "yes \n", "\tYES\n", " yes", "yes\t\r\n"] {
            assert!(!is_confirmed(answer), "{answer:?} must not confirm");
        }
    }

    #[test]
    fn test_confirm_prints_warning_and_accepts() {
        let (confirmed, output) = run_confirm("yes\n");
        assert!(confirmed);
        assert!(output.contains("DELETE ALL motivation letters"));
        assert!(output.contains("cannot be undone"));
        assert!(output.contains("type 'yes' to confirm"));
        assert!(!output.contains("Operation cancelled."));
    }

    #[test]
    fn test_confirm_cancels_on_other_input() {
        let (confirmed, output) = run_confirm("no\n");
        assert!(!confirmed);
        assert!(output.ends_with("Operation cancelled.\n"));
    }

    #[test]
    fn test_confirm_cancels_on_end_of_input() {
        let (confirmed, output) = run_confirm("");
        assert!(!confirmed);
        assert!(output.contains("Operation cancelled."));
    }

    #[test]
    fn test_confirm_reads_only_first_line() {
        let (confirmed, _) = run_confirm("nope\nyes\n");
        assert!(!confirmed);
    }
}
