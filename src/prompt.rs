use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Writes `question` to `out` and reads one answer line from `input`.
///
/// Only `y` (any case, surrounding whitespace ignored) counts as yes; any other
/// answer, including end of input, is a no.
///
/// # Errors
/// Returns an error if writing the question or reading the answer fails.
pub fn confirm(input: &mut dyn BufRead, out: &mut dyn Write, question: &str) -> Result<bool> {
    write!(out, "{question}")?;
    out.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read confirmation from stdin")?;

    let accepted = answer.trim().eq_ignore_ascii_case("y");
    log::debug!("confirmation {:?} -> {accepted}", answer.trim());
    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(input: &str) -> Result<bool> {
        let mut out = Vec::new();
        confirm(&mut Cursor::new(input), &mut out, "Proceed? [y/N] ")
    }

    #[test]
    fn test_yes_answers() -> Result<()> {
        assert!(answer("y\n")?);
        assert!(answer("Y\n")?);
        assert!(answer("  y  \n")?);
        assert!(answer("y")?);
        Ok(())
    }

    #[test]
    fn test_everything_else_is_no() -> Result<()> {
        assert!(!answer("n\n")?);
        assert!(!answer("yes\n")?);
        assert!(!answer("\n")?);
        assert!(!answer("")?);
        Ok(())
    }

    #[test]
    fn test_only_first_line_is_read() -> Result<()> {
        let mut input = Cursor::new("n\ny\n");
        let mut out = Vec::new();
        assert!(!confirm(&mut input, &mut out, "? ")?);
        assert!(confirm(&mut input, &mut out, "? ")?);
        Ok(())
    }

    #[test]
    fn test_question_is_written() -> Result<()> {
        let mut out = Vec::new();
        confirm(&mut Cursor::new("y\n"), &mut out, "Create 'x'? [y/N] ")?;
        assert_eq!(String::from_utf8(out)?, "Create 'x'? [y/N] ");
        Ok(())
    }
}
