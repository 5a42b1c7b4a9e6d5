use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Print a prompt and read one trimmed line from stdin.
/// None when stdin is exhausted.
pub fn read_line(prompt: &str) -> Result<Option<String>> {
    print_prompt(prompt)?;
    read_line_from(&mut io::stdin().lock())
}

/// Yes/no confirmation; an empty answer counts as yes, end of input as no
pub fn confirm(prompt: &str) -> Result<bool> {
    print_prompt(prompt)?;
    confirm_from(&mut io::stdin().lock())
}

/// Numeric selection in 1..=max, returned zero-based.
/// 0, out-of-range, non-numeric input and end of input all mean
/// "no selection".
pub fn select_index(prompt: &str, max: usize) -> Result<Option<usize>> {
    print_prompt(prompt)?;
    select_index_from(&mut io::stdin().lock(), max)
}

// --- Helper Methods ---

fn print_prompt(prompt: &str) -> Result<()> {
    print!("{prompt}");
    io::stdout().flush().context("Failed to flush stdout")
}

fn read_line_from<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let bytes = reader
        .read_line(&mut line)
        .context("Failed to read input")?;

    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn confirm_from<R: BufRead>(reader: &mut R) -> Result<bool> {
    let answer = read_line_from(reader)?;
    Ok(answer.is_some_and(|a| matches!(a.to_lowercase().as_str(), "" | "y" | "yes")))
}

fn select_index_from<R: BufRead>(reader: &mut R, max: usize) -> Result<Option<usize>> {
    let Some(answer) = read_line_from(reader)? else {
        return Ok(None);
    };

    let Ok(choice) = answer.parse::<usize>() else {
        return Ok(None);
    };
    if choice == 0 || choice > max {
        return Ok(None);
    }
    Ok(Some(choice - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_line_none_at_end_of_input() {
        let result = read_line_from(&mut &b""[..]).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_read_line_trims_input() {
        let result = read_line_from(&mut &b"  yes  \n"[..]).unwrap();
        assert_eq!(result.as_deref(), Some("yes"));
    }

    #[test]
    fn test_confirm_declines_at_end_of_input() {
        assert!(!confirm_from(&mut &b""[..]).unwrap());
    }

    #[test]
    fn test_confirm_empty_line_counts_as_yes() {
        assert!(confirm_from(&mut &b"\n"[..]).unwrap());
        assert!(confirm_from(&mut &b"Y\n"[..]).unwrap());
        assert!(confirm_from(&mut &b"yes\n"[..]).unwrap());
    }

    #[test]
    fn test_confirm_rejects_other_answers() {
        assert!(!confirm_from(&mut &b"n\n"[..]).unwrap());
        assert!(!confirm_from(&mut &b"maybe\n"[..]).unwrap());
    }

    #[test]
    fn test_select_index_in_range() {
        assert_eq!(select_index_from(&mut &b"2\n"[..], 3).unwrap(), Some(1));
    }

    #[test]
    fn test_select_index_rejects_zero_invalid_and_end_of_input() {
        assert_eq!(select_index_from(&mut &b"0\n"[..], 3).unwrap(), None);
        assert_eq!(select_index_from(&mut &b"4\n"[..], 3).unwrap(), None);
        assert_eq!(select_index_from(&mut &b"abc\n"[..], 3).unwrap(), None);
        assert_eq!(select_index_from(&mut &b""[..], 3).unwrap(), None);
    }
}
