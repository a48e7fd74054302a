use std::io::{self, BufRead, Write};

use crate::error::NgoError;

/// Ask before a destructive change. `assume_yes` skips the prompt.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, NgoError> {
    if assume_yes {
        return Ok(true);
    }
    let stdin = io::stdin();
    confirm_with(prompt, &mut stdin.lock(), &mut io::stderr())
}

/// Only an explicit `y`/`yes` confirms; an empty line or EOF declines.
pub fn confirm_with<R: BufRead, W: Write>(prompt: &str, input: &mut R, out: &mut W) -> Result<bool, NgoError> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
