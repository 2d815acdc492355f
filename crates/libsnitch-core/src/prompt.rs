//! Interactive yes/no confirmation

use std::io::{BufRead, Write};

use crate::error::SnitchError;

pub trait Prompt {
    /// Ask `question`; `Ok(true)` means the operator agreed
    fn confirm(&mut self, question: &str) -> Result<bool, SnitchError>;
}

/// Line-based prompt that keeps asking until the answer is `y` or `n`
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool, SnitchError> {
        let mut answer = String::new();
        loop {
            write!(self.output, "{} [y/n] ", question)?;
            self.output.flush()?;

            answer.clear();
            if self.input.read_line(&mut answer)? == 0 {
                return Err(SnitchError::InvalidArgs(
                    "input closed while waiting for an answer".to_string(),
                ));
            }

            match answer.trim_end_matches(['\r', '\n']) {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => continue,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reasks_until_valid() {
        let mut out = Vec::new();
        let mut prompt = LinePrompt::new(Cursor::new("maybe\nY\ny\n"), &mut out);

        assert!(prompt.confirm("Report?").unwrap());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Report? [y/n] Report? [y/n] Report? [y/n] "
        );
    }

    #[test]
    fn test_no_and_eof() {
        let mut prompt = LinePrompt::new(Cursor::new("n\n"), Vec::new());
        assert!(!prompt.confirm("Report?").unwrap());

        let err = prompt.confirm("Report?").unwrap_err();
        assert!(matches!(err, SnitchError::InvalidArgs(_)));
    }
}
