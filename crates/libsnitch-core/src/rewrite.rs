//! In-place line rewriting.
//!
//! The source file is streamed into a temporary sibling (`.<name>.XXXX.snitch`)
//! and the sibling is renamed over the original once every line has been
//! written. Readers see either the old file or the new one, never a partial
//! write. If anything fails before the rename, the temporary file is removed
//! and the original is left as it was.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::SnitchError;
use crate::todo::Todo;

/// What to do with one line of the source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEdit {
    /// Copy the line, terminator included, byte for byte
    Keep,
    /// Write this text followed by the original line terminator.
    /// Refused for a line that is not valid UTF-8.
    Replace(String),
    /// Drop the line entirely
    Delete,
}

/// Rewrite `path`, asking `transform` what to do with each line.
///
/// `transform` receives the 1-based line number and the line text without
/// its terminator. Returns the number of lines read.
pub fn rewrite_lines<F>(path: &Path, transform: F) -> Result<usize, SnitchError>
where
    F: FnMut(usize, &str) -> LineEdit,
{
    rewrite(path, transform, |_| Ok(()))
}

/// Apply `edit` to line `line` and keep every other line unchanged.
///
/// Fails with `LineOutOfRange`, without touching the file, if the file has
/// fewer than `line` lines.
pub fn rewrite_line(path: &Path, line: usize, edit: LineEdit) -> Result<(), SnitchError> {
    let mut edit = Some(edit);
    rewrite(
        path,
        |number, _| match edit.take() {
            Some(e) if number == line => e,
            other => {
                edit = other;
                LineEdit::Keep
            }
        },
        |count| {
            if line == 0 || line > count {
                return Err(SnitchError::LineOutOfRange {
                    path: path.to_path_buf(),
                    line,
                });
            }
            Ok(())
        },
    )?;
    Ok(())
}

/// Replace the TODO's line with its canonical form
pub fn update_todo(todo: &Todo) -> Result<(), SnitchError> {
    debug!(file = %todo.filename().display(), line = todo.line(), "updating TODO in place");
    rewrite_line(todo.filename(), todo.line(), LineEdit::Replace(todo.to_string()))
}

/// Delete the TODO's line
pub fn remove_todo(todo: &Todo) -> Result<(), SnitchError> {
    debug!(file = %todo.filename().display(), line = todo.line(), "removing TODO line");
    rewrite_line(todo.filename(), todo.line(), LineEdit::Delete)
}

fn rewrite<F, V>(path: &Path, mut transform: F, validate: V) -> Result<usize, SnitchError>
where
    F: FnMut(usize, &str) -> LineEdit,
    V: FnOnce(usize) -> Result<(), SnitchError>,
{
    let input = File::open(path)?;
    let permissions = input.metadata()?.permissions();
    let mut reader = BufReader::new(input);

    let file_name = path
        .file_name()
        .ok_or_else(|| SnitchError::InvalidArgs(format!("'{}' is not a file", path.display())))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let tmp = tempfile::Builder::new()
        .prefix(&format!(".{}.", file_name.to_string_lossy()))
        .suffix(".snitch")
        .tempfile_in(dir)?;

    let mut count = 0;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            count += 1;

            let (body, ending) = split_terminator(&buf);
            let text = String::from_utf8_lossy(body);
            match transform(count, &*text) {
                LineEdit::Keep => writer.write_all(&buf)?,
                LineEdit::Replace(_) if std::str::from_utf8(body).is_err() => {
                    return Err(SnitchError::Io(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("{}: line {} is not valid UTF-8", path.display(), count),
                    )));
                }
                LineEdit::Replace(new_text) => {
                    writer.write_all(new_text.as_bytes())?;
                    writer.write_all(ending)?;
                }
                LineEdit::Delete => {}
            }
        }
        writer.flush()?;
    }

    validate(count)?;

    tmp.as_file().set_permissions(permissions)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| SnitchError::Io(e.error))?;

    Ok(count)
}

/// Split a raw line into its text and its terminator (`\n`, `\r\n` or none)
fn split_terminator(raw: &[u8]) -> (&[u8], &[u8]) {
    if raw.ends_with(b"\r\n") {
        raw.split_at(raw.len() - 2)
    } else if raw.ends_with(b"\n") {
        raw.split_at(raw.len() - 1)
    } else {
        (raw, &raw[raw.len()..])
    }
}
