//! Scanning tracked files for TODOs

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SnitchError;
use crate::todo::{parse_line, Todo};
use crate::vcs::VersionControl;

struct FileScan {
    path: PathBuf,
    reader: BufReader<File>,
    line: usize,
}

/// Lazy iterator over every TODO in a list of files.
///
/// Files are read one at a time, line by line. The first I/O error is
/// yielded once and ends the iteration.
pub struct TodoWalker {
    files: std::vec::IntoIter<PathBuf>,
    current: Option<FileScan>,
    buf: Vec<u8>,
    failed: bool,
}

impl TodoWalker {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files: files.into_iter(),
            current: None,
            buf: Vec::new(),
            failed: false,
        }
    }

    /// Walker over the files `vcs` tracks under `root`
    pub fn for_dir(vcs: &dyn VersionControl, root: &Path) -> Result<Self, SnitchError> {
        Ok(Self::new(vcs.list_files(root)?))
    }

    fn fail(&mut self, err: std::io::Error) -> Option<Result<Todo, SnitchError>> {
        self.current = None;
        self.failed = true;
        Some(Err(err.into()))
    }
}

impl Iterator for TodoWalker {
    type Item = Result<Todo, SnitchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let scan = match self.current.as_mut() {
                Some(scan) => scan,
                None => {
                    let path = self.files.next()?;
                    debug!(file = %path.display(), "scanning");
                    match File::open(&path) {
                        Ok(file) => self.current.insert(FileScan {
                            path,
                            reader: BufReader::new(file),
                            line: 0,
                        }),
                        Err(e) => return self.fail(e),
                    }
                }
            };

            self.buf.clear();
            match scan.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.current = None,
                Ok(_) => {
                    scan.line += 1;
                    let text = String::from_utf8_lossy(strip_terminator(&self.buf));
                    if let Some(todo) = parse_line(&text) {
                        return Some(Ok(todo.located(&scan.path, scan.line)));
                    }
                }
                Err(e) => return self.fail(e),
            }
        }
    }
}

fn strip_terminator(raw: &[u8]) -> &[u8] {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    raw.strip_suffix(b"\r").unwrap_or(raw)
}

/// Visit every TODO under `root`, stopping at the first error from either
/// the scan or `visit`
pub fn walk_todos<F>(vcs: &dyn VersionControl, root: &Path, mut visit: F) -> Result<(), SnitchError>
where
    F: FnMut(Todo) -> Result<(), SnitchError>,
{
    for todo in TodoWalker::for_dir(vcs, root)? {
        visit(todo?)?;
    }
    Ok(())
}
