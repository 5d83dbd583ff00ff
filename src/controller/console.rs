//! Terminal implementations of [`Notifier`] and [`Clipboard`].

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{Clipboard, ClipboardError, Notifier};

/// Prints notifications to stderr, one line each.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, description: Option<&str>) {
        match description {
            Some(description) => eprintln!("{title}: {description}"),
            None => eprintln!("{title}"),
        }
    }
}

/// "Copies" by writing the text to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = io::stdout().lock();
        write_with_newline(&mut stdout, text)
            .and_then(|()| stdout.flush())
            .map_err(|source| ClipboardError::Write {
                target: "stdout".to_string(),
                source,
            })
    }
}

/// Copies by writing the text to a file, replacing its contents.
#[derive(Debug, Clone)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    /// Creates a clipboard backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the target file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Clipboard for FileClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        std::fs::write(&self.path, text).map_err(|source| ClipboardError::Write {
            target: self.path.display().to_string(),
            source,
        })?;
        tracing::debug!("Wrote {} bytes to {}", text.len(), self.path.display());
        Ok(())
    }
}

fn write_with_newline(out: &mut impl Write, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    if !text.is_empty() && !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    Ok(())
}
