use std::fs::File;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::foundation::error::{CardError, CardResult};

/// Result of a committed export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedCard {
    /// Bare file name, e.g. `RSVP_Card_Jane_Doe.png`.
    pub filename: String,
    /// Final location, for sinks that write to the filesystem.
    pub path: Option<PathBuf>,
    /// Number of bytes written.
    pub len: usize,
}

/// A transient destination for exactly one card.
///
/// The handle owns whatever temporary resource backs it. Dropping it without calling
/// [`OutputHandle::commit`] releases that resource and leaves nothing behind.
pub trait OutputHandle {
    /// Append bytes to the pending output.
    fn write_all(&mut self, bytes: &[u8]) -> CardResult<()>;
    /// Publish the output under its file name and release the handle.
    fn commit(self: Box<Self>) -> CardResult<SavedCard>;
}

/// Sink contract for exported cards.
pub trait CardSink {
    /// Acquire a handle for one export named `filename`.
    fn begin(&mut self, filename: &str) -> CardResult<Box<dyn OutputHandle + '_>>;
}

/// Writes cards into a directory, staging each through a hidden `.part` file.
#[derive(Clone, Debug)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    /// Sink writing into `dir`; the directory is created on first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl CardSink for DirSink {
    fn begin(&mut self, filename: &str) -> CardResult<Box<dyn OutputHandle + '_>> {
        if filename.is_empty() || filename.contains(['/', '\\']) {
            return Err(CardError::validation(format!(
                "output file name must be a bare name, got \"{filename}\""
            )));
        }
        std::fs::create_dir_all(&self.dir)?;

        let final_path = self.dir.join(filename);
        let tmp_path = self.dir.join(format!(".{filename}.part"));
        let file = File::create(&tmp_path)?;
        tracing::debug!(path = %tmp_path.display(), "staging card export");

        Ok(Box::new(DirHandle {
            filename: filename.to_owned(),
            tmp_path,
            final_path,
            file: Some(file),
            written: 0,
            committed: false,
        }))
    }
}

struct DirHandle {
    filename: String,
    tmp_path: PathBuf,
    final_path: PathBuf,
    file: Option<File>,
    written: usize,
    committed: bool,
}

impl OutputHandle for DirHandle {
    fn write_all(&mut self, bytes: &[u8]) -> CardResult<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| CardError::encode("output handle already closed"))?;
        file.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }

    fn commit(mut self: Box<Self>) -> CardResult<SavedCard> {
        let file = self
            .file
            .take()
            .ok_or_else(|| CardError::encode("output handle already closed"))?;
        file.sync_all()?;
        drop(file);

        std::fs::rename(&self.tmp_path, &self.final_path)?;
        self.committed = true;
        Ok(SavedCard {
            filename: self.filename.clone(),
            path: Some(self.final_path.clone()),
            len: self.written,
        })
    }
}

impl Drop for DirHandle {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        self.file.take();
        if let Err(err) = std::fs::remove_file(&self.tmp_path) {
            tracing::debug!(
                path = %self.tmp_path.display(),
                %err,
                "could not remove staged export"
            );
        }
    }
}

/// In-memory sink for tests and previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    saved: Vec<(String, Vec<u8>)>,
    released: usize,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed `(file name, bytes)` pairs in commit order.
    pub fn saved(&self) -> &[(String, Vec<u8>)] {
        &self.saved
    }

    /// Number of handles that were closed, committed or not.
    pub fn released(&self) -> usize {
        self.released
    }
}

impl CardSink for InMemorySink {
    fn begin(&mut self, filename: &str) -> CardResult<Box<dyn OutputHandle + '_>> {
        Ok(Box::new(MemoryHandle {
            filename: filename.to_owned(),
            buf: Vec::new(),
            sink: self,
        }))
    }
}

struct MemoryHandle<'a> {
    filename: String,
    buf: Vec<u8>,
    sink: &'a mut InMemorySink,
}

impl OutputHandle for MemoryHandle<'_> {
    fn write_all(&mut self, bytes: &[u8]) -> CardResult<()> {
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    fn commit(mut self: Box<Self>) -> CardResult<SavedCard> {
        let buf = std::mem::take(&mut self.buf);
        let len = buf.len();
        let filename = self.filename.clone();
        self.sink.saved.push((filename.clone(), buf));
        Ok(SavedCard {
            filename,
            path: None,
            len,
        })
    }
}

impl Drop for MemoryHandle<'_> {
    fn drop(&mut self) {
        self.sink.released += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
