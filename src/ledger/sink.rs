//! # Ledger Sinks
//!
//! Where ledger records end up. The cascade tries, in order:
//!
//! 1. the primary log file (parent directories created, opened for append),
//! 2. a fresh file in the fallback directory (the system temp dir by default),
//! 3. the console.
//!
//! A level that fails to open, write or flush is abandoned and the same record
//! moves on to the next level. The cascade never climbs back up, so after a
//! degradation all later records land in the same place.

use crate::ledger::LedgerError;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Which sink accepted a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkKind {
    Primary,
    Fallback(PathBuf),
    Console,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Level {
    Primary,
    Fallback,
    Console,
}

struct OpenFile {
    kind: SinkKind,
    writer: BufWriter<File>,
}

pub struct SinkCascade {
    primary: Option<PathBuf>,
    fallback_dir: Option<PathBuf>,
    console: Box<dyn Write + Send>,
    level: Level,
    open: Option<OpenFile>,
}

impl SinkCascade {
    /// # Arguments
    /// * `primary` - Ledger file; `None` skips straight to the fallback level
    /// * `fallback_dir` - Directory for the fallback file; `None` skips to the console
    /// * `console` - Last-resort writer, normally stderr
    pub fn new(
        primary: Option<PathBuf>,
        fallback_dir: Option<PathBuf>,
        console: Box<dyn Write + Send>,
    ) -> Self {
        let level = if primary.is_some() {
            Level::Primary
        } else if fallback_dir.is_some() {
            Level::Fallback
        } else {
            Level::Console
        };
        Self {
            primary,
            fallback_dir,
            console,
            level,
            open: None,
        }
    }

    /// File ledger writing to `path`, falling back to `fallback_dir`, then stderr.
    pub fn file(path: impl Into<PathBuf>, fallback_dir: impl Into<PathBuf>) -> Self {
        Self::new(
            Some(path.into()),
            Some(fallback_dir.into()),
            Box::new(io::stderr()),
        )
    }

    /// Console-only ledger.
    pub fn console() -> Self {
        Self::new(None, None, Box::new(io::stderr()))
    }

    /// Writes and flushes one record, degrading as needed.
    pub fn write_record(&mut self, text: &str) -> Result<SinkKind, LedgerError> {
        loop {
            match self.level {
                Level::Console => {
                    return write_flushed(&mut self.console, text)
                        .map(|_| SinkKind::Console)
                        .map_err(|e| {
                            warn!(error = %e, "Console ledger write failed");
                            LedgerError::AllSinksFailed(e.to_string())
                        });
                }
                level => {
                    if self.open.is_none() {
                        match self.open_level(level) {
                            Ok(file) => self.open = Some(file),
                            Err(e) => {
                                warn!(?level, error = %e, "Could not open ledger file");
                                self.degrade();
                                continue;
                            }
                        }
                    }
                    if let Some(file) = self.open.as_mut() {
                        match write_flushed(&mut file.writer, text) {
                            Ok(()) => return Ok(file.kind.clone()),
                            Err(e) => {
                                warn!(?level, error = %e, "Ledger write failed");
                                self.degrade();
                            }
                        }
                    }
                }
            }
        }
    }

    fn flush(&mut self) -> Result<(), LedgerError> {
        let result = match self.open.as_mut() {
            Some(file) => file.writer.flush(),
            None => self.console.flush(),
        };
        result.map_err(|e| LedgerError::AllSinksFailed(e.to_string()))
    }

    /// Flushes and releases the open file, if any.
    pub fn close(&mut self) -> Result<(), LedgerError> {
        let result = self.flush();
        if let Some(file) = self.open.take() {
            debug!(kind = ?file.kind, "Ledger file closed");
        }
        result
    }

    fn degrade(&mut self) {
        self.open = None;
        self.level = match self.level {
            Level::Primary if self.fallback_dir.is_some() => Level::Fallback,
            _ => Level::Console,
        };
        info!(level = ?self.level, "Ledger degraded");
    }

    fn open_level(&self, level: Level) -> io::Result<OpenFile> {
        match (level, &self.primary, &self.fallback_dir) {
            (Level::Primary, Some(path), _) => {
                let mut file = open_append(path)?;
                let separator = missing_terminator(&mut file)?;
                let mut writer = BufWriter::new(file);
                if !separator.is_empty() {
                    warn!(path = %path.display(), "Ledger ends in a partial record; separating");
                    write_flushed(&mut writer, separator)?;
                }
                info!(path = %path.display(), "Ledger opened");
                Ok(OpenFile {
                    kind: SinkKind::Primary,
                    writer,
                })
            }
            (Level::Fallback, _, Some(dir)) => {
                let path = fallback_path(self.primary.as_deref(), dir);
                let file = OpenOptions::new().write(true).create_new(true).open(&path)?;
                warn!(path = %path.display(), "Ledger writing to fallback file");
                Ok(OpenFile {
                    kind: SinkKind::Fallback(path),
                    writer: BufWriter::new(file),
                })
            }
            _ => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no destination configured for this ledger level",
            )),
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).read(true).append(true).open(path)
}

/// What must be appended so the next record starts after a blank line.
/// Non-empty only when an earlier write was cut short.
fn missing_terminator(file: &mut File) -> io::Result<&'static str> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok("");
    }
    let tail_len = len.min(2) as usize;
    let mut tail = [0u8; 2];
    file.seek(SeekFrom::End(-(tail_len as i64)))?;
    file.read_exact(&mut tail[..tail_len])?;
    Ok(match &tail[..tail_len] {
        [b'\n', b'\n'] => "",
        [.., b'\n'] => "\n",
        _ => "\n\n",
    })
}

/// `<stem>-<pid>-<millis>.<ext>` inside `dir`, named after the primary file.
fn fallback_path(primary: Option<&Path>, dir: &Path) -> PathBuf {
    let stem = primary
        .and_then(Path::file_stem)
        .and_then(|s| s.to_str())
        .unwrap_or("orders");
    let ext = primary
        .and_then(Path::extension)
        .and_then(|s| s.to_str())
        .unwrap_or("log");
    let millis = chrono::Utc::now().timestamp_millis();
    dir.join(format!("{}-{}-{}.{}", stem, std::process::id(), millis, ext))
}

fn write_flushed<W: Write + ?Sized>(writer: &mut W, text: &str) -> io::Result<()> {
    writer.write_all(text.as_bytes())?;
    writer.flush()
}
