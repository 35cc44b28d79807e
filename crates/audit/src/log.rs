//! Append-only audit log file

use crate::error::AuditError;
use crate::event::AuditEvent;
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

const LOG_FILE_NAME: &str = "audit.log";

/// Append-only, line-oriented audit log.
///
/// The file is opened per append so every event reaches the OS before the
/// business operation returns; there is no buffered writer to lose on crash.
pub struct AuditLog {
    path: PathBuf,
}

/// Result of a tail read: the requested window plus the full store size,
/// so callers can display "showing N of M".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditTail {
    pub lines: Vec<String>,
    pub total: usize,
}

impl AuditLog {
    /// Create an audit log inside the given directory (created if absent).
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, AuditError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(LOG_FILE_NAME),
        })
    }

    /// Append one event, stamped with the current local time.
    pub fn append(&self, event: &AuditEvent) -> Result<(), AuditError> {
        let line = event.format_line(Local::now());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Read every line in write order. An absent file is an empty log.
    pub fn read_all(&self) -> Result<Vec<String>, AuditError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            lines.push(line);
        }
        Ok(lines)
    }

    /// Last `limit` entries in chronological order (oldest of the window
    /// first), plus the total entry count. Asking for more than exists
    /// returns everything.
    pub fn tail(&self, limit: usize) -> Result<AuditTail, AuditError> {
        let lines = self.read_all()?;
        let total = lines.len();
        let skip = total.saturating_sub(limit);
        Ok(AuditTail {
            lines: lines[skip..].to_vec(),
            total,
        })
    }

    /// Path of the underlying log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn temp_log() -> (TempDir, AuditLog) {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("logs")).unwrap();
        (dir, log)
    }

    #[test]
    fn test_append_creates_file_and_line() {
        let (_dir, log) = temp_log();
        log.append(&AuditEvent::login_success("42")).unwrap();

        let lines = log.read_all().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ACTION=LOGIN account=42 status=SUCCESS"));
        assert!(lines[0].starts_with('['));
    }

    #[test]
    fn test_append_preserves_order() {
        let (_dir, log) = temp_log();
        log.append(&AuditEvent::deposit("42", dec!(100))).unwrap();
        log.append(&AuditEvent::withdraw("42", dec!(30))).unwrap();
        log.append(&AuditEvent::wrong_pin("42")).unwrap();

        let lines = log.read_all().unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("ACTION=DEPOSIT"));
        assert!(lines[1].contains("ACTION=WITHDRAW"));
        assert!(lines[2].contains("ACTION=WRONG_PIN"));
    }

    #[test]
    fn test_read_all_missing_file_is_empty() {
        let (_dir, log) = temp_log();
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_tail_returns_last_entries_in_order() {
        let (_dir, log) = temp_log();
        for i in 0..5 {
            log.append(&AuditEvent::deposit(format!("acct-{i}"), dec!(1)))
                .unwrap();
        }

        let tail = log.tail(2).unwrap();
        assert_eq!(tail.total, 5);
        assert_eq!(tail.lines.len(), 2);
        assert!(tail.lines[0].contains("acct-3"));
        assert!(tail.lines[1].contains("acct-4"));
    }

    #[test]
    fn test_tail_larger_than_log_returns_everything() {
        let (_dir, log) = temp_log();
        log.append(&AuditEvent::login_success("42")).unwrap();

        let tail = log.tail(50).unwrap();
        assert_eq!(tail.total, 1);
        assert_eq!(tail.lines.len(), 1);
    }

    #[test]
    fn test_tail_empty_log() {
        let (_dir, log) = temp_log();
        let tail = log.tail(50).unwrap();
        assert_eq!(tail.total, 0);
        assert!(tail.lines.is_empty());
    }
}
