//! Append-only log of package status changes.

use std::io::{self, Write};

use courier_core::StatusChange;

/// Writes one line per status change and flushes after every batch.
///
/// # Examples
/// ```
/// use courier_core::{PackageStatus, StatusChange};
/// use courier_service::EventLog;
///
/// let mut log = EventLog::new(Vec::new());
/// log.record(&[StatusChange::new(101, 3, PackageStatus::Delivered)]).expect("in memory");
/// assert_eq!(
///     String::from_utf8(log.into_inner()).expect("UTF-8"),
///     "Status of package 101 was changed on the day 3 to: delivered\n"
/// );
/// ```
#[derive(Debug)]
pub struct EventLog<W> {
    writer: W,
    written: usize,
}

impl<W: Write> EventLog<W> {
    /// Log into `writer`, which should start out empty.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Append `changes` in the given order.
    ///
    /// # Errors
    ///
    /// Propagates write and flush failures from the writer.
    pub fn record(&mut self, changes: &[StatusChange]) -> io::Result<()> {
        for change in changes {
            writeln!(self.writer, "{}", format_event(change))?;
        }
        self.writer.flush()?;
        self.written = self.written.saturating_add(changes.len());
        Ok(())
    }

    /// Number of lines written so far.
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Borrow the underlying writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Recover the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Render one change as a log line, without the trailing newline.
#[must_use]
pub fn format_event(change: &StatusChange) -> String {
    format!(
        "Status of package {} was changed on the day {} to: {}",
        change.package, change.day, change.status
    )
}
