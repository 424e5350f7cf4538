//! Timestamped run log.
//!
//! Each entry is a `[time, item, status]` triple; rendered as fixed-width
//! columns of 30/50/30 characters under a `#`-padded banner.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const TIME_WIDTH: usize = 30;
pub const ITEM_WIDTH: usize = 50;
pub const STATUS_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogStatus {
    Start,
    Succeed,
    Failed,
    Warning,
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogStatus::Start => "Start",
            LogStatus::Succeed => "Succeed",
            LogStatus::Failed => "Failed",
            LogStatus::Warning => "Warning",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: String,
    pub item: String,
    pub status: LogStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunLog {
    entries: Vec<LogEntry>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry stamped with the local wall-clock time.
    pub fn record(&mut self, item: impl Into<String>, status: LogStatus) {
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        self.push(LogEntry {
            time,
            item: item.into(),
            status,
        });
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn start(&mut self, item: impl Into<String>) {
        self.record(item, LogStatus::Start);
    }

    pub fn succeed(&mut self, item: impl Into<String>) {
        self.record(item, LogStatus::Succeed);
    }

    pub fn failed(&mut self, item: impl Into<String>) {
        self.record(item, LogStatus::Failed);
    }

    pub fn warn(&mut self, item: impl Into<String>) {
        self.record(item, LogStatus::Warning);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn failures(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.status == LogStatus::Failed)
    }

    pub fn render(&self, title: &str) -> String {
        let mut out = format!("{:#^50}\n", format!(" {title} "));
        for e in &self.entries {
            let line = format!(
                "{:<tw$}{:<iw$}{:<sw$}",
                e.time,
                e.item,
                e.status.to_string(),
                tw = TIME_WIDTH,
                iw = ITEM_WIDTH,
                sw = STATUS_WIDTH,
            );
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(item: &str, status: LogStatus) -> LogEntry {
        LogEntry {
            time: "12:00:00".to_string(),
            item: item.to_string(),
            status,
        }
    }

    #[test]
    fn render_uses_fixed_columns() {
        let mut log = RunLog::new();
        log.push(entry("Reading model", LogStatus::Succeed));
        let text = log.render("Post-processing");
        let mut lines = text.lines();
        let banner = lines.next().unwrap();
        assert_eq!(banner.len(), 50);
        assert!(banner.starts_with('#'));
        assert!(banner.contains(" Post-processing "));

        let row = lines.next().unwrap();
        assert_eq!(&row[..8], "12:00:00");
        assert_eq!(&row[30..43], "Reading model");
        assert_eq!(&row[80..], "Succeed");
    }

    #[test]
    fn failures_are_filtered() {
        let mut log = RunLog::new();
        log.succeed("a");
        log.failed("b");
        log.warn("c");
        let failed: Vec<_> = log.failures().map(|e| e.item.as_str()).collect();
        assert_eq!(failed, vec!["b"]);
        assert_eq!(log.entries().len(), 3);
        assert_eq!(log.entries()[0].time.len(), 8);
    }
}
