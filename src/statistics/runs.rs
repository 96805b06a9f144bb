use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ResultError};

/// Start/end timestamps and host of one learning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    start: SystemTime,
    end: Option<SystemTime>,
    host: String,
}

impl RunRecord {
    pub fn new(start: SystemTime, host: impl Into<String>) -> Self {
        RunRecord {
            start,
            end: None,
            host: host.into(),
        }
    }

    pub fn start(&self) -> SystemTime {
        self.start
    }

    pub fn end(&self) -> Option<SystemTime> {
        self.end
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Wall-clock duration of a stopped run, `None` while it is still open.
    pub fn runtime(&self) -> Option<Duration> {
        self.end
            .map(|end| end.duration_since(self.start).unwrap_or_default())
    }

    /// A stopped run cannot end before it started.
    pub(crate) fn is_consistent(&self) -> bool {
        self.end.is_none_or(|end| end >= self.start)
    }
}

/// Ordered list of the runs that contributed to a result collection.
///
/// At most one run is expected to be open at a time, but this is bookkeeping rather than
/// a lock: nothing prevents starting a second run before stopping the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunLog {
    records: Vec<RunRecord>,
}

impl RunLog {
    pub fn new() -> Self {
        RunLog {
            records: Vec::new(),
        }
    }

    /// Record into the log that a new run starts now on this host.
    pub fn start(&mut self) -> usize {
        self.start_at(SystemTime::now())
    }

    pub fn start_at(&mut self, start: SystemTime) -> usize {
        self.records.push(RunRecord::new(start, current_host()));
        self.records.len() - 1
    }

    /// Closes the most recently started run that is still open.
    ///
    /// # Errors
    /// [`ResultError::InvalidState`] if no run is open.
    pub fn stop(&mut self) -> Result<()> {
        self.stop_at(SystemTime::now())
    }

    /// # Errors
    /// [`ResultError::InvalidState`] if no run is open or `end` precedes the run's start.
    pub fn stop_at(&mut self, end: SystemTime) -> Result<()> {
        let record = self
            .records
            .iter_mut()
            .rev()
            .find(|r| r.is_open())
            .ok_or_else(|| ResultError::InvalidState("no open run to stop".into()))?;

        if end < record.start {
            return Err(ResultError::InvalidState(
                "run cannot stop before it started".into(),
            ));
        }
        record.end = Some(end);
        Ok(())
    }

    pub fn open_run(&self) -> Option<&RunRecord> {
        self.records.iter().rev().find(|r| r.is_open())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RunRecord> {
        self.records.iter()
    }

    /// Concatenation of both logs, `self` first. Records are not deduplicated.
    pub fn merge(&self, other: &RunLog) -> RunLog {
        let mut records = Vec::with_capacity(self.records.len() + other.records.len());
        records.extend_from_slice(&self.records);
        records.extend_from_slice(&other.records);
        RunLog { records }
    }

    pub(crate) fn from_records(records: Vec<RunRecord>) -> Self {
        RunLog { records }
    }
}

impl<'a> IntoIterator for &'a RunLog {
    type Item = &'a RunRecord;
    type IntoIter = std::slice::Iter<'a, RunRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Name of the machine running this process, `"unknown"` if it cannot be determined.
pub fn current_host() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .or_else(|| std::fs::read_to_string("/etc/hostname").ok())
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
