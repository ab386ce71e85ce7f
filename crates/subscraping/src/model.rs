use crate::Error;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

// region:        --- Results

/// One item emitted by a source while it runs.
#[derive(Debug)]
pub struct SourceResult {
    pub source: String,
    pub kind: ResultKind,
}

#[derive(Debug)]
pub enum ResultKind {
    Subdomain(String),
    Error(Error),
}

impl SourceResult {
    pub fn subdomain(source: &str, value: impl Into<String>) -> Self {
        Self {
            source: source.to_string(),
            kind: ResultKind::Subdomain(value.into()),
        }
    }

    pub fn error(source: &str, err: Error) -> Self {
        Self {
            source: source.to_string(),
            kind: ResultKind::Error(err),
        }
    }

    pub fn as_subdomain(&self) -> Option<&str> {
        match &self.kind {
            ResultKind::Subdomain(value) => Some(value),
            ResultKind::Error(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, ResultKind::Error(_))
    }
}

/// Line printed by the CLI in `--json` mode.
#[derive(Debug, Serialize)]
pub struct SubdomainLine<'a> {
    pub source: &'a str,
    pub host: &'a str,
}

// endregion:     --- Results

// region:        --- Statistics

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub errors: usize,
    pub results: usize,
    pub time_taken: Duration,
    pub skipped: bool,
}

/// Counters shared between a source and the task spawned by its `run`.
#[derive(Debug, Default)]
pub struct StatsRecorder {
    errors: AtomicUsize,
    results: AtomicUsize,
    time_taken_us: AtomicU64,
    skipped: AtomicBool,
}

impl StatsRecorder {
    pub fn reset(&self) {
        self.errors.store(0, Ordering::SeqCst);
        self.results.store(0, Ordering::SeqCst);
        self.time_taken_us.store(0, Ordering::SeqCst);
        self.skipped.store(false, Ordering::SeqCst);
    }

    pub fn add_error(&self) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }

    pub fn add_result(&self) {
        self.results.fetch_add(1, Ordering::SeqCst);
    }

    pub fn mark_skipped(&self) {
        self.skipped.store(true, Ordering::SeqCst);
    }

    pub fn set_time_taken(&self, elapsed: Duration) {
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.time_taken_us.store(micros, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Statistics {
        Statistics {
            errors: self.errors.load(Ordering::SeqCst),
            results: self.results.load(Ordering::SeqCst),
            time_taken: Duration::from_micros(self.time_taken_us.load(Ordering::SeqCst)),
            skipped: self.skipped.load(Ordering::SeqCst),
        }
    }
}

// endregion:     --- Statistics
