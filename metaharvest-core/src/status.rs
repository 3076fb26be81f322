//! Run-scoped status tracking.
//!
//! Every entity the pipeline touches is recorded here by fully qualified
//! name: emitted records as registered, filter rejections with their reason,
//! and per-table failures. The summary feeds the end-of-run report.

use serde::Serialize;

/// One filtered entity and why it was skipped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredEntity {
    pub name: String,
    pub reason: String,
}

/// Tracks registered, filtered, and failed entities for one run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStatus {
    registered: Vec<String>,
    filtered: Vec<FilteredEntity>,
    failed: Vec<String>,
}

impl RunStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an emitted record by fully qualified name.
    pub fn register(&mut self, name: impl Into<String>) {
        self.registered.push(name.into());
    }

    /// Records a filter rejection with its reason.
    pub fn filter(&mut self, name: impl Into<String>, reason: impl Into<String>) {
        self.filtered.push(FilteredEntity {
            name: name.into(),
            reason: reason.into(),
        });
    }

    /// Records a per-table extraction failure.
    pub fn failure(&mut self, name: impl Into<String>) {
        self.failed.push(name.into());
    }

    pub fn registered(&self) -> &[String] {
        &self.registered
    }

    pub fn filtered(&self) -> &[FilteredEntity] {
        &self.filtered
    }

    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    /// Counts for the run-summary report.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            registered: self.registered.len(),
            filtered: self.filtered.len(),
            failed: self.failed.len(),
        }
    }
}

/// Aggregate counts for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub registered: usize,
    pub filtered: usize,
    pub failed: usize,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} registered, {} filtered, {} failed",
            self.registered, self.filtered, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_status() {
        let status = RunStatus::new();
        let summary = status.summary();
        assert_eq!(summary.registered, 0);
        assert_eq!(summary.filtered, 0);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn test_counts() {
        let mut status = RunStatus::new();
        status.register("svc.db.public.t1");
        status.register("svc.db.public.t2");
        status.filter("svc.db.public.tmp_x", "pattern not allowed");
        status.failure("svc.db.public.t3");

        let summary = status.summary();
        assert_eq!(summary.registered, 2);
        assert_eq!(summary.filtered, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(
            summary.to_string(),
            "2 registered, 1 filtered, 1 failed"
        );
    }

    #[test]
    fn test_filter_reason_preserved() {
        let mut status = RunStatus::new();
        status.filter("svc.db.s.t", "view pattern not allowed");
        assert_eq!(status.filtered()[0].reason, "view pattern not allowed");
    }
}
