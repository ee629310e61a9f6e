use std::path::PathBuf;

use serde::Serialize;

/// A completed external process run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub command:   String,
    pub exit_code: Option<i32>,
    pub stderr:    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Succeeded {
        exit_code: Option<i32>,
        stderr:    String,
    },
    Skipped {
        reason: String,
    },
    Failed {
        error: String,
    },
}

impl From<Invocation> for Outcome {
    fn from(inv: Invocation) -> Self {
        Self::Succeeded {
            exit_code: inv.exit_code,
            stderr:    inv.stderr,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub input:   PathBuf,
    pub output:  PathBuf,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl FileReport {
    pub const fn succeeded(&self) -> bool {
        matches!(self.outcome, Outcome::Succeeded { .. })
    }

    pub const fn skipped(&self) -> bool {
        matches!(self.outcome, Outcome::Skipped { .. })
    }

    pub const fn failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }
}

/// Per-file outcomes of a directory run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| f.succeeded()).count()
    }

    pub fn skipped(&self) -> usize {
        self.files.iter().filter(|f| f.skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.files.iter().filter(|f| f.failed()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "report", rename_all = "lowercase")]
pub enum RunReport {
    File(FileReport),
    Batch(BatchReport),
}

impl RunReport {
    /// True when nothing failed. Skipped files do not count as failures.
    pub fn is_success(&self) -> bool {
        match self {
            Self::File(file) => !file.failed(),
            Self::Batch(batch) => batch.failed() == 0,
        }
    }
}
