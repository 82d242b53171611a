use chrono::{DateTime, Utc};

use crate::model::BlastProgram;

pub type JobId = uuid::Uuid;

pub const DEFAULT_EVALUE: f64 = 0.001;
pub const DEFAULT_MAX_TARGET_SEQS: u32 = 10;

#[derive(Debug, Clone, Copy, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum JobTransitionError {
    #[error("Job can't move from {from:?} to {to:?}")]
    Invalid { from: JobStatus, to: JobStatus },
}

/// What a job searches against.
#[derive(Debug, Clone, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum JobTarget {
    Database(String),
    /// FASTA supplied with the submission, stored next to the query.
    Upload,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct JobOptions {
    pub evalue: f64,
    pub max_target_seqs: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_size: Option<u32>,
}

impl Default for JobOptions {
    fn default() -> Self {
        Self {
            evalue: DEFAULT_EVALUE,
            max_target_seqs: DEFAULT_MAX_TARGET_SEQS,
            word_size: None,
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct Job {
    pub id: JobId,
    pub program: BlastProgram,
    pub target: JobTarget,
    pub options: JobOptions,
    pub status: JobStatus,
    pub submitted_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    fn can_become(self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Running)
                | (Self::Pending, Self::Failed)
                | (Self::Running, Self::Completed)
                | (Self::Running, Self::Failed)
        )
    }
}

impl Job {
    pub fn new(program: BlastProgram, target: JobTarget, options: JobOptions) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            program,
            target,
            options,
            status: JobStatus::Pending,
            submitted_at: Utc::now(),
            started_at: None,
            finished_at: None,
            error: None,
        }
    }

    pub fn database(&self) -> Option<&str> {
        match &self.target {
            JobTarget::Database(name) => Some(name.as_str()),
            JobTarget::Upload => None,
        }
    }

    pub fn start(&mut self) -> Result<(), JobTransitionError> {
        self.transition(JobStatus::Running)?;
        self.started_at = Some(Utc::now());

        Ok(())
    }

    pub fn complete(&mut self) -> Result<(), JobTransitionError> {
        self.transition(JobStatus::Completed)?;
        self.finished_at = Some(Utc::now());

        Ok(())
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), JobTransitionError> {
        self.transition(JobStatus::Failed)?;
        self.finished_at = Some(Utc::now());
        self.error = Some(reason.into());

        Ok(())
    }

    fn transition(&mut self, next: JobStatus) -> Result<(), JobTransitionError> {
        if self.status.can_become(next) {
            self.status = next;
            Ok(())
        } else {
            Err(JobTransitionError::Invalid {
                from: self.status,
                to: next,
            })
        }
    }
}
