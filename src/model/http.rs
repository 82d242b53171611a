use crate::model::{BlastProgram, JobId, JobStatus, SequenceType};

#[derive(serde::Deserialize, serde::Serialize, Debug)]
pub struct TokenQuery {
    pub token: String,
}

#[derive(serde::Deserialize, Debug)]
pub struct DatabaseQuery {
    pub kind: Option<SequenceType>,
}

/// Search submission, accepted as form data or JSON.
#[derive(serde::Deserialize, Debug)]
pub struct SubmitBody {
    pub query: String,
    pub database: Option<String>,
    /// FASTA to search against instead of `database`.
    pub subject: Option<String>,
    pub program: Option<BlastProgram>,
    pub evalue: Option<f64>,
    pub max_target_seqs: Option<u32>,
    pub word_size: Option<u32>,
}

#[derive(serde::Serialize, Debug)]
pub struct SubmitResponse {
    pub id: JobId,
    pub token: String,
    pub status: JobStatus,
    pub status_url: String,
    pub report_url: String,
}
