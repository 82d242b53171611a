use crate::{
    lib::{BrowserLinks, LinkOut},
    model::{Job, JobId, JobStatus},
};

const TABULAR_COLUMNS: usize = 12;

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("Line {line}: expected 12 columns, found {found}")]
    ColumnCount { line: usize, found: usize },
    #[error("Line {line}: column `{column}` has invalid value `{value}`")]
    InvalidValue {
        line: usize,
        column: &'static str,
        value: String,
    },
}

/// One row of the BLAST tabular output (`-outfmt 6`).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Hit {
    pub query_id: String,
    pub subject_id: String,
    pub identity: f64,
    pub length: usize,
    pub mismatch: usize,
    pub gap_open: usize,
    pub q_start: usize,
    pub q_end: usize,
    pub s_start: usize,
    pub s_end: usize,
    pub e_value: f64,
    pub bit_score: f64,
}

#[derive(Debug, serde::Serialize)]
pub struct LinkedHit {
    #[serde(flatten)]
    pub hit: Hit,
    pub record_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_out_url: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct Report {
    pub job_id: JobId,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    pub hits: Vec<LinkedHit>,
}

pub fn parse_tabular(input: &str) -> Result<Vec<Hit>, ReportError> {
    let mut hits = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;

        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = line.split('\t').map(str::trim).collect();

        if columns.len() != TABULAR_COLUMNS {
            return Err(ReportError::ColumnCount {
                line: line_number,
                found: columns.len(),
            });
        }

        let parse_usize = |position: usize, column: &'static str| {
            columns[position]
                .parse::<usize>()
                .map_err(|_| ReportError::InvalidValue {
                    line: line_number,
                    column,
                    value: String::from(columns[position]),
                })
        };
        let parse_f64 = |position: usize, column: &'static str| {
            columns[position]
                .parse::<f64>()
                .map_err(|_| ReportError::InvalidValue {
                    line: line_number,
                    column,
                    value: String::from(columns[position]),
                })
        };

        hits.push(Hit {
            query_id: String::from(columns[0]),
            subject_id: String::from(columns[1]),
            identity: parse_f64(2, "pident")?,
            length: parse_usize(3, "length")?,
            mismatch: parse_usize(4, "mismatch")?,
            gap_open: parse_usize(5, "gapopen")?,
            q_start: parse_usize(6, "qstart")?,
            q_end: parse_usize(7, "qend")?,
            s_start: parse_usize(8, "sstart")?,
            s_end: parse_usize(9, "send")?,
            e_value: parse_f64(10, "evalue")?,
            bit_score: parse_f64(11, "bitscore")?,
        });
    }

    Ok(hits)
}

impl Report {
    /// Genome browser links are only attached for searches against named databases.
    pub fn build(
        job: &Job,
        hits: Vec<Hit>,
        browser_links: Option<&BrowserLinks>,
        link_out: &LinkOut,
    ) -> Self {
        let database = job.database();

        Self {
            job_id: job.id,
            status: job.status,
            database: database.map(String::from),
            hits: hits
                .into_iter()
                .map(|hit| {
                    let record_id = String::from(link_out.record_id(&hit.subject_id));
                    let browser_url = browser_links.zip(database).map(|(links, database)| {
                        links.link(
                            database,
                            &BrowserLinks::location(&record_id, hit.s_start, hit.s_end),
                        )
                    });

                    LinkedHit {
                        link_out_url: link_out.url(&hit.subject_id),
                        browser_url,
                        record_id,
                        hit,
                    }
                })
                .collect(),
        }
    }
}
