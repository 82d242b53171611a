use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::model::{Job, JobId, JobTarget, ResultFormat};

const QUERY_FILE: &str = "query.fasta";
const SUBJECT_FILE: &str = "subject.fasta";
const METADATA_FILE: &str = "job.json";
const FORMATTER_BINARY: &str = "blast_formatter";

/// Invocation of a BLAST+ binary, resolved against the configured binary directory.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CommandLine {
    pub binary: &'static str,
    pub args: Vec<OsString>,
}

impl CommandLine {
    fn new(binary: &'static str) -> Self {
        Self {
            binary,
            args: Vec::new(),
        }
    }

    fn arg(mut self, name: &str, value: impl Into<OsString>) -> Self {
        self.args.push(OsString::from(name));
        self.args.push(value.into());
        self
    }

    pub fn display_args(&self) -> String {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Layout of the files belonging to a single job.
#[derive(Debug, Clone)]
pub struct JobDirectory {
    root: PathBuf,
}

impl JobDirectory {
    pub fn new(work_dir: &Path, id: JobId) -> Self {
        Self {
            root: work_dir.join(id.as_simple().to_string()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn query(&self) -> PathBuf {
        self.root.join(QUERY_FILE)
    }

    pub fn subject(&self) -> PathBuf {
        self.root.join(SUBJECT_FILE)
    }

    pub fn metadata(&self) -> PathBuf {
        self.root.join(METADATA_FILE)
    }

    pub fn result(&self, format: ResultFormat) -> PathBuf {
        self.root.join(format.file_name())
    }
}

/// Search writing an archive, followed by one formatter run per download format.
pub fn job_commands(
    job: &Job,
    directory: &JobDirectory,
    database_path: Option<&Path>,
    threads: u8,
) -> Vec<CommandLine> {
    let mut commands = Vec::with_capacity(1 + ResultFormat::FORMATTED.len());

    commands.push(search_command(job, directory, database_path, threads));
    commands.extend(
        ResultFormat::FORMATTED
            .iter()
            .map(|format| formatter_command(directory, *format)),
    );

    commands
}

fn search_command(
    job: &Job,
    directory: &JobDirectory,
    database_path: Option<&Path>,
    threads: u8,
) -> CommandLine {
    let mut command = CommandLine::new(job.program.binary_name()).arg("-query", directory.query());

    command = match (&job.target, database_path) {
        (JobTarget::Database(_), Some(path)) => command.arg("-db", path),
        _ => command.arg("-subject", directory.subject()),
    };

    command = command
        .arg("-evalue", job.options.evalue.to_string())
        .arg("-max_target_seqs", job.options.max_target_seqs.to_string());

    if let Some(word_size) = job.options.word_size {
        command = command.arg("-word_size", word_size.to_string());
    }

    // `-subject` searches are single threaded in BLAST+
    if database_path.is_some() && threads > 1 {
        command = command.arg("-num_threads", threads.to_string());
    }

    command
        .arg("-outfmt", ResultFormat::Archive.outfmt())
        .arg("-out", directory.result(ResultFormat::Archive))
}

fn formatter_command(directory: &JobDirectory, format: ResultFormat) -> CommandLine {
    CommandLine::new(FORMATTER_BINARY)
        .arg("-archive", directory.result(ResultFormat::Archive))
        .arg("-outfmt", format.outfmt())
        .arg("-out", directory.result(format))
}
