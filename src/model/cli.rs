use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Token required by the admin job listing (disabled when unset)
    #[clap(long, env = "BLASTPORTAL_ADMIN_TOKEN")]
    pub admin_token: Option<String>,
    /// Allow searching against an uploaded FASTA instead of a configured database
    #[clap(short = 'u', long, env = "BLASTPORTAL_ALLOW_SUBJECT_UPLOAD")]
    pub allow_subject_upload: bool,
    /// Genome browser base URL ending in `data=`, used when the catalog has no [browser] section
    #[clap(long, env = "BLASTPORTAL_BROWSER_BASE_URL")]
    pub browser_base_url: Option<String>,
    /// Directory containing the BLAST+ executables (uses PATH when unset)
    #[clap(short = 'b', long, env = "BLASTPORTAL_BLAST_BIN_DIR")]
    pub blast_bin_dir: Option<std::path::PathBuf>,
    /// Threads passed to BLAST+ for database searches
    #[clap(long, env = "BLASTPORTAL_BLAST_THREADS", default_value_t = 1)]
    pub blast_threads: u8,
    /// TOML file describing the BLAST databases and genome browser mapping
    #[clap(short, long, env = "BLASTPORTAL_CATALOG")]
    pub catalog: std::path::PathBuf,
    /// Base64 encoded string to use as HMAC 256 secret for job tokens
    #[clap(short = 's', long, env = "BLASTPORTAL_HMAC_SECRET")]
    pub hmac_secret: String,
    /// Address and port or unix socket path to listen on (HTTP)
    #[clap(short, long, env = "BLASTPORTAL_LISTEN")]
    pub listen: String,
    /// Log level to use
    #[clap(short = 'v', long, env = "BLASTPORTAL_LOG_LEVEL", default_value_t = log::LevelFilter::Warn)]
    pub log_level: log::LevelFilter,
    /// Maximum number of residues accepted per submitted FASTA
    #[clap(long, env = "BLASTPORTAL_MAX_RESIDUES")]
    pub max_residues: Option<usize>,
    /// Number of BLAST jobs running at the same time
    #[clap(short = 'j', long, env = "BLASTPORTAL_JOB_WORKERS", default_value_t = 1)]
    pub job_workers: usize,
    /// Number of HTTP workers (defaults to the number of physical cores)
    #[clap(short = 'w', long, env = "BLASTPORTAL_HTTP_WORKERS")]
    pub http_workers: Option<usize>,
    /// Directory holding job inputs, results and metadata
    #[clap(short = 'd', long, env = "BLASTPORTAL_WORK_DIR")]
    pub work_dir: std::path::PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Args;

    #[test]
    fn parse_minimal_arguments() {
        let args = Args::try_parse_from([
            "blastportal",
            "--catalog",
            "catalog.toml",
            "--hmac-secret",
            "ZXhhbXBsZQ==",
            "--listen",
            "127.0.0.1:8080",
            "--work-dir",
            "/var/lib/blastportal",
        ])
        .unwrap();

        assert_eq!(args.log_level, log::LevelFilter::Warn);
        assert_eq!(args.job_workers, 1);
        assert_eq!(args.blast_threads, 1);
        assert!(!args.allow_subject_upload);
        assert!(args.admin_token.is_none());
        assert!(args.blast_bin_dir.is_none());
        assert!(args.browser_base_url.is_none());
    }

    #[test]
    fn require_catalog() {
        assert!(
            Args::try_parse_from([
                "blastportal",
                "--hmac-secret",
                "ZXhhbXBsZQ==",
                "--listen",
                "127.0.0.1:8080",
                "--work-dir",
                "/tmp"
            ])
            .is_err()
        );
    }
}
