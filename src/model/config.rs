use std::{borrow::Cow, path::PathBuf};

#[derive(Debug)]
pub enum SocketListener {
    Tcp(std::net::SocketAddr),
    #[cfg(unix)]
    Unix(PathBuf),
}

#[derive(Debug)]
pub struct Config<'secret> {
    pub admin_token: Option<String>,
    pub allow_subject_upload: bool,
    pub blast_bin_dir: Option<PathBuf>,
    pub blast_threads: u8,
    pub browser_base_url: Option<String>,
    pub catalog: PathBuf,
    pub hmac_secret: Cow<'secret, [u8]>,
    pub http_workers: Option<usize>,
    pub job_workers: usize,
    pub listen: SocketListener,
    pub log_level: log::LevelFilter,
    pub max_residues: Option<usize>,
    pub work_dir: PathBuf,
}
