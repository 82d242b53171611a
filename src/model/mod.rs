mod app_state;
mod catalog;
mod cli;
mod config;
mod http;
mod job;
mod result_format;
mod sequence;

pub use app_state::AppState;
pub use catalog::{
    BlastDatabase, BrowserConfig, BrowserMapping, Catalog, CatalogError, DEFAULT_BROWSER_FOLDER,
    LinkOutConfig,
};
pub use cli::Args as CliArgs;
pub use config::{Config, SocketListener};
pub use http::{DatabaseQuery, SubmitBody, SubmitResponse, TokenQuery};
pub use job::{Job, JobId, JobOptions, JobStatus, JobTarget, JobTransitionError};
pub use result_format::ResultFormat;
pub use sequence::{BlastProgram, SequenceParseError, SequenceType};
