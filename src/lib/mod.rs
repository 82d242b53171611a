pub use browser_link::{BrowserConfigError, BrowserLinks};
pub use command::{CommandLine, JobDirectory, job_commands};
pub use executor::{Executor, ExecutorError, ProcessExecutor};
pub use fasta::{FastaError, normalize_sequence};
pub use link_out::{LinkOut, LinkOutError};
pub use queue::{Dispatcher, JobQueue, NewJob, QueueError};
pub use report::{Report, ReportError, parse_tabular};
#[cfg(test)]
pub use shared::test_hmac;
pub use shared::{BASE64_ENGINE, HEADER_VALUE_NO_CACHE, HmacInstance};
pub use token::TokenError;

mod browser_link;
mod command;
mod executor;
mod fasta;
mod link_out;
mod queue;
mod report;
mod shared;
pub mod token;
