pub use databases::handle_databases;
pub use jobs::{handle_admin_jobs, handle_job_status};
pub use report::{handle_download, handle_report};
pub use submit::handle_submit;

mod databases;
mod jobs;
mod report;
mod submit;
