pub use error_response::{ErrorDetail, get_error_response};
pub use job_access::{authorized_job, bearer_token};

mod error_response;
mod job_access;
