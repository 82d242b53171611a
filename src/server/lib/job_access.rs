use crate::{
    lib::token,
    model::{AppState, Job, JobId},
    server::lib::ErrorDetail,
};

/// Token is checked before the lookup, unknown and foreign jobs look alike.
pub fn authorized_job(state: &AppState, id: JobId, job_token: &str) -> Result<Job, ErrorDetail> {
    token::verify(&state.hmac, id, job_token)?;

    state.queue.get(id).ok_or(ErrorDetail::UnknownJob)
}

pub fn bearer_token(http_request: &actix_web::HttpRequest) -> Option<&'_ str> {
    http_request
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}
