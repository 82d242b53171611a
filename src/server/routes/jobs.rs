use crate::{
    lib::token,
    model::{AppState, JobId, TokenQuery},
    server::lib::{ErrorDetail, authorized_job, bearer_token, get_error_response},
};

#[actix_web::get("/blast/jobs/{id}")]
pub async fn handle_job_status(
    state: actix_web::web::Data<AppState>,
    id: actix_web::web::Path<JobId>,
    query: actix_web::web::Query<TokenQuery>,
) -> actix_web::HttpResponse {
    match authorized_job(&state, id.into_inner(), &query.token) {
        Ok(job) => get_base_response().json(job),
        Err(err) => get_error_response(err),
    }
}

#[actix_web::get("/admin/jobs")]
pub async fn handle_admin_jobs(
    state: actix_web::web::Data<AppState>,
    http_request: actix_web::HttpRequest,
) -> actix_web::HttpResponse {
    let Some(admin_token) = state.admin_token.as_deref() else {
        return get_error_response(ErrorDetail::NotFound);
    };

    match bearer_token(&http_request) {
        Some(presented) if token::secret_matches(&state.hmac, admin_token, presented) => {
            get_base_response().json(state.queue.list())
        }
        _ => get_error_response(ErrorDetail::Unauthorized),
    }
}

fn get_base_response() -> actix_web::HttpResponseBuilder {
    let mut response = actix_web::HttpResponse::Ok();

    response.insert_header((
        actix_web::http::header::CACHE_CONTROL,
        crate::lib::HEADER_VALUE_NO_CACHE.clone(),
    ));

    response
}
