use crate::{
    lib::{Report, parse_tabular},
    model::{AppState, Job, JobId, JobStatus, ResultFormat, TokenQuery},
    server::lib::{ErrorDetail, authorized_job, get_error_response},
};

#[actix_web::get("/blast/report/{id}")]
pub async fn handle_report(
    state: actix_web::web::Data<AppState>,
    id: actix_web::web::Path<JobId>,
    query: actix_web::web::Query<TokenQuery>,
) -> actix_web::HttpResponse {
    match build_report(&state, id.into_inner(), &query.token).await {
        Ok(report) => actix_web::HttpResponse::Ok()
            .insert_header((
                actix_web::http::header::CACHE_CONTROL,
                crate::lib::HEADER_VALUE_NO_CACHE.clone(),
            ))
            .json(report),
        Err(err) => get_error_response(err),
    }
}

#[actix_web::get("/blast/report/{id}/{format}")]
pub async fn handle_download(
    state: actix_web::web::Data<AppState>,
    path: actix_web::web::Path<(JobId, String)>,
    query: actix_web::web::Query<TokenQuery>,
) -> actix_web::HttpResponse {
    let (id, format) = path.into_inner();
    let Ok(format) = format.parse::<ResultFormat>() else {
        return get_error_response(ErrorDetail::NotFound);
    };

    match read_result(&state, id, &query.token, format).await {
        Ok((job, contents)) => {
            let mut response = actix_web::HttpResponse::Ok();

            response.insert_header((
                actix_web::http::header::CONTENT_DISPOSITION,
                actix_web::http::header::ContentDisposition {
                    disposition: actix_web::http::header::DispositionType::Attachment,
                    parameters: vec![actix_web::http::header::DispositionParam::Filename(
                        format!("blast-{}.{}", job.id.as_simple(), format),
                    )],
                },
            ));
            response.insert_header((
                actix_web::http::header::CACHE_CONTROL,
                crate::lib::HEADER_VALUE_NO_CACHE.clone(),
            ));
            response.content_type(format.media_type());
            response.body(bytes::Bytes::from(contents))
        }
        Err(err) => get_error_response(err),
    }
}

async fn build_report(state: &AppState, id: JobId, job_token: &str) -> Result<Report, ErrorDetail> {
    let (job, contents) = read_result(state, id, job_token, ResultFormat::Tabular).await?;
    let hits = parse_tabular(&String::from_utf8_lossy(&contents))?;

    Ok(Report::build(
        &job,
        hits,
        state.browser_links.as_ref(),
        &state.link_out(job.database()),
    ))
}

async fn read_result(
    state: &AppState,
    id: JobId,
    job_token: &str,
    format: ResultFormat,
) -> Result<(Job, Vec<u8>), ErrorDetail> {
    let job = authorized_job(state, id, job_token)?;

    if job.status != JobStatus::Completed {
        return Err(ErrorDetail::NotReady(job.status));
    }

    let path = state.queue.directory(id).result(format);

    match actix_web::web::block(move || std::fs::read(path)).await? {
        Ok(contents) => Ok((job, contents)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(ErrorDetail::MissingResult(format))
        }
        Err(err) => Err(ErrorDetail::Io(err)),
    }
}
