use crate::{
    lib::{NewJob, normalize_sequence, token},
    model::{
        AppState, BlastProgram, Job, JobOptions, JobTarget, SequenceType, SubmitBody,
        SubmitResponse, TokenQuery,
    },
    server::lib::{ErrorDetail, get_error_response},
};

type SubmitPayload =
    actix_web::Either<actix_web::web::Json<SubmitBody>, actix_web::web::Form<SubmitBody>>;

#[actix_web::post("/blast/{query_type}/{database_type}")]
pub async fn handle_submit(
    state: actix_web::web::Data<AppState>,
    path: actix_web::web::Path<(String, String)>,
    payload: SubmitPayload,
) -> actix_web::HttpResponse {
    let (query_type, database_type) = path.into_inner();
    let body = match payload {
        actix_web::Either::Left(json) => json.into_inner(),
        actix_web::Either::Right(form) => form.into_inner(),
    };

    match submit(&state, &query_type, &database_type, body).await {
        Ok(response) => actix_web::HttpResponse::Accepted()
            .insert_header((
                actix_web::http::header::CACHE_CONTROL,
                crate::lib::HEADER_VALUE_NO_CACHE.clone(),
            ))
            .json(response),
        Err(err) => get_error_response(err),
    }
}

async fn submit(
    state: &AppState,
    query_type: &str,
    database_type: &str,
    body: SubmitBody,
) -> Result<SubmitResponse, ErrorDetail> {
    let query_type: SequenceType = query_type.parse()?;
    let database_type: SequenceType = database_type.parse()?;
    let program = BlastProgram::select(query_type, database_type, body.program)?;
    let query = normalize_sequence(&body.query, query_type, state.max_residues)?;
    let options = job_options(&body)?;
    let database = body.database.filter(|name| !name.trim().is_empty());
    let subject = body.subject.filter(|subject| !subject.trim().is_empty());

    let (target, subject, database_path) = match (database, subject) {
        (Some(name), None) => {
            let database = state
                .catalog
                .database(&name)
                .ok_or_else(|| ErrorDetail::UnknownDatabase(name.clone()))?;

            if database.kind != database_type {
                return Err(ErrorDetail::DatabaseKind {
                    name,
                    kind: database.kind,
                });
            }

            (
                JobTarget::Database(name),
                None,
                Some(database.path.clone()),
            )
        }
        (None, Some(subject)) => {
            if !state.allow_subject_upload {
                return Err(ErrorDetail::SubjectUploadDisabled);
            }

            (
                JobTarget::Upload,
                Some(normalize_sequence(
                    &subject,
                    database_type,
                    state.max_residues,
                )?),
                None,
            )
        }
        _ => return Err(ErrorDetail::MissingTarget),
    };

    let queue = state.queue.clone();
    let new_job = NewJob {
        job: Job::new(program, target, options),
        query,
        subject,
        database_path,
    };
    let job = actix_web::web::block(move || queue.submit(new_job)).await??;
    let job_token = token::sign(&state.hmac, job.id);
    let query_string = serde_qs::to_string(&TokenQuery {
        token: job_token.clone(),
    })?;

    Ok(SubmitResponse {
        id: job.id,
        token: job_token,
        status: job.status,
        status_url: format!("/blast/jobs/{}?{}", job.id, query_string),
        report_url: format!("/blast/report/{}?{}", job.id, query_string),
    })
}

fn job_options(body: &SubmitBody) -> Result<JobOptions, ErrorDetail> {
    let defaults = JobOptions::default();
    let evalue = body.evalue.unwrap_or(defaults.evalue);
    let max_target_seqs = body.max_target_seqs.unwrap_or(defaults.max_target_seqs);

    if !evalue.is_finite() || evalue <= 0.0 {
        return Err(ErrorDetail::InvalidOption("evalue"));
    }

    if max_target_seqs == 0 {
        return Err(ErrorDetail::InvalidOption("max_target_seqs"));
    }

    if body.word_size.is_some_and(|word_size| word_size < 2) {
        return Err(ErrorDetail::InvalidOption("word_size"));
    }

    Ok(JobOptions {
        evalue,
        max_target_seqs,
        word_size: body.word_size,
    })
}
