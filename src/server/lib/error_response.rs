use std::borrow::Cow;

use actix_web::http::StatusCode;

use crate::{
    lib::{FastaError, QueueError, ReportError, TokenError},
    model::{JobStatus, ResultFormat, SequenceParseError, SequenceType},
};

#[derive(thiserror::Error, Debug)]
pub enum ErrorDetail {
    #[error(transparent)]
    Fasta(#[from] FastaError),
    #[error(transparent)]
    Sequence(#[from] SequenceParseError),
    #[error("BLAST database `{0}` doesn't exist")]
    UnknownDatabase(String),
    #[error("BLAST database `{name}` contains {kind} sequences")]
    DatabaseKind { name: String, kind: SequenceType },
    #[error("Either a database or a subject sequence is required, not both")]
    MissingTarget,
    #[error("Option `{0}` is out of range")]
    InvalidOption(&'static str),
    #[error("Searching uploaded subject sequences is disabled")]
    SubjectUploadDisabled,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("Job doesn't exist")]
    UnknownJob,
    #[error("Job is {0:?}")]
    NotReady(JobStatus),
    #[error("Result `{0}` isn't available")]
    MissingResult(ResultFormat),
    #[error("Admin token is missing or invalid")]
    Unauthorized,
    #[error("Not found")]
    NotFound,
    #[error(transparent)]
    Queue(#[from] QueueError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("Result couldn't be read")]
    Io(#[from] std::io::Error),
    #[error("Querystring encoding failed")]
    Querystring(#[from] serde_qs::Error),
    #[error("Blocking task failed")]
    Blocking(#[from] actix_web::error::BlockingError),
}

#[derive(serde::Serialize)]
pub struct ErrorMessage<'name, 'description> {
    name: Cow<'name, str>,
    description: Cow<'description, str>,
}

impl ErrorDetail {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorDetail::Fasta(_)
            | ErrorDetail::Sequence(_)
            | ErrorDetail::DatabaseKind { .. }
            | ErrorDetail::MissingTarget
            | ErrorDetail::InvalidOption(_)
            | ErrorDetail::Token(TokenError::Hex(_)) => StatusCode::BAD_REQUEST,
            ErrorDetail::Token(TokenError::InvalidToken) | ErrorDetail::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            ErrorDetail::SubjectUploadDisabled => StatusCode::FORBIDDEN,
            ErrorDetail::UnknownDatabase(_)
            | ErrorDetail::UnknownJob
            | ErrorDetail::MissingResult(_)
            | ErrorDetail::NotFound => StatusCode::NOT_FOUND,
            ErrorDetail::NotReady(_) => StatusCode::CONFLICT,
            ErrorDetail::Queue(_)
            | ErrorDetail::Report(_)
            | ErrorDetail::Io(_)
            | ErrorDetail::Querystring(_)
            | ErrorDetail::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub fn get_error_response(error_detail: ErrorDetail) -> actix_web::HttpResponse {
    let status_code = error_detail.status_code();

    if status_code.is_server_error() {
        log::error!("{:?}", error_detail);
    } else {
        log::debug!("{}", error_detail);
    }

    let mut response = actix_web::HttpResponse::build(status_code);

    response.insert_header((
        actix_web::http::header::CACHE_CONTROL,
        crate::lib::HEADER_VALUE_NO_CACHE.clone(),
    ));

    response.json(get_error_message(&error_detail))
}

fn get_error_message(error_detail: &ErrorDetail) -> ErrorMessage<'static, 'static> {
    match error_detail {
        ErrorDetail::Fasta(_) | ErrorDetail::Sequence(_) | ErrorDetail::InvalidOption(_) => {
            ErrorMessage {
                name: Cow::Borrowed("Invalid query"),
                description: Cow::Owned(error_detail.to_string()),
            }
        }
        ErrorDetail::UnknownDatabase(_)
        | ErrorDetail::DatabaseKind { .. }
        | ErrorDetail::MissingTarget
        | ErrorDetail::SubjectUploadDisabled => ErrorMessage {
            name: Cow::Borrowed("Invalid search target"),
            description: Cow::Owned(error_detail.to_string()),
        },
        ErrorDetail::Token(TokenError::Hex(_)) => ErrorMessage {
            name: Cow::Borrowed("Invalid token"),
            description: Cow::Borrowed("The given token must be valid hexadecimal."),
        },
        ErrorDetail::Token(TokenError::InvalidToken) => ErrorMessage {
            name: Cow::Borrowed("Invalid token"),
            description: Cow::Borrowed("The given job and token combination doesn't match."),
        },
        ErrorDetail::NotReady(status) => ErrorMessage {
            name: Cow::Borrowed("Result unavailable"),
            description: Cow::Owned(match status {
                JobStatus::Failed => String::from("The job failed, no results were produced."),
                _ => format!("The job is {:?}, try again later.", status).to_lowercase(),
            }),
        },
        ErrorDetail::UnknownJob
        | ErrorDetail::MissingResult(_)
        | ErrorDetail::Unauthorized
        | ErrorDetail::NotFound => ErrorMessage {
            name: Cow::Borrowed("Request failed"),
            description: Cow::Owned(error_detail.to_string()),
        },
        ErrorDetail::Queue(_)
        | ErrorDetail::Report(_)
        | ErrorDetail::Io(_)
        | ErrorDetail::Querystring(_)
        | ErrorDetail::Blocking(_) => ErrorMessage {
            name: Cow::Borrowed("Internal error"),
            description: Cow::Borrowed(
                "While trying to process the request, an unexpected error occurred.",
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{body::MessageBody, http::StatusCode};

    use super::{ErrorDetail, get_error_response};
    use crate::{
        lib::{FastaError, QueueError, TokenError},
        model::JobStatus,
    };

    #[test]
    fn status_codes() {
        assert_eq!(
            ErrorDetail::Fasta(FastaError::Empty).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorDetail::Token(TokenError::InvalidToken).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorDetail::UnknownDatabase(String::from("nt")).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorDetail::NotReady(JobStatus::Running).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorDetail::SubjectUploadDisabled.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorDetail::Queue(QueueError::Closed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn json_body_hides_internal_errors() {
        let response = get_error_response(ErrorDetail::Queue(QueueError::Closed));
        let body = response.into_body().try_into_bytes().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["name"], "Internal error");
        assert!(!json["description"].as_str().unwrap().contains("closed"));
    }

    #[test]
    fn json_body_explains_not_ready() {
        let response = get_error_response(ErrorDetail::NotReady(JobStatus::Pending));

        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = response.into_body().try_into_bytes().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["description"], "the job is pending, try again later.");
    }
}
