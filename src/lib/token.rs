use hmac::Mac;

use crate::{lib::HmacInstance, model::JobId};

#[derive(thiserror::Error, Debug)]
pub enum TokenError {
    #[error("Hex decode failed")]
    Hex(#[from] hex::FromHexError),
    #[error("Job token is invalid")]
    InvalidToken,
}

/// Access token of a job, job ids alone don't grant access to results.
pub fn sign(hmac: &HmacInstance, id: JobId) -> String {
    let mut hmac = hmac.clone();

    hmac.update(id.as_bytes());
    hex::encode(hmac.finalize().into_bytes())
}

pub fn verify(hmac: &HmacInstance, id: JobId, token: &str) -> Result<(), TokenError> {
    let token_bytes = hex::decode(token)?;
    let mut hmac = hmac.clone();

    hmac.update(id.as_bytes());

    if hmac.verify_slice(&token_bytes).is_ok() {
        return Ok(());
    }

    log::info!("rejecting token for job {}", id);

    Err(TokenError::InvalidToken)
}

/// Constant time comparison of a presented secret.
pub fn secret_matches(hmac: &HmacInstance, expected: &str, presented: &str) -> bool {
    let mut expected_hmac = hmac.clone();
    let mut presented_hmac = hmac.clone();

    expected_hmac.update(expected.as_bytes());
    presented_hmac.update(presented.as_bytes());

    expected_hmac
        .verify_slice(&presented_hmac.finalize().into_bytes())
        .is_ok()
}
