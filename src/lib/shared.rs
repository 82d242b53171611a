pub type HmacInstance = hmac::Hmac<sha2::Sha256>;

pub const BASE64_ENGINE: base64::engine::GeneralPurpose = base64::engine::GeneralPurpose::new(
    &base64::alphabet::STANDARD,
    base64::engine::GeneralPurposeConfig::new()
        .with_decode_padding_mode(base64::engine::DecodePaddingMode::Indifferent),
);
pub static HEADER_VALUE_NO_CACHE: actix_web::http::header::HeaderValue =
    actix_web::http::header::HeaderValue::from_static("no-cache");

#[cfg(test)]
pub fn test_hmac() -> HmacInstance {
    use hmac::digest::KeyInit;

    hmac::Hmac::new_from_slice(b"example").unwrap()
}
