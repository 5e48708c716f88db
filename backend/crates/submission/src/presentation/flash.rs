//! Redirect responses carrying a flash cookie

use crate::application::config::SubmissionConfig;
use crate::domain::value_objects::{Flash, RedirectTarget};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::id::ParticipantId;
use platform::cookie::CookieConfig;

fn flash_cookie_config(config: &SubmissionConfig) -> CookieConfig {
    CookieConfig {
        name: config.flash_cookie_name.clone(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: Some(config.flash_max_age_secs()),
    }
}

/// Base64 JSON value of the flash cookie
pub fn encode_flash(flash: &Flash) -> Option<String> {
    serde_json::to_vec(flash)
        .ok()
        .map(|json| platform::crypto::to_base64(&json))
}

/// `<content_base_path>/<edit|view>?id=<participant>`
pub fn content_location(
    config: &SubmissionConfig,
    target: RedirectTarget,
    participant_id: ParticipantId,
) -> String {
    format!(
        "{}/{}?id={}",
        config.content_base_path.trim_end_matches('/'),
        target.action(),
        participant_id
    )
}

/// 302 to `location` with the flash attached
pub fn redirect_with_flash(config: &SubmissionConfig, location: &str, flash: &Flash) -> Response {
    let mut response = StatusCode::FOUND.into_response();
    let headers = response.headers_mut();

    match HeaderValue::from_str(location) {
        Ok(value) => {
            headers.insert(header::LOCATION, value);
        }
        Err(_) => {
            tracing::warn!(location, "Redirect location is not a valid header value");
            headers.insert(header::LOCATION, HeaderValue::from_static("/"));
        }
    }

    if let Some(cookie) = encode_flash(flash)
        .and_then(|value| flash_cookie_config(config).header_value(&value))
    {
        headers.insert(header::SET_COOKIE, cookie);
    }

    response
}

/// Send the user back where they came from (`Referer`, else `/`)
pub fn redirect_back(config: &SubmissionConfig, request_headers: &HeaderMap, flash: &Flash) -> Response {
    let location = request_headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or("/");

    redirect_with_flash(config, location, flash)
}
