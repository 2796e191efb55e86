//! `GET /api/qr`: server-rendered PNGs.

use axum::{
    extract::RawQuery,
    http::{
        header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};
use url::form_urlencoded;

use super::error::ApiError;
use crate::capability::PNG_MIME;
use crate::params::{safe_filename, ENDPOINT_SIZE};
use crate::render::{render_png, QrRequest, ENDPOINT_MARGIN};

/// Query parameters of the image endpoint. Repeated keys keep their first value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct QrParams {
    pub text: Option<String>,
    pub label: Option<String>,
    pub download: Option<String>,
    pub size: Option<String>,
}

impl QrParams {
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*key {
                "text" => &mut params.text,
                "label" => &mut params.label,
                "download" => &mut params.download,
                "size" => &mut params.size,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

pub async fn qr_image(RawQuery(query): RawQuery) -> Result<Response, ApiError> {
    let params = QrParams::from_query(query.as_deref().unwrap_or_default());
    let text = params.text.unwrap_or_default();
    if text.trim().is_empty() {
        return Err(ApiError::MissingText);
    }

    let size = ENDPOINT_SIZE.parse(params.size.as_deref());
    let request = QrRequest::new(text, size)?.with_margin(ENDPOINT_MARGIN);
    let png = tokio::task::spawn_blocking(move || render_png(&request))
        .await
        .map_err(|e| ApiError::Render(e.to_string()))??;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(PNG_MIME));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    if params.download.as_deref() == Some("1") {
        let label = params.label.as_deref().unwrap_or("qr");
        let disposition = format!("attachment; filename=\"{}.png\"", safe_filename(label));
        let value =
            HeaderValue::try_from(disposition).map_err(|e| ApiError::Render(e.to_string()))?;
        headers.insert(CONTENT_DISPOSITION, value);
    }

    log::debug!("rendered {}px QR ({} bytes)", size, png.len());
    Ok((StatusCode::OK, headers, png).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_wins_for_repeated_keys() {
        let params = QrParams::from_query("text=a&size=300&text=b&size=9");
        assert_eq!(params.text.as_deref(), Some("a"));
        assert_eq!(params.size.as_deref(), Some("300"));
    }

    #[test]
    fn decodes_plus_and_percent_escapes() {
        let params = QrParams::from_query("text=gm+fren&label=Base%20Meetup&download=1&x=y");
        assert_eq!(
            params,
            QrParams {
                text: Some("gm fren".into()),
                label: Some("Base Meetup".into()),
                download: Some("1".into()),
                size: None,
            }
        );
    }

    #[test]
    fn empty_query_has_no_params() {
        assert_eq!(QrParams::from_query(""), QrParams::default());
    }
}
