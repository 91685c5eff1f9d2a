use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use petclinic_types::BindingError;

/// Name of the response header carrying rejected fields as JSON.
pub const ERRORS_HEADER: &str = "errors";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i32 },
    /// A listing matched no rows. Answered with 404 and an empty body.
    #[error("no {0} found")]
    NoneFound(&'static str),
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<BindingError>),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound { .. } => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            ApiError::NoneFound(kind) => {
                tracing::debug!("no {} rows to list", kind);
                StatusCode::NOT_FOUND.into_response()
            }
            ApiError::Validation(errors) => {
                tracing::warn!("rejecting request body: {:?}", errors);
                match errors_header_value(&errors) {
                    Some(value) => (
                        StatusCode::BAD_REQUEST,
                        [(HeaderName::from_static(ERRORS_HEADER), value)],
                    )
                        .into_response(),
                    None => StatusCode::BAD_REQUEST.into_response(),
                }
            }
        }
    }
}

/// Serialises `errors` into a header value.
///
/// Header values must be visible ASCII, so every other character is written as a JSON `\uXXXX`
/// escape. Such characters only occur inside JSON strings, where the escape decodes back to the
/// same text.
fn errors_header_value(errors: &[BindingError]) -> Option<HeaderValue> {
    let json = match serde_json::to_string(errors) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("failed to serialize binding errors: {}", e);
            return None;
        }
    };
    let mut ascii = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() && !c.is_ascii_control() {
            ascii.push(c);
        } else {
            for unit in c.encode_utf16(&mut [0; 2]) {
                ascii.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    HeaderValue::from_str(&ascii).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_sets_errors_header() {
        let response = ApiError::Validation(vec![BindingError::new(
            "owner",
            "firstName",
            "",
            "must not be blank",
        )])
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let header = response
            .headers()
            .get(ERRORS_HEADER)
            .expect("errors header should be present")
            .to_str()
            .unwrap();
        let parsed: Vec<BindingError> = serde_json::from_str(header).unwrap();
        assert_eq!(parsed[0].error_message, "must not be blank");
    }

    #[test]
    fn test_non_ascii_field_values_survive_the_header() {
        let errors = vec![
            BindingError::new("owner", "city", "Zürich", "must not be blank"),
            BindingError::new("pet", "name", "Rex 🐕", "must not be blank"),
        ];
        let value = errors_header_value(&errors).expect("header value should be built");
        let header = value.to_str().expect("header should be visible ASCII");
        assert!(header.contains("Z\\u00fcrich"));

        let parsed: Vec<BindingError> = serde_json::from_str(header).unwrap();
        assert_eq!(parsed, errors);
    }

    #[test]
    fn test_none_found_is_404_with_empty_body() {
        let response = ApiError::NoneFound("owner").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(!response.headers().contains_key(ERRORS_HEADER));
    }

    #[test]
    fn test_not_found_is_404() {
        let response = ApiError::NotFound {
            kind: "owner",
            id: 9,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
