use thiserror::Error;

/// Error returned by the remote-resource transport.
/// Controllers never let this cross their public boundary: every mutating
/// path converts it into a user-facing string via [`ApiError::friendly_message`]
/// and stores it in controller state.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}, code {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Maps known API error codes to short friendly strings; anything
    /// unrecognized falls back to one generic message.
    pub fn friendly_message(&self) -> String {
        match self {
            ApiError::Http(e) if e.is_timeout() => {
                "The server took too long to respond. Please try again.".to_string()
            }
            ApiError::Http(_) => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            ApiError::Api { code, .. } => match code.as_str() {
                "VALIDATION_ERROR" => {
                    "Please double-check the highlighted fields and try again.".to_string()
                }
                "NOT_FOUND" => {
                    "That item no longer exists. Refresh the page to see the latest.".to_string()
                }
                "UNAUTHORIZED" => "Your session has expired. Sign in again to continue.".to_string(),
                "FORBIDDEN" => "You don't have permission to change this.".to_string(),
                "RATE_LIMITED" => {
                    "You're doing that too fast. Wait a moment and try again.".to_string()
                }
                _ => GENERIC_FAILURE.to_string(),
            },
            ApiError::Parse(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

const GENERIC_FAILURE: &str = "Failed to save. Please try again.";

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(code: &str) -> ApiError {
        ApiError::Api {
            status: 400,
            code: code.to_string(),
            message: "server detail".to_string(),
        }
    }

    #[test]
    fn test_known_code_maps_to_specific_message() {
        let msg = api_error("VALIDATION_ERROR").friendly_message();
        assert!(msg.contains("double-check"));
    }

    #[test]
    fn test_unknown_code_falls_back_to_generic() {
        assert_eq!(api_error("SOMETHING_NEW").friendly_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_not_found_mentions_refresh() {
        assert!(api_error("NOT_FOUND").friendly_message().contains("Refresh"));
    }

    #[test]
    fn test_friendly_message_never_leaks_server_detail() {
        for code in ["VALIDATION_ERROR", "UNAUTHORIZED", "WEIRD_CODE"] {
            assert!(!api_error(code).friendly_message().contains("server detail"));
        }
    }
}
