use crate::*;
use serde::Serialize;

/// Outcome of one translation call.
///
/// On failure `output` is always the caller's original text, never a partial
/// translation.
#[derive(Debug)]
pub struct TranslationResult {
    pub output: String,
    pub error: Option<Error>,
}

impl TranslationResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            error: None,
        }
    }

    pub fn failure(original: impl Into<String>, error: Error) -> Self {
        Self {
            output: original.into(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(Error::kind)
    }

    pub fn response(&self) -> TranslationResponse {
        TranslationResponse::from(self)
    }
}

/// Wire shape of a translation: `{"success": true, "translated_sql": ...}`
/// or `{"success": false, "error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&TranslationResult> for TranslationResponse {
    fn from(result: &TranslationResult) -> Self {
        match &result.error {
            None => Self {
                success: true,
                translated_sql: Some(result.output.clone()),
                error: None,
            },
            Some(err) => Self {
                success: false,
                translated_sql: None,
                error: Some(err.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response_carries_sql() {
        let result = TranslationResult::success("SELECT 1");
        assert!(result.is_success());
        assert_eq!(result.error_kind(), None);
        let json = serde_json::to_string(&result.response()).unwrap();
        assert_eq!(json, r#"{"success":true,"translated_sql":"SELECT 1"}"#);
    }

    #[test]
    fn failure_response_carries_message() {
        let result = TranslationResult::failure("SELECT 1", Error::CatalogUnavailable);
        assert_eq!(result.error_kind(), Some(ErrorKind::CatalogUnavailable));
        let response = result.response();
        assert!(!response.success);
        assert_eq!(response.translated_sql, None);
        assert_eq!(
            response.error.as_deref(),
            Some("Reference map is not available or empty. Please load a project first.")
        );
        assert!(matches!(result.error, Some(Error::CatalogUnavailable)));
    }
}
