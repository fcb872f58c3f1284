//! Defines the result handed back to the Lambda platform.

use serde::Serialize;

/// Body of the envelope returned for uploads that aren't the expected
/// artifact.
pub const SKIPPED_MESSAGE: &str = "No deployment triggered, incorrect file uploaded.";

/// Body of the envelope returned once a deployment has started.
pub const SUCCESS_MESSAGE: &str = "Deployment triggered successfully!";

/// The `{statusCode, body}` result of an invocation. The body holds a
/// JSON-encoded string message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: u16,
    pub body: String,
}

impl Envelope {
    fn new(status_code: u16, message: &str) -> Self {
        Envelope {
            status_code,
            // Non-ASCII stays raw UTF-8 rather than \u escapes
            body: serde_json::Value::from(message).to_string(),
        }
    }

    /// The uploaded object isn't the deployment artifact.
    pub fn skipped() -> Self {
        Self::new(200, SKIPPED_MESSAGE)
    }

    /// The deployment was started.
    pub fn success() -> Self {
        Self::new(200, SUCCESS_MESSAGE)
    }

    /// The deployment couldn't be started.
    pub fn error(error: &anyhow::Error) -> Self {
        Self::new(500, &format!("Error: {:#}", error))
    }

    pub fn is_error(&self) -> bool {
        self.status_code >= 500
    }
}
