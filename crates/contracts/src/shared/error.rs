use serde::{Deserialize, Serialize};

/// Error categories shared by the API and the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or invalid form field
    Validation,
    /// Gateway call failed
    Remote,
    /// Signed in, but the session could not be retrieved
    Session,
    /// Rejected by the auth provider
    Auth,
}

/// JSON body of every non-2xx API response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}
