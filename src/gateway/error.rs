//! Gateway error types

use thiserror::Error;

/// Errors from the data service or the mail relay
///
/// Handlers recover from all of these with a spoken apology.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Remote answered with a non-2xx status
    #[error("Gateway HTTP error ({status}): {body}")]
    Http { status: u16, body: String },

    /// Request never got an answer
    #[error("Gateway transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body could not be decoded
    #[error("Gateway decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// GraphQL-level errors in an otherwise successful response
    #[error("GraphQL error: {0}")]
    GraphQl(String),
}

impl GatewayError {
    /// Create a GraphQL error from its messages
    pub fn graphql<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = messages
            .into_iter()
            .map(|m| m.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("; ");
        GatewayError::GraphQl(joined)
    }
}

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_joins_messages() {
        let err = GatewayError::graphql(["field missing", "permission denied"]);
        assert_eq!(
            err.to_string(),
            "GraphQL error: field missing; permission denied"
        );
    }
}
