use thiserror::Error;

/// Errors returned by the chat-completions client.
#[derive(Debug, Error)]
pub enum OpenAiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-2xx status; carries the payload's
    /// `error.message` when present.
    #[error("OpenAI API error: {0}")]
    Api(String),

    /// The completion had no content to parse.
    #[error("completion was empty")]
    EmptyCompletion,

    /// The completion text contained no JSON delimiter at all.
    #[error("completion did not include a JSON payload")]
    MissingJson,

    /// A JSON span opened but never balanced, or closed with the wrong
    /// delimiter. Failing here beats guessing at a truncated payload.
    #[error("completion JSON payload is unbalanced")]
    UnbalancedJson,

    /// The extracted JSON did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl OpenAiError {
    /// Format errors are data problems in the upstream response; retrying or
    /// checking credentials will not fix them, so they carry no hint.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            OpenAiError::EmptyCompletion
                | OpenAiError::MissingJson
                | OpenAiError::UnbalancedJson
                | OpenAiError::Deserialize { .. }
        )
    }
}
