
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status code {status}: {message}")]
    Status {
        status: u16,
        message: String,
    },

    #[error("Invalid API credential: {0}")]
    InvalidCredential(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}
