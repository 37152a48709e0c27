/// Failure of an HTTP call made by [`ApiClient`](super::ApiClient).
///
/// Views only ever render the `Display` text.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Falha de comunicação com o servidor: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status; `message` is the server's `detail` or the raw body
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Resposta inválida do servidor: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
