use thiserror::Error;

#[derive(Debug, Error)]
pub enum MountError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("failed to attach {event} listener: {reason}")]
    Listener { event: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("failed to encode contact request: {0}")]
    Encode(String),
    #[error("request failed: {0}")]
    Transport(String),
}
