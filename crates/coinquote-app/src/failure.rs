use thiserror::Error;

/// Why a flow ended without its happy-path result.
///
/// Both kinds reach the user the same way: `Display` is the notification text.
#[derive(Error, Debug)]
pub enum Failure {
    /// The request failed, came back unsuccessful, or could not be read.
    #[error("{0}")]
    Network(#[from] coinquote_client::Error),

    /// A required selection was empty at submission time; no request was made.
    #[error("All fields are required")]
    Validation,
}

impl Failure {
    pub fn is_validation(&self) -> bool {
        matches!(self, Failure::Validation)
    }
}
