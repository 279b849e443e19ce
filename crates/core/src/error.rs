use thiserror::Error;

use crate::model::{CompletionDecodeError, ParseIdError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    InvalidId(#[from] ParseIdError),
    #[error(transparent)]
    CompletionDecode(#[from] CompletionDecodeError),
    #[error("not a tutorial path: {0}")]
    NotATutorialPath(String),
}
