use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressionError {
    #[error("Token claims more source bytes than remain")]
    TruncatedSource,

    #[error("Output would exceed destination capacity")]
    DestinationOverflow,

    #[error("Back-reference distance out of bounds")]
    InvalidBackReference,

    #[error("Unrecognized token encoding")]
    MalformedToken,
}
