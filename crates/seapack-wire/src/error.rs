/// Errors that can occur during envelope encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Fewer bytes than the fixed header length were supplied.
    #[error("envelope header too short ({got} bytes, need {need})")]
    HeaderTooShort { got: usize, need: usize },

    /// The body does not match the payload type's fixed layout.
    #[error("body length mismatch ({got} bytes, expected {expected})")]
    BodyLengthMismatch { got: usize, expected: usize },

    /// The assembled envelope exceeds the maximum envelope length.
    #[error("envelope too large ({size} bytes, max {max})")]
    EnvelopeTooLarge { size: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, WireError>;
