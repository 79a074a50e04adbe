use thiserror::Error;

/// Errors produced while reading a payload off the wire.
///
/// Every variant means the message is unusable and must be dropped; none of
/// them are allowed to take the peer down.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The reader ran out of bits before the value was complete
    #[error("Payload truncated: needed more bits than the {available_bits} remaining")]
    Truncated { available_bits: usize },

    /// A string payload was not valid UTF-8
    #[error("String payload is not valid UTF-8")]
    InvalidUtf8,

    /// An enum discriminant did not match any known variant
    #[error("Unknown {type_name} variant: {value}")]
    UnknownVariant { type_name: &'static str, value: u32 },

    /// A length prefix or variable-width integer exceeded what this reader accepts
    #[error("Length {length} exceeds the limit of {limit}")]
    LengthExceeded { length: u128, limit: u128 },
}
