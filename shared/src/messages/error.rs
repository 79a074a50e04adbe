use tandem_serde::SerdeErr;
use thiserror::Error;

use crate::messages::MessageTag;

/// Errors that can occur while encoding or decoding a message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("Received an empty message")]
    Empty,

    #[error("Unknown message tag {0}")]
    UnknownTag(u8),

    #[error("Malformed {tag:?} payload: {source}")]
    Payload {
        tag: MessageTag,
        #[source]
        source: SerdeErr,
    },

    #[error("Message has trailing bytes after its {tag:?} payload")]
    TrailingBytes { tag: MessageTag },

    /// Refused before sending, receivers would reject it
    #[error("Outgoing {tag:?} payload field is {length} bytes, limit is {limit}")]
    Oversized {
        tag: MessageTag,
        length: usize,
        limit: usize,
    },
}
