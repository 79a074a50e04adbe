/// Upper bound on the byte length of a deserialized `String`.
pub const MAX_STRING_BYTES: usize = 4096;

/// Upper bound on the element count of a deserialized `Vec<T>`.
pub const MAX_COLLECTION_LENGTH: usize = 1024;
