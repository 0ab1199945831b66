//! Error types for hstore serialization and deserialization.
//!
//! All fallible operations in this crate return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. Errors are synchronous and fatal for the
//! call that produced them: there is no partial-result-plus-error mode, and a
//! malformed document is treated as corrupted data rather than a transient
//! condition.
//!
//! ## Error Categories
//!
//! - **Malformed input**: the text cannot be decomposed into `key=>value`
//!   pairs at some byte offset
//! - **Non-string keys/values**: serialization met data the hstore format
//!   cannot represent (only strings and `NULL` exist on the wire)
//! - **Encoding errors**: the input bytes were not valid UTF-8
//! - **I/O errors**: reading from or writing to a stream failed
//!
//! ## Examples
//!
//! ```rust
//! use pghstore::{from_str, Error, HstoreMap};
//!
//! let result: Result<HstoreMap, Error> = from_str("a=>1 garbage");
//! assert!(matches!(result, Err(Error::MalformedInput { position: 4 })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding
/// hstore documents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input could not be decomposed into the pair grammar. `position` is
    /// the byte offset one past the last successfully parsed pair (0 when no
    /// pair parsed), i.e. where the scanner expected the next token to begin.
    #[error("malformed hstore value: position {position}")]
    MalformedInput { position: usize },

    /// Serialization met a map key that is not a string.
    #[error("key {key} is not a string")]
    NonStringKey { key: String },

    /// Serialization met a value that is neither a string nor null. Carries
    /// the offending value and its key for diagnostics.
    #[error("value {value} of key {key:?} is not a string")]
    NonStringValue { key: String, value: String },

    /// The top-level shape handed to the serializer or deserializer is not
    /// representable as an hstore document.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// The input bytes were not valid text in the expected encoding.
    #[error("invalid encoding: {0}")]
    Encoding(String),

    /// IO error during reading or writing.
    #[error("IO error: {0}")]
    Io(String),

    /// Generic message, used by serde's `custom` hooks.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a malformed-input error at the given byte offset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pghstore::Error;
    ///
    /// let err = Error::malformed_input(7);
    /// assert_eq!(err.to_string(), "malformed hstore value: position 7");
    /// ```
    pub fn malformed_input(position: usize) -> Self {
        Error::MalformedInput { position }
    }

    /// Creates a non-string-key error. `key` is a textual rendering of the
    /// offending key.
    pub fn non_string_key<K: fmt::Display>(key: K) -> Self {
        Error::NonStringKey {
            key: key.to_string(),
        }
    }

    /// Creates a non-string-value error carrying both the offending value and
    /// the key it was found under.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pghstore::Error;
    ///
    /// let err = Error::non_string_value("a", "1");
    /// assert_eq!(err.to_string(), "value 1 of key \"a\" is not a string");
    /// ```
    pub fn non_string_value<K: fmt::Display, V: fmt::Display>(key: K, value: V) -> Self {
        Error::NonStringValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    /// Creates an unsupported-type error for shapes the hstore format cannot
    /// represent.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates an encoding error for byte input that is not valid text.
    pub fn encoding<T: fmt::Display>(msg: T) -> Self {
        Error::Encoding(msg.to_string())
    }

    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
