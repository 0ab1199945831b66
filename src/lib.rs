//! # pghstore
//!
//! A Serde-compatible codec for the PostgreSQL [hstore] text format: an
//! ordered sequence of `"key"=>"value"` pairs separated by commas, where a
//! value may also be the bare `NULL` token.
//!
//! [hstore]: https://www.postgresql.org/docs/current/hstore.html
//!
//! ## Key Features
//!
//! - **Wire-compatible**: bit-exact output against PostgreSQL's hstore
//!   rendering (always-quoted keys and values, `\\`/`\"` escapes, bare
//!   uppercase `NULL`)
//! - **Serde Compatible**: serialize from and deserialize into maps,
//!   structs, and sequences of `(key, value)` tuples
//! - **Order Preserving**: [`HstoreMap`] and the lazy [`parse`] iterator
//!   keep pairs in input order, so documents round-trip exactly
//! - **Precise Errors**: malformed input reports the byte offset where the
//!   scan expected the next pair
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! pghstore = "0.1"
//! ```
//!
//! ### Encoding and Decoding
//!
//! ```rust
//! use pghstore::{from_str, to_string, HstoreMap};
//!
//! let map = pghstore::hstore! { "a" => "1" };
//! assert_eq!(to_string(&map).unwrap(), r#""a"=>"1""#);
//!
//! let back: HstoreMap = from_str(r#""a"=>"1""#).unwrap();
//! assert_eq!(back, map);
//! ```
//!
//! ### Choosing the Target Shape
//!
//! Any serde target that looks like a map or a pair sequence works:
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! // As a map (duplicate keys merge, last value wins)
//! let map: HashMap<String, Option<String>> =
//!     pghstore::from_str("a=>1, b=>2, c=>null").unwrap();
//! assert_eq!(map["c"], None);
//!
//! // As a sequence of pairs (input order and duplicates preserved)
//! let pairs: Vec<(String, Option<String>)> =
//!     pghstore::from_str("pgsql=>mysql, python=>php").unwrap();
//! assert_eq!(pairs[0].0, "pgsql");
//! ```
//!
//! ### The Null Sentinel
//!
//! A bare, unquoted `NULL` (any case) is the SQL null sentinel; a quoted
//! `"NULL"` is the four-character string:
//!
//! ```rust
//! let pairs: Vec<(String, Option<String>)> =
//!     pghstore::from_str(r#"c=>null, d=>"NULL""#).unwrap();
//! assert_eq!(pairs[0].1, None);
//! assert_eq!(pairs[1].1.as_deref(), Some("NULL"));
//! ```
//!
//! ## Data Model
//!
//! hstore stores strings and nulls, nothing else. Serializing a non-string
//! value (or key) is a hard error rather than a silent coercion; convert
//! such data to strings first, for example with an iterator adapter:
//!
//! ```rust
//! let pairs: Vec<(String, String)> = [("a", 1), ("b", 2)]
//!     .into_iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect();
//! assert_eq!(pghstore::to_string(&pairs).unwrap(), r#""a"=>"1","b"=>"2""#);
//! ```

pub mod de;
pub mod error;
pub mod escape;
pub mod macros;
pub mod map;
pub mod ser;

pub use de::{parse, Deserializer, Pairs};
pub use error::{Error, Result};
pub use escape::{escape, unescape};
pub use map::HstoreMap;
pub use ser::Serializer;

use serde::{Deserialize, Serialize};
use std::io;

/// Serialize any `T: Serialize` to an hstore string.
///
/// The top-level value must present itself to serde as a map, a struct, or a
/// sequence of `(key, value)` pairs; keys must be strings and values must be
/// strings or options of strings.
///
/// # Examples
///
/// ```rust
/// use pghstore::to_string;
///
/// assert_eq!(
///     to_string(&[("key", "value"), ("k", "v")]).unwrap(),
///     r#""key"=>"value","k"=>"v""#
/// );
///
/// let nullable = [("null", None::<&str>)];
/// assert_eq!(to_string(&nullable).unwrap(), r#""null"=>NULL"#);
/// ```
///
/// # Errors
///
/// Returns [`Error::NonStringKey`] or [`Error::NonStringValue`] when the
/// data contains anything the format cannot represent, and
/// [`Error::UnsupportedType`] when the top-level shape is not a document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new();
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Serialize any `T: Serialize` to hstore text as UTF-8 bytes.
///
/// # Errors
///
/// Same failure modes as [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_string(value).map(String::into_bytes)
}

/// Serialize any `T: Serialize` to a writer in hstore format.
///
/// The writer receives the complete document; output is identical to
/// [`to_string`].
///
/// # Examples
///
/// ```rust
/// use pghstore::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &[("a", "1")]).unwrap();
/// assert_eq!(buffer, br#""a"=>"1""#.to_vec());
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let hstore = to_string(value)?;
    writer
        .write_all(hstore.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a string of hstore text.
///
/// # Examples
///
/// ```rust
/// use pghstore::from_str;
/// use std::collections::HashMap;
///
/// let map: HashMap<String, Option<String>> = from_str("a=>1").unwrap();
/// assert_eq!(map["a"].as_deref(), Some("1"));
/// ```
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] with the offending byte offset when the
/// input does not match the pair grammar.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::from_str(s);
    T::deserialize(&mut deserializer)
}

/// Deserialize an instance of type `T` from hstore text held as bytes.
///
/// The bytes are decoded as UTF-8 at the boundary before parsing.
///
/// # Errors
///
/// Returns [`Error::Encoding`] for invalid UTF-8, otherwise the same failure
/// modes as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(Error::encoding)?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an I/O stream of hstore text.
///
/// The reader is drained completely before parsing begins; there is no
/// incremental tokenization of unbounded input.
///
/// # Examples
///
/// ```rust
/// use pghstore::from_reader;
/// use std::io::Cursor;
///
/// let cursor = Cursor::new(br#""a"=>"1""#);
/// let pairs: Vec<(String, String)> = from_reader(cursor).unwrap();
/// assert_eq!(pairs, vec![("a".to_string(), "1".to_string())]);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the bytes are not valid UTF-8, or the
/// text does not match the pair grammar.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Server {
        host: String,
        port: String,
        comment: Option<String>,
    }

    #[test]
    fn test_roundtrip_struct() {
        let server = Server {
            host: "localhost".to_string(),
            port: "5432".to_string(),
            comment: None,
        };

        let hstore = to_string(&server).unwrap();
        assert_eq!(hstore, r#""host"=>"localhost","port"=>"5432","comment"=>NULL"#);

        let back: Server = from_str(&hstore).unwrap();
        assert_eq!(server, back);
    }

    #[test]
    fn test_roundtrip_hstore_map() {
        let map = crate::hstore! {
            "pgsql" => "mysql",
            "python" => "php",
            "gevent" => "nodejs",
        };

        let back: HstoreMap = from_str(&to_string(&map).unwrap()).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_roundtrip_pair_vec() {
        let pairs = vec![
            ("key".to_string(), Some("value".to_string())),
            ("null".to_string(), None),
        ];

        let back: Vec<(String, Option<String>)> = from_str(&to_string(&pairs).unwrap()).unwrap();
        assert_eq!(back, pairs);
    }

    #[test]
    fn test_hash_map_target() {
        let map: HashMap<String, Option<String>> = from_str("a=>1, b=>null").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"].as_deref(), Some("1"));
        assert_eq!(map["b"], None);
    }

    #[test]
    fn test_to_writer_matches_to_string() {
        let map = crate::hstore! { "a" => "1", "b" => NULL };
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &map).unwrap();
        assert_eq!(buffer, to_string(&map).unwrap().into_bytes());
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let result: Result<HstoreMap> = from_slice(b"\xff\xfe");
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_top_level_scalar_rejected() {
        assert!(matches!(
            to_string(&42),
            Err(Error::UnsupportedType(_))
        ));
    }
}
