//! hstore deserialization.
//!
//! This module provides the tokenizer for the hstore pair grammar and the
//! [`Deserializer`] that exposes it through serde.
//!
//! ## Overview
//!
//! - **Single-pass parsing**: an explicit cursor walks the input once, with
//!   no backtracking beyond the current token
//! - **Lazy pair stream**: [`parse`] returns an iterator, so a valid prefix
//!   of a malformed document is yielded before the error surfaces
//! - **Error reporting**: malformed input carries the byte offset where the
//!   scanner expected the next token to begin
//!
//! ## Grammar
//!
//! A document is a comma-separated sequence of `key=>value` pairs.
//! Keys and values are either quoted (`"..."` with `\"` and `\\` escapes) or
//! bare tokens; a bare `NULL` value (any case) is the null sentinel, while a
//! quoted `"NULL"` is the four-character string. Whitespace around `=>` and
//! around the separating comma is insignificant.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use pghstore::from_str;
//! use std::collections::HashMap;
//!
//! let map: HashMap<String, Option<String>> = from_str(r#""a"=>"1","n"=>NULL"#).unwrap();
//! assert_eq!(map["a"].as_deref(), Some("1"));
//! assert_eq!(map["n"], None);
//! ```
//!
//! The pair stream itself is available when duplicates or input order matter:
//!
//! ```rust
//! use pghstore::parse;
//!
//! let pairs: Result<Vec<_>, _> = parse("a=>1, a=>2").collect();
//! let pairs = pairs.unwrap();
//! assert_eq!(pairs.len(), 2); // duplicates pass through unmerged
//! ```

use crate::escape::unescape;
use crate::{Error, Result};
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};

/// Parses hstore text into a lazy stream of `(key, value)` pairs.
///
/// This is the primitive underneath [`crate::from_str`]: it yields pairs in
/// input order, keeps duplicate keys, and defers structural errors until the
/// scan actually reaches them.
///
/// # Examples
///
/// ```rust
/// use pghstore::parse;
///
/// let pairs: Result<Vec<_>, _> = parse(r#"a=>1, b=>2, c=>null, d=>"NULL""#).collect();
/// assert_eq!(
///     pairs.unwrap(),
///     vec![
///         ("a".to_string(), Some("1".to_string())),
///         ("b".to_string(), Some("2".to_string())),
///         ("c".to_string(), None),
///         ("d".to_string(), Some("NULL".to_string())),
///     ]
/// );
/// ```
pub fn parse(input: &str) -> Pairs<'_> {
    Pairs {
        input,
        cursor: 0,
        anchor: 0,
        failed: false,
    }
}

/// A lazy iterator over the `(key, value)` pairs of an hstore document.
///
/// Yields `Ok((key, value))` per pair, where a `None` value is the SQL
/// `NULL` sentinel. On malformed input it yields one `Err` at the offending
/// position and then terminates.
pub struct Pairs<'de> {
    input: &'de str,
    cursor: usize,
    /// Offset one past the last fully consumed pair, used as the reported
    /// position when the next pair cannot be matched.
    anchor: usize,
    failed: bool,
}

impl<'de> Iterator for Pairs<'de> {
    type Item = Result<(String, Option<String>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_pair() {
            Ok(Some(pair)) => Some(Ok(pair)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl<'de> Pairs<'de> {
    fn peek(&self) -> Option<char> {
        self.input[self.cursor..].chars().next()
    }

    fn at_end(&self) -> bool {
        self.cursor >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.cursor += ch.len_utf8();
            } else {
                break;
            }
        }
    }

    fn malformed(&self) -> Error {
        Error::malformed_input(self.anchor)
    }

    fn next_pair(&mut self) -> Result<Option<(String, Option<String>)>> {
        self.skip_whitespace();
        if self.at_end() {
            return Ok(None);
        }
        let key = self.parse_key()?;
        self.skip_whitespace();
        let value = self.parse_value()?;
        let pair_end = self.cursor;
        self.skip_whitespace();
        match self.peek() {
            Some(',') => {
                self.cursor += 1;
            }
            None => {}
            Some(_) => return Err(Error::malformed_input(pair_end)),
        }
        self.anchor = self.cursor;
        Ok(Some((key, value)))
    }

    /// Parses a key and consumes the `=>` separator (plus any whitespace
    /// between them).
    fn parse_key(&mut self) -> Result<String> {
        let start = self.cursor;
        if self.peek() == Some('"') {
            if let Some(raw) = self.scan_quoted() {
                self.skip_whitespace();
                if self.eat_separator() {
                    return Ok(unescape(raw));
                }
                // Closed quote without a following `=>`: re-read the whole
                // run as a bare token, quotes and all.
                self.cursor = start;
            }
        }
        self.parse_bare_key(start)
    }

    /// Scans a quoted span starting at the cursor. On success returns the raw
    /// inner text (escapes intact) and advances past the closing quote; on a
    /// missing closing quote leaves the cursor untouched and returns `None`.
    fn scan_quoted(&mut self) -> Option<&'de str> {
        let bytes = self.input.as_bytes();
        let mut pos = self.cursor + 1;
        while pos < bytes.len() {
            match bytes[pos] {
                b'\\' => pos += 2,
                b'"' => {
                    let raw = &self.input[self.cursor + 1..pos];
                    self.cursor = pos + 1;
                    return Some(raw);
                }
                _ => pos += 1,
            }
        }
        None
    }

    fn eat_separator(&mut self) -> bool {
        if self.input[self.cursor..].starts_with("=>") {
            self.cursor += 2;
            true
        } else {
            false
        }
    }

    /// Parses a bare key: the shortest non-whitespace run after which a `=>`
    /// separator follows. The lazy match lets keys contain `=` and `>` (and
    /// even `"` or `,`) as long as a separator can still be found.
    fn parse_bare_key(&mut self, start: usize) -> Result<String> {
        self.cursor = start;
        let mut token_end = self.input.len();
        for (idx, ch) in self.input[start..].char_indices() {
            let pos = start + idx;
            if pos > start && self.input[pos..].starts_with("=>") {
                self.cursor = pos + 2;
                return Ok(self.input[start..pos].to_string());
            }
            if ch.is_whitespace() {
                token_end = pos;
                break;
            }
        }
        if token_end == start {
            return Err(self.malformed());
        }
        // The token ended at whitespace or end of input; the separator must
        // follow after optional whitespace.
        let key = &self.input[start..token_end];
        self.cursor = token_end;
        self.skip_whitespace();
        if self.eat_separator() {
            Ok(key.to_string())
        } else {
            Err(self.malformed())
        }
    }

    /// Parses a value: a quoted span, the bare case-insensitive `NULL`
    /// sentinel, or a bare token running to the next comma, whitespace, or
    /// end of input.
    fn parse_value(&mut self) -> Result<Option<String>> {
        let start = self.cursor;
        if self.peek() == Some('"') {
            if let Some(raw) = self.scan_quoted() {
                return Ok(Some(unescape(raw)));
            }
            // No closing quote anywhere: fall through and treat the `"` as
            // part of a bare token.
            self.cursor = start;
        }
        let mut token_end = self.input.len();
        for (idx, ch) in self.input[start..].char_indices() {
            if ch == ',' || ch.is_whitespace() {
                token_end = start + idx;
                break;
            }
        }
        if token_end == start {
            return Err(self.malformed());
        }
        let token = &self.input[start..token_end];
        self.cursor = token_end;
        if token.eq_ignore_ascii_case("null") {
            Ok(None)
        } else {
            Ok(Some(token.to_string()))
        }
    }
}

/// The hstore deserializer.
///
/// Drives any `Deserialize` target from the pair stream: maps deserialize
/// key-by-key, sequences deserialize as `(key, value)` tuples in input order.
/// Created via [`Deserializer::from_str`].
pub struct Deserializer<'de> {
    pairs: Pairs<'de>,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Deserializer {
            pairs: parse(input),
        }
    }
}

impl<'de, 'a> de::Deserializer<'de> for &'a mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(PairsAccess {
            pairs: &mut self.pairs,
            value: None,
        })
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(PairsAccess {
            pairs: &mut self.pairs,
            value: None,
        })
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 u8 u16 u32 u64 f32 f64 char str string bytes
        byte_buf option unit unit_struct tuple tuple_struct enum identifier
        ignored_any
    }
}

/// Map and sequence access over the lazy pair stream. One struct serves both
/// roles: as a map it hands out keys then values, as a sequence it hands out
/// whole pairs.
struct PairsAccess<'a, 'de> {
    pairs: &'a mut Pairs<'de>,
    value: Option<Option<String>>,
}

impl<'a, 'de> de::MapAccess<'de> for PairsAccess<'a, 'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.pairs.next() {
            Some(Ok((key, value))) => {
                self.value = Some(value);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            Some(Err(err)) => Err(err),
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        let value = self
            .value
            .take()
            .ok_or_else(|| Error::custom("value requested before key"))?;
        seed.deserialize(ValueDeserializer { value })
    }
}

impl<'a, 'de> de::SeqAccess<'de> for PairsAccess<'a, 'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.pairs.next() {
            Some(Ok((key, value))) => seed.deserialize(PairDeserializer { key, value }).map(Some),
            Some(Err(err)) => Err(err),
            None => Ok(None),
        }
    }
}

/// Deserializer for a single hstore value: a string, or the null sentinel.
struct ValueDeserializer {
    value: Option<String>,
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(s) => visitor.visit_string(s),
            None => visitor.visit_unit(),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(_) => visitor.visit_some(self),
            None => visitor.visit_none(),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 u8 u16 u32 u64 f32 f64 char str string bytes
        byte_buf unit unit_struct newtype_struct seq tuple tuple_struct map
        struct enum identifier ignored_any
    }
}

/// Deserializer for one `(key, value)` pair, presented as a two-element
/// sequence so `Vec<(String, Option<String>)>` and friends work.
struct PairDeserializer {
    key: String,
    value: Option<String>,
}

impl<'de> de::Deserializer<'de> for PairDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(PairAccess {
            key: Some(self.key),
            value: Some(self.value),
        })
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 u8 u16 u32 u64 f32 f64 char str string bytes
        byte_buf option unit unit_struct newtype_struct map struct enum
        identifier ignored_any
    }
}

struct PairAccess {
    key: Option<String>,
    value: Option<Option<String>>,
}

impl<'de> de::SeqAccess<'de> for PairAccess {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        if let Some(key) = self.key.take() {
            return seed.deserialize(key.into_deserializer()).map(Some);
        }
        if let Some(value) = self.value.take() {
            return seed.deserialize(ValueDeserializer { value }).map(Some);
        }
        Ok(None)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.key.is_some() as usize + self.value.is_some() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Result<Vec<(String, Option<String>)>> {
        parse(input).collect()
    }

    fn pair(key: &str, value: Option<&str>) -> (String, Option<String>) {
        (key.to_string(), value.map(str::to_string))
    }

    #[test]
    fn test_single_bare_pair() {
        assert_eq!(collect("a=>1").unwrap(), vec![pair("a", Some("1"))]);
    }

    #[test]
    fn test_whitespace_insignificant() {
        assert_eq!(collect("a=>1, b => 2").unwrap(), collect("a=>1,b=>2").unwrap());
        assert_eq!(collect("  a  =>  1  ").unwrap(), vec![pair("a", Some("1"))]);
    }

    #[test]
    fn test_null_sentinel_vs_quoted_null() {
        assert_eq!(
            collect(r#"a=>1, b=>2, c=>null, d=>"NULL""#).unwrap(),
            vec![
                pair("a", Some("1")),
                pair("b", Some("2")),
                pair("c", None),
                pair("d", Some("NULL")),
            ]
        );
    }

    #[test]
    fn test_null_case_insensitive() {
        assert_eq!(collect("a=>NULL").unwrap(), vec![pair("a", None)]);
        assert_eq!(collect("a=>NuLl").unwrap(), vec![pair("a", None)]);
    }

    #[test]
    fn test_quoted_key_containing_separator() {
        assert_eq!(
            collect(r#""a=>1"=>"\"b\"=>2","#).unwrap(),
            vec![pair("a=>1", Some(r#""b"=>2"#))]
        );
    }

    #[test]
    fn test_bare_key_with_equals() {
        assert_eq!(collect("a=b=>c").unwrap(), vec![pair("a=b", Some("c"))]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(collect("").unwrap(), vec![]);
        assert_eq!(collect("   ").unwrap(), vec![]);
    }

    #[test]
    fn test_empty_quoted_tokens() {
        assert_eq!(collect(r#""" => x"#).unwrap(), vec![pair("", Some("x"))]);
        assert_eq!(collect(r#"a=>"""#).unwrap(), vec![pair("a", Some(""))]);
    }

    #[test]
    fn test_trailing_comma() {
        assert_eq!(collect("a=>1,").unwrap(), vec![pair("a", Some("1"))]);
    }

    #[test]
    fn test_garbage_between_pairs() {
        let err = collect("a=>1 garbage b=>2").unwrap_err();
        assert_eq!(err, Error::malformed_input(4));
    }

    #[test]
    fn test_garbage_after_comma() {
        let err = collect("a=>1,garbage").unwrap_err();
        assert_eq!(err, Error::malformed_input(5));
    }

    #[test]
    fn test_leading_garbage() {
        let err = collect("garbage").unwrap_err();
        assert_eq!(err, Error::malformed_input(0));
    }

    #[test]
    fn test_valid_prefix_yields_before_error() {
        let mut pairs = parse("a=>1, b=>2, oops");
        assert_eq!(pairs.next().unwrap().unwrap(), pair("a", Some("1")));
        assert_eq!(pairs.next().unwrap().unwrap(), pair("b", Some("2")));
        assert!(pairs.next().unwrap().is_err());
        assert!(pairs.next().is_none());
    }

    #[test]
    fn test_bare_value_keeps_quotes() {
        // A quote with no closing partner is just another bare character.
        assert_eq!(collect(r#"a=>va"lue"#).unwrap(), vec![pair("a", Some(r#"va"lue"#))]);
        assert_eq!(collect(r#"a=>"x"#).unwrap(), vec![pair("a", Some(r#""x"#))]);
    }

    #[test]
    fn test_quoted_key_without_separator_reparses_bare() {
        assert_eq!(
            collect(r#""a"x=>1"#).unwrap(),
            vec![pair(r#""a"x"#, Some("1"))]
        );
    }

    #[test]
    fn test_duplicate_keys_unmerged() {
        assert_eq!(
            collect("k=>1, k=>2").unwrap(),
            vec![pair("k", Some("1")), pair("k", Some("2"))]
        );
    }

    #[test]
    fn test_unicode_pairs() {
        assert_eq!(
            collect("surname=>\u{d64d}").unwrap(),
            vec![pair("surname", Some("\u{d64d}"))]
        );
        assert_eq!(
            collect("\"\u{c548}\u{b155}\"=>\"\u{d64d}\"").unwrap(),
            vec![pair("\u{c548}\u{b155}", Some("\u{d64d}"))]
        );
    }

    #[test]
    fn test_missing_value() {
        assert!(collect("a=>").is_err());
        assert!(collect("a=>,b=>2").is_err());
    }

    #[test]
    fn test_missing_separator() {
        assert!(collect("a").is_err());
        assert!(collect("a 1").is_err());
    }
}
