//! hstore serialization.
//!
//! This module provides the [`Serializer`] that renders ordered key/value
//! pairs as hstore text.
//!
//! ## Output format
//!
//! Keys and string values are always quoted and escaped (`\` before `"` in
//! substitution order), null values render as the bare uppercase `NULL`
//! token, pairs are joined with commas, and there is no trailing comma or
//! surrounding whitespace:
//!
//! ```text
//! "key"=>"value","null-key"=>NULL
//! ```
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root, which
//! accept anything serde can present as a map, a struct, or a sequence of
//! `(key, value)` pairs:
//!
//! ```rust
//! use pghstore::to_string;
//!
//! let hstore = to_string(&[("key", "value"), ("k", "v")]).unwrap();
//! assert_eq!(hstore, r#""key"=>"value","k"=>"v""#);
//! ```
//!
//! For incremental construction, pairs can be appended one at a time:
//!
//! ```rust
//! use pghstore::Serializer;
//!
//! let mut serializer = Serializer::new();
//! serializer.write_pair("a", Some("1"));
//! serializer.write_pair("b", None);
//! assert_eq!(serializer.into_inner(), r#""a"=>"1","b"=>NULL"#);
//! ```
//!
//! Non-string keys fail with [`Error::NonStringKey`] and non-string,
//! non-null values with [`Error::NonStringValue`]; map such data to strings
//! before serialization (an iterator adapter or a custom `Serialize` impl)
//! rather than relying on any implicit coercion, because there is none.

use crate::escape::escape_into;
use crate::{Error, Result};
use serde::ser::{self, Impossible, Serialize};

/// The hstore serializer.
///
/// Accumulates rendered pairs into a `String`, either driven by serde or fed
/// directly through [`Serializer::write_pair`].
pub struct Serializer {
    output: String,
    first: bool,
}

impl Serializer {
    #[must_use]
    pub fn new() -> Self {
        Serializer {
            output: String::with_capacity(64),
            first: true,
        }
    }

    /// Consumes the serializer and returns the accumulated hstore text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends one pair, quoting and escaping the key and the value. A
    /// `None` value renders as the bare `NULL` token.
    pub fn write_pair(&mut self, key: &str, value: Option<&str>) {
        if self.first {
            self.first = false;
        } else {
            self.output.push(',');
        }
        self.output.push('"');
        escape_into(&mut self.output, key);
        self.output.push_str("\"=>");
        match value {
            Some(value) => {
                self.output.push('"');
                escape_into(&mut self.output, value);
                self.output.push('"');
            }
            None => self.output.push_str("NULL"),
        }
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

fn unsupported_root(found: &str) -> Error {
    Error::unsupported_type(&format!(
        "expected a map or a sequence of pairs, found {found}"
    ))
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SeqSerializer<'a>;
    type SerializeTuple = SeqSerializer<'a>;
    type SerializeTupleStruct = SeqSerializer<'a>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = MapSerializer<'a>;
    type SerializeStruct = StructSerializer<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, _v: bool) -> Result<Self::Ok> {
        Err(unsupported_root("a boolean"))
    }

    fn serialize_i8(self, _v: i8) -> Result<Self::Ok> {
        Err(unsupported_root("an integer"))
    }

    fn serialize_i16(self, _v: i16) -> Result<Self::Ok> {
        Err(unsupported_root("an integer"))
    }

    fn serialize_i32(self, _v: i32) -> Result<Self::Ok> {
        Err(unsupported_root("an integer"))
    }

    fn serialize_i64(self, _v: i64) -> Result<Self::Ok> {
        Err(unsupported_root("an integer"))
    }

    fn serialize_u8(self, _v: u8) -> Result<Self::Ok> {
        Err(unsupported_root("an integer"))
    }

    fn serialize_u16(self, _v: u16) -> Result<Self::Ok> {
        Err(unsupported_root("an integer"))
    }

    fn serialize_u32(self, _v: u32) -> Result<Self::Ok> {
        Err(unsupported_root("an integer"))
    }

    fn serialize_u64(self, _v: u64) -> Result<Self::Ok> {
        Err(unsupported_root("an integer"))
    }

    fn serialize_f32(self, _v: f32) -> Result<Self::Ok> {
        Err(unsupported_root("a float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Self::Ok> {
        Err(unsupported_root("a float"))
    }

    fn serialize_char(self, _v: char) -> Result<Self::Ok> {
        Err(unsupported_root("a character"))
    }

    fn serialize_str(self, _v: &str) -> Result<Self::Ok> {
        Err(unsupported_root("a string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Self::Ok> {
        Err(unsupported_root("bytes"))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Err(unsupported_root("a none value"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Err(unsupported_root("a unit value"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Err(unsupported_root("a unit struct"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Self::Ok> {
        Err(unsupported_root("an enum variant"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(unsupported_root("an enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SeqSerializer { ser: self })
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(SeqSerializer { ser: self })
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(SeqSerializer { ser: self })
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(unsupported_root("an enum variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(MapSerializer {
            ser: self,
            key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(StructSerializer { ser: self })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(unsupported_root("an enum variant"))
    }
}

/// Serializes map entries, buffering each key until its value arrives.
pub struct MapSerializer<'a> {
    ser: &'a mut Serializer,
    key: Option<String>,
}

impl<'a> ser::SerializeMap for MapSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::custom("map value serialized before its key"))?;
        let rendered = value.serialize(ValueSerializer { key: &key })?;
        self.ser.write_pair(&key, rendered.as_deref());
        Ok(())
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Serializes struct fields as pairs keyed by field name.
pub struct StructSerializer<'a> {
    ser: &'a mut Serializer,
}

impl<'a> ser::SerializeStruct for StructSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let rendered = value.serialize(ValueSerializer { key })?;
        self.ser.write_pair(key, rendered.as_deref());
        Ok(())
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Serializes a sequence whose elements must each be a `(key, value)` pair.
pub struct SeqSerializer<'a> {
    ser: &'a mut Serializer,
}

impl<'a> ser::SerializeSeq for SeqSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(PairSerializer {
            ser: &mut *self.ser,
        })
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a> ser::SerializeTuple for SeqSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a> ser::SerializeTupleStruct for SeqSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Serializer for one element of a pair sequence. Only two-element tuples
/// (or equivalent sequences) are accepted.
struct PairSerializer<'a> {
    ser: &'a mut Serializer,
}

fn not_a_pair(found: &str) -> Error {
    Error::unsupported_type(&format!("expected a (key, value) pair, found {found}"))
}

impl<'a> ser::Serializer for PairSerializer<'a> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = PairWriter<'a>;
    type SerializeTuple = PairWriter<'a>;
    type SerializeTupleStruct = PairWriter<'a>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = Impossible<(), Error>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, _v: bool) -> Result<Self::Ok> {
        Err(not_a_pair("a boolean"))
    }

    fn serialize_i8(self, _v: i8) -> Result<Self::Ok> {
        Err(not_a_pair("an integer"))
    }

    fn serialize_i16(self, _v: i16) -> Result<Self::Ok> {
        Err(not_a_pair("an integer"))
    }

    fn serialize_i32(self, _v: i32) -> Result<Self::Ok> {
        Err(not_a_pair("an integer"))
    }

    fn serialize_i64(self, _v: i64) -> Result<Self::Ok> {
        Err(not_a_pair("an integer"))
    }

    fn serialize_u8(self, _v: u8) -> Result<Self::Ok> {
        Err(not_a_pair("an integer"))
    }

    fn serialize_u16(self, _v: u16) -> Result<Self::Ok> {
        Err(not_a_pair("an integer"))
    }

    fn serialize_u32(self, _v: u32) -> Result<Self::Ok> {
        Err(not_a_pair("an integer"))
    }

    fn serialize_u64(self, _v: u64) -> Result<Self::Ok> {
        Err(not_a_pair("an integer"))
    }

    fn serialize_f32(self, _v: f32) -> Result<Self::Ok> {
        Err(not_a_pair("a float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Self::Ok> {
        Err(not_a_pair("a float"))
    }

    fn serialize_char(self, _v: char) -> Result<Self::Ok> {
        Err(not_a_pair("a character"))
    }

    fn serialize_str(self, _v: &str) -> Result<Self::Ok> {
        Err(not_a_pair("a string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Self::Ok> {
        Err(not_a_pair("bytes"))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Err(not_a_pair("a none value"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Err(not_a_pair("a unit value"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Err(not_a_pair("a unit struct"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Self::Ok> {
        Err(not_a_pair("an enum variant"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(not_a_pair("an enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(PairWriter {
            ser: self.ser,
            key: None,
            count: 0,
        })
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(None)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(None)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(not_a_pair("an enum variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(not_a_pair("a map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(not_a_pair("a struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(not_a_pair("an enum variant"))
    }
}

/// Writes exactly one pair from a two-element tuple or sequence.
pub struct PairWriter<'a> {
    ser: &'a mut Serializer,
    key: Option<String>,
    count: usize,
}

impl<'a> PairWriter<'a> {
    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match self.count {
            0 => self.key = Some(value.serialize(KeySerializer)?),
            1 => {
                let key = self
                    .key
                    .take()
                    .ok_or_else(|| Error::custom("pair value serialized before its key"))?;
                let rendered = value.serialize(ValueSerializer { key: &key })?;
                self.ser.write_pair(&key, rendered.as_deref());
            }
            _ => return Err(not_a_pair("a sequence with more than two elements")),
        }
        self.count += 1;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        if self.count == 2 {
            Ok(())
        } else {
            Err(not_a_pair("a sequence with fewer than two elements"))
        }
    }
}

impl<'a> ser::SerializeSeq for PairWriter<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'a> ser::SerializeTuple for PairWriter<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'a> ser::SerializeTupleStruct for PairWriter<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

/// Serializer that resolves a map key to a `String`, rejecting everything
/// that is not text.
struct KeySerializer;

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    fn serialize_bool(self, v: bool) -> Result<String> {
        Err(Error::non_string_key(v))
    }

    fn serialize_i8(self, v: i8) -> Result<String> {
        Err(Error::non_string_key(v))
    }

    fn serialize_i16(self, v: i16) -> Result<String> {
        Err(Error::non_string_key(v))
    }

    fn serialize_i32(self, v: i32) -> Result<String> {
        Err(Error::non_string_key(v))
    }

    fn serialize_i64(self, v: i64) -> Result<String> {
        Err(Error::non_string_key(v))
    }

    fn serialize_u8(self, v: u8) -> Result<String> {
        Err(Error::non_string_key(v))
    }

    fn serialize_u16(self, v: u16) -> Result<String> {
        Err(Error::non_string_key(v))
    }

    fn serialize_u32(self, v: u32) -> Result<String> {
        Err(Error::non_string_key(v))
    }

    fn serialize_u64(self, v: u64) -> Result<String> {
        Err(Error::non_string_key(v))
    }

    fn serialize_f32(self, v: f32) -> Result<String> {
        Err(Error::non_string_key(v))
    }

    fn serialize_f64(self, v: f64) -> Result<String> {
        Err(Error::non_string_key(v))
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(Error::non_string_key("of type bytes"))
    }

    fn serialize_none(self) -> Result<String> {
        Err(Error::non_string_key("of type none"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String> {
        Err(Error::non_string_key("of type unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Err(Error::non_string_key("of type unit struct"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::non_string_key("of type enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::non_string_key("of type sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::non_string_key("of type tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::non_string_key("of type tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::non_string_key("of type enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::non_string_key("of type map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::non_string_key("of type struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::non_string_key("of type enum"))
    }
}

/// Serializer that resolves a value to `Some(text)` or `None` (the null
/// sentinel), rejecting everything else with the offending key in the error.
struct ValueSerializer<'k> {
    key: &'k str,
}

impl<'k> ValueSerializer<'k> {
    fn reject<V: std::fmt::Display>(&self, value: V) -> Error {
        Error::non_string_value(self.key, value)
    }
}

impl<'k> ser::Serializer for ValueSerializer<'k> {
    type Ok = Option<String>;
    type Error = Error;

    type SerializeSeq = Impossible<Option<String>, Error>;
    type SerializeTuple = Impossible<Option<String>, Error>;
    type SerializeTupleStruct = Impossible<Option<String>, Error>;
    type SerializeTupleVariant = Impossible<Option<String>, Error>;
    type SerializeMap = Impossible<Option<String>, Error>;
    type SerializeStruct = Impossible<Option<String>, Error>;
    type SerializeStructVariant = Impossible<Option<String>, Error>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        Err(self.reject(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        Err(self.reject(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        Err(self.reject(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        Err(self.reject(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        Err(self.reject(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        Err(self.reject(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        Err(self.reject(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        Err(self.reject(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        Err(self.reject(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        Err(self.reject(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        Err(self.reject(v))
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        Ok(Some(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        Ok(Some(v.to_string()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Self::Ok> {
        Err(self.reject("[bytes]"))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Err(self.reject("[unit struct]"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        Ok(Some(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(self.reject("[enum]"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(self.reject("[sequence]"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(self.reject("[tuple]"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(self.reject("[tuple struct]"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(self.reject("[enum]"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(self.reject("[map]"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(self.reject("[struct]"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(self.reject("[enum]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_pair_escapes() {
        let mut ser = Serializer::new();
        ser.write_pair("a", Some(r#"1 "quotes""#));
        assert_eq!(ser.into_inner(), r#""a"=>"1 \"quotes\"""#);
    }

    #[test]
    fn test_write_pair_null() {
        let mut ser = Serializer::new();
        ser.write_pair("null", None);
        assert_eq!(ser.into_inner(), r#""null"=>NULL"#);
    }

    #[test]
    fn test_comma_joins_pairs() {
        let mut ser = Serializer::new();
        ser.write_pair("key", Some("value"));
        ser.write_pair("k", Some("v"));
        assert_eq!(ser.into_inner(), r#""key"=>"value","k"=>"v""#);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(Serializer::new().into_inner(), "");
    }
}
