//! Decoding of Move object fields and event payloads
//!
//! The fullnode renders Move values as JSON: `u64` as decimal strings, `UID`
//! as `{"id": "0x.."}`, `Option<T>` as `null`, the bare value or
//! `{"vec": [..]}`. [`MoveFields`] hides those encodings behind typed getters.

use minihub_primitives::Address;
use serde_json::{Map, Value};

use crate::SdkError;

/// A Move struct that can be rebuilt from its decoded fields
pub trait MoveStruct: Sized {
    /// Struct name inside the `minihub` module
    const STRUCT_NAME: &'static str;

    /// Build the record from decoded fields
    fn from_fields(fields: &MoveFields<'_>) -> Result<Self, SdkError>;
}

/// Borrowed view over the `fields` object of a Move value
#[derive(Debug, Clone, Copy)]
pub struct MoveFields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> MoveFields<'a> {
    /// Wrap a field map
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// Wrap a JSON value that must be an object
    pub fn from_value(value: &'a Value) -> Result<Self, SdkError> {
        value
            .as_object()
            .map(Self::new)
            .ok_or_else(|| {
                SdkError::Serialization("expected a JSON object of Move fields".to_string())
            })
    }

    /// Unwrap the `value.fields` of a `dynamic_field::Field` wrapper; other
    /// objects are returned unchanged.
    pub fn unwrap_dynamic_field(self) -> Self {
        match self.map.get("value").and_then(|v| v.get("fields")).and_then(Value::as_object) {
            Some(inner) if self.map.contains_key("name") => Self::new(inner),
            _ => self,
        }
    }

    /// Raw field value
    pub fn get(&self, name: &str) -> Result<&'a Value, SdkError> {
        self.map
            .get(name)
            .ok_or_else(|| SdkError::MissingField(name.to_string()))
    }

    /// `String` field
    pub fn string(&self, name: &str) -> Result<String, SdkError> {
        match self.get(name)? {
            Value::String(s) => Ok(s.clone()),
            // `Url` is a struct wrapping a string
            Value::Object(o) => o
                .get("url")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| invalid(name, "expected a string")),
            _ => Err(invalid(name, "expected a string")),
        }
    }

    /// Integer field (`u8`..`u64`)
    pub fn u64(&self, name: &str) -> Result<u64, SdkError> {
        parse_u64(self.get(name)?).ok_or_else(|| invalid(name, "expected an unsigned integer"))
    }

    /// `bool` field
    pub fn bool(&self, name: &str) -> Result<bool, SdkError> {
        self.get(name)?
            .as_bool()
            .ok_or_else(|| invalid(name, "expected a boolean"))
    }

    /// `address` field
    pub fn address(&self, name: &str) -> Result<Address, SdkError> {
        parse_address(self.get(name)?).ok_or_else(|| invalid(name, "expected an address"))
    }

    /// `UID` or `ID` field
    pub fn id(&self, name: &str) -> Result<Address, SdkError> {
        parse_id(self.get(name)?).ok_or_else(|| invalid(name, "expected an object id"))
    }

    /// `Option<u64>` field; a missing field reads as `None`
    pub fn opt_u64(&self, name: &str) -> Result<Option<u64>, SdkError> {
        match option_inner(self.map.get(name)) {
            None => Ok(None),
            Some(v) => parse_u64(v)
                .map(Some)
                .ok_or_else(|| invalid(name, "expected an optional unsigned integer")),
        }
    }

    /// `Option<address>` field; a missing field reads as `None`
    pub fn opt_address(&self, name: &str) -> Result<Option<Address>, SdkError> {
        match option_inner(self.map.get(name)) {
            None => Ok(None),
            Some(v) => parse_address(v)
                .map(Some)
                .ok_or_else(|| invalid(name, "expected an optional address")),
        }
    }

    /// `vector<String>` field
    pub fn strings(&self, name: &str) -> Result<Vec<String>, SdkError> {
        self.array(name)?
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid(name, "expected a vector of strings"))
            })
            .collect()
    }

    /// `vector<ID>` field
    pub fn ids(&self, name: &str) -> Result<Vec<Address>, SdkError> {
        self.array(name)?
            .iter()
            .map(|v| parse_id(v).ok_or_else(|| invalid(name, "expected a vector of object ids")))
            .collect()
    }

    fn array(&self, name: &str) -> Result<&'a Vec<Value>, SdkError> {
        let value = self.get(name)?;
        // `vector` may come back wrapped as `{"contents": [..]}` for VecSet-like types
        value
            .as_array()
            .or_else(|| value.get("contents").and_then(Value::as_array))
            .ok_or_else(|| invalid(name, "expected a vector"))
    }
}

fn invalid(field: &str, reason: &str) -> SdkError {
    SdkError::InvalidField {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_u64(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

fn parse_address(value: &Value) -> Option<Address> {
    value.as_str().and_then(|s| Address::from_hex(s).ok())
}

fn parse_id(value: &Value) -> Option<Address> {
    match value {
        Value::String(s) => Address::from_hex(s).ok(),
        Value::Object(o) => o
            .get("id")
            .or_else(|| o.get("bytes"))
            .and_then(parse_id),
        _ => None,
    }
}

fn option_inner(value: Option<&Value>) -> Option<&Value> {
    match value? {
        Value::Null => None,
        Value::Object(o) if o.contains_key("vec") => {
            o.get("vec").and_then(Value::as_array).and_then(|v| v.first())
        }
        other => Some(other),
    }
}

/// Decode a Move struct from a JSON value holding its fields
pub fn decode_struct<T: MoveStruct>(value: &Value) -> Result<T, SdkError> {
    T::from_fields(&MoveFields::from_value(value)?)
}
