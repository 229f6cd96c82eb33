use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use futures::future;

use crate::{
    BoxFuture,
    ast::{FromInputValue, InputError, Selection},
    executor::Executor,
    value::{Scalar, Value},
};

use super::base::ResolveValue;

/// An opaque identifier, the basis of global object identity.
///
/// Holds arbitrary bytes. Responses carry it as standard base64 text and
/// arguments are decoded from that same form.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Id(Vec<u8>);

impl Id {
    /// Wraps the provided bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw bytes of this identifier.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Unwraps the raw bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Decodes an identifier from its base64 text form.
    ///
    /// # Errors
    ///
    /// If `s` is not valid standard base64.
    pub fn from_base64(s: &str) -> Result<Self, base64::DecodeError> {
        STANDARD.decode(s).map(Self)
    }

    /// Text form of this identifier, as it appears in responses.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Id {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<Id> for Value {
    fn from(id: Id) -> Self {
        Self::String(id.to_base64())
    }
}

macro_rules! resolve_as_value {
    ($($ty:ty),* $(,)?) => {$(
        impl ResolveValue for $ty {
            fn resolve_value<'a>(
                self,
                _: &'a Executor<'a>,
                _: &'a [&'a Selection],
            ) -> BoxFuture<'a, Value>
            where
                Self: 'a,
            {
                Box::pin(future::ready(Value::from(self)))
            }
        }
    )*};
}

resolve_as_value!(Value, bool, i32, f64, String, Id, Scalar);

impl ResolveValue for &str {
    fn resolve_value<'a>(self, _: &'a Executor<'a>, _: &'a [&'a Selection]) -> BoxFuture<'a, Value>
    where
        Self: 'a,
    {
        Box::pin(future::ready(Value::string(self)))
    }
}

impl FromInputValue for Value {
    fn from_input_value(v: &Value) -> Result<Self, InputError> {
        Ok(v.clone())
    }
}

impl FromInputValue for bool {
    fn from_input_value(v: &Value) -> Result<Self, InputError> {
        match v {
            Value::Boolean(b) => Ok(*b),
            _ => Err(InputError::unexpected("Boolean", v)),
        }
    }
}

impl FromInputValue for i32 {
    fn from_input_value(v: &Value) -> Result<Self, InputError> {
        match v {
            Value::Int(i) => Ok(*i),
            _ => Err(InputError::unexpected("Int", v)),
        }
    }
}

impl FromInputValue for f64 {
    fn from_input_value(v: &Value) -> Result<Self, InputError> {
        match v {
            Value::Int(i) => Ok(f64::from(*i)),
            Value::Float(f) => Ok(*f),
            _ => Err(InputError::unexpected("Float", v)),
        }
    }
}

impl FromInputValue for String {
    fn from_input_value(v: &Value) -> Result<Self, InputError> {
        v.as_string_value()
            .map(str::to_owned)
            .ok_or_else(|| InputError::unexpected("String", v))
    }
}

impl FromInputValue for Id {
    fn from_input_value(v: &Value) -> Result<Self, InputError> {
        let s = v
            .as_string_value()
            .ok_or_else(|| InputError::unexpected("ID", v))?;
        Self::from_base64(s).map_err(|e| InputError::Invalid(format!("Invalid ID `{s}`: {e}")))
    }
}
