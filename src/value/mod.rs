mod macros;
mod object;

use std::{
    fmt::{self, Write as _},
    mem,
};

use derive_more::with_trait::{Display, Error};

pub use self::object::Object;

/// The kind of a [`Value`].
///
/// Every [`Value`] has exactly one kind for its whole lifetime, unless its
/// payload is moved out with [`Value::take()`], which resets it to
/// [`ValueKind::Null`].
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ValueKind {
    Null,
    Boolean,
    Int,
    Float,
    String,
    EnumValue,
    Map,
    List,
    Scalar,
}

/// Error produced by a [`Value`] accessor invoked against the wrong kind or
/// with an invalid key or index.
///
/// None of these are caused by request data: they signal a defect in the code
/// building or reading the value tree.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum ValueError {
    /// A typed accessor was invoked against a value of another kind.
    #[display("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        /// Kind the accessor requires.
        expected: ValueKind,
        /// Kind the value actually has.
        actual: ValueKind,
    },

    /// An operation only defined for some kinds was invoked against another.
    #[display("Invalid call to `Value::{operation}` for {kind}")]
    InvalidOperation {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Kind of the value the operation was invoked against.
        kind: ValueKind,
    },

    /// A member with this name is already present in the map.
    #[display("Duplicate Map member \"{_0}\"")]
    DuplicateMember(#[error(not(source))] String),

    /// No member with this name is present in the map.
    #[display("Missing Map member \"{_0}\"")]
    MissingMember(#[error(not(source))] String),

    /// A list position beyond the list's length.
    #[display("Index {index} is out of range for a List of {len} items")]
    OutOfRange {
        /// Requested position.
        index: usize,
        /// Length of the list.
        len: usize,
    },
}

/// Opaque payload of a custom GraphQL scalar.
///
/// A custom scalar is not a primitive: it owns a full nested [`Value`] tree of
/// arbitrary kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scalar(Box<Value>);

impl Scalar {
    /// Wraps the provided [`Value`] as a custom scalar payload.
    #[must_use]
    pub fn new(value: impl Into<Value>) -> Self {
        Self(Box::new(value.into()))
    }

    /// Unwraps the nested [`Value`].
    #[must_use]
    pub fn into_inner(self) -> Value {
        *self.0
    }
}

impl std::ops::Deref for Scalar {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.0
    }
}

impl std::ops::DerefMut for Scalar {
    fn deref_mut(&mut self) -> &mut Value {
        &mut self.0
    }
}

/// Serializable value returned from query and field execution.
///
/// Every kind exclusively owns its payload: cloning a [`Value`] deep-copies the
/// whole subtree, and moving it out with [`Value::take()`] leaves
/// [`Value::Null`] behind.
///
/// [`Value::Map`] preserves insertion order, which is the order fields appear
/// in a response.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Int(i32),
    Float(f64),
    String(String),
    EnumValue(String),
    Map(Object),
    List(Vec<Value>),
    Scalar(Scalar),
}

static_assertions::assert_impl_all!(Value: Send, Sync);

impl Value {
    // CONSTRUCTORS

    /// Constructs a value of the provided kind holding the zero payload of
    /// that kind: an empty map, an empty list, an empty string, `false`, `0`,
    /// `0.0`, or a custom scalar wrapping `null`.
    #[must_use]
    pub fn new(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Null => Self::Null,
            ValueKind::Boolean => Self::Boolean(false),
            ValueKind::Int => Self::Int(0),
            ValueKind::Float => Self::Float(0.0),
            ValueKind::String => Self::String(String::new()),
            ValueKind::EnumValue => Self::EnumValue(String::new()),
            ValueKind::Map => Self::Map(Object::default()),
            ValueKind::List => Self::List(Vec::new()),
            ValueKind::Scalar => Self::Scalar(Scalar::default()),
        }
    }

    /// Constructs a null value.
    #[must_use]
    pub fn null() -> Self {
        Self::Null
    }

    /// Constructs a string value.
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Constructs an enum value from the literal of one of its members.
    #[must_use]
    pub fn enum_value(s: impl Into<String>) -> Self {
        Self::EnumValue(s.into())
    }

    /// Constructs a list value.
    #[must_use]
    pub fn list(l: Vec<Self>) -> Self {
        Self::List(l)
    }

    /// Constructs a map value.
    #[must_use]
    pub fn object(o: Object) -> Self {
        Self::Map(o)
    }

    /// Constructs a custom scalar value wrapping the provided one.
    #[must_use]
    pub fn scalar(v: impl Into<Value>) -> Self {
        Self::Scalar(Scalar::new(v))
    }

    // DISCRIMINATORS

    /// Returns the kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::EnumValue(_) => ValueKind::EnumValue,
            Self::Map(_) => ValueKind::Map,
            Self::List(_) => ValueKind::List,
            Self::Scalar(_) => ValueKind::Scalar,
        }
    }

    /// Does this value represent `null`?
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Views the underlying map value, if present.
    #[must_use]
    pub fn as_object_value(&self) -> Option<&Object> {
        match self {
            Self::Map(o) => Some(o),
            _ => None,
        }
    }

    /// Converts this value into its underlying map, if present.
    #[must_use]
    pub fn into_object(self) -> Option<Object> {
        match self {
            Self::Map(o) => Some(o),
            _ => None,
        }
    }

    /// Views the underlying list value, if present.
    #[must_use]
    pub fn as_list_value(&self) -> Option<&[Self]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Views the underlying text of a string or enum value, if present.
    #[must_use]
    pub fn as_string_value(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::EnumValue(s) => Some(s),
            _ => None,
        }
    }

    // CONTAINER OPERATIONS

    /// Reserves capacity for at least `additional` more members of a map or
    /// items of a list.
    ///
    /// # Errors
    ///
    /// If this value is neither a map nor a list.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ValueError> {
        match self {
            Self::Map(o) => o.reserve(additional),
            Self::List(l) => l.reserve(additional),
            v => return Err(v.invalid_operation("reserve")),
        }
        Ok(())
    }

    /// Returns the number of members of a map or items of a list.
    ///
    /// # Errors
    ///
    /// If this value is neither a map nor a list.
    pub fn size(&self) -> Result<usize, ValueError> {
        match self {
            Self::Map(o) => Ok(o.field_count()),
            Self::List(l) => Ok(l.len()),
            v => Err(v.invalid_operation("size")),
        }
    }

    /// Appends a named member to the end of a map.
    ///
    /// # Errors
    ///
    /// If this value is not a map, or if it already contains a member named
    /// `name`. The map is left unmodified in both cases.
    pub fn add_field(&mut self, name: impl Into<String>, value: Value) -> Result<(), ValueError> {
        match self {
            Self::Map(o) => o.add_field(name, value),
            v => Err(v.invalid_operation("add_field")),
        }
    }

    /// Appends an item to the end of a list.
    ///
    /// # Errors
    ///
    /// If this value is not a list.
    pub fn push(&mut self, value: Value) -> Result<(), ValueError> {
        match self {
            Self::List(l) => {
                l.push(value);
                Ok(())
            }
            v => Err(v.invalid_operation("push")),
        }
    }

    /// Looks up a member of a map by its name.
    ///
    /// A missing member is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// If this value is not a map.
    pub fn find(&self, name: &str) -> Result<Option<&Value>, ValueError> {
        match self {
            Self::Map(o) => Ok(o.get_field_value(name)),
            v => Err(v.invalid_operation("find")),
        }
    }

    /// Returns the member of a map with the provided name.
    ///
    /// # Errors
    ///
    /// If this value is not a map, or if it has no member named `name`.
    pub fn field(&self, name: &str) -> Result<&Value, ValueError> {
        self.find(name)?
            .ok_or_else(|| ValueError::MissingMember(name.into()))
    }

    /// Returns the item of a list at the provided position.
    ///
    /// # Errors
    ///
    /// If this value is not a list, or if `index` is beyond its length.
    pub fn at(&self, index: usize) -> Result<&Value, ValueError> {
        match self {
            Self::List(l) => l.get(index).ok_or(ValueError::OutOfRange {
                index,
                len: l.len(),
            }),
            v => Err(v.invalid_operation("at")),
        }
    }

    // TYPED ACCESS

    /// Replaces the payload of this value, keeping its kind.
    ///
    /// [`String`] payloads are accepted by both string and enum values.
    ///
    /// # Errors
    ///
    /// If the kind of this value does not hold payloads of type `T`.
    pub fn set<T: ValueType>(&mut self, payload: T) -> Result<(), ValueError> {
        let actual = self.kind();
        let slot = T::payload_mut(self).ok_or(ValueError::TypeMismatch {
            expected: T::KIND,
            actual,
        })?;
        *slot = payload;
        Ok(())
    }

    /// Returns the payload of this value: a reference for maps, lists,
    /// strings and custom scalars, a copy for booleans, integers and floats.
    ///
    /// # Errors
    ///
    /// If the kind of this value does not hold payloads of type `T`.
    pub fn get<T: ValueType>(&self) -> Result<T::Ref<'_>, ValueError> {
        T::payload(self).ok_or(ValueError::TypeMismatch {
            expected: T::KIND,
            actual: self.kind(),
        })
    }

    /// Moves the payload out of this value.
    ///
    /// The value keeps its kind with an emptied payload: a released map has
    /// no members left. Only the returned payload is meaningful afterwards.
    ///
    /// # Errors
    ///
    /// If the kind of this value does not hold payloads of type `T`.
    pub fn release<T: ValueType>(&mut self) -> Result<T, ValueError> {
        let actual = self.kind();
        T::payload_mut(self)
            .map(mem::take)
            .ok_or(ValueError::TypeMismatch {
                expected: T::KIND,
                actual,
            })
    }

    /// Moves this whole value out, leaving [`Value::Null`] in its place.
    #[must_use]
    pub fn take(&mut self) -> Value {
        mem::take(self)
    }

    fn invalid_operation(&self, operation: &'static str) -> ValueError {
        ValueError::InvalidOperation {
            operation,
            kind: self.kind(),
        }
    }
}

/// Payload type held by one or more kinds of [`Value`], usable with
/// [`Value::set()`], [`Value::get()`] and [`Value::release()`].
///
/// Implemented for [`bool`], [`i32`], [`f64`], [`String`], [`Object`],
/// [`Vec`]`<`[`Value`]`>` and [`Scalar`].
pub trait ValueType: Default + private::Sealed {
    /// Kind reported in a [`ValueError::TypeMismatch`].
    const KIND: ValueKind;

    /// What [`Value::get()`] returns for this payload.
    type Ref<'a>;

    #[doc(hidden)]
    fn payload(value: &Value) -> Option<Self::Ref<'_>>;

    #[doc(hidden)]
    fn payload_mut(value: &mut Value) -> Option<&mut Self>;
}

mod private {
    pub trait Sealed {}

    impl Sealed for bool {}
    impl Sealed for i32 {}
    impl Sealed for f64 {}
    impl Sealed for String {}
    impl Sealed for super::Object {}
    impl Sealed for Vec<super::Value> {}
    impl Sealed for super::Scalar {}
}

macro_rules! impl_inline_value_type {
    ($ty:ty, $kind:ident) => {
        impl ValueType for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            type Ref<'a> = $ty;

            fn payload(value: &Value) -> Option<$ty> {
                match value {
                    Value::$kind(v) => Some(*v),
                    _ => None,
                }
            }

            fn payload_mut(value: &mut Value) -> Option<&mut $ty> {
                match value {
                    Value::$kind(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_inline_value_type!(bool, Boolean);
impl_inline_value_type!(i32, Int);
impl_inline_value_type!(f64, Float);

impl ValueType for String {
    const KIND: ValueKind = ValueKind::String;

    type Ref<'a> = &'a str;

    fn payload(value: &Value) -> Option<&str> {
        value.as_string_value()
    }

    fn payload_mut(value: &mut Value) -> Option<&mut String> {
        match value {
            Value::String(s) | Value::EnumValue(s) => Some(s),
            _ => None,
        }
    }
}

impl ValueType for Object {
    const KIND: ValueKind = ValueKind::Map;

    type Ref<'a> = &'a Object;

    fn payload(value: &Value) -> Option<&Object> {
        value.as_object_value()
    }

    fn payload_mut(value: &mut Value) -> Option<&mut Object> {
        match value {
            Value::Map(o) => Some(o),
            _ => None,
        }
    }
}

impl ValueType for Vec<Value> {
    const KIND: ValueKind = ValueKind::List;

    type Ref<'a> = &'a [Value];

    fn payload(value: &Value) -> Option<&[Value]> {
        value.as_list_value()
    }

    fn payload_mut(value: &mut Value) -> Option<&mut Vec<Value>> {
        match value {
            Value::List(l) => Some(l),
            _ => None,
        }
    }
}

impl ValueType for Scalar {
    const KIND: ValueKind = ValueKind::Scalar;

    type Ref<'a> = &'a Value;

    fn payload(value: &Value) -> Option<&Value> {
        match value {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    fn payload_mut(value: &mut Value) -> Option<&mut Scalar> {
        match value {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::String(s) => write_string_literal(f, s),
            Self::EnumValue(e) => write!(f, "{e}"),
            Self::Scalar(s) => write!(f, "{}", **s),
            Self::List(list) => {
                write!(f, "[")?;
                for (idx, item) in list.iter().enumerate() {
                    write!(f, "{item}")?;
                    if idx < list.len() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "]")
            }
            Self::Map(obj) => {
                write!(f, "{{")?;
                for (idx, (key, value)) in obj.iter().enumerate() {
                    write_string_literal(f, key)?;
                    write!(f, ": {value}")?;
                    if idx < obj.field_count() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_string_literal(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04X}", u32::from(c))?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Self::List(l)
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
