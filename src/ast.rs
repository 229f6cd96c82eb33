//! Shape of an executable GraphQL document.
//!
//! Producing these trees from query text is the job of a parser; the executor
//! only walks them. Every node can also be built programmatically.

use derive_more::with_trait::{Display, Error};

use crate::value::{Object, Value, ValueError, ValueKind};

/// The map of variables used for substitution during query execution
pub type Variables = Object;

/// Parse an unstructured argument value into a Rust data type.
///
/// Implemented for the built-in scalars, [`Id`](crate::Id), lists and options.
/// Resolvers get at their decoded arguments through
/// [`ResolverParams::argument`](crate::ResolverParams::argument).
pub trait FromInputValue: Sized {
    /// Performs the conversion.
    ///
    /// # Errors
    ///
    /// If the value cannot be converted into `Self`.
    fn from_input_value(v: &Value) -> Result<Self, InputError>;

    /// Performs the conversion from an absent value (e.g. to distinguish
    /// between implicit and explicit `null`).
    ///
    /// The default implementation just calls [`from_input_value()`] as if an
    /// explicit `null` was provided.
    ///
    /// # Errors
    ///
    /// If the conversion fails.
    ///
    /// [`from_input_value()`]: FromInputValue::from_input_value
    fn from_implicit_null() -> Result<Self, InputError> {
        Self::from_input_value(&Value::Null)
    }
}

/// Error of decoding an argument with [`FromInputValue`].
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum InputError {
    /// The argument holds a value of the wrong kind.
    #[display("Expected {expected}, found {found}")]
    UnexpectedKind {
        /// Name of the expected input type.
        expected: &'static str,
        /// Kind actually found.
        found: ValueKind,
    },

    /// The argument has the right kind but an unacceptable content.
    #[display("{_0}")]
    Invalid(#[error(not(source))] String),
}

impl InputError {
    /// Shortcut for [`InputError::UnexpectedKind`].
    #[must_use]
    pub fn unexpected(expected: &'static str, found: &Value) -> Self {
        Self::UnexpectedKind {
            expected,
            found: found.kind(),
        }
    }
}

/// A JSON-like value that can be passed into the query execution,
/// as field or directive arguments. These are _not_ constant and might contain
/// variables.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub enum InputValue {
    Null,
    Boolean(bool),
    Int(i32),
    Float(f64),
    String(String),
    Enum(String),
    Variable(String),
    List(Vec<InputValue>),
    Object(Vec<(String, InputValue)>),
}

impl InputValue {
    /// Construct a variable reference.
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Construct an enum literal.
    #[must_use]
    pub fn enum_value(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    /// Construct a list literal.
    #[must_use]
    pub fn list(items: Vec<Self>) -> Self {
        Self::List(items)
    }

    /// Construct an input object literal from its fields, in order.
    #[must_use]
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Self)>) -> Self {
        Self::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Resolve all variables to their values.
    ///
    /// Variables missing from `vars` resolve to `null`.
    ///
    /// # Errors
    ///
    /// [`ValueError::DuplicateMember`] if an input object literal repeats a
    /// field name.
    pub fn into_const(self, vars: &Variables) -> Result<Value, ValueError> {
        Ok(match self {
            Self::Null => Value::Null,
            Self::Boolean(b) => Value::Boolean(b),
            Self::Int(i) => Value::Int(i),
            Self::Float(f) => Value::Float(f),
            Self::String(s) => Value::String(s),
            Self::Enum(e) => Value::EnumValue(e),
            Self::Variable(name) => vars.get_field_value(&name).cloned().unwrap_or_default(),
            Self::List(items) => Value::List(
                items
                    .into_iter()
                    .map(|v| v.into_const(vars))
                    .collect::<Result<_, _>>()?,
            ),
            Self::Object(fields) => {
                let mut obj = Object::with_capacity(fields.len());
                for (k, v) in fields {
                    obj.add_field(k, v.into_const(vars)?)?;
                }
                Value::Map(obj)
            }
        })
    }
}

impl From<bool> for InputValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i32> for InputValue {
    fn from(i: i32) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for InputValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for InputValue {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for InputValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<InputValue>> From<Option<T>> for InputValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// A directive applied to a selection, such as `@skip(if: $flag)`.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<(String, InputValue)>,
}

impl Directive {
    /// `@skip(if: ...)`
    #[must_use]
    pub fn skip(condition: impl Into<InputValue>) -> Self {
        Self {
            name: "skip".into(),
            arguments: vec![("if".into(), condition.into())],
        }
    }

    /// `@include(if: ...)`
    #[must_use]
    pub fn include(condition: impl Into<InputValue>) -> Self {
        Self {
            name: "include".into(),
            arguments: vec![("if".into(), condition.into())],
        }
    }
}

/// A field selection, with its arguments and its own selection set.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<(String, InputValue)>,
    pub directives: Vec<Directive>,
    pub selection_set: Vec<Selection>,
}

impl Field {
    /// A field selected by its name, without arguments nor sub-selections.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            alias: None,
            name: name.into(),
            arguments: Vec::new(),
            directives: Vec::new(),
            selection_set: Vec::new(),
        }
    }

    /// Sets the name this field appears under in the response.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Adds an argument.
    #[must_use]
    pub fn argument(mut self, name: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.arguments.push((name.into(), value.into()));
        self
    }

    /// Adds a directive.
    #[must_use]
    pub fn directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    /// Adds a sub-selection.
    #[must_use]
    pub fn select(mut self, selection: impl Into<Selection>) -> Self {
        self.selection_set.push(selection.into());
        self
    }

    /// Name of the response entry: the alias if present, the field name otherwise.
    #[must_use]
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Resolves the arguments into a map, in the order they are written.
    ///
    /// # Errors
    ///
    /// [`ValueError::DuplicateMember`] if an argument is repeated.
    pub fn arguments_into_const(&self, vars: &Variables) -> Result<Object, ValueError> {
        let mut args = Object::with_capacity(self.arguments.len());
        for (name, value) in &self.arguments {
            args.add_field(name.as_str(), value.clone().into_const(vars)?)?;
        }
        Ok(args)
    }
}

/// A named fragment spread, `...Name`.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub name: String,
    pub directives: Vec<Directive>,
}

/// An inline fragment, `... on Type { ... }`.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub type_condition: Option<String>,
    pub directives: Vec<Directive>,
    pub selection_set: Vec<Selection>,
}

/// Entry in a GraphQL selection set
///
/// This enum represents one of the three variants of a selection that exists
/// in GraphQL: a field, a fragment spread, or an inline fragment.
///
/// ```text
/// {
///   field(withArg: 123) { subField }
///   ...fragmentSpread
///   ...on User {
///     inlineFragmentField
///   }
/// }
/// ```
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

impl Selection {
    /// `...name`
    #[must_use]
    pub fn spread(name: impl Into<String>) -> Self {
        Self::FragmentSpread(FragmentSpread {
            name: name.into(),
            directives: Vec::new(),
        })
    }

    /// `... on type_condition { selection_set }`
    #[must_use]
    pub fn inline(type_condition: Option<&str>, selection_set: Vec<Selection>) -> Self {
        Self::InlineFragment(InlineFragment {
            type_condition: type_condition.map(Into::into),
            directives: Vec::new(),
            selection_set,
        })
    }

    /// Directives applied to this selection.
    #[must_use]
    pub fn directives(&self) -> &[Directive] {
        match self {
            Self::Field(f) => &f.directives,
            Self::FragmentSpread(s) => &s.directives,
            Self::InlineFragment(i) => &i.directives,
        }
    }
}

impl From<Field> for Selection {
    fn from(f: Field) -> Self {
        Self::Field(f)
    }
}

impl From<&str> for Selection {
    fn from(name: &str) -> Self {
        Self::Field(Field::new(name))
    }
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Copy, Debug, Eq, PartialEq, derive_more::Display)]
pub enum OperationType {
    #[display("query")]
    Query,
    #[display("mutation")]
    Mutation,
    #[display("subscription")]
    Subscription,
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    pub operation_type: OperationType,
    pub name: Option<String>,
    pub selection_set: Vec<Selection>,
}

impl Operation {
    /// An anonymous operation of the provided type.
    #[must_use]
    pub fn new(operation_type: OperationType, selection_set: Vec<Selection>) -> Self {
        Self {
            operation_type,
            name: None,
            selection_set,
        }
    }

    /// Names this operation.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    pub name: String,
    pub type_condition: String,
    pub selection_set: Vec<Selection>,
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub enum Definition {
    Operation(Operation),
    Fragment(Fragment),
}

/// A parsed executable document: operations and the fragments they spread.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// Definitions in document order.
    pub definitions: Vec<Definition>,
}

impl Document {
    /// A document holding a single anonymous query.
    #[must_use]
    pub fn query(selection_set: Vec<Selection>) -> Self {
        Self::default().operation(Operation::new(OperationType::Query, selection_set))
    }

    /// Adds an operation definition.
    #[must_use]
    pub fn operation(mut self, operation: Operation) -> Self {
        self.definitions.push(Definition::Operation(operation));
        self
    }

    /// Adds a fragment definition.
    #[must_use]
    pub fn fragment(
        mut self,
        name: impl Into<String>,
        type_condition: impl Into<String>,
        selection_set: Vec<Selection>,
    ) -> Self {
        self.definitions.push(Definition::Fragment(Fragment {
            name: name.into(),
            type_condition: type_condition.into(),
            selection_set,
        }));
        self
    }

    /// Operations defined in this document.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Operation(o) => Some(o),
            Definition::Fragment(_) => None,
        })
    }

    /// Fragments defined in this document.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Fragment(f) => Some(f),
            Definition::Operation(_) => None,
        })
    }
}
