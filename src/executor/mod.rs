//! Resolve the document to values

use std::{
    cmp::Ordering,
    sync::{
        Arc, PoisonError, RwLock,
        atomic::{self, AtomicU64},
    },
};

use derive_more::with_trait::{Display, From, Into};
use fnv::FnvHashMap;
use serde::Serialize;

use crate::{
    GraphQLError,
    ast::{Document, Fragment, FromInputValue, Operation, Selection, Variables},
    types::{
        async_await::{ExecutionMode, resolve_selection_set},
        base::{ObjectResolver, ResolveValue},
    },
    value::{Object, Value},
};

/// Identifier of one logical request.
///
/// Threaded through every field resolution of a request, so that a backend can
/// correlate concurrently running getters. Execution never synchronizes on it.
#[derive(Clone, Copy, Debug, Display, Eq, From, Hash, Into, Ord, PartialEq, PartialOrd)]
pub struct RequestId(u64);

impl RequestId {
    /// Generates a process-wide unique identifier.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);

        Self(NEXT.fetch_add(1, atomic::Ordering::Relaxed))
    }
}

/// Segment of a response path: either a field's response key or a list index.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

#[derive(Debug)]
enum FieldPath {
    Root,
    Field(String, Arc<FieldPath>),
    Index(usize, Arc<FieldPath>),
}

impl FieldPath {
    fn construct_path(&self, acc: &mut Vec<PathSegment>) {
        match self {
            Self::Root => {}
            Self::Field(name, parent) => {
                parent.construct_path(acc);
                acc.push(PathSegment::Field(name.clone()));
            }
            Self::Index(idx, parent) => {
                parent.construct_path(acc);
                acc.push(PathSegment::Index(*idx));
            }
        }
    }
}

/// Error type for errors that occur during query execution
///
/// All execution errors contain the response path of the field that failed to
/// resolve.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionError {
    path: Vec<PathSegment>,
    error: FieldError,
}

impl Eq for ExecutionError {}

impl PartialOrd for ExecutionError {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExecutionError {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.path, &self.error.message).cmp(&(&other.path, &other.error.message))
    }
}

impl ExecutionError {
    /// Construct a new execution error occuring at the provided path
    #[must_use]
    pub fn new(path: Vec<PathSegment>, error: FieldError) -> Self {
        Self { path, error }
    }

    /// The error message
    #[must_use]
    pub fn error(&self) -> &FieldError {
        &self.error
    }

    /// The path of the field that failed to resolve
    #[must_use]
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }
}

/// Error type for errors that occur during field resolution
///
/// Field errors are represented by a human-readable error message and an
/// optional `Value` structure containing additional information.
///
/// They can be converted to from any type that implements `std::fmt::Display`,
/// which makes error chaining with the `?` operator a breeze:
///
/// ```rust
/// # use juniper_service::FieldError;
/// fn get_string(data: Vec<u8>) -> Result<String, FieldError> {
///     let s = String::from_utf8(data)?;
///     Ok(s)
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    message: String,
    extensions: Value,
}

impl<T: Display> From<T> for FieldError {
    fn from(e: T) -> Self {
        Self {
            message: e.to_string(),
            extensions: Value::null(),
        }
    }
}

impl FieldError {
    /// Construct a new error with additional data
    ///
    /// You can use the `graphql_value!` macro to construct an error:
    ///
    /// ```rust
    /// use juniper_service::{graphql_value, FieldError};
    ///
    /// # fn sample() {
    /// # let _: FieldError =
    /// FieldError::new(
    ///     "Could not open connection to the database",
    ///     graphql_value!({ "internal_error": "Connection refused" })
    /// );
    /// # }
    /// # fn main() { }
    /// ```
    ///
    /// The `extensions` parameter will be added to the `"extensions"` field of
    /// the error object in the JSON response:
    ///
    /// ```json
    /// {
    ///   "errors": [
    ///     "message": "Could not open connection to the database",
    ///     "path": ["hero", "name"],
    ///     "extensions": {
    ///       "internal_error": "Connection refused"
    ///     }
    ///   ]
    /// }
    /// ```
    ///
    /// If the argument is `Value::null()`, no extra data will be included.
    #[must_use]
    pub fn new<T: Display>(e: T, extensions: Value) -> Self {
        Self {
            message: e.to_string(),
            extensions,
        }
    }

    /// Returns `"message"` field of this [`FieldError`].
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `"extensions"` field of this [`FieldError`].
    ///
    /// If there is no `"extensions"`, then [`Value::Null`] will be returned.
    #[must_use]
    pub fn extensions(&self) -> &Value {
        &self.extensions
    }
}

/// The result of resolving the value of a field of type `T`
pub type FieldResult<T> = Result<T, FieldError>;

/// The result of resolving an unspecified field
pub type ExecutionResult = Result<Value, FieldError>;

/// Query execution engine
///
/// The executor helps drive the query execution of one request. It keeps track
/// of the request id, the current response path, variables, fragments and
/// errors. Cloning it is cheap.
#[derive(Clone)]
pub struct Executor<'a> {
    request_id: RequestId,
    fragments: &'a FnvHashMap<&'a str, &'a Fragment>,
    variables: &'a Variables,
    errors: &'a RwLock<Vec<ExecutionError>>,
    field_path: Arc<FieldPath>,
}

impl<'a> Executor<'a> {
    /// Construct an executor positioned at the root of a response.
    #[must_use]
    pub fn new(
        request_id: RequestId,
        fragments: &'a FnvHashMap<&'a str, &'a Fragment>,
        variables: &'a Variables,
        errors: &'a RwLock<Vec<ExecutionError>>,
    ) -> Self {
        Self {
            request_id,
            fragments,
            variables,
            errors,
            field_path: Arc::new(FieldPath::Root),
        }
    }

    /// The request this executor resolves fields for.
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// The current variables
    #[must_use]
    pub fn variables(&self) -> &'a Variables {
        self.variables
    }

    #[doc(hidden)]
    #[must_use]
    pub fn fragment_by_name(&self, name: &str) -> Option<&'a Fragment> {
        self.fragments.get(name).copied()
    }

    /// Creates a new executor positioned at the provided response key.
    #[must_use]
    pub fn field_sub_executor(&self, response_key: &str) -> Self {
        Self {
            field_path: Arc::new(FieldPath::Field(
                response_key.into(),
                Arc::clone(&self.field_path),
            )),
            ..self.clone()
        }
    }

    /// Creates a new executor positioned at the provided list index.
    #[must_use]
    pub fn index_sub_executor(&self, index: usize) -> Self {
        Self {
            field_path: Arc::new(FieldPath::Index(index, Arc::clone(&self.field_path))),
            ..self.clone()
        }
    }

    /// The response path this executor is positioned at.
    #[must_use]
    pub fn path(&self) -> Vec<PathSegment> {
        let mut path = Vec::new();
        self.field_path.construct_path(&mut path);
        path
    }

    /// Add an error to the execution engine at the current executor location
    pub fn push_error(&self, error: FieldError) {
        let path = self.path();
        tracing::debug!(
            request_id = %self.request_id,
            path = ?path,
            message = error.message(),
            "field resolution failed",
        );

        self.errors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ExecutionError::new(path, error));
    }
}

/// Parameters of a single field resolution, passed to its resolver.
pub struct ResolverParams<'a> {
    executor: Executor<'a>,
    field_name: &'a str,
    parent_type: &'a str,
    arguments: Object,
    selection_set: Vec<&'a Selection>,
}

impl<'a> ResolverParams<'a> {
    /// Bundles the parameters of a field resolution.
    #[must_use]
    pub fn new(
        executor: Executor<'a>,
        field_name: &'a str,
        parent_type: &'a str,
        arguments: Object,
        selection_set: Vec<&'a Selection>,
    ) -> Self {
        Self {
            executor,
            field_name,
            parent_type,
            arguments,
            selection_set,
        }
    }

    /// The request this resolution belongs to.
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.executor.request_id()
    }

    /// Name of the resolved field, as declared in the schema.
    #[must_use]
    pub fn field_name(&self) -> &'a str {
        self.field_name
    }

    /// Runtime type name of the object owning the resolved field.
    #[must_use]
    pub fn parent_type(&self) -> &'a str {
        self.parent_type
    }

    /// Arguments of the field, with variables already substituted.
    #[must_use]
    pub fn arguments(&self) -> &Object {
        &self.arguments
    }

    /// Sub-selections of the field, passed on to nested objects.
    #[must_use]
    pub fn selection_set(&self) -> &[&'a Selection] {
        &self.selection_set
    }

    /// Executor positioned at this field.
    #[must_use]
    pub fn executor(&self) -> &Executor<'a> {
        &self.executor
    }

    /// Decodes the named argument.
    ///
    /// A missing argument decodes as an implicit `null`.
    ///
    /// # Errors
    ///
    /// If the argument cannot be decoded into a `T`.
    pub fn argument<T: FromInputValue>(&self, name: &str) -> FieldResult<T> {
        match self.arguments.get_field_value(name) {
            Some(v) => T::from_input_value(v),
            None => T::from_implicit_null(),
        }
        .map_err(|e| FieldError::new(format!("Invalid argument \"{name}\": {e}"), Value::null()))
    }

    /// Encodes a getter's result into a [`Value`], resolving nested objects
    /// against this field's sub-selections.
    pub async fn resolve<T: ResolveValue + 'a>(&self, value: T) -> Value {
        value
            .resolve_value(&self.executor, &self.selection_set)
            .await
    }
}

/// Selects the operation of `document` to execute.
///
/// Without an `operation_name` the document must hold exactly one operation.
///
/// # Errors
///
/// If the document holds no operation, several operations and no name was
/// provided, or none with the provided name.
pub fn get_operation<'d>(
    document: &'d Document,
    operation_name: Option<&str>,
) -> Result<&'d Operation, GraphQLError> {
    let mut operation = None;
    for op in document.operations() {
        if operation_name.is_none() && operation.is_some() {
            return Err(GraphQLError::MultipleOperationsProvided);
        }

        let move_op = operation_name.is_none() || op.name.as_deref() == operation_name;
        if move_op {
            operation = Some(op);
        }
    }

    match operation {
        Some(op) => Ok(op),
        None if document.operations().next().is_none() => Err(GraphQLError::NoOperationProvided),
        None => Err(GraphQLError::UnknownOperationName),
    }
}

/// Executes the selected `operation` of `document` against `root`.
///
/// Errors are returned sorted by path.
pub(crate) async fn execute_operation(
    request_id: RequestId,
    document: &Document,
    operation: &Operation,
    root: &dyn ObjectResolver,
    mode: ExecutionMode,
    variables: &Variables,
) -> (Value, Vec<ExecutionError>) {
    let fragments = document
        .fragments()
        .map(|f| (f.name.as_str(), f))
        .collect::<FnvHashMap<_, _>>();
    let errors = RwLock::new(Vec::new());

    let value = {
        let executor = Executor::new(request_id, &fragments, variables, &errors);
        let selection_set = operation.selection_set.iter().collect::<Vec<_>>();
        resolve_selection_set(root, &selection_set, &executor, mode).await
    };

    let mut errors = errors.into_inner().unwrap_or_else(PoisonError::into_inner);
    errors.sort();

    (value, errors)
}
