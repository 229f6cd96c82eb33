use std::sync::Arc;

use fnv::{FnvBuildHasher, FnvHashMap, FnvHashSet};
use futures::future;
use indexmap::IndexMap;

use crate::{
    BoxFuture,
    ast::{Directive, Field, Selection, Variables},
    executor::{ExecutionResult, Executor, FieldError, ResolverParams},
    value::Value,
};

use super::async_await::{ExecutionMode, resolve_selection_set};

/// Primary trait used to resolve GraphQL objects.
///
/// Every schema object type is resolved through this trait: the executor asks
/// for one field at a time, concurrently for sibling fields, and composes the
/// answers in request order. Most implementations delegate to a [`Resolvers`]
/// table through [`TypedObject`].
///
/// `__typename` never reaches [`resolve_field`](Self::resolve_field), it is
/// answered from [`type_name`](Self::type_name).
pub trait ObjectResolver: Send + Sync {
    /// The concrete runtime type name of this object.
    fn type_name(&self) -> &str;

    /// Whether a fragment with the provided type condition applies to this
    /// object.
    ///
    /// The default implementation only matches the concrete type name.
    fn implements(&self, type_condition: &str) -> bool {
        type_condition == self.type_name()
    }

    /// Resolve the value of a single field on this object.
    ///
    /// The field's arguments, sub-selections and executor are carried by the
    /// `params`. Returning an error turns the field into `null` and records the
    /// error at the field's path.
    fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult>;
}

/// Re-encodes the result of a getter into a [`Value`].
///
/// Leaf types ignore the selection set. Object handles resolve it, which is
/// how nested selections are answered.
pub trait ResolveValue: Send {
    /// Resolves this value against the provided selection set.
    fn resolve_value<'a>(
        self,
        executor: &'a Executor<'a>,
        selection_set: &'a [&'a Selection],
    ) -> BoxFuture<'a, Value>
    where
        Self: 'a;
}

/// Adapter from a field's [`ResolverParams`] to a typed getter of `T`.
///
/// Adapters decode arguments, invoke the getter and re-encode its result.
pub type FieldResolver<T> =
    for<'a> fn(&'a T, ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult>;

/// Name-keyed dispatch table of a schema object type.
///
/// Built once per type, usually in a `static` [`LazyLock`]:
///
/// ```rust
/// use std::sync::LazyLock;
///
/// use juniper_service::{BoxFuture, ExecutionResult, ResolverParams, Resolvers};
///
/// struct Folder {
///     title: String,
/// }
///
/// fn folder_title<'a>(f: &'a Folder, p: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
///     Box::pin(async move { Ok(p.resolve(f.title.as_str()).await) })
/// }
///
/// static FOLDER: LazyLock<Resolvers<Folder>> =
///     LazyLock::new(|| Resolvers::new("Folder").field("title", folder_title));
/// ```
///
/// [`LazyLock`]: std::sync::LazyLock
pub struct Resolvers<T: ?Sized> {
    type_name: &'static str,
    interfaces: Vec<&'static str>,
    fields: FnvHashMap<&'static str, FieldResolver<T>>,
}

impl<T: ?Sized> Resolvers<T> {
    /// Creates an empty table for the named type.
    #[must_use]
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            interfaces: Vec::new(),
            fields: FnvHashMap::default(),
        }
    }

    /// Declares an interface implemented by this type.
    #[must_use]
    pub fn interface(mut self, name: &'static str) -> Self {
        self.interfaces.push(name);
        self
    }

    /// Registers the adapter of a field.
    ///
    /// Registering the same field twice keeps the last adapter.
    #[must_use]
    pub fn field(mut self, name: &'static str, resolver: FieldResolver<T>) -> Self {
        self.fields.insert(name, resolver);
        self
    }

    /// The type name this table resolves.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the type name or one of the interfaces matches.
    #[must_use]
    pub fn implements(&self, type_condition: &str) -> bool {
        self.type_name == type_condition || self.interfaces.contains(&type_condition)
    }

    /// Routes the field resolution to its adapter.
    ///
    /// Unknown fields resolve to a [`FieldError`].
    pub fn dispatch<'a>(
        &self,
        object: &'a T,
        params: ResolverParams<'a>,
    ) -> BoxFuture<'a, ExecutionResult> {
        match self.fields.get(params.field_name()) {
            Some(resolver) => resolver(object, params),
            None => Box::pin(future::ready(Err(unknown_field(&params)))),
        }
    }
}

/// Error of a field missing from the parent's type.
pub(crate) fn unknown_field(params: &ResolverParams<'_>) -> FieldError {
    FieldError::from(format!(
        "Unknown field \"{}\" on type \"{}\"",
        params.field_name(),
        params.parent_type(),
    ))
}

/// Object handle binding a backend value to its static dispatch table.
pub struct TypedObject<T: ?Sized + 'static> {
    object: Arc<T>,
    resolvers: &'static Resolvers<T>,
}

impl<T: ?Sized + 'static> TypedObject<T> {
    /// Binds `object` to `resolvers`.
    #[must_use]
    pub fn new(object: Arc<T>, resolvers: &'static Resolvers<T>) -> Self {
        Self { object, resolvers }
    }

    /// The backend value.
    #[must_use]
    pub fn inner(&self) -> &Arc<T> {
        &self.object
    }
}

impl<T: ?Sized + 'static> Clone for TypedObject<T> {
    fn clone(&self) -> Self {
        Self {
            object: Arc::clone(&self.object),
            resolvers: self.resolvers,
        }
    }
}

impl<T> ObjectResolver for TypedObject<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn type_name(&self) -> &str {
        self.resolvers.type_name()
    }

    fn implements(&self, type_condition: &str) -> bool {
        self.resolvers.implements(type_condition)
    }

    fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
        self.resolvers.dispatch(&*self.object, params)
    }
}

impl<T> ResolveValue for TypedObject<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn resolve_value<'a>(
        self,
        executor: &'a Executor<'a>,
        selection_set: &'a [&'a Selection],
    ) -> BoxFuture<'a, Value>
    where
        Self: 'a,
    {
        Box::pin(async move {
            resolve_selection_set(&self, selection_set, executor, ExecutionMode::Parallel).await
        })
    }
}

/// Fields of one selection set, grouped by response key in request order.
pub(crate) type CollectedFields<'a> = IndexMap<&'a str, Vec<&'a Field>, FnvBuildHasher>;

/// Flattens a selection set for the provided object.
///
/// Fragment spreads are resolved by name and visited once, fragments whose
/// type condition does not apply to `object` are dropped, and `@skip`/`@include`
/// are evaluated. Fields sharing a response key are grouped at the position of
/// their first occurrence.
pub(crate) fn collect_fields<'a>(
    object: &dyn ObjectResolver,
    selection_set: &'a [&'a Selection],
    executor: &Executor<'a>,
) -> CollectedFields<'a> {
    let mut fields = CollectedFields::default();
    let mut visited = FnvHashSet::default();
    collect_fields_into(
        object,
        selection_set.iter().copied(),
        executor,
        &mut fields,
        &mut visited,
    );
    fields
}

fn collect_fields_into<'a>(
    object: &dyn ObjectResolver,
    selections: impl IntoIterator<Item = &'a Selection>,
    executor: &Executor<'a>,
    fields: &mut CollectedFields<'a>,
    visited: &mut FnvHashSet<&'a str>,
) {
    for selection in selections {
        if is_excluded(selection.directives(), executor.variables()) {
            continue;
        }

        match selection {
            Selection::Field(f) => fields.entry(f.response_key()).or_default().push(f),
            Selection::FragmentSpread(spread) => {
                if !visited.insert(spread.name.as_str()) {
                    continue;
                }
                let Some(fragment) = executor.fragment_by_name(&spread.name) else {
                    tracing::warn!(fragment = %spread.name, "ignoring spread of unknown fragment");
                    continue;
                };
                if object.implements(&fragment.type_condition) {
                    collect_fields_into(object, &fragment.selection_set, executor, fields, visited);
                }
            }
            Selection::InlineFragment(inline) => {
                let applies = inline
                    .type_condition
                    .as_deref()
                    .is_none_or(|c| object.implements(c));
                if applies {
                    collect_fields_into(object, &inline.selection_set, executor, fields, visited);
                }
            }
        }
    }
}

/// Evaluates `@skip(if:)` and `@include(if:)`.
///
/// Other directives are ignored, and so are conditions not resolving to a
/// boolean.
pub(crate) fn is_excluded(directives: &[Directive], vars: &Variables) -> bool {
    for directive in directives {
        let skip_when = match directive.name.as_str() {
            "skip" => true,
            "include" => false,
            _ => continue,
        };

        let condition = directive
            .arguments
            .iter()
            .find(|(name, _)| name == "if")
            .map(|(_, v)| v.clone().into_const(vars));
        match condition {
            Some(Ok(Value::Boolean(b))) if b == skip_when => return true,
            Some(Ok(Value::Boolean(_))) => {}
            _ => tracing::warn!(
                directive = %directive.name,
                "ignoring directive without a boolean `if` argument",
            ),
        }
    }
    false
}
