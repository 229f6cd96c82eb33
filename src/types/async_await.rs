use futures::stream::{FuturesOrdered, StreamExt as _};
use tracing::Instrument as _;

use crate::{
    BoxFuture,
    ast::{Field, Selection},
    executor::{Executor, FieldError, ResolverParams},
    value::{Object, Value},
};

use super::base::{ObjectResolver, collect_fields};

/// How sibling fields of a selection set are driven.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecutionMode {
    /// All fields are in flight at once. Used everywhere except the mutation
    /// root.
    Parallel,
    /// Each field runs to completion before the next one starts.
    Serial,
}

/// Resolves `selection_set` against `object` into a [`Value::Map`].
///
/// Map entries follow the order of the requested fields regardless of the
/// completion order of their resolvers. A field failing to resolve becomes
/// `null` and records its error on the `executor`, without affecting its
/// siblings.
pub fn resolve_selection_set<'a>(
    object: &'a dyn ObjectResolver,
    selection_set: &'a [&'a Selection],
    executor: &'a Executor<'a>,
    mode: ExecutionMode,
) -> BoxFuture<'a, Value> {
    Box::pin(async move {
        let fields = collect_fields(object, selection_set, executor);
        let mut result = Object::with_capacity(fields.len());

        let pending = fields
            .into_iter()
            .map(|(response_key, group)| resolve_field(object, response_key, group, executor));
        let values: Vec<(&str, Value)> = match mode {
            ExecutionMode::Parallel => pending.collect::<FuturesOrdered<_>>().collect().await,
            ExecutionMode::Serial => {
                let mut values = Vec::new();
                for f in pending {
                    values.push(f.await);
                }
                values
            }
        };

        for (response_key, value) in values {
            // Response keys are unique after collection.
            let _ = result.add_field(response_key, value);
        }
        Value::Map(result)
    })
}

fn resolve_field<'a>(
    object: &'a dyn ObjectResolver,
    response_key: &'a str,
    group: Vec<&'a Field>,
    executor: &'a Executor<'a>,
) -> BoxFuture<'a, (&'a str, Value)> {
    let field = group[0];

    if field.name == "__typename" {
        let value = Value::string(object.type_name());
        return Box::pin(futures::future::ready((response_key, value)));
    }

    let span = tracing::trace_span!(
        "resolve_field",
        request_id = %executor.request_id(),
        parent_type = object.type_name(),
        field = %field.name,
        response_key,
    );
    let field_future = async move {
        let sub_exec = executor.field_sub_executor(response_key);

        let arguments = match field.arguments_into_const(executor.variables()) {
            Ok(args) => args,
            Err(e) => {
                sub_exec.push_error(FieldError::from(e));
                return (response_key, Value::null());
            }
        };
        let selection_set = group
            .iter()
            .flat_map(|&f| &f.selection_set)
            .collect::<Vec<_>>();

        let params = ResolverParams::new(
            sub_exec.clone(),
            &field.name,
            object.type_name(),
            arguments,
            selection_set,
        );
        let value = match object.resolve_field(params).await {
            Ok(v) => v,
            Err(e) => {
                sub_exec.push_error(e);
                Value::null()
            }
        };
        (response_key, value)
    };
    Box::pin(field_future.instrument(span))
}
