//! Hooks answering `__schema` and `__type` on the query root.

use async_trait::async_trait;
use futures::future;

use crate::{
    BoxFuture,
    executor::{ExecutionResult, FieldError, ResolverParams},
    types::base::ObjectResolver,
};

/// Collaborator answering introspection queries.
///
/// Only ever consulted for fields of the query root. Populating the schema
/// description it returns is up to the implementor.
#[async_trait]
pub trait Introspection: Send + Sync {
    /// Resolves `__schema`, against the field's sub-selections.
    async fn schema(&self, params: &ResolverParams<'_>) -> ExecutionResult;

    /// Resolves `__type(name:)`.
    async fn type_by_name(&self, name: &str, params: &ResolverParams<'_>) -> ExecutionResult;
}

/// Query root wrapper routing the introspection fields away from the user's
/// query resolver.
pub(crate) struct IntrospectedQuery<'a> {
    query: &'a dyn ObjectResolver,
    introspection: Option<&'a dyn Introspection>,
    disabled: bool,
}

impl<'a> IntrospectedQuery<'a> {
    pub(crate) fn new(
        query: &'a dyn ObjectResolver,
        introspection: Option<&'a dyn Introspection>,
        disabled: bool,
    ) -> Self {
        Self {
            query,
            introspection,
            disabled,
        }
    }
}

impl ObjectResolver for IntrospectedQuery<'_> {
    fn type_name(&self) -> &str {
        self.query.type_name()
    }

    fn implements(&self, type_condition: &str) -> bool {
        self.query.implements(type_condition)
    }

    fn resolve_field<'b>(&'b self, params: ResolverParams<'b>) -> BoxFuture<'b, ExecutionResult> {
        match (params.field_name(), self.introspection) {
            (field_name @ ("__schema" | "__type"), _) if self.disabled => {
                Box::pin(future::ready(Err(FieldError::from(format!(
                    "GraphQL introspection is not allowed, \
                     but the operation contained `{field_name}`",
                )))))
            }
            ("__schema", Some(introspection)) => {
                Box::pin(async move { introspection.schema(&params).await })
            }
            ("__type", Some(introspection)) => Box::pin(async move {
                let name = params.argument::<String>("name")?;
                introspection.type_by_name(&name, &params).await
            }),
            _ => self.query.resolve_field(params),
        }
    }
}
