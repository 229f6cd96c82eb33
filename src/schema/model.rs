use std::sync::Arc;

use crate::{
    GraphQLError,
    ast::{Document, OperationType, Variables},
    executor::{ExecutionError, RequestId, execute_operation, get_operation},
    introspection::{IntrospectedQuery, Introspection},
    types::{async_await::ExecutionMode, base::ObjectResolver},
    value::Value,
};

/// Root resolvers of a service
///
/// This brings the query, mutation and subscription roots together, and routes
/// every executed operation to the matching one.
pub struct Operations {
    query: Arc<dyn ObjectResolver>,
    mutation: Option<Arc<dyn ObjectResolver>>,
    subscription: Option<Arc<dyn ObjectResolver>>,
    introspection: Option<Arc<dyn Introspection>>,
    introspection_disabled: bool,
}

impl Operations {
    /// Constructs new root resolvers from the query, mutation and subscription
    /// roots.
    ///
    /// A missing mutation or subscription root is only reported when an
    /// operation of that type is executed.
    #[must_use]
    pub fn new(
        query: Arc<dyn ObjectResolver>,
        mutation: Option<Arc<dyn ObjectResolver>>,
        subscription: Option<Arc<dyn ObjectResolver>>,
    ) -> Self {
        Self {
            query,
            mutation,
            subscription,
            introspection: None,
            introspection_disabled: false,
        }
    }

    /// Answers `__schema` and `__type` on the query root with the provided
    /// [`Introspection`].
    #[must_use]
    pub fn with_introspection(mut self, introspection: Arc<dyn Introspection>) -> Self {
        self.introspection = Some(introspection);
        self
    }

    /// Disables introspection for these [`Operations`], making `__schema` and
    /// `__type` fields fail to resolve.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use std::sync::Arc;
    /// #
    /// # use juniper_service::{
    /// #     BoxFuture, ExecutionResult, ObjectResolver, Operations, ResolverParams,
    /// # };
    /// #
    /// struct Query;
    ///
    /// impl ObjectResolver for Query {
    ///     fn type_name(&self) -> &str {
    ///         "Query"
    ///     }
    ///
    ///     fn resolve_field<'a>(&'a self, p: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
    ///         Box::pin(async move { Ok(p.resolve(p.field_name()).await) })
    ///     }
    /// }
    ///
    /// let operations = Operations::new(Arc::new(Query), None, None).disable_introspection();
    /// # drop(operations);
    /// ```
    #[must_use]
    pub fn disable_introspection(mut self) -> Self {
        self.introspection_disabled = true;
        self
    }

    /// Enables introspection again, if it was previously disabled.
    #[must_use]
    pub fn enable_introspection(mut self) -> Self {
        self.introspection_disabled = false;
        self
    }

    /// Whether `__schema` and `__type` are rejected.
    #[must_use]
    pub fn is_introspection_disabled(&self) -> bool {
        self.introspection_disabled
    }

    /// The root resolver of operations of the provided type.
    ///
    /// # Errors
    ///
    /// [`GraphQLError::NoMutationRoot`] or [`GraphQLError::NoSubscriptionRoot`]
    /// if no such root was bound.
    pub fn root(
        &self,
        operation_type: OperationType,
    ) -> Result<&dyn ObjectResolver, GraphQLError> {
        match operation_type {
            OperationType::Query => Ok(&*self.query),
            OperationType::Mutation => self
                .mutation
                .as_deref()
                .ok_or(GraphQLError::NoMutationRoot),
            OperationType::Subscription => self
                .subscription
                .as_deref()
                .ok_or(GraphQLError::NoSubscriptionRoot),
        }
    }

    /// Executes an operation of `document`.
    ///
    /// Mutation root fields run one after another in request order, every other
    /// selection set resolves its fields concurrently. Subscriptions resolve
    /// their root selection once.
    ///
    /// Field errors do not fail the execution: the failed field resolves to
    /// `null` and its error is returned along with the data.
    ///
    /// # Errors
    ///
    /// If no operation can be selected, or no root is bound for its type.
    pub async fn execute(
        &self,
        request_id: RequestId,
        document: &Document,
        operation_name: Option<&str>,
        variables: &Variables,
    ) -> Result<(Value, Vec<ExecutionError>), GraphQLError> {
        let operation = get_operation(document, operation_name)?;
        let root = self.root(operation.operation_type)?;

        tracing::debug!(
            request_id = %request_id,
            operation_type = %operation.operation_type,
            operation_name = operation.name.as_deref(),
            "executing operation",
        );

        let (value, errors) = match operation.operation_type {
            OperationType::Query => {
                let root = IntrospectedQuery::new(
                    root,
                    self.introspection.as_deref(),
                    self.introspection_disabled,
                );
                let mode = ExecutionMode::Parallel;
                execute_operation(request_id, document, operation, &root, mode, variables).await
            }
            OperationType::Mutation => {
                let mode = ExecutionMode::Serial;
                execute_operation(request_id, document, operation, root, mode, variables).await
            }
            OperationType::Subscription => {
                let mode = ExecutionMode::Parallel;
                execute_operation(request_id, document, operation, root, mode, variables).await
            }
        };

        tracing::debug!(
            request_id = %request_id,
            errors = errors.len(),
            "operation executed",
        );

        Ok((value, errors))
    }
}
