use std::sync::Arc;

use crate::{
    BoxFuture,
    ast::Selection,
    executor::{ExecutionResult, Executor, ResolverParams},
    value::Value,
};

use super::{
    async_await::{ExecutionMode, resolve_selection_set},
    base::{ObjectResolver, ResolveValue},
};

impl<T> ObjectResolver for Box<T>
where
    T: ObjectResolver + ?Sized,
{
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn implements(&self, type_condition: &str) -> bool {
        (**self).implements(type_condition)
    }

    fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
        (**self).resolve_field(params)
    }
}

impl<T> ObjectResolver for &T
where
    T: ObjectResolver + ?Sized,
{
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn implements(&self, type_condition: &str) -> bool {
        (**self).implements(type_condition)
    }

    fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
        (**self).resolve_field(params)
    }
}

impl<T> ObjectResolver for Arc<T>
where
    T: ObjectResolver + ?Sized,
{
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn implements(&self, type_condition: &str) -> bool {
        (**self).implements(type_condition)
    }

    fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
        (**self).resolve_field(params)
    }
}

macro_rules! resolve_as_object {
    ($($ty:ty),* $(,)?) => {$(
        impl<T> ResolveValue for $ty
        where
            T: ObjectResolver + ?Sized,
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
                    resolve_selection_set(&self, selection_set, executor, ExecutionMode::Parallel)
                        .await
                })
            }
        }
    )*};
}

resolve_as_object!(Box<T>, Arc<T>, &T);
