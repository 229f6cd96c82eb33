use futures::future;

use crate::{
    BoxFuture,
    ast::{FromInputValue, InputError, Selection},
    executor::Executor,
    value::Value,
};

use super::base::ResolveValue;

impl<T: ResolveValue> ResolveValue for Option<T> {
    fn resolve_value<'a>(
        self,
        executor: &'a Executor<'a>,
        selection_set: &'a [&'a Selection],
    ) -> BoxFuture<'a, Value>
    where
        Self: 'a,
    {
        match self {
            Some(v) => v.resolve_value(executor, selection_set),
            None => Box::pin(future::ready(Value::null())),
        }
    }
}

impl<T: ResolveValue> ResolveValue for Vec<T> {
    fn resolve_value<'a>(
        self,
        executor: &'a Executor<'a>,
        selection_set: &'a [&'a Selection],
    ) -> BoxFuture<'a, Value>
    where
        Self: 'a,
    {
        Box::pin(async move {
            let items = self.into_iter().enumerate().map(|(i, item)| async move {
                let sub_exec = executor.index_sub_executor(i);
                item.resolve_value(&sub_exec, selection_set).await
            });
            Value::List(future::join_all(items).await)
        })
    }
}

impl<T: FromInputValue> FromInputValue for Option<T> {
    fn from_input_value(v: &Value) -> Result<Self, InputError> {
        match v {
            Value::Null => Ok(None),
            v => T::from_input_value(v).map(Some),
        }
    }
}

impl<T: FromInputValue> FromInputValue for Vec<T> {
    fn from_input_value(v: &Value) -> Result<Self, InputError> {
        match v {
            Value::List(l) => l.iter().map(T::from_input_value).collect(),
            Value::Null => Err(InputError::unexpected("List", v)),
            // A single item is coerced to a list of one.
            other => T::from_input_value(other).map(|item| vec![item]),
        }
    }
}
