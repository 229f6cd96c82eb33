//! Cursor pagination objects: connections, edges and page info.
//!
//! Every paginated field returns the same shape, so these are provided once,
//! generically, and named per paginated type (`TaskConnection`, `TaskEdge`).

use futures::future;

use crate::{
    BoxFuture,
    executor::{ExecutionResult, ResolverParams},
    value::Value,
};

use super::base::{ObjectResolver, ResolveValue, unknown_field};

/// Position of a page within the whole list.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PageInfo {
    /// Whether items follow the last edge of the page.
    pub has_next_page: bool,
    /// Whether items precede the first edge of the page.
    pub has_previous_page: bool,
}

impl ObjectResolver for PageInfo {
    fn type_name(&self) -> &str {
        "PageInfo"
    }

    fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
        let result = match params.field_name() {
            "hasNextPage" => Ok(Value::Boolean(self.has_next_page)),
            "hasPreviousPage" => Ok(Value::Boolean(self.has_previous_page)),
            _ => Err(unknown_field(&params)),
        };
        Box::pin(future::ready(result))
    }
}

/// An item of a page, with the cursor pointing at it.
#[derive(Clone, Debug)]
pub struct Edge<T> {
    type_name: &'static str,
    cursor: Value,
    node: T,
}

impl<T> Edge<T> {
    /// Creates an edge of the named type.
    #[must_use]
    pub fn new(type_name: &'static str, cursor: impl Into<Value>, node: T) -> Self {
        Self {
            type_name,
            cursor: cursor.into(),
            node,
        }
    }

    #[expect(missing_docs, reason = "self-explanatory")]
    #[must_use]
    pub fn cursor(&self) -> &Value {
        &self.cursor
    }

    #[expect(missing_docs, reason = "self-explanatory")]
    #[must_use]
    pub fn node(&self) -> &T {
        &self.node
    }
}

impl<T> ObjectResolver for Edge<T>
where
    T: ResolveValue + Clone + Sync,
{
    fn type_name(&self) -> &str {
        self.type_name
    }

    fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
        Box::pin(async move {
            match params.field_name() {
                "cursor" => Ok(self.cursor.clone()),
                "node" => Ok(params.resolve(self.node.clone()).await),
                _ => Err(unknown_field(&params)),
            }
        })
    }
}

/// A page of edges plus its [`PageInfo`].
#[derive(Clone, Debug)]
pub struct Connection<T> {
    type_name: &'static str,
    page_info: PageInfo,
    edges: Vec<Edge<T>>,
}

impl<T> Connection<T> {
    /// Creates a connection of the named type.
    #[must_use]
    pub fn new(type_name: &'static str, page_info: PageInfo, edges: Vec<Edge<T>>) -> Self {
        Self {
            type_name,
            page_info,
            edges,
        }
    }

    #[expect(missing_docs, reason = "self-explanatory")]
    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        self.page_info
    }

    #[expect(missing_docs, reason = "self-explanatory")]
    #[must_use]
    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }
}

impl<T> ObjectResolver for Connection<T>
where
    T: ResolveValue + Clone + Sync,
{
    fn type_name(&self) -> &str {
        self.type_name
    }

    fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
        Box::pin(async move {
            match params.field_name() {
                "pageInfo" => Ok(params.resolve(&self.page_info).await),
                "edges" => Ok(params.resolve(self.edges.iter().collect::<Vec<_>>()).await),
                _ => Err(unknown_field(&params)),
            }
        })
    }
}
