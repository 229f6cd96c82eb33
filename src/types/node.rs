//! Global object identity.

use async_trait::async_trait;

use crate::{
    BoxFuture,
    executor::{ExecutionResult, FieldResult, RequestId, ResolverParams},
};

use super::scalars::Id;

/// An object that can be refetched later from its [`Id`] alone, whatever its
/// concrete type.
#[async_trait]
pub trait Node: Send + Sync {
    /// Globally unique identifier of this object.
    async fn id(&self, request_id: RequestId) -> FieldResult<Id>;
}

/// Field adapter answering `id` from [`Node::id`].
///
/// Register it in the [`Resolvers`](super::base::Resolvers) table of every
/// type implementing `Node`.
pub fn node_id<'a, T>(object: &'a T, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult>
where
    T: Node + ?Sized,
{
    Box::pin(async move {
        let id = object.id(params.request_id()).await?;
        Ok(params.resolve(id).await)
    })
}
