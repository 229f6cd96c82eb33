#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

use derive_more::with_trait::{Display, Error};

// These are required by the resolver adapters written against this crate.
#[doc(hidden)]
pub use {async_trait::async_trait, futures, static_assertions as sa};

#[doc(inline)]
pub use futures::future::BoxFuture;

pub mod ast;
pub mod executor;
mod introspection;
pub mod schema;
mod types;
mod value;
// This needs to be public until docs have support for private modules:
// https://github.com/rust-lang/cargo/issues/1520
pub mod integrations;
mod result_ext;


#[cfg(test)]
mod executor_tests;

pub use crate::{
    ast::{
        Definition, Directive, Document, Field, FromInputValue, InputError, InputValue,
        Operation, OperationType, Selection, Variables,
    },
    executor::{
        ExecutionError, ExecutionResult, Executor, FieldError, FieldResult, PathSegment,
        RequestId, ResolverParams, get_operation,
    },
    introspection::Introspection,
    result_ext::ResultExt,
    schema::model::Operations,
    types::{
        async_await::{ExecutionMode, resolve_selection_set},
        base::{FieldResolver, ObjectResolver, ResolveValue, Resolvers, TypedObject},
        node::{Node, node_id},
        pagination::{Connection, Edge, PageInfo},
        scalars::Id,
    },
    value::{Object, Scalar, Value, ValueError, ValueKind, ValueType},
};

/// An error that prevented query execution
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum GraphQLError {
    /// The document holds no operation.
    #[display("No operation provided")]
    NoOperationProvided,

    /// The document holds several operations and no operation name was given.
    #[display("Multiple operations provided")]
    MultipleOperationsProvided,

    /// No operation of the document has the given name.
    #[display("Unknown operation name")]
    UnknownOperationName,

    /// A mutation was requested but no mutation root is bound.
    #[display("No mutation root bound")]
    NoMutationRoot,

    /// A subscription was requested but no subscription root is bound.
    #[display("No subscription root bound")]
    NoSubscriptionRoot,
}
