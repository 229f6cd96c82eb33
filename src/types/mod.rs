pub mod async_await;
pub mod base;
pub mod containers;
pub mod node;
pub mod pagination;
pub mod pointers;
pub mod scalars;
