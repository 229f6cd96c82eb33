mod async_await;
mod directives;
mod executor;
