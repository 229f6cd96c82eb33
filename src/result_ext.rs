use std::fmt;

use crate::executor::{FieldError, FieldResult};

/// Helper trait to produce [`FieldResult`]s
///
/// [`FieldResult`]s carry a [`FieldError`], which is what goes out in the
/// GraphQL response. Any error implementing `Display` converts into one with
/// `?`, and `to_field_result` does the same where no `?` is around:
///
/// ```rust
/// use std::str::FromStr;
/// use juniper_service::{FieldResult, ResultExt};
///
/// fn sample_fn(s: &str) -> FieldResult<i32> {
///     i32::from_str(s).to_field_result()
/// }
///
/// # fn main() { assert_eq!(sample_fn("12"), Ok(12)); }
/// ```
pub trait ResultExt<T, E: fmt::Display> {
    /// Convert the error to a [`FieldError`] by using its `Display`
    /// implementation
    ///
    /// # Errors
    ///
    /// If `self` is an error.
    fn to_field_result(self) -> FieldResult<T>;
}

impl<T, E: fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn to_field_result(self) -> FieldResult<T> {
        self.map_err(FieldError::from)
    }
}
