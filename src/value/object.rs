use fnv::FnvBuildHasher;
use indexmap::map::{Entry, IndexMap, IntoIter, Iter, IterMut};

use super::{Value, ValueError};

/// Ordered map of named [`Value`]s backing [`Value::Map`].
///
/// Members keep the order they were added in. Lookups by name are O(1) and
/// names are unique: adding a name twice fails. Members are never removed
/// individually.
#[derive(Clone, Debug, Default)]
pub struct Object {
    key_value_list: IndexMap<String, Value, FnvBuildHasher>,
}

impl PartialEq for Object {
    /// Two maps are equal when they hold equal members in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.key_value_list.iter().eq(other.key_value_list.iter())
    }
}

impl Object {
    /// Create a new Object value with a fixed number of
    /// preallocated slots for field-value pairs
    #[must_use]
    pub fn with_capacity(size: usize) -> Self {
        Self {
            key_value_list: IndexMap::with_capacity_and_hasher(size, FnvBuildHasher::default()),
        }
    }

    /// Reserve slots for at least `additional` more field-value pairs.
    pub fn reserve(&mut self, additional: usize) {
        self.key_value_list.reserve(additional);
    }

    /// Add a new field with a value after all existing ones.
    ///
    /// # Errors
    ///
    /// [`ValueError::DuplicateMember`] if a field with the same name is already
    /// present. The existing field keeps its value and position.
    pub fn add_field(&mut self, k: impl Into<String>, value: Value) -> Result<(), ValueError> {
        match self.key_value_list.entry(k.into()) {
            Entry::Occupied(o) => Err(ValueError::DuplicateMember(o.key().clone())),
            Entry::Vacant(v) => {
                v.insert(value);
                Ok(())
            }
        }
    }

    /// Check if the object already contains a field with the given name
    #[must_use]
    pub fn contains_field(&self, f: &str) -> bool {
        self.key_value_list.contains_key(f)
    }

    /// Get the value for a given field
    #[must_use]
    pub fn get_field_value(&self, key: &str) -> Option<&Value> {
        self.key_value_list.get(key)
    }

    /// Get the position of a given field
    #[must_use]
    pub fn field_position(&self, key: &str) -> Option<usize> {
        self.key_value_list.get_index_of(key)
    }

    /// Get the field-value pair at a given position
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&str, &Value)> {
        self.key_value_list
            .get_index(index)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Get a iterator over all field value pairs
    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.key_value_list.iter()
    }

    /// Get a iterator over all mutable field value pairs
    pub fn iter_mut(&mut self) -> IterMut<'_, String, Value> {
        self.key_value_list.iter_mut()
    }

    /// Get the current number of fields
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.key_value_list.len()
    }

    /// Is this object without any fields?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key_value_list.is_empty()
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.key_value_list.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.key_value_list.iter()
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Self::Map(o)
    }
}
