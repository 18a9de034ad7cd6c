use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

/// Dense storage for values of type `Value` which can only be indexed by keys of type `Key`.
///
/// Used as the arena for the DP states and as the per-node storage of the graph, so that a
/// [`NodeId`](crate::graph::NodeId) can never accidentally index into the DP states.
#[derive(Debug, Hash, PartialEq, Eq)]
pub struct KeyedVec<Key, Value> {
    key: PhantomData<Key>,
    elements: Vec<Value>,
}

impl<Key, Value: Clone> Clone for KeyedVec<Key, Value> {
    fn clone(&self) -> Self {
        Self {
            key: PhantomData,
            elements: self.elements.clone(),
        }
    }
}

impl<Key, Value> Default for KeyedVec<Key, Value> {
    fn default() -> Self {
        Self {
            key: PhantomData,
            elements: Vec::default(),
        }
    }
}

impl<Key: StorageKey, Value> KeyedVec<Key, Value> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Add a new value to the vector.
    ///
    /// Returns the key for the inserted value.
    pub(crate) fn push(&mut self, value: Value) -> Key {
        self.elements.push(value);

        Key::create_from_index(self.elements.len() - 1)
    }

    /// Returns the value stored for `key`, or [`None`] if the key is out of bounds.
    pub fn get(&self, key: Key) -> Option<&Value> {
        self.elements.get(key.index())
    }

    /// Iterate over the values in the vector.
    pub fn iter(&self) -> impl Iterator<Item = &'_ Value> {
        self.elements.iter()
    }

    /// Iterate over the keys of the vector in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = Key> {
        (0..self.elements.len()).map(Key::create_from_index)
    }

    /// Iterate over the key-value pairs in ascending key order.
    pub fn iter_with_keys(&self) -> impl Iterator<Item = (Key, &'_ Value)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(index, value)| (Key::create_from_index(index), value))
    }
}

impl<Key: StorageKey, Value: Clone> KeyedVec<Key, Value> {
    /// Create a vector holding `len` copies of `value`.
    pub(crate) fn filled(len: usize, value: Value) -> Self {
        Self {
            key: PhantomData,
            elements: vec![value; len],
        }
    }
}

impl<Key: StorageKey, Value> Index<Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> Index<&Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: &Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> IndexMut<Key> for KeyedVec<Key, Value> {
    fn index_mut(&mut self, index: Key) -> &mut Self::Output {
        &mut self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> FromIterator<Value> for KeyedVec<Key, Value> {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self {
            key: PhantomData,
            elements: iter.into_iter().collect(),
        }
    }
}

impl StorageKey for usize {
    fn index(&self) -> usize {
        *self
    }

    fn create_from_index(index: usize) -> Self {
        index
    }
}

/// A simple trait which requires that the structures implementing this trait can generate an index.
pub trait StorageKey: Clone {
    fn index(&self) -> usize;

    fn create_from_index(index: usize) -> Self;
}

#[cfg(test)]
mod tests {
    use super::KeyedVec;
    use super::StorageKey;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct TestKey(u32);

    impl StorageKey for TestKey {
        fn index(&self) -> usize {
            self.0 as usize
        }

        fn create_from_index(index: usize) -> Self {
            TestKey(index as u32)
        }
    }

    #[test]
    fn push_returns_consecutive_keys() {
        let mut keyed_vec: KeyedVec<TestKey, &str> = KeyedVec::default();

        assert_eq!(keyed_vec.push("a"), TestKey(0));
        assert_eq!(keyed_vec.push("b"), TestKey(1));
        assert_eq!(keyed_vec[TestKey(1)], "b");
    }

    #[test]
    fn get_out_of_bounds_is_none() {
        let keyed_vec: KeyedVec<TestKey, i32> = KeyedVec::filled(2, 7);

        assert_eq!(keyed_vec.get(TestKey(1)), Some(&7));
        assert_eq!(keyed_vec.get(TestKey(2)), None);
    }

    #[test]
    fn keys_are_ascending() {
        let keyed_vec: KeyedVec<TestKey, i32> = [3, 1, 2].into_iter().collect();

        let keys = keyed_vec.keys().collect::<Vec<_>>();
        assert_eq!(keys, vec![TestKey(0), TestKey(1), TestKey(2)]);
    }
}
