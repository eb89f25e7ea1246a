use hashlink::LinkedHashMap;
use hashlink::linked_hash_map::Entry;

/// A folder's table of named children.
///
/// Keys are unique folder names; the table owns its values. Iteration order
/// is unspecified and callers must not rely on it. The table has no
/// synchronization of its own: the owning node's lock guards every access.
#[derive(Debug)]
pub struct ChildTable<V> {
    entries: LinkedHashMap<String, V>,
}

impl<V> ChildTable<V> {
    pub fn new() -> Self {
        Self {
            entries: LinkedHashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Inserts `value` under `name` unless the name is taken, in which case
    /// the value is handed back untouched.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Result<(), V> {
        match self.entries.entry(name.into()) {
            Entry::Occupied(_) => Err(value),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    /// Takes the value stored under `name` out of the table.
    pub fn remove(&mut self, name: &str) -> Option<V> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Empties the table, yielding every value it owned.
    pub fn drain(&mut self) -> impl Iterator<Item = V> + use<V> {
        std::mem::take(&mut self.entries)
            .into_iter()
            .map(|(_, value)| value)
    }
}

impl<V> Default for ChildTable<V> {
    fn default() -> Self {
        Self::new()
    }
}
