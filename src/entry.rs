use crate::{
    compare::Comparator,
    insert::Search,
    map::RbMap,
    node::{NodeId, Side},
};

/// A view into a single entry in an [`RbMap`], which may either be vacant or
/// occupied.
///
/// This `enum` is constructed from the [`entry`] method on [`RbMap`].
///
/// [`entry`]: RbMap::entry
#[derive(Debug)]
pub enum Entry<'a, K, V, C> {
    /// No node holds the key.
    Vacant(VacantEntry<'a, K, V, C>),
    /// A node holding the key was found.
    Occupied(OccupiedEntry<'a, K, V, C>),
}

/// An [`Entry`] for a key absent from the map, owning the key until a value
/// is inserted.
#[derive(Debug)]
pub struct VacantEntry<'a, K, V, C> {
    key: K,

    /// Where the key is linked on insert, as found by the search that
    /// created this entry. The exclusive map borrow keeps it valid.
    at: Option<(usize, Side)>,

    map: &'a mut RbMap<K, V, C>,
}

/// An [`Entry`] for a key present in the map.
///
/// Holds the handle of the located node, so accessing the value does not
/// search the tree again.
#[derive(Debug)]
pub struct OccupiedEntry<'a, K, V, C> {
    id: NodeId,
    map: &'a mut RbMap<K, V, C>,
}

impl<'a, K, V, C> VacantEntry<'a, K, V, C> {
    /// Returns the key that [`VacantEntry::insert`] will store.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Give the key back without touching the map.
    #[inline]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Insert `value` under the owned key, returning a mutable reference to
    /// the stored value.
    #[inline]
    pub fn insert(self, value: V) -> &'a mut V {
        self.insert_entry(value).into_mut()
    }

    /// Insert `value` under the owned key, returning the resulting
    /// [`OccupiedEntry`].
    #[inline]
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V, C> {
        let id = self.map.insert_vacant(self.key, value, self.at);
        OccupiedEntry { id, map: self.map }
    }
}

impl<'a, K, V, C> OccupiedEntry<'a, K, V, C> {
    /// Returns the key stored in the map, which is the one inserted first
    /// rather than the one passed to [`RbMap::entry`].
    #[inline]
    pub fn key(&self) -> &K {
        &self.map.as_tree().nodes[self.id.slot].key
    }

    /// Returns the value held by the node.
    #[inline]
    pub fn get(&self) -> &V {
        &self.map.as_tree().nodes[self.id.slot].value
    }

    /// Returns the value held by the node, mutably, for the lifetime of the
    /// entry.
    #[inline]
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.map.tree_mut().nodes[self.id.slot].value
    }

    /// Consume the entry, returning a mutable reference to the value that
    /// lives as long as the map borrow.
    #[inline]
    pub fn into_mut(self) -> &'a mut V {
        &mut self.map.tree_mut().nodes[self.id.slot].value
    }

    /// Replace the value held by the node, returning the old value.
    #[inline]
    pub fn insert(&mut self, value: V) -> V {
        std::mem::replace(self.get_mut(), value)
    }

    /// Remove the node from the map, returning its key and value.
    #[inline]
    pub fn remove_entry(self) -> (K, V) {
        let (map, id) = (self.map, self.id);
        match map.remove_node(id) {
            Some(v) => v,
            None => unreachable!("occupied entry refers to a removed node"),
        }
    }

    /// Remove the node from the map, returning its value.
    #[inline]
    pub fn remove(self) -> V {
        self.remove_entry().1
    }
}

impl<'a, K, V, C> Entry<'a, K, V, C>
where
    C: Comparator<K>,
{
    /// Locate `key` in `map`.
    pub(crate) fn new(key: K, map: &'a mut RbMap<K, V, C>) -> Self {
        match map.as_tree().search(&key) {
            Search::Found(v) => {
                let id = map.as_tree().id_of(v);
                Entry::Occupied(OccupiedEntry { id, map })
            }
            Search::Vacant(at) => Entry::Vacant(VacantEntry { key, at, map }),
        }
    }
}

impl<'a, K, V, C> Entry<'a, K, V, C> {
    /// Returns the key of this entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RbMap;
    ///
    /// let mut map: RbMap<i32, &str> = RbMap::new();
    /// assert_eq!(map.entry(10).key(), &10);
    /// ```
    #[inline]
    pub fn key(&self) -> &K {
        match self {
            Entry::Vacant(entry) => entry.key(),
            Entry::Occupied(entry) => entry.key(),
        }
    }

    /// Returns the value for this key, inserting `default` first if the
    /// key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RbMap;
    ///
    /// let mut map: RbMap<i32, u32> = RbMap::new();
    ///
    /// map.entry(10).or_insert(42);
    /// assert_eq!(map.get(&10), Some(&42));
    ///
    /// *map.entry(10).or_insert(100) += 1;
    /// assert_eq!(map.get(&10), Some(&43));
    /// ```
    #[inline]
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Returns the value for this key, inserting the output of `default`
    /// first if the key is absent. `default` is only called when needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RbMap;
    ///
    /// let mut map: RbMap<i32, String> = RbMap::new();
    /// let s = "hello".to_string();
    ///
    /// map.entry(10).or_insert_with(|| s);
    ///
    /// assert_eq!(map.get(&10), Some(&"hello".to_string()));
    /// ```
    #[inline]
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Like [`Entry::or_insert_with`], but `default` is given the key so
    /// the value can be derived from it.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RbMap;
    ///
    /// let mut map: RbMap<i32, i32> = RbMap::new();
    ///
    /// map.entry(10).or_insert_with_key(|key| key * 2);
    ///
    /// assert_eq!(map.get(&10), Some(&20));
    /// ```
    #[inline]
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let value = default(entry.key());
                entry.insert(value)
            }
        }
    }

    /// Apply `f` to the value if the key is present, then return the entry
    /// for chaining with one of the `or_insert` methods.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RbMap;
    ///
    /// let mut map: RbMap<i32, u32> = RbMap::new();
    ///
    /// map.entry(10)
    ///     .and_modify(|v| *v += 1)
    ///     .or_insert(42);
    /// assert_eq!(map.get(&10), Some(&42));
    ///
    /// map.entry(10)
    ///     .and_modify(|v| *v += 1)
    ///     .or_insert(42);
    /// assert_eq!(map.get(&10), Some(&43));
    /// ```
    #[inline]
    pub fn and_modify<F: FnOnce(&mut V)>(mut self, f: F) -> Self {
        match &mut self {
            Entry::Occupied(entry) => {
                f(entry.get_mut());
            }
            Entry::Vacant(_) => {}
        }
        self
    }

    /// Store `value` under this key, replacing any existing value, and
    /// return the now occupied entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RbMap;
    ///
    /// let mut map: RbMap<i32, &str> = RbMap::new();
    /// let entry = map.entry(10).insert_entry("hello");
    ///
    /// assert_eq!(entry.key(), &10);
    /// ```
    #[inline]
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V, C> {
        match self {
            Entry::Occupied(mut entry) => {
                entry.insert(value);
                entry
            }
            Entry::Vacant(entry) => entry.insert_entry(value),
        }
    }
}

impl<'a, K, V, C> Entry<'a, K, V, C>
where
    V: Default,
{
    /// Returns the value for this key, inserting [`V::default()`] first if
    /// the key is absent.
    ///
    /// [`V::default()`]: Default::default
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::RbMap;
    ///
    /// let mut map: RbMap<i32, Option<u32>> = RbMap::new();
    /// map.entry(10).or_default();
    ///
    /// assert_eq!(map.get(&10), Some(&None));
    /// ```
    #[inline]
    pub fn or_default(self) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(V::default()),
        }
    }
}
