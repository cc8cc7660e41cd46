//! # Generational Arena
//!
//! Slot storage addressed by [`Index`] handles. Graphs that would otherwise
//! need parent back-pointers (the component graph, tree nodes) store indices
//! into an arena instead.

/// Handle to a value stored in an [`Arena`].
///
/// A freed slot is reused with a bumped generation, so an old handle never
/// resolves to the value that replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Index {
    /// Slot position in the arena.
    slot: u32,
    /// Generation the slot had when the value was inserted.
    generation: u32,
}

impl Index {
    /// Returns the slot position.
    #[inline]
    #[must_use]
    pub const fn slot(self) -> u32 {
        self.slot
    }

    /// Returns the generation.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

/// One slot of storage.
#[derive(Debug, Clone)]
struct Entry<T> {
    generation: u32,
    value: Option<T>,
}

/// A generational arena.
///
/// # Thread Safety
///
/// Not synchronized. The UI runs on one thread.
///
/// # Example
///
/// ```rust
/// use canopy_core::Arena;
///
/// let mut arena = Arena::new();
/// let a = arena.insert("root");
/// assert_eq!(arena.get(a), Some(&"root"));
///
/// arena.remove(a);
/// let b = arena.insert("child");
/// assert_eq!(a.slot(), b.slot());
/// assert!(arena.get(a).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Arena<T> {
    /// The storage array.
    entries: Vec<Entry<T>>,
    /// Free list - slots available for reuse.
    free_list: Vec<u32>,
    /// Number of live values.
    len: usize,
}

impl<T> Arena<T> {
    /// Creates an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Creates an empty arena with room for `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Returns the number of live values.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the arena holds no values.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the index the next [`insert`](Self::insert) will hand out.
    #[must_use]
    pub fn next_index(&self) -> Index {
        match self.free_list.last() {
            Some(&slot) => Index {
                slot,
                generation: self.entries[slot as usize].generation,
            },
            None => Index {
                slot: Self::slot_for(self.entries.len()),
                generation: 0,
            },
        }
    }

    /// Stores a value and returns its handle.
    pub fn insert(&mut self, value: T) -> Index {
        self.insert_with(|_| value)
    }

    /// Stores a value built from its own handle.
    ///
    /// Useful for values that need to know where they live.
    pub fn insert_with(&mut self, build: impl FnOnce(Index) -> T) -> Index {
        let index = self.next_index();
        let value = build(index);

        if self.free_list.pop().is_some() {
            self.entries[index.slot as usize].value = Some(value);
        } else {
            self.entries.push(Entry {
                generation: 0,
                value: Some(value),
            });
        }

        self.len += 1;
        index
    }

    /// Removes a value, returning it if the handle was live.
    pub fn remove(&mut self, index: Index) -> Option<T> {
        let entry = self.entries.get_mut(index.slot as usize)?;
        if entry.generation != index.generation {
            return None;
        }

        let value = entry.value.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free_list.push(index.slot);
        self.len -= 1;

        Some(value)
    }

    /// Returns true if the handle refers to a live value.
    #[inline]
    #[must_use]
    pub fn contains(&self, index: Index) -> bool {
        self.get(index).is_some()
    }

    /// Gets a reference to a value.
    #[inline]
    #[must_use]
    pub fn get(&self, index: Index) -> Option<&T> {
        let entry = self.entries.get(index.slot as usize)?;
        if entry.generation != index.generation {
            return None;
        }
        entry.value.as_ref()
    }

    /// Gets a mutable reference to a value.
    #[inline]
    pub fn get_mut(&mut self, index: Index) -> Option<&mut T> {
        let entry = self.entries.get_mut(index.slot as usize)?;
        if entry.generation != index.generation {
            return None;
        }
        entry.value.as_mut()
    }

    /// Removes every value. Outstanding handles become stale.
    pub fn clear(&mut self) {
        for (slot, entry) in self.entries.iter_mut().enumerate() {
            if entry.value.take().is_some() {
                entry.generation = entry.generation.wrapping_add(1);
                self.free_list.push(Self::slot_for(slot));
            }
        }
        self.len = 0;
    }

    /// Iterates over all live values.
    pub fn iter(&self) -> impl Iterator<Item = (Index, &T)> {
        self.entries.iter().enumerate().filter_map(|(slot, entry)| {
            entry.value.as_ref().map(|value| {
                (
                    Index {
                        slot: Self::slot_for(slot),
                        generation: entry.generation,
                    },
                    value,
                )
            })
        })
    }

    /// Iterates mutably over all live values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Index, &mut T)> {
        self.entries.iter_mut().enumerate().filter_map(|(slot, entry)| {
            let generation = entry.generation;
            entry.value.as_mut().map(|value| {
                (
                    Index {
                        slot: Self::slot_for(slot),
                        generation,
                    },
                    value,
                )
            })
        })
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn slot_for(position: usize) -> u32 {
        position as u32
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}
