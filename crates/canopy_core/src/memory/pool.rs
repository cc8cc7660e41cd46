//! # Object Pools
//!
//! Free-list pools for objects that are created and dropped every frame
//! (input and change events). Pools are keyed by type in [`Pools`].

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// An object that can be recycled by a [`Pool`].
pub trait Poolable: Default {
    /// Clears the object back to its freshly-created state.
    fn reset(&mut self);
}

/// A pool of reusable objects of one type.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. Use one pool per thread.
///
/// # Example
///
/// ```rust
/// use canopy_core::{Pool, Poolable};
///
/// #[derive(Default)]
/// struct Scratch { hits: u32 }
///
/// impl Poolable for Scratch {
///     fn reset(&mut self) { self.hits = 0; }
/// }
///
/// let mut pool: Pool<Scratch> = Pool::new(8);
/// let mut scratch = pool.obtain();
/// scratch.hits = 3;
/// pool.free(scratch);
///
/// assert_eq!(pool.free_count(), 1);
/// assert_eq!(pool.obtain().hits, 0);
/// ```
#[derive(Debug)]
pub struct Pool<T: Poolable> {
    /// Reset objects waiting to be handed out again.
    free: Vec<T>,
    /// Maximum number of objects kept.
    max: usize,
    /// Highest number of free objects ever held.
    peak: usize,
    /// Objects dropped because the pool was full.
    discarded: u64,
}

impl<T: Poolable> Pool<T> {
    /// Creates a pool that keeps at most `max` free objects.
    #[must_use]
    pub fn new(max: usize) -> Self {
        Self {
            free: Vec::with_capacity(max.min(64)),
            max,
            peak: 0,
            discarded: 0,
        }
    }

    /// Returns a recycled object, or a new one if none are free.
    pub fn obtain(&mut self) -> T {
        self.free.pop().unwrap_or_default()
    }

    /// Resets an object and keeps it for reuse.
    ///
    /// The object is dropped instead if the pool already holds `max`.
    pub fn free(&mut self, mut object: T) {
        object.reset();
        if self.free.len() < self.max {
            self.free.push(object);
            self.peak = self.peak.max(self.free.len());
        } else {
            self.discarded += 1;
            tracing::debug!(
                "Pool of {} full at {}, discarded object ({} total)",
                std::any::type_name::<T>(),
                self.max,
                self.discarded
            );
        }
    }

    /// Returns the number of objects waiting for reuse.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Returns the highest free count seen.
    #[inline]
    #[must_use]
    pub const fn peak(&self) -> usize {
        self.peak
    }

    /// Returns how many objects were dropped because the pool was full.
    #[inline]
    #[must_use]
    pub const fn discarded(&self) -> u64 {
        self.discarded
    }

    /// Returns the maximum number of free objects kept.
    #[inline]
    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }

    /// Drops all free objects.
    pub fn clear(&mut self) {
        self.free.clear();
    }
}

/// One [`Pool`] per type, created on first use.
pub struct Pools {
    pools: HashMap<TypeId, Box<dyn Any>>,
    /// Capacity given to newly created pools.
    max_free: usize,
}

impl Pools {
    /// Default capacity of each pool.
    pub const DEFAULT_MAX_FREE: usize = 64;

    /// Creates an empty registry whose pools keep at most `max_free` objects.
    #[must_use]
    pub fn new(max_free: usize) -> Self {
        Self {
            pools: HashMap::new(),
            max_free,
        }
    }

    /// Returns the pool for `T`, creating it if needed.
    pub fn pool_mut<T: Poolable + 'static>(&mut self) -> Option<&mut Pool<T>> {
        let max_free = self.max_free;
        let entry = self
            .pools
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(Pool::<T>::new(max_free)));
        (**entry).downcast_mut::<Pool<T>>()
    }

    /// Returns the pool for `T` if one has been created.
    #[must_use]
    pub fn pool<T: Poolable + 'static>(&self) -> Option<&Pool<T>> {
        self.pools.get(&TypeId::of::<T>())?.downcast_ref::<Pool<T>>()
    }

    /// Obtains an object of type `T` from its pool.
    pub fn obtain<T: Poolable + 'static>(&mut self) -> T {
        self.pool_mut::<T>().map_or_else(T::default, Pool::obtain)
    }

    /// Returns an object of type `T` to its pool.
    pub fn free<T: Poolable + 'static>(&mut self, object: T) {
        if let Some(pool) = self.pool_mut::<T>() {
            pool.free(object);
        }
    }
}

impl Default for Pools {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_FREE)
    }
}

impl std::fmt::Debug for Pools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pools")
            .field("types", &self.pools.len())
            .field("max_free", &self.max_free)
            .finish()
    }
}
