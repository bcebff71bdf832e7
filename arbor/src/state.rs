use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Shared state handle with interior mutability.
///
/// Clones point at the same value, so a handler closure stored in the
/// [`HandlerRegistry`](crate::HandlerRegistry) can capture a clone and
/// mutate the value its owner reads on the next render. Every write sets a
/// dirty flag the owner clears once it has rendered.
///
/// # Example
///
/// ```
/// use arbor::State;
///
/// let folded = State::new(false);
/// let handle = folded.clone();
/// handle.update(|f| *f = !*f);
/// assert!(folded.get());
/// assert!(folded.is_dirty());
/// ```
pub struct State<T> {
    shared: Arc<Shared<T>>,
}

struct Shared<T> {
    value: RwLock<T>,
    dirty: AtomicBool,
}

impl<T> State<T> {
    pub fn new(value: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                value: RwLock::new(value),
                dirty: AtomicBool::new(false),
            }),
        }
    }

    /// A copy of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        let guard = self
            .shared
            .value
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    pub fn set(&self, value: T) {
        self.update(|current| *current = value);
    }

    /// Mutate the value in place and mark it dirty.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut guard = self
            .shared
            .value
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
        self.shared.dirty.store(true, Ordering::Release);
    }

    /// Whether the value was written since the last [`clear_dirty`](Self::clear_dirty).
    pub fn is_dirty(&self) -> bool {
        self.shared.dirty.load(Ordering::Acquire)
    }

    pub fn clear_dirty(&self) {
        self.shared.dirty.store(false, Ordering::Release);
    }

    /// Whether two handles share the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("value", &self.shared.value)
            .field("dirty", &self.is_dirty())
            .finish()
    }
}
