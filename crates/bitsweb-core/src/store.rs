//! Reactive state primitives
//!
//! `Emitter` is a typed listener registry handing out `SubscriptionId` tokens.
//! `Writable` is a value cell that notifies its subscribers on every write.
//!
//! Broadcast policy:
//! - the listener list is snapshotted before iterating, so listeners may
//!   subscribe or unsubscribe while a broadcast is running; changes apply
//!   to the next broadcast
//! - no lock is held while a listener runs
//! - a panicking listener is logged and skipped; later listeners still run
//! - broadcasts nested deeper than `MAX_EMIT_DEPTH` on one thread are
//!   dropped; broadcasts running side by side on other threads do not count

use std::cell::RefCell;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Maximum nesting of `emit` calls on one emitter within one thread
pub const MAX_EMIT_DEPTH: usize = 8;

thread_local! {
    /// Active `emit` calls on this thread, keyed by emitter address
    static EMIT_DEPTH: RefCell<HashMap<usize, usize>> = RefCell::new(HashMap::new());
}

/// Shared listener callback
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Token returned by a subscription, used to remove it again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered listener registry
pub struct Emitter<T> {
    listeners: Mutex<Vec<(SubscriptionId, Listener<T>)>>,
    next_id: AtomicU64,
}

impl<T> Default for Emitter<T> {
    fn default() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl<T> std::fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.len())
            .finish()
    }
}

/// Per-thread emit depth of one emitter. Decremented when the broadcast
/// ends, including by unwinding.
struct DepthGuard {
    key: usize,
}

impl DepthGuard {
    fn enter(key: usize) -> (Self, usize) {
        let depth = EMIT_DEPTH.with(|depths| {
            let mut depths = depths.borrow_mut();
            let depth = depths.entry(key).or_insert(0);
            *depth += 1;
            *depth
        });
        (Self { key }, depth)
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        let _ = EMIT_DEPTH.try_with(|depths| {
            let mut depths = depths.borrow_mut();
            if let Some(depth) = depths.get_mut(&self.key) {
                *depth -= 1;
                if *depth == 0 {
                    depths.remove(&self.key);
                }
            }
        });
    }
}

impl<T> Emitter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener. The same closure may be registered more than once.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, Arc::new(listener)));
        id
    }

    /// Remove one registration. Returns false when the token is unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.lock();
        match listeners.iter().position(|(existing, _)| *existing == id) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Invoke every listener in registration order on the calling thread.
    /// Returns how many listeners were called.
    pub fn emit(&self, value: &T) -> usize {
        let (_guard, depth) = DepthGuard::enter(self as *const Self as usize);
        if depth > MAX_EMIT_DEPTH {
            log::warn!("Dropping broadcast nested {} levels deep", depth);
            return 0;
        }

        let snapshot: Vec<(SubscriptionId, Listener<T>)> = self
            .lock()
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();

        for (id, listener) in &snapshot {
            if panic::catch_unwind(AssertUnwindSafe(|| (**listener)(value))).is_err() {
                log::error!("Listener {} panicked during broadcast", id);
            }
        }
        snapshot.len()
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, Listener<T>)>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Value cell whose subscribers observe every write
pub struct Writable<T> {
    value: RwLock<T>,
    changes: Emitter<T>,
}

impl<T: Clone + Default> Default for Writable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for Writable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Writable")
            .field("value", &self.get())
            .field("subscribers", &self.changes.len())
            .finish()
    }
}

impl<T: Clone> Writable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
            changes: Emitter::new(),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.value.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Overwrite the value and notify subscribers
    pub fn set(&self, value: T) {
        {
            let mut current = self.value.write().unwrap_or_else(PoisonError::into_inner);
            *current = value.clone();
        }
        self.changes.emit(&value);
    }

    /// Derive the next value from the current one
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let next = {
            let mut current = self.value.write().unwrap_or_else(PoisonError::into_inner);
            *current = f(&current);
            current.clone()
        };
        self.changes.emit(&next);
    }

    /// Register a listener. It is called once right away with the current
    /// value, then on every write.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let current = self.get();
        listener(&current);
        self.changes.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.changes.unsubscribe(id)
    }
}
