//! Reusable field buffers for materializing valuer chains

use super::field::Field;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

/// Initial capacity of a freshly allocated buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 32;

/// Idle buffers kept by the default pool. Buffers released beyond this are dropped.
pub const DEFAULT_MAX_IDLE: usize = 256;

static DEFAULT_POOL: OnceLock<Arc<FieldPool>> = OnceLock::new();

/// The process-wide pool shared by loggers that were not given their own.
pub fn default_pool() -> Arc<FieldPool> {
    DEFAULT_POOL
        .get_or_init(|| Arc::new(FieldPool::new(DEFAULT_MAX_IDLE)))
        .clone()
}

/// A lock-free free list of `Vec<Field>` buffers.
///
/// Buffers are always handed out empty and keep whatever capacity they
/// grew to while in use.
pub struct FieldPool {
    tx: Sender<Vec<Field>>,
    rx: Receiver<Vec<Field>>,
    buffer_capacity: usize,
    allocated: AtomicUsize,
}

impl FieldPool {
    pub fn new(max_idle: usize) -> Self {
        Self::with_buffer_capacity(max_idle, DEFAULT_BUFFER_CAPACITY)
    }

    pub fn with_buffer_capacity(max_idle: usize, buffer_capacity: usize) -> Self {
        let (tx, rx) = bounded(max_idle.max(1));
        Self {
            tx,
            rx,
            buffer_capacity,
            allocated: AtomicUsize::new(0),
        }
    }

    /// Take an empty buffer, allocating one if none is idle.
    pub fn get(&self) -> PooledFields<'_> {
        let buf = match self.rx.try_recv() {
            Ok(buf) => buf,
            Err(_) => {
                self.allocated.fetch_add(1, Ordering::Relaxed);
                Vec::with_capacity(self.buffer_capacity)
            }
        };
        debug_assert!(buf.is_empty());
        PooledFields {
            buf,
            pool: self,
        }
    }

    /// Number of buffers ever allocated by this pool.
    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::Relaxed)
    }

    /// Number of buffers currently waiting in the pool.
    pub fn idle(&self) -> usize {
        self.rx.len()
    }

    fn put(&self, mut buf: Vec<Field>) {
        buf.clear();
        // full pool: let the buffer go
        let _ = self.tx.try_send(buf);
    }
}

impl Default for FieldPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IDLE)
    }
}

impl fmt::Debug for FieldPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldPool")
            .field("idle", &self.idle())
            .field("allocated", &self.allocated())
            .finish()
    }
}

/// A buffer borrowed from a [`FieldPool`]; cleared and returned on drop,
/// including during unwinding.
pub struct PooledFields<'a> {
    buf: Vec<Field>,
    pool: &'a FieldPool,
}

impl Deref for PooledFields<'_> {
    type Target = Vec<Field>;

    fn deref(&self) -> &Vec<Field> {
        &self.buf
    }
}

impl DerefMut for PooledFields<'_> {
    fn deref_mut(&mut self) -> &mut Vec<Field> {
        &mut self.buf
    }
}

impl Drop for PooledFields<'_> {
    fn drop(&mut self) {
        self.pool.put(std::mem::take(&mut self.buf));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_reuse() {
        let pool = FieldPool::new(4);
        {
            let mut buf = pool.get();
            buf.push(Field::int("a", 1));
            buf.push(Field::int("b", 2));
        }
        assert_eq!(pool.idle(), 1);

        let buf = pool.get();
        assert!(buf.is_empty());
        assert!(buf.capacity() >= DEFAULT_BUFFER_CAPACITY);
        assert_eq!(pool.allocated(), 1);
    }

    #[test]
    fn test_capacity_is_kept_on_release() {
        let pool = FieldPool::with_buffer_capacity(2, 1);
        {
            let mut buf = pool.get();
            buf.extend((0..100).map(|i| Field::int("i", i)));
        }
        let buf = pool.get();
        assert!(buf.is_empty());
        assert!(buf.capacity() >= 100);
    }

    #[test]
    fn test_max_idle() {
        let pool = FieldPool::new(2);
        {
            let _a = pool.get();
            let _b = pool.get();
            let _c = pool.get();
        }
        assert_eq!(pool.idle(), 2);
        assert_eq!(pool.allocated(), 3);
    }

    #[test]
    fn test_released_on_unwind() {
        let pool = FieldPool::new(4);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut buf = pool.get();
            buf.push(Field::bool("x", true));
            panic!("sink failure");
        }));
        assert!(result.is_err());
        assert_eq!(pool.idle(), 1);
        assert!(pool.get().is_empty());
    }

    #[test]
    fn test_default_pool_is_shared() {
        let a = default_pool();
        let b = default_pool();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
