// A fixed-size work pool: submit one unit of work per item, collect the
// results once every task has completed. Built on a dedicated rayon thread
// pool rather than the global one, so concurrent compress/decompress calls
// don't contend over a shared pool and `num_threads` is honored exactly.
//
// rayon guarantees that `par_iter().map(f).collect()` returns results in
// input order regardless of which worker executed which item first, which
// is exactly the submission-order-consumption contract the codec relies on
// to be deterministic.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Error, Result};

pub struct WorkPool {
    inner: ThreadPool,
}

impl WorkPool {
    pub fn new(num_threads: usize) -> Result<WorkPool> {
        if num_threads == 0 {
            return Err(Error::InvalidArgument(
                "num_threads must be at least 1".to_string(),
            ));
        }
        let inner = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .expect("failed to configure thread pool");
        Ok(WorkPool { inner })
    }

    /// Submits one task per item and returns their results in item order.
    pub fn map<T, U, F>(&self, items: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Sync,
    {
        self.inner.install(|| items.par_iter().map(|item| f(item)).collect())
    }

    pub fn num_threads(&self) -> usize {
        self.inner.current_num_threads()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_threads() {
        assert!(matches!(WorkPool::new(0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn map_preserves_order() {
        let pool = WorkPool::new(4).unwrap();
        let items: Vec<u32> = (0..200).collect();
        let doubled = pool.map(&items, |x| x * 2);
        let expected: Vec<u32> = items.iter().map(|x| x * 2).collect();
        assert_eq!(doubled, expected);
    }
}
