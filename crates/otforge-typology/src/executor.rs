//! Order-preserving fan-out over rayon.

use otforge_config::ThreadCount;
use rayon::prelude::*;
use tracing::warn;

pub(crate) enum Executor {
    Sequential,
    Global,
    Pool(rayon::ThreadPool),
}

impl Executor {
    pub(crate) fn from_config(threads: ThreadCount) -> Self {
        match threads {
            ThreadCount::None | ThreadCount::Count(0) | ThreadCount::Count(1) => {
                Executor::Sequential
            }
            ThreadCount::Auto => Executor::Global,
            ThreadCount::Count(n) => {
                match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
                    Ok(pool) => Executor::Pool(pool),
                    Err(err) => {
                        warn!(
                            event = "thread_pool_fallback",
                            threads = n as u64,
                            error = %err,
                            "Could not build thread pool, running sequentially"
                        );
                        Executor::Sequential
                    }
                }
            }
        }
    }

    /// Maps `f` over `items`, returning results in input order.
    pub(crate) fn map<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        match self {
            Executor::Sequential => items.iter().map(f).collect(),
            Executor::Global => items.par_iter().map(f).collect(),
            Executor::Pool(pool) => pool.install(|| items.par_iter().map(&f).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_keeps_input_order() {
        let items: Vec<u64> = (0..64).collect();
        let expected: Vec<u64> = items.iter().map(|n| n * n).collect();
        for threads in [ThreadCount::None, ThreadCount::Auto, ThreadCount::Count(3)] {
            let executor = Executor::from_config(threads);
            assert_eq!(executor.map(&items, |n| n * n), expected);
        }
    }

    #[test]
    fn test_single_thread_is_sequential() {
        assert!(matches!(
            Executor::from_config(ThreadCount::Count(1)),
            Executor::Sequential
        ));
    }
}
