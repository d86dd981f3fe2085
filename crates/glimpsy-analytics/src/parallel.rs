//! Conditional parallel iteration over rows.
//!
//! Uses rayon when the `parallel` feature is enabled and the config allows
//! it for the collection size. Every helper preserves input order, so the
//! result is the same either way.

use crate::types::PipelineConfig;

/// Maps a function over items, in parallel above the configured threshold.
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &PipelineConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

/// Folds over items with a reduce step, in parallel above the threshold.
///
/// `fold` accumulates one item, `reduce` merges two partial accumulators.
/// The reduce step must be associative for the parallel path to agree with
/// the sequential one.
#[allow(unused_variables)]
pub fn maybe_parallel_fold<T, U, F, R>(
    items: &[T],
    config: &PipelineConfig,
    identity: U,
    fold: F,
    reduce: R,
) -> U
where
    T: Sync,
    U: Send + Sync + Clone,
    F: Fn(U, &T) -> U + Sync + Send,
    R: Fn(U, U) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items
                .par_iter()
                .fold(|| identity.clone(), &fold)
                .reduce(|| identity.clone(), reduce);
        }
    }

    items.iter().fold(identity, fold)
}

/// Keeps the items matching a predicate, in order.
#[allow(unused_variables)]
pub fn maybe_parallel_filter<T, F>(items: Vec<T>, config: &PipelineConfig, keep: F) -> Vec<T>
where
    T: Send,
    F: Fn(&T) -> bool + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.into_par_iter().filter(|item| keep(item)).collect();
        }
    }

    items.into_iter().filter(|item| keep(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maybe_parallel_map() {
        let config = PipelineConfig::sequential();
        let items = vec![1, 2, 3, 4, 5];
        let results: Vec<i32> = maybe_parallel_map(&items, &config, |x| x * 2);
        assert_eq!(results, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_maybe_parallel_fold() {
        let config = PipelineConfig::sequential();
        let items: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let sum: f64 = maybe_parallel_fold(&items, &config, 0.0, |acc, x| acc + x, |a, b| a + b);
        assert!((sum - 15.0).abs() < 0.001);
    }

    #[test]
    fn test_maybe_parallel_filter_keeps_order() {
        let config = PipelineConfig::new().with_threshold(2);
        let items: Vec<i32> = (0..50).collect();
        let evens = maybe_parallel_filter(items, &config, |x| x % 2 == 0);
        assert_eq!(evens, (0..50).step_by(2).collect::<Vec<_>>());
    }
}
