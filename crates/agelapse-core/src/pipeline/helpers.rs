use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::consts::PARALLEL_FRAME_THRESHOLD;

use super::types::ProgressReporter;

/// Map every frame slot through `f`, keeping slot order.
///
/// Runs on the rayon pool when `parallel` is set and there are enough frames.
pub(super) fn map_frames<T, U, F>(
    items: Vec<T>,
    parallel: bool,
    reporter: &dyn ProgressReporter,
    f: F,
) -> Vec<U>
where
    T: Send,
    U: Send,
    F: Fn(T) -> U + Send + Sync,
{
    let counter = AtomicUsize::new(0);
    let step = |item: T| {
        let out = f(item);
        let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
        reporter.advance(done);
        out
    };

    if parallel && items.len() >= PARALLEL_FRAME_THRESHOLD {
        items.into_par_iter().map(&step).collect()
    } else {
        items.into_iter().map(&step).collect()
    }
}
