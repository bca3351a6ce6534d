//! Sliding-window scheduler implementation

use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use tracing::trace;

/// Outputs of a [`MapLimit`] run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled<T> {
    /// One output per input, in input order
    pub outputs: Vec<T>,
    /// Highest number of futures in flight at once
    pub peak_in_flight: usize,
}

/// Runs an async function over a list of inputs with at most `limit` in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapLimit {
    limit: usize,
}

impl MapLimit {
    /// Create a scheduler with the given concurrency limit.
    ///
    /// A limit of zero is treated as one.
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    /// The effective concurrency limit
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Map `f` over `items`, keeping at most `limit` futures outstanding.
    ///
    /// Every input is run to completion; an output that represents a failure
    /// does not stop the remaining inputs from being admitted.
    pub async fn run<I, F, Fut>(&self, items: I, mut f: F) -> Settled<Fut::Output>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Fut,
        Fut: Future,
    {
        let mut pending = items.into_iter().enumerate();
        let mut in_flight = FuturesUnordered::new();
        let mut settled = Vec::new();

        for (index, item) in pending.by_ref().take(self.limit) {
            in_flight.push(indexed(index, f(item)));
        }
        let mut peak_in_flight = in_flight.len();

        while let Some((index, output)) = in_flight.next().await {
            trace!(index, in_flight = in_flight.len(), "task settled");
            settled.push((index, output));

            // Refill the freed slot before waiting again
            if let Some((next, item)) = pending.next() {
                in_flight.push(indexed(next, f(item)));
                peak_in_flight = peak_in_flight.max(in_flight.len());
            }
        }

        settled.sort_by_key(|(index, _)| *index);

        Settled {
            outputs: settled.into_iter().map(|(_, output)| output).collect(),
            peak_in_flight,
        }
    }
}

impl Default for MapLimit {
    fn default() -> Self {
        Self::new(1)
    }
}

async fn indexed<Fut: Future>(index: usize, fut: Fut) -> (usize, Fut::Output) {
    (index, fut.await)
}

/// Map `f` over `items` with at most `limit` futures in flight.
///
/// Outputs are returned in input order.
///
/// ```rust
/// # tokio_test::block_on(async {
/// use paged_fetch::limit::map_limit;
///
/// let doubled = map_limit(1..=5, 2, |n| async move { n * 2 }).await;
/// assert_eq!(doubled, vec![2, 4, 6, 8, 10]);
/// # });
/// ```
pub async fn map_limit<I, F, Fut>(items: I, limit: usize, f: F) -> Vec<Fut::Output>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future,
{
    MapLimit::new(limit).run(items, f).await.outputs
}
