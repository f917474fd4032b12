//! Growable ring-buffer queues.
//!
//! - [`RingQueue`]: FIFO with amortized O(1) push and O(1) pop
//! - [`RingDeque`]: the same storage with push and pop at both ends
//!
//! Used as the BFS frontier of the grid puzzles and as the pulse queue of day 20.
//!
//! # Example
//!
//! ```rust
//! use aoc_2023::utils::ring_queue::RingQueue;
//!
//! // Distances from cell 0 on a path graph 0 - 1 - 2 - 3
//! let mut dist = [usize::MAX; 4];
//! let mut frontier = RingQueue::new();
//! dist[0] = 0;
//! frontier.push(0usize);
//!
//! while let Ok(cell) = frontier.pop() {
//!     for next in [cell.wrapping_sub(1), cell + 1] {
//!         if next < dist.len() && dist[next] == usize::MAX {
//!             dist[next] = dist[cell] + 1;
//!             frontier.push(next);
//!         }
//!     }
//! }
//! assert_eq!(dist, [0, 1, 2, 3]);
//! ```

mod deque;
mod queue;

pub use deque::RingDeque;
pub use queue::RingQueue;

use thiserror::Error;

/// Failures of the queue operations. A failed call never changes the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Read or removal on an empty queue
    #[error("{op}: queue is empty")]
    Empty { op: &'static str },
    /// Negative count passed to `grow`
    #[error("{op}: negative count {count}")]
    InvalidArgument { op: &'static str, count: isize },
}
