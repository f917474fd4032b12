//! Double-ended ring queue.

use std::fmt;

use super::{QueueError, RingQueue};

/// [`RingQueue`] with insertion and removal at both ends.
///
/// Shares the queue's storage, growth policy and error behaviour. `push_front`
/// moves `head` backwards (wrapping); `pop_back` only shortens the queue.
///
/// ```
/// use aoc_2023::utils::ring_queue::RingDeque;
///
/// let mut deque = RingDeque::new();
/// deque.push_back(1);
/// deque.push_back(2);
/// deque.push_front(0);
/// assert_eq!(deque.items(), vec![0, 1, 2]);
/// assert_eq!(deque.pop_back(), Ok(2));
/// assert_eq!(deque.pop_front(), Ok(0));
/// ```
#[derive(Clone)]
pub struct RingDeque<T> {
    queue: RingQueue<T>,
}

impl<T> RingDeque<T> {
    pub const fn new() -> Self {
        Self {
            queue: RingQueue::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: RingQueue::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    pub fn front(&self) -> Result<&T, QueueError> {
        self.queue.front()
    }

    /// Returns the newest element without removing it.
    pub fn back(&self) -> Result<&T, QueueError> {
        if self.queue.len == 0 {
            return Err(QueueError::Empty { op: "RingDeque::back" });
        }
        Ok(self.queue.slot(self.back_index()))
    }

    /// Same as [`RingQueue::pop`].
    pub fn pop_front(&mut self) -> Result<T, QueueError> {
        self.queue.pop()
    }

    /// Removes and returns the newest element.
    pub fn pop_back(&mut self) -> Result<T, QueueError> {
        if self.queue.len == 0 {
            return Err(QueueError::Empty { op: "RingDeque::pop_back" });
        }
        let idx = self.back_index();
        let value = self.queue.take_slot(idx);
        self.queue.len -= 1;
        Ok(value)
    }

    /// Inserts `value` before the current front, growing the buffer when it is full.
    pub fn push_front(&mut self, value: T) {
        let queue = &mut self.queue;
        if queue.len == queue.buf.len() {
            queue.grow_exact(1);
        }
        queue.head = if queue.head == 0 {
            queue.buf.len() - 1
        } else {
            queue.head - 1
        };
        queue.buf[queue.head] = Some(value);
        queue.len += 1;
    }

    /// Same as [`RingQueue::push`].
    pub fn push_back(&mut self, value: T) {
        self.queue.push(value);
    }

    pub fn grow(&mut self, additional: isize) -> Result<(), QueueError> {
        self.queue.grow(additional)
    }

    pub fn reserve(&mut self, additional: usize) {
        self.queue.reserve(additional);
    }

    pub fn items(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.queue.items()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.queue.iter()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    fn back_index(&self) -> usize {
        self.queue.wrap_add(self.queue.head, self.queue.len - 1)
    }
}

impl<T> Default for RingDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<RingQueue<T>> for RingDeque<T> {
    fn from(queue: RingQueue<T>) -> Self {
        Self { queue }
    }
}

impl<T: fmt::Debug> fmt::Debug for RingDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.queue, f)
    }
}

impl<T> Extend<T> for RingDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.queue.extend(iter);
    }
}

impl<T> FromIterator<T> for RingDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            queue: RingQueue::from_iter(iter),
        }
    }
}
