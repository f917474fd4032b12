//! FIFO ring queue.

use std::fmt;

use super::QueueError;

/// Growable FIFO ring buffer.
///
/// Logical element `i` lives at physical slot `(head + i) % capacity`. When a push finds
/// the buffer full, a new buffer of `2 * capacity + n` slots is allocated and the ring is
/// unwrapped into it, so `head` returns to 0. Capacity never shrinks, not even on
/// [`clear`](Self::clear).
///
/// Popped slots are set to `None` right away, so the queue never keeps a removed value alive.
///
/// The queue has no internal locking. Mutation requires `&mut self`; producers and
/// consumers on different threads must share it through a `Mutex` or hand values over
/// a channel instead.
#[derive(Clone)]
pub struct RingQueue<T> {
    pub(super) buf: Vec<Option<T>>,
    pub(super) head: usize,
    pub(super) len: usize,
}

impl<T> RingQueue<T> {
    /// Creates an empty queue without allocating.
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            head: 0,
            len: 0,
        }
    }

    /// Creates an empty queue that accepts `capacity` pushes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buf = Vec::with_capacity(capacity);
        buf.resize_with(capacity, || None);
        Self { buf, head: 0, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the oldest element without removing it.
    pub fn front(&self) -> Result<&T, QueueError> {
        if self.len == 0 {
            return Err(QueueError::Empty { op: "RingQueue::front" });
        }
        Ok(self.slot(self.head))
    }

    /// Removes and returns the oldest element.
    ///
    /// ```
    /// use aoc_2023::utils::ring_queue::{QueueError, RingQueue};
    ///
    /// let mut queue: RingQueue<_> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(queue.pop(), Ok(1));
    /// assert_eq!(queue.pop(), Ok(2));
    /// assert_eq!(queue.pop(), Ok(3));
    /// assert!(matches!(queue.pop(), Err(QueueError::Empty { .. })));
    /// ```
    pub fn pop(&mut self) -> Result<T, QueueError> {
        if self.len == 0 {
            return Err(QueueError::Empty { op: "RingQueue::pop" });
        }
        let value = self.take_slot(self.head);
        self.head = self.wrap_add(self.head, 1);
        self.len -= 1;
        Ok(value)
    }

    /// Appends `value` at the back, growing the buffer when it is full.
    pub fn push(&mut self, value: T) {
        if self.len == self.buf.len() {
            self.grow_exact(1);
        }
        let back = self.wrap_add(self.head, self.len);
        self.buf[back] = Some(value);
        self.len += 1;
    }

    /// Makes room for `additional` more pushes without reallocating.
    ///
    /// Negative counts are rejected with [`QueueError::InvalidArgument`] and leave
    /// the queue untouched.
    ///
    /// ```
    /// use aoc_2023::utils::ring_queue::RingQueue;
    ///
    /// let mut queue = RingQueue::<u8>::new();
    /// queue.grow(5).unwrap();
    /// assert!(queue.capacity() >= 5);
    /// assert!(queue.grow(-1).is_err());
    /// ```
    pub fn grow(&mut self, additional: isize) -> Result<(), QueueError> {
        let additional = usize::try_from(additional).map_err(|_| QueueError::InvalidArgument {
            op: "RingQueue::grow",
            count: additional,
        })?;
        self.reserve(additional);
        Ok(())
    }

    /// Infallible form of [`grow`](Self::grow).
    pub fn reserve(&mut self, additional: usize) {
        if self.buf.len() - self.len < additional {
            self.grow_exact(additional);
        }
    }

    /// Copies the elements out in front-to-back order.
    ///
    /// The returned `Vec` is independent of the queue.
    pub fn items(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Borrows the elements in front-to-back order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        (0..self.len).map(move |i| self.slot(self.wrap_add(self.head, i)))
    }

    /// Drops every element and keeps the buffer for reuse.
    pub fn clear(&mut self) {
        for i in 0..self.len {
            let idx = self.wrap_add(self.head, i);
            self.buf[idx] = None;
        }
        self.head = 0;
        self.len = 0;
    }

    /// Reallocates to `2 * capacity + n` slots, moving the live elements to the start.
    ///
    /// Panics with "capacity overflow" when that size does not fit in `usize`, like
    /// `Vec::reserve`.
    pub(super) fn grow_exact(&mut self, n: usize) {
        let new_cap = self
            .buf
            .len()
            .checked_mul(2)
            .and_then(|cap| cap.checked_add(n))
            .expect("RingQueue capacity overflow");
        let mut buf = Vec::with_capacity(new_cap);
        for i in 0..self.len {
            let idx = self.wrap_add(self.head, i);
            buf.push(self.buf[idx].take());
        }
        buf.resize_with(new_cap, || None);
        self.buf = buf;
        self.head = 0;
    }

    /// `(index + offset) % capacity` for `index < capacity` and `offset <= capacity`.
    #[inline]
    pub(super) fn wrap_add(&self, index: usize, offset: usize) -> usize {
        let idx = index + offset;
        if idx >= self.buf.len() {
            idx - self.buf.len()
        } else {
            idx
        }
    }

    #[inline]
    pub(super) fn slot(&self, idx: usize) -> &T {
        match &self.buf[idx] {
            Some(value) => value,
            None => unreachable!("ring slot {} inside the live range is empty", idx),
        }
    }

    #[inline]
    pub(super) fn take_slot(&mut self, idx: usize) -> T {
        match self.buf[idx].take() {
            Some(value) => value,
            None => unreachable!("ring slot {} inside the live range is empty", idx),
        }
    }
}

impl<T> Default for RingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for RingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for RingQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for RingQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}
