use std::iter::FusedIterator;

use num_traits::PrimInt;

use crate::errors::Error;

/// Fixed capacity ring of owned handles with overwrite-when-full semantics.
///
/// Pushing onto a full ring never fails: the oldest handle is evicted and handed
/// back to the caller. The ring never looks inside a handle. Whatever is still
/// stored when the ring is dropped is released by `T`'s own `Drop`, so callers that
/// manage payloads by hand should `drain` the ring first.
///
/// There is no internal synchronization. Share it across threads behind your own
/// lock.
#[derive(Debug)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    /// Next slot to be written.
    head: usize,
    /// Oldest live slot, `None` while the ring is empty.
    tail: Option<usize>,
}

impl<T> RingBuffer<T> {
    /// Allocate an empty ring holding up to `capacity` handles.
    ///
    /// `capacity` counts slots, not bytes. Zero, negative or unrepresentable
    /// capacities are rejected with `BadParam`; a failed allocation returns
    /// `OutOfResource` and leaves nothing behind.
    ///
    /// Only integer capacities are accepted:
    ///
    /// ```compile_fail
    /// use handle_ring::RingBuffer;
    ///
    /// let ring = RingBuffer::<u32>::init(2.5);
    /// ```
    pub fn init<N: PrimInt>(capacity: N) -> Result<Self, Error> {
        let capacity = match capacity.to_usize() {
            Some(c) if c > 0 => c,
            _ => {
                return Err(Error::BadParam(String::from(
                    "capacity must be a positive number of slots",
                )))
            }
        };

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| Error::OutOfResource(capacity))?;
        slots.resize_with(capacity, || None);

        Ok(Self {
            slots,
            head: 0,
            tail: None,
        })
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live handles.
    #[inline]
    pub fn len(&self) -> usize {
        match self.tail {
            None => 0,
            Some(tail) if tail < self.head => self.head - tail,
            // tail == head means every slot is live
            Some(tail) => self.capacity() - tail + self.head,
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tail.is_none()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    #[inline(always)]
    fn step(&self, idx: usize) -> usize {
        if idx == self.capacity() - 1 {
            0
        } else {
            idx + 1
        }
    }

    /// Store `handle` as the newest entry.
    ///
    /// Returns the evicted oldest handle when the ring was full, `None` otherwise.
    pub fn push(&mut self, handle: T) -> Option<T> {
        let evicted = self.slots[self.head].take();
        if evicted.is_some() {
            // An occupied head slot only happens on a full ring, where it is also
            // the tail.
            self.tail = self.tail.map(|t| self.step(t));
            log::trace!("ring full, evicted slot {}", self.head);
        }

        self.slots[self.head] = Some(handle);
        if self.tail.is_none() {
            self.tail = Some(self.head);
        }
        self.head = self.step(self.head);

        evicted
    }

    /// Remove and return the oldest handle, `None` if the ring is empty.
    pub fn pop(&mut self) -> Option<T> {
        let tail = self.tail?;
        let handle = self.slots[tail].take();

        let next = self.step(tail);
        self.tail = if next == self.head { None } else { Some(next) };

        handle
    }

    /// Look at a stored handle without removing it.
    ///
    /// A negative `offset` returns the newest handle. Otherwise the slot `offset`
    /// positions after the oldest handle is read. The offset is not checked against
    /// `len()`: slots outside the live region read as `None`. Offsets of
    /// `capacity()` or more, and any offset on an empty ring, return `None`.
    pub fn peek(&self, offset: isize) -> Option<&T> {
        let tail = self.tail?;
        let capacity = self.capacity();

        if offset < 0 {
            let newest = if self.head == 0 {
                capacity - 1
            } else {
                self.head - 1
            };
            return self.slots[newest].as_ref();
        }

        let offset = offset as usize;
        if offset >= capacity {
            return None;
        }

        let mut idx = tail + offset;
        // correct for wrap-around
        if idx >= capacity {
            idx -= capacity;
        }
        self.slots[idx].as_ref()
    }

    /// Iterate over the live handles from oldest to newest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ring: self,
            start: self.tail.unwrap_or(0),
            front: 0,
            back: self.len(),
        }
    }

    /// Pop every remaining handle in FIFO order.
    ///
    /// Handles not yet yielded when the iterator is dropped stay in the ring.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { ring: self }
    }
}

pub struct Iter<'a, T> {
    ring: &'a RingBuffer<T>,
    start: usize,
    front: usize,
    back: usize,
}

impl<'a, T> Iter<'a, T> {
    #[inline(always)]
    fn slot(&self, pos: usize) -> Option<&'a T> {
        let ring: &'a RingBuffer<T> = self.ring;
        let idx = (self.start + pos) % ring.capacity();
        ring.slots[idx].as_ref()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            None
        } else {
            let elem = self.slot(self.front);
            self.front += 1;
            elem
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            None
        } else {
            self.back -= 1;
            self.slot(self.back)
        }
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Drain<'a, T> {
    ring: &'a mut RingBuffer<T>,
}

impl<'a, T> Iterator for Drain<'a, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.ring.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ring.len();
        (remaining, Some(remaining))
    }
}

impl<'a, T> ExactSizeIterator for Drain<'a, T> {}

impl<'a, T> FusedIterator for Drain<'a, T> {}
