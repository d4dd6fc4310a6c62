//! Sliding sample window backed by a ring buffer
//!
//! Holds the most recent N samples; once full, every push evicts the oldest.

use ringbuf::{HeapRb, Rb};

/// Fixed-capacity analysis window
pub struct SampleBuffer {
    ring: HeapRb<f64>,

    /// Chronological copy of the ring, refreshed by `linearize`
    linear: Vec<f64>,

    capacity: usize,
}

impl SampleBuffer {
    /// Create an empty window holding `capacity` samples
    ///
    /// # Arguments
    /// * `capacity` - Window size in samples (must be non-zero)
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: HeapRb::new(capacity),
            linear: vec![0.0; capacity],
            capacity,
        }
    }

    /// Append one sample, evicting the oldest when full
    pub fn push(&mut self, sample: f64) {
        self.ring.push_overwrite(sample);
    }

    /// True once `capacity` samples are held
    pub fn is_full(&self) -> bool {
        self.ring.len() == self.capacity
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Contiguous view of the held samples, oldest first
    ///
    /// Copies the two halves of the ring into a scratch area allocated at
    /// construction, so this never allocates.
    pub fn linearize(&mut self) -> &[f64] {
        let (head, tail) = self.ring.as_slices();
        let len = head.len() + tail.len();
        self.linear[..head.len()].copy_from_slice(head);
        self.linear[head.len()..len].copy_from_slice(tail);
        &self.linear[..len]
    }
}
