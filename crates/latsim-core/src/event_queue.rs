//! Time-ordered event storage for the M/M/1 simulator.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Arrival,
    Departure,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationEvent {
    /// Virtual time in seconds
    pub time: f64,
    pub kind: EventKind,
    pub request_id: u64,
}

impl SimulationEvent {
    pub fn arrival(time: f64, request_id: u64) -> Self {
        Self {
            time,
            kind: EventKind::Arrival,
            request_id,
        }
    }

    pub fn departure(time: f64, request_id: u64) -> Self {
        Self {
            time,
            kind: EventKind::Departure,
            request_id,
        }
    }
}

#[derive(Debug)]
struct Entry {
    event: SimulationEvent,
    seq: u64, // insertion order, breaks ties between equal times
}

impl Entry {
    fn cmp_key(&self, other: &Self) -> Ordering {
        self.event
            .time
            .total_cmp(&other.event.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }

    fn precedes(&self, other: &Self) -> bool {
        self.cmp_key(other) == Ordering::Less
    }
}

/// Array-backed binary min-heap keyed on event time.
///
/// Events with equal times come out in the order they were pushed.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: Vec<Entry>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, event: SimulationEvent) {
        self.heap.push(Entry {
            event,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes the earliest event, or `None` once the queue is drained.
    pub fn pop(&mut self) -> Option<SimulationEvent> {
        if self.heap.is_empty() {
            return None;
        }
        let min = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(min.event)
    }

    pub fn peek(&self) -> Option<&SimulationEvent> {
        self.heap.first().map(|entry| &entry.event)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !self.heap[idx].precedes(&self.heap[parent]) {
                break;
            }
            self.heap.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;

            if left < len && self.heap[left].precedes(&self.heap[smallest]) {
                smallest = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.heap.swap(idx, smallest);
            idx = smallest;
        }
    }
}
