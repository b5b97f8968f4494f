//! Event queue: binary max-heap with stable handles.
//!
//! Invariants:
//! - `heap[i]` outranks neither parent; see `Event::outranks`.
//! - `slots[h]` is `Some(i)` iff `heap[i] == h`; popped or removed handles map to `None`.
//! - Events never know their own heap position; the side table does.

use crate::geom::{Point, Site};

use super::beachline::NodeId;

/// Stable reference to a queued event, valid until it is popped or removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EventHandle(usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// The sweep line reaches an input site.
    Site(Site),
    /// The arc `arc` shrinks to a point at `center` when the sweep reaches `bottom`.
    Circle {
        arc: NodeId,
        center: Point,
        bottom: f64,
    },
}

impl Event {
    /// Sweep position at which the event fires.
    #[inline]
    pub fn key(&self) -> f64 {
        match self {
            Event::Site(s) => s.at.y,
            Event::Circle { bottom, .. } => *bottom,
        }
    }

    #[inline]
    fn x(&self) -> f64 {
        match self {
            Event::Site(s) => s.at.x,
            Event::Circle { center, .. } => center.x,
        }
    }

    #[inline]
    pub fn is_circle(&self) -> bool {
        matches!(self, Event::Circle { .. })
    }

    /// Higher key first; on equal keys circle events precede site events, then smaller x.
    pub fn outranks(&self, other: &Event) -> bool {
        let (a, b) = (self.key(), other.key());
        if a != b {
            return a > b;
        }
        if self.is_circle() != other.is_circle() {
            return self.is_circle();
        }
        self.x() < other.x()
    }
}

#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    heap: Vec<EventHandle>,
    slots: Vec<Option<usize>>,
    events: Vec<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn insert(&mut self, event: Event) -> EventHandle {
        let handle = EventHandle(self.events.len());
        self.events.push(event);
        self.slots.push(Some(self.heap.len()));
        self.heap.push(handle);
        self.sift_up(self.heap.len() - 1);
        handle
    }

    /// Whether `handle` is still queued.
    pub fn contains(&self, handle: EventHandle) -> bool {
        matches!(self.slots.get(handle.0), Some(Some(_)))
    }

    /// Remove a queued event; `None` when it was already popped or removed.
    pub fn remove(&mut self, handle: EventHandle) -> Option<Event> {
        let pos = (*self.slots.get(handle.0)?)?;
        self.remove_at(pos)
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.remove_at(0)
    }

    pub fn peek(&self) -> Option<&Event> {
        self.heap.first().map(|h| &self.events[h.0])
    }

    /// The two highest-priority events, in pop order.
    pub fn peek_top_two(&self) -> Option<(&Event, &Event)> {
        if self.heap.len() < 2 {
            return None;
        }
        let second = if self.heap.len() == 2 || self.outranks_at(1, 2) {
            1
        } else {
            2
        };
        let first = &self.events[self.heap[0].0];
        Some((first, &self.events[self.heap[second].0]))
    }

    fn remove_at(&mut self, pos: usize) -> Option<Event> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(pos, last);
        let handle = self.heap.pop()?;
        self.slots[handle.0] = None;
        if pos < self.heap.len() {
            if pos > 0 && self.outranks_at(pos, (pos - 1) / 2) {
                self.sift_up(pos);
            } else {
                self.sift_down(pos);
            }
        }
        Some(self.events[handle.0])
    }

    #[inline]
    fn outranks_at(&self, i: usize, j: usize) -> bool {
        let (a, b) = (&self.events[self.heap[i].0], &self.events[self.heap[j].0]);
        a.outranks(b)
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.slots[self.heap[i].0] = Some(i);
        self.slots[self.heap[j].0] = Some(j);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.outranks_at(i, parent) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let (l, r) = (2 * i + 1, 2 * i + 2);
            let mut best = i;
            if l < n && self.outranks_at(l, best) {
                best = l;
            }
            if r < n && self.outranks_at(r, best) {
                best = r;
            }
            if best == i {
                break;
            }
            self.swap(i, best);
            i = best;
        }
    }
}
