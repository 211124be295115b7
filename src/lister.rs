use thiserror::Error;

use crate::domain::{Domain, StepLite};
use crate::range::Range;

/// Indexing past the end of a fully-materialized sequence.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("index {index} is out of range for a sequence of {realized} values")]
pub struct IndexError {
    pub index: usize,
    pub realized: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Advancing,
    Exhausted,
}

/// A lazy, restartable, randomly-indexable iterator over the discrete
/// values of a range.
///
/// Values are produced by repeated successor steps from the range
/// minimum and cached, so random access by index never recomputes a
/// value already realized, and [`reset`](RangeLister::reset) replays
/// the same deterministic sequence.
///
/// A lister borrows the range bounds by value at construction; it never
/// aliases the range it came from. It is a single-owner cursor with no
/// internal synchronization — callers needing concurrent iteration make
/// independent listers.
#[derive(Debug, Clone)]
pub struct RangeLister<T> {
    minimum: T,
    maximum: T,
    empty: bool,
    cache: Vec<T>,
    index: usize,
    state: State,
}

impl<T> RangeLister<T>
where
    T: Domain + StepLite,
{
    pub fn new(range: &Range<T>) -> Self {
        RangeLister {
            minimum: range.minimum(),
            maximum: range.maximum(),
            empty: range.is_empty(),
            cache: Vec::new(),
            index: 0,
            state: State::Fresh,
        }
    }

    /// Whether every value of the range has been materialized.
    pub fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted
    }

    /// How many values have been materialized so far.
    pub fn realized(&self) -> usize {
        self.cache.len()
    }

    /// Clears the cache and rewinds to the fresh state; the next pass
    /// reproduces the same sequence from the start.
    pub fn reset(&mut self) {
        self.cache.clear();
        self.index = 0;
        self.state = State::Fresh;
    }

    /// The `index`-th value of the sequence, materializing just far
    /// enough to realize it. Out-of-order access is fine; already
    /// realized indices are served from the cache.
    pub fn get(&mut self, index: usize) -> Result<T, IndexError> {
        while self.cache.len() <= index && self.materialize_next() {}
        self.cache.get(index).copied().ok_or(IndexError {
            index,
            realized: self.cache.len(),
        })
    }

    /// The total number of values. Forces full materialization — this
    /// is deliberately the only eagerly-draining operation.
    pub fn count(&mut self) -> usize {
        while self.materialize_next() {}
        self.cache.len()
    }

    // Realizes one more value, or transitions to `Exhausted`.
    fn materialize_next(&mut self) -> bool {
        match self.state {
            State::Exhausted => false,
            State::Fresh => {
                if self.empty {
                    self.state = State::Exhausted;
                    return false;
                }
                self.cache.push(self.minimum);
                self.state = State::Advancing;
                true
            }
            State::Advancing => {
                // Advancing implies at least one value in the cache.
                let last = *self.cache.last().unwrap();
                if last == self.maximum {
                    // `maximum <= T::max_value()` always, so checking
                    // the bound first also keeps the successor step
                    // from overflowing the domain.
                    self.state = State::Exhausted;
                    false
                } else {
                    self.cache.push(last.add_one());
                    true
                }
            }
        }
    }
}

impl<T> Iterator for RangeLister<T>
where
    T: Domain + StepLite,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.index >= self.cache.len() && !self.materialize_next() {
            return None;
        }
        let value = self.cache[self.index];
        self.index += 1;
        Some(value)
    }
}
