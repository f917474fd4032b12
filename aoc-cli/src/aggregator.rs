//! Puts results arriving from the pool back into (year, day, part) order
//!
//! Two min-heaps: one of keys still owed, one of results that arrived early.
//! A result is released once its key is the smallest one still owed.

use crate::executor::{SolverResult, WorkItem};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Output position of a result, ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Min-heap entry keyed on the result's position
struct Early(SolverResult);

impl Ord for Early {
    fn cmp(&self, other: &Self) -> Ordering {
        ResultKey::from(&other.0).cmp(&ResultKey::from(&self.0))
    }
}

impl PartialOrd for Early {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Early {}

impl PartialEq for Early {
    fn eq(&self, other: &Self) -> bool {
        ResultKey::from(&self.0) == ResultKey::from(&other.0)
    }
}

/// What was left when the channel closed
#[derive(Debug, Default)]
pub struct Leftovers {
    /// Results whose predecessors never arrived, in order
    pub results: Vec<SolverResult>,
    /// Keys with no result at all
    pub missing: Vec<ResultKey>,
}

pub struct ResultAggregator {
    owed: BinaryHeap<Reverse<ResultKey>>,
    early: BinaryHeap<Early>,
}

impl ResultAggregator {
    pub fn new(keys: impl IntoIterator<Item = ResultKey>) -> Self {
        Self {
            owed: keys.into_iter().map(Reverse).collect(),
            early: BinaryHeap::new(),
        }
    }

    /// One key per part of every work item
    pub fn for_work(items: &[WorkItem]) -> Self {
        Self::new(items.iter().flat_map(|w| {
            w.parts.clone().map(move |part| ResultKey {
                year: w.year,
                day: w.day,
                part,
            })
        }))
    }

    /// Buffers `result` and returns every result now ready, in order.
    pub fn push(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.early.push(Early(result));

        let mut ready = Vec::new();
        while let Some(Reverse(next)) = self.owed.peek()
            && self.early.peek().is_some_and(|e| ResultKey::from(&e.0) == *next)
            && let Some(Early(result)) = self.early.pop()
        {
            self.owed.pop();
            ready.push(result);
        }
        ready
    }

    pub fn is_complete(&self) -> bool {
        self.owed.is_empty()
    }

    /// Consumes the aggregator, returning buffered results and keys never received.
    pub fn finish(self) -> Leftovers {
        let results: Vec<_> = self.early.into_sorted_vec().into_iter().rev().map(|e| e.0).collect();
        let mut missing: Vec<_> = self
            .owed
            .into_iter()
            .map(|Reverse(k)| k)
            .filter(|k| !results.iter().any(|r| ResultKey::from(r) == *k))
            .collect();
        missing.sort();
        Leftovers { results, missing }
    }
}
