//! Step events and the lazy iterator that produces them.
//!
//! An algorithm implements [`StepSource`]: it performs one bounded unit of
//! work per `advance` call and reports what happened as [`Step`] values.
//! [`Steps`] turns that into a finite, non-restartable iterator.

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;

use gw_core::{VertexId, Weight};

/// One observable event of a running algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A vertex was reached and appended to the visitation order.
    VertexVisited(VertexId),
    /// An edge was followed or inspected.
    EdgeTraversed(VertexId, VertexId),
    /// An edge became part of the result structure (tree, path).
    EdgeCommitted {
        from: VertexId,
        to: VertexId,
        weight: Weight,
    },
    /// A vertex became part of the result structure.
    VertexCommitted(VertexId),
    /// Two-coloring assigned `color` (0 or 1) to a vertex.
    VertexColored { vertex: VertexId, color: u8 },
    /// Flow was pushed along a source-to-sink path.
    AugmentingPath { vertices: Vec<VertexId>, flow: Weight },
    /// No augmenting path remains; the value is the maximum flow.
    FlowSettled(Weight),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::VertexVisited(v) => write!(f, "visit {}", v),
            Step::EdgeTraversed(u, v) => write!(f, "traverse {} -> {}", u, v),
            Step::EdgeCommitted { from, to, weight } => {
                write!(f, "commit edge {} -> {} (w={})", from, to, weight)
            }
            Step::VertexCommitted(v) => write!(f, "commit vertex {}", v),
            Step::VertexColored { vertex, color } => write!(f, "color {} = {}", vertex, color),
            Step::AugmentingPath { vertices, flow } => {
                write!(f, "augment {} by {}", join(vertices), flow)
            }
            Step::FlowSettled(value) => write!(f, "max flow {}", value),
        }
    }
}

fn join(vertices: &[VertexId]) -> String {
    vertices
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// An algorithm that can be advanced one unit of work at a time.
pub trait StepSource {
    type Output;

    /// Do one unit of work, pushing the events it produces.
    ///
    /// Returns `false`, without pushing anything, once there is no work left.
    fn advance(&mut self, events: &mut VecDeque<Step>) -> bool;

    /// Consume the finished algorithm and return its result.
    fn into_output(self) -> Self::Output;
}

/// Lazy sequence of [`Step`] events for one algorithm run.
///
/// Iterating drives the algorithm forward; [`Steps::finish`] runs whatever
/// is left and returns the result.
#[derive(Debug)]
pub struct Steps<S> {
    source: S,
    pending: VecDeque<Step>,
    done: bool,
}

impl<S: StepSource> Steps<S> {
    pub(crate) fn new(source: S) -> Self {
        Self {
            source,
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// Run to completion and return the algorithm's result.
    pub fn finish(mut self) -> S::Output {
        while !self.done {
            self.pending.clear();
            if !self.source.advance(&mut self.pending) {
                self.done = true;
            }
        }
        self.source.into_output()
    }
}

impl<S: StepSource> Iterator for Steps<S> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            if let Some(step) = self.pending.pop_front() {
                return Some(step);
            }
            if self.done {
                return None;
            }
            if !self.source.advance(&mut self.pending) {
                self.done = true;
            }
        }
    }
}

impl<S: StepSource> FusedIterator for Steps<S> {}
