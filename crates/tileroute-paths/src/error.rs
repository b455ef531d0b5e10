use std::fmt;

/// Which end of a route request an id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    From,
    To,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => f.write_str("from"),
            Self::To => f.write_str("to"),
        }
    }
}

/// A route endpoint id did not resolve in the graph.
///
/// This is a caller/graph mismatch, never a search outcome: unreachable
/// goals and exhausted budgets are reported through the returned route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownNodeError<I> {
    pub id: I,
    pub endpoint: Endpoint,
}

impl<I> UnknownNodeError<I> {
    pub(crate) fn new(id: I, endpoint: Endpoint) -> Self {
        Self { id, endpoint }
    }
}

impl<I: fmt::Debug> fmt::Display for UnknownNodeError<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} node {:?} is not defined in the graph",
            self.endpoint, self.id
        )
    }
}

impl<I: fmt::Debug> std::error::Error for UnknownNodeError<I> {}
