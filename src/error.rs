use std::fmt;

/// Errors raised at the boundary of the partitioning engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionError {
    /// The supplied sides do not cover every vertex of the graph exactly once.
    InvalidPartition {
        /// What is wrong with the supplied sides.
        reason: String,
    },
    /// A vertex name or id does not belong to the graph.
    UnknownVertex(String),
    /// An edge was requested from a vertex to itself.
    SelfLoop(String),
    /// The operation needs at least one vertex.
    EmptyGraph,
    /// Too few edges were requested to connect every vertex.
    NotEnoughEdges {
        /// Number of vertices to connect.
        vertices: usize,
        /// Number of edges requested.
        requested: usize,
    },
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPartition { reason } => write!(f, "invalid initial partition: {reason}"),
            Self::UnknownVertex(name) => write!(f, "unknown vertex: {name}"),
            Self::SelfLoop(name) => write!(f, "self-loop on vertex {name} is not allowed"),
            Self::EmptyGraph => write!(f, "graph has no vertices"),
            Self::NotEnoughEdges { vertices, requested } => write!(
                f,
                "{requested} edges cannot connect {vertices} vertices, at least {} are needed",
                vertices.saturating_sub(1)
            ),
        }
    }
}

impl std::error::Error for PartitionError {}
