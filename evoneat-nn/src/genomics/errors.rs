use crate::{Innovation, NodeId};

use thiserror::Error;

/// An error type indicating that a gene or node
/// insertion would break the structure of a genome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralViolation {
    /// The gene graph contains a directed cycle.
    #[error("genome topology contains a cycle")]
    Cycle,
    /// The gene's ID is a duplicate.
    #[error("duplicate gene insertion with id {0}")]
    DuplicateGeneId(Innovation),
    /// The gene has the same endpoints as another with a different ID.
    #[error("gene insertion with endpoints {input} -> {output} and id {id} shadows gene with same endpoints")]
    DuplicateEndpoints {
        id: Innovation,
        input: NodeId,
        output: NodeId,
    },
    /// The gene's endpoints do not exist.
    #[error("gene insertion between nonexistent endpoint(s) {0} -> {1}")]
    NonexistentEndpoints(NodeId, NodeId),
    /// The node's ID is a duplicate.
    #[error("duplicate node insertion with id {0}")]
    DuplicateNodeId(NodeId),
    /// The gene would leave an output node.
    #[error("gene insertion with output node {0} as its input")]
    InvalidSource(NodeId),
    /// The gene would enter an input or bias node.
    #[error("gene insertion with input or bias node {0} as its output")]
    InvalidDestination(NodeId),
    /// A required input, output or bias node is absent.
    #[error("genome is missing required node {0}")]
    MissingNode(NodeId),
    /// A node's type does not match the role its ID designates.
    #[error("node {0} has a type inconsistent with its id")]
    MisplacedNode(NodeId),
}

/// Returned when a network is fed a number of
/// inputs different from its input count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected} network inputs, got {actual}")]
pub struct DimensionMismatch {
    pub expected: usize,
    pub actual: usize,
}

/// Returned when an activation function
/// name cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown activation function `{0}`")]
pub struct UnknownActivation(pub String);

/// An error type for genome persistence.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// Reading or writing the underlying file failed.
    #[error("genome file access failed")]
    Io(#[from] std::io::Error),
    /// The bytes could not be encoded or decoded.
    #[error("genome encoding failed")]
    Encoding(#[from] bincode::Error),
    /// The decoded data does not describe a valid genome.
    #[error("decoded genome is invalid")]
    Invalid(#[from] StructuralViolation),
}

/// An error type for rejected [`GeneticConfig`] values.
///
/// [`GeneticConfig`]: crate::genomics::GeneticConfig
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{name}` must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f32 },
    #[error("`{name}` must be non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("weight bounds are inverted: {min} > {max}")]
    InvertedWeightBounds { min: f32, max: f32 },
}
