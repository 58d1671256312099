use super::{ActivationType, GeneticConfig};
use crate::NodeId;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use std::fmt;

/// A NodeType indicates the function of
/// the node's network equivalent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    /// Input nodes.
    Sensor,
    /// The constant-output bias node.
    Bias,
    /// Hidden nodes.
    Neuron,
    /// Output nodes.
    Actuator,
}

/// Nodes are the structural elements of genomes
/// between which genes are created.
///
/// A node's `layer` is derived from the genome's
/// topology every time its network is regenerated.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    node_type: NodeType,
    activation_type: ActivationType,
    layer: usize,
}

impl Node {
    /// Generate a new node with the passed parameters.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{Node, NodeType, ActivationType};
    ///
    /// let node = Node::new(5, NodeType::Neuron, ActivationType::Sigmoid);
    /// ```
    pub fn new(id: NodeId, node_type: NodeType, activation_type: ActivationType) -> Node {
        Node {
            id,
            node_type,
            activation_type,
            layer: 0,
        }
    }

    /// Replaces the node's activation type with one chosen
    /// at random from [`activation_types`], with probability
    /// [`activation_mutate_rate`].
    ///
    /// Sensors and actuators are never changed, nor is the
    /// bias node if [`fixed_bias_activation`] is set.
    ///
    /// [`activation_types`]: GeneticConfig::activation_types
    /// [`activation_mutate_rate`]: GeneticConfig::activation_mutate_rate
    /// [`fixed_bias_activation`]: GeneticConfig::fixed_bias_activation
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{ActivationType, GeneticConfig, Node, NodeType};
    ///
    /// let config = GeneticConfig {
    ///     activation_types: vec![ActivationType::Gaussian],
    ///     activation_mutate_rate: 1.0,
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut node = Node::new(5, NodeType::Neuron, ActivationType::Sigmoid);
    ///
    /// node.mutate(&config, &mut rand::thread_rng());
    ///
    /// assert_eq!(node.activation_type(), ActivationType::Gaussian);
    /// ```
    pub fn mutate<R: Rng + ?Sized>(&mut self, config: &GeneticConfig, rng: &mut R) {
        match self.node_type {
            NodeType::Sensor | NodeType::Actuator => return,
            NodeType::Bias if config.fixed_bias_activation => return,
            _ => {}
        }
        if rng.gen::<f32>() < config.activation_mutate_rate {
            if let Some(activation_type) = config.activation_types.choose(rng) {
                self.activation_type = *activation_type;
            }
        }
    }

    /// Returns the node's ID.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{Node, NodeType, ActivationType};
    ///
    /// let node = Node::new(5, NodeType::Neuron, ActivationType::Sigmoid);
    ///
    /// assert_eq!(node.id(), 5);
    /// ```
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the node's node type.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{Node, NodeType, ActivationType};
    ///
    /// let node = Node::new(5, NodeType::Neuron, ActivationType::Sigmoid);
    ///
    /// assert_eq!(node.node_type(), NodeType::Neuron);
    /// ```
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Returns the node's activation type.
    pub fn activation_type(&self) -> ActivationType {
        self.activation_type
    }

    /// Returns the node's layer in the genome's network.
    /// Inputs and the bias sit on layer 0, outputs on the last layer.
    pub fn layer(&self) -> usize {
        self.layer
    }

    pub(super) fn set_layer(&mut self, layer: usize) {
        self.layer = layer;
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}[{:?}, {}, L{}]",
            self.id, self.node_type, self.activation_type, self.layer,
        )
    }
}
