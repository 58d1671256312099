//! A Network is the phenotype of an [`NNGenome`]:
//! its nodes laid out in topological order, and
//! its enabled genes turned into connections.
//! Disabled genes are ignored.
//!
//! Networks are strictly feed-forward. A single
//! [`feed_forward`] call propagates the inputs
//! through every layer and returns the outputs.
//!
//! [`NNGenome`]: crate::genomics::NNGenome
//! [`feed_forward`]: Network::feed_forward
mod connection;

pub use connection::Connection;

use crate::genomics::{ActivationType, DimensionMismatch, NNGenome, NodeType};
use crate::NodeId;

use ahash::RandomState;

use std::collections::HashMap;
use std::fmt;

/// A layered feed-forward neural network.
///
/// Node state is kept in flat arrays indexed by
/// a node's position in evaluation order, which is
/// ascending `(layer, id)`.
#[derive(Clone, Debug, Default)]
pub struct Network {
    node_ids: Box<[NodeId]>,
    node_types: Box<[NodeType]>,
    input_sums: Box<[f32]>,
    output_values: Box<[f32]>,
    activation_functions: Box<[ActivationType]>,
    connections: Box<[Box<[Connection]>]>,
    input_positions: Box<[usize]>,
    output_positions: Box<[usize]>,
    bias_position: Option<usize>,
}

impl Network {
    /// Generates a new network from the passed genome,
    /// using the node layers computed by the genome.
    ///
    /// Genomes keep their own network up to date, so this
    /// is only needed to obtain a detached copy.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::{
    ///     genomics::{GeneticConfig, NNGenome},
    ///     networks::Network,
    /// };
    /// use std::num::NonZeroUsize;
    ///
    /// let genome = NNGenome::new(&GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     initial_expression_chance: 1.0,
    ///     weight_max_value: 5.0,
    ///     ..GeneticConfig::zero()
    /// }, &mut rand::thread_rng());
    ///
    /// let network = Network::new(&genome);
    /// assert_eq!(network.node_count(), 6);
    /// ```
    pub fn new(genome: &NNGenome) -> Network {
        let mut nodes: Vec<_> = genome
            .nodes()
            .map(|n| (n.layer(), n.id(), n.node_type(), n.activation_type()))
            .collect();
        nodes.sort_unstable_by_key(|(layer, id, ..)| (*layer, *id));

        let node_count = nodes.len();
        let position_from_id: HashMap<_, _, RandomState> = nodes
            .iter()
            .enumerate()
            .map(|(i, (_, id, ..))| (*id, i))
            .collect();

        let mut connections = vec![vec![]; node_count];
        for gene in genome.genes().filter(|g| g.enabled()) {
            if let (Some(&input), Some(&output)) = (
                position_from_id.get(&gene.input()),
                position_from_id.get(&gene.output()),
            ) {
                connections[input].push(Connection {
                    target: output,
                    weight: gene.weight(),
                });
            }
        }

        let (input_count, output_count) = genome.io_counts();
        let input_positions = (0..input_count)
            .filter_map(|id| position_from_id.get(&id).copied())
            .collect();
        let output_positions = (input_count..input_count + output_count)
            .filter_map(|id| position_from_id.get(&id).copied())
            .collect();
        let bias_position = position_from_id.get(&genome.bias()).copied();

        Network {
            node_ids: nodes.iter().map(|(_, id, ..)| *id).collect(),
            node_types: nodes.iter().map(|(_, _, t, _)| *t).collect(),
            input_sums: vec![0.0; node_count].into(),
            output_values: vec![0.0; node_count].into(),
            activation_functions: nodes.iter().map(|(.., a)| *a).collect(),
            connections: connections.into_iter().map(|v| v.into()).collect(),
            input_positions,
            output_positions,
            bias_position,
        }
    }

    /// Feeds `inputs` through the network and returns
    /// the output values, in output declaration order.
    ///
    /// Inputs are injected into the sensors and the bias
    /// outputs 1. Sensors and the bias propagate their
    /// value unchanged; every other node is activated
    /// before propagating its output.
    ///
    /// # Errors
    /// Returns [`DimensionMismatch`] if the number of
    /// inputs differs from the network's input count.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::{
    ///     genomics::{ActivationType, GeneticConfig, NNGenome},
    ///     networks::Network,
    /// };
    /// use std::num::NonZeroUsize;
    ///
    /// let mut genome = NNGenome::new(&GeneticConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     output_count: NonZeroUsize::new(1).unwrap(),
    ///     output_activation_types: vec![ActivationType::ReLU],
    ///     ..GeneticConfig::zero()
    /// }, &mut rand::thread_rng());
    /// genome.add_gene(0, 0, 2, 2.5).unwrap();
    /// genome.add_gene(1, 1, 2, -2.5).unwrap();
    ///
    /// let mut network = Network::new(&genome);
    ///
    /// assert_eq!(network.feed_forward(&[1.0, 0.5]).unwrap(), vec![1.25]);
    /// assert!(network.feed_forward(&[1.0]).is_err());
    /// ```
    pub fn feed_forward(&mut self, inputs: &[f32]) -> Result<Vec<f32>, DimensionMismatch> {
        if inputs.len() != self.input_positions.len() {
            return Err(DimensionMismatch {
                expected: self.input_positions.len(),
                actual: inputs.len(),
            });
        }

        for (position, input) in self.input_positions.iter().zip(inputs) {
            self.output_values[*position] = *input;
        }
        if let Some(position) = self.bias_position {
            self.output_values[position] = 1.0;
        }

        for position in 0..self.node_ids.len() {
            match self.node_types[position] {
                NodeType::Sensor | NodeType::Bias => {}
                NodeType::Neuron | NodeType::Actuator => self.activate(position),
            }
            self.propagate_output(position);
        }

        Ok(self
            .output_positions
            .iter()
            .map(|position| self.output_values[*position])
            .collect())
    }

    /// Computes the node's output from its accumulated
    /// input sum, and resets the sum.
    fn activate(&mut self, position: usize) {
        self.output_values[position] =
            self.activation_functions[position].apply(self.input_sums[position]);
        self.input_sums[position] = 0.0;
    }

    /// Adds the node's weighted output to the input
    /// sum of every node it connects to.
    fn propagate_output(&mut self, position: usize) {
        let value = self.output_values[position];
        for connection in self.connections[position].iter() {
            self.input_sums[connection.target] += connection.transmit(value);
        }
    }

    /// Clears the activation state of all nodes.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::{
    ///     genomics::{GeneticConfig, NNGenome},
    ///     networks::Network,
    /// };
    ///
    /// let genome = NNGenome::new(&GeneticConfig {
    ///     initial_expression_chance: 1.0,
    ///     weight_min_value: 1.0,
    ///     weight_max_value: 1.0,
    ///     ..GeneticConfig::zero()
    /// }, &mut rand::thread_rng());
    ///
    /// let mut network = Network::new(&genome);
    /// network.feed_forward(&[1.0]).unwrap();
    /// assert_ne!(network.outputs()[0], 0.0);
    ///
    /// network.clear_state();
    ///
    /// assert_eq!(network.outputs()[0], 0.0);
    /// ```
    pub fn clear_state(&mut self) {
        for (input_sum, output_value) in self
            .input_sums
            .iter_mut()
            .zip(self.output_values.iter_mut())
        {
            *input_sum = 0.0;
            *output_value = 0.0;
        }
    }

    /// Returns the most recent output values,
    /// in output declaration order.
    pub fn outputs(&self) -> Vec<f32> {
        self.output_positions
            .iter()
            .map(|position| self.output_values[*position])
            .collect()
    }

    /// Returns the number of nodes in the network.
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Returns the node IDs in evaluation order.
    pub fn evaluation_order(&self) -> &[NodeId] {
        &self.node_ids
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network {{")?;
        for (position, id) in self.node_ids.iter().enumerate() {
            writeln!(
                f,
                "\t{:?}[{:?}, {}] {:?}",
                id,
                self.node_types[position],
                self.activation_functions[position],
                self.connections[position]
            )?;
        }
        write!(f, "}}")
    }
}
