//! Genomes are the focus of evolution in NEAT.
//! They are a collection of genes and nodes that can be instantiated
//! as a phenotype (a neural network) and evaluated
//! for performance in a task, which results numerically in
//! their fitness score. Genomes can be progressively mutated,
//! thus adding complexity and functionality.
mod activations;
mod config;
mod errors;
mod genes;
mod history;
mod nodes;
mod persistence;

pub use activations::ActivationType;
pub use config::GeneticConfig;
pub use errors::*;
pub use genes::Gene;
pub use history::History;
pub use nodes::{Node, NodeType};

use crate::networks::Network;
use crate::{Innovation, NodeId};

use ahash::RandomState;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Genomes are the focus of evolution in NEAT.
/// They are a collection of genes and nodes that can be instantiated
/// as a phenotype (a neural network) and evaluated
/// for performance in a task, which results numerically in
/// their fitness score. Genomes can be progressively mutated,
/// thus adding complexity and functionality.
///
/// The gene graph, counting both enabled and disabled genes,
/// is always acyclic, and every genome carries an up-to-date
/// [`Network`] built from it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "persistence::GenomeRecord")]
pub struct NNGenome {
    nodes: Vec<Node>,
    genes: Vec<Gene>,
    input_count: usize,
    output_count: usize,
    bias: NodeId,
    layers: usize,
    fitness: f32,
    #[serde(skip)]
    network: Network,
}

impl NNGenome {
    /// Create a new genome with the specified configuration.
    ///
    /// Inputs take IDs `0..input_count`, outputs the following
    /// `output_count` IDs, and the bias node the ID after them.
    /// Each input-output and bias-output gene is expressed with
    /// probability [`initial_expression_chance`], numbered as
    /// pre-registered by [`History::new`].
    ///
    /// [`initial_expression_chance`]: GeneticConfig::initial_expression_chance
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, NNGenome};
    /// use std::num::NonZeroUsize;
    ///
    /// let genome = NNGenome::new(&GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     initial_expression_chance: 1.0,
    ///     ..GeneticConfig::zero()
    /// }, &mut rand::thread_rng());
    ///
    /// assert_eq!(genome.nodes().count(), 6);
    /// assert_eq!(genome.genes().count(), 8);
    /// assert!(genome.fully_connected());
    /// ```
    pub fn new<R: Rng + ?Sized>(config: &GeneticConfig, rng: &mut R) -> NNGenome {
        let input_count = config.input_count.get();
        let output_count = config.output_count.get();
        let bias = input_count + output_count;

        let mut nodes = Vec::with_capacity(bias + 1);
        nodes.extend(
            (0..input_count).map(|id| Node::new(id, NodeType::Sensor, ActivationType::Identity)),
        );
        nodes.extend((0..output_count).map(|o| {
            Node::new(
                input_count + o,
                NodeType::Actuator,
                config
                    .output_activation_types
                    .get(o)
                    .copied()
                    .unwrap_or(ActivationType::Sigmoid),
            )
        }));
        nodes.push(Node::new(bias, NodeType::Bias, ActivationType::Identity));

        let mut genes = vec![];
        for source_index in 0..=input_count {
            let source = if source_index == input_count {
                bias
            } else {
                source_index
            };
            for o in 0..output_count {
                if rng.gen::<f32>() < config.initial_expression_chance {
                    genes.push(Gene::new(
                        source_index * output_count + o,
                        source,
                        input_count + o,
                        Self::new_connection_weight(config, rng),
                    ));
                }
            }
        }

        let mut genome = NNGenome {
            nodes,
            genes,
            input_count,
            output_count,
            bias,
            layers: 0,
            fitness: 0.0,
            network: Network::default(),
        };
        genome.refresh_network();
        genome
    }

    /// Returns a weight for a new gene, drawn uniformly
    /// from the configured weight bounds.
    pub fn new_connection_weight<R: Rng + ?Sized>(config: &GeneticConfig, rng: &mut R) -> f32 {
        Gene::random_weight(config, rng)
    }

    /// Add a new gene to the genome.
    /// Returns a reference to the new gene.
    ///
    /// # Errors
    /// This function returns an error if a gene of the same
    /// innovation number or between the same endpoints already
    /// existed in the genome, if either endpoint doesn't exist,
    /// if the gene would leave an output node or enter an input
    /// or bias node, or if it would close a cycle.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, NNGenome, StructuralViolation};
    ///
    /// let mut genome = NNGenome::new(&GeneticConfig::zero(), &mut rand::thread_rng());
    ///
    /// // Input 0 to output 1.
    /// let gene = genome.add_gene(39, 0, 1, 1.0).unwrap();
    /// assert_eq!(gene.innovation(), 39);
    ///
    /// assert_eq!(genome.add_gene(39, 2, 1, 1.0), Err(StructuralViolation::DuplicateGeneId(39)));
    /// assert_eq!(genome.add_gene(40, 1, 0, 1.0), Err(StructuralViolation::InvalidSource(1)));
    /// ```
    pub fn add_gene(
        &mut self,
        innovation: Innovation,
        input: NodeId,
        output: NodeId,
        weight: f32,
    ) -> Result<&Gene, StructuralViolation> {
        self.check_gene_viability(innovation, input, output)?;
        if self.creates_cycle(input, output) {
            return Err(StructuralViolation::Cycle);
        }
        self.genes.push(Gene::new(innovation, input, output, weight));
        self.refresh_network();
        Ok(&self.genes[self.genes.len() - 1])
    }

    /// Checks every gene invariant except acyclicity.
    fn check_gene_viability(
        &self,
        innovation: Innovation,
        input: NodeId,
        output: NodeId,
    ) -> Result<(), StructuralViolation> {
        if self.genes.iter().any(|g| g.innovation() == innovation) {
            return Err(StructuralViolation::DuplicateGeneId(innovation));
        }
        let (input_node, output_node) = match (self.node(input), self.node(output)) {
            (Some(i), Some(o)) => (i, o),
            _ => return Err(StructuralViolation::NonexistentEndpoints(input, output)),
        };
        if input_node.node_type() == NodeType::Actuator {
            return Err(StructuralViolation::InvalidSource(input));
        }
        if matches!(output_node.node_type(), NodeType::Sensor | NodeType::Bias) {
            return Err(StructuralViolation::InvalidDestination(output));
        }
        if self.genes.iter().any(|g| g.endpoints() == (input, output)) {
            return Err(StructuralViolation::DuplicateEndpoints {
                id: innovation,
                input,
                output,
            });
        }
        Ok(())
    }

    /// Returns whether a gene `input -> output` would close
    /// a cycle, i.e. whether `input` is reachable from `output`.
    fn creates_cycle(&self, input: NodeId, output: NodeId) -> bool {
        let mut successors: HashMap<NodeId, Vec<NodeId>, RandomState> = HashMap::default();
        for gene in &self.genes {
            successors.entry(gene.input()).or_default().push(gene.output());
        }
        let mut visited: HashSet<NodeId, RandomState> = HashSet::default();
        let mut stack = vec![output];
        while let Some(node) = stack.pop() {
            if node == input {
                return true;
            }
            if visited.insert(node) {
                if let Some(next) = successors.get(&node) {
                    stack.extend(next);
                }
            }
        }
        false
    }

    /// Add a new hidden node to the genome.
    /// Returns a reference to the newly created node.
    ///
    /// # Errors
    /// This function returns an error if a node with the
    /// same ID already existed in the genome.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{ActivationType, GeneticConfig, NNGenome, NodeType};
    ///
    /// let mut genome = NNGenome::new(&GeneticConfig::zero(), &mut rand::thread_rng());
    ///
    /// let node = genome.add_node(3, ActivationType::Sigmoid).unwrap();
    /// assert_eq!(node.node_type(), NodeType::Neuron);
    ///
    /// assert!(genome.add_node(3, ActivationType::ReLU).is_err());
    /// ```
    pub fn add_node(
        &mut self,
        id: NodeId,
        activation_type: ActivationType,
    ) -> Result<&Node, StructuralViolation> {
        if self.node(id).is_some() {
            return Err(StructuralViolation::DuplicateNodeId(id));
        }
        self.nodes
            .push(Node::new(id, NodeType::Neuron, activation_type));
        self.refresh_network();
        Ok(&self.nodes[self.nodes.len() - 1])
    }

    /// Enables or disables the gene with the given innovation
    /// number. Returns `false` if the genome has no such gene.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, NNGenome};
    ///
    /// let mut genome = NNGenome::new(&GeneticConfig {
    ///     initial_expression_chance: 1.0,
    ///     ..GeneticConfig::zero()
    /// }, &mut rand::thread_rng());
    ///
    /// assert!(genome.set_gene_enabled(0, false));
    /// assert!(!genome.genes().next().unwrap().enabled());
    /// assert!(!genome.set_gene_enabled(99, false));
    /// ```
    pub fn set_gene_enabled(&mut self, innovation: Innovation, enabled: bool) -> bool {
        match self.genes.iter_mut().find(|g| g.innovation() == innovation) {
            Some(gene) => {
                gene.set_enabled(enabled);
                self.refresh_network();
                true
            }
            None => false,
        }
    }

    /// Recomputes node layers and rebuilds the genome's network.
    ///
    /// Layers are assigned over the full gene graph, disabled
    /// genes included: inputs and the bias sit on layer 0, hidden
    /// nodes on the longest path from a source (at least layer 1),
    /// and all outputs share the layer above the highest
    /// non-output node.
    ///
    /// # Errors
    /// Returns an error if a gene references a missing node,
    /// or if the gene graph contains a cycle. The genome is
    /// left unchanged in that case.
    pub fn generate_network(&mut self) -> Result<(), StructuralViolation> {
        let layers = self.compute_layers()?;
        let output_layer = self
            .nodes
            .iter()
            .zip(&layers)
            .filter(|(n, _)| n.node_type() != NodeType::Actuator)
            .map(|(_, l)| *l)
            .max()
            .unwrap_or(0)
            + 1;

        for (node, layer) in self.nodes.iter_mut().zip(layers) {
            node.set_layer(match node.node_type() {
                NodeType::Actuator => output_layer,
                _ => layer,
            });
        }
        self.layers = output_layer + 1;
        self.network = Network::new(self);
        Ok(())
    }

    /// Longest-path layering by Kahn's algorithm.
    fn compute_layers(&self) -> Result<Vec<usize>, StructuralViolation> {
        let index_from_id: HashMap<NodeId, usize, RandomState> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id(), i))
            .collect();

        let mut in_degree = vec![0usize; self.nodes.len()];
        let mut successors = vec![vec![]; self.nodes.len()];
        for gene in &self.genes {
            match (
                index_from_id.get(&gene.input()),
                index_from_id.get(&gene.output()),
            ) {
                (Some(&input), Some(&output)) => {
                    successors[input].push(output);
                    in_degree[output] += 1;
                }
                _ => {
                    return Err(StructuralViolation::NonexistentEndpoints(
                        gene.input(),
                        gene.output(),
                    ))
                }
            }
        }

        let mut layers: Vec<usize> = self
            .nodes
            .iter()
            .map(|n| match n.node_type() {
                NodeType::Neuron => 1,
                _ => 0,
            })
            .collect();
        let mut queue: VecDeque<usize> = (0..self.nodes.len())
            .filter(|i| in_degree[*i] == 0)
            .collect();
        let mut visited = 0;
        while let Some(node) = queue.pop_front() {
            visited += 1;
            for &next in &successors[node] {
                layers[next] = layers[next].max(layers[node] + 1);
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    queue.push_back(next);
                }
            }
        }

        if visited < self.nodes.len() {
            Err(StructuralViolation::Cycle)
        } else {
            Ok(layers)
        }
    }

    /// Rebuilds the network after a change that cannot
    /// have broken the genome's invariants.
    fn refresh_network(&mut self) {
        if let Err(e) = self.generate_network() {
            unreachable!("genome invariants broken by a checked change: {}", e);
        }
    }

    /// Feeds `inputs` through the genome's network and
    /// returns the output values in output declaration order.
    ///
    /// # Errors
    /// Returns [`DimensionMismatch`] if `inputs.len()`
    /// differs from the genome's input count.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{ActivationType, GeneticConfig, NNGenome};
    ///
    /// let mut genome = NNGenome::new(&GeneticConfig {
    ///     initial_expression_chance: 1.0,
    ///     weight_min_value: 1.0,
    ///     weight_max_value: 1.0,
    ///     output_activation_types: vec![ActivationType::Identity],
    ///     ..GeneticConfig::zero()
    /// }, &mut rand::thread_rng());
    ///
    /// // Input plus bias, both with weight 1.
    /// assert_eq!(genome.feed_forward(&[2.0]).unwrap(), vec![3.0]);
    /// assert!(genome.feed_forward(&[]).is_err());
    /// ```
    pub fn feed_forward(&mut self, inputs: &[f32]) -> Result<Vec<f32>, DimensionMismatch> {
        self.network.feed_forward(inputs)
    }

    /// Returns whether every pair of nodes that may be
    /// connected (the source on a lower layer than the
    /// destination) already is.
    pub fn fully_connected(&self) -> bool {
        self.eligible_connections().next().is_none()
    }

    /// Returns all node pairs on increasing layers
    /// with no gene between them.
    fn eligible_connections(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        let existing: HashSet<(NodeId, NodeId), RandomState> =
            self.genes.iter().map(Gene::endpoints).collect();
        self.nodes
            .iter()
            .flat_map(move |a| self.nodes.iter().map(move |b| (a, b)))
            .filter(|(a, b)| a.layer() < b.layer())
            .map(|(a, b)| (a.id(), b.id()))
            .filter(move |pair| !existing.contains(pair))
    }

    /// Induces a _gene addition mutation_: a new gene is
    /// created between a randomly chosen pair of unconnected
    /// nodes on increasing layers, which keeps the genome acyclic.
    /// The new gene is numbered by the `history`.
    ///
    /// Returns the new gene, or `None` if the genome
    /// is already fully connected.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History, NNGenome};
    ///
    /// let config = GeneticConfig::zero();
    /// let mut history = History::new(&config);
    /// let mut rng = rand::thread_rng();
    /// let mut genome = NNGenome::new(&config, &mut rng);
    ///
    /// // Input-output, then bias-output.
    /// assert!(genome.mutate_add_connection(&mut history, &config, &mut rng).is_some());
    /// assert!(genome.mutate_add_connection(&mut history, &config, &mut rng).is_some());
    /// assert!(genome.mutate_add_connection(&mut history, &config, &mut rng).is_none());
    /// ```
    pub fn mutate_add_connection<R: Rng + ?Sized>(
        &mut self,
        history: &mut History,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> Option<&Gene> {
        let (input, output) = match self.eligible_connections().choose(rng) {
            Some(pair) => pair,
            None => {
                log::trace!("gene addition mutation on fully-connected genome");
                return None;
            }
        };
        let innovation = history.get_innovation_number(input, output);
        if self.genes.iter().any(|g| g.innovation() == innovation) {
            log::trace!("innovation {} already present, skipping gene addition", innovation);
            return None;
        }
        let weight = Self::new_connection_weight(config, rng);
        self.genes.push(Gene::new(innovation, input, output, weight));
        self.refresh_network();
        self.genes.last()
    }

    /// Induces a _node addition mutation_: a randomly chosen
    /// enabled gene is disabled, and a new hidden node is
    /// inserted between its endpoints. The gene into the new node
    /// gets weight 1, and the gene out of it the split gene's
    /// weight. The node ID and gene innovation numbers come from
    /// the `history`.
    ///
    /// Returns the new node, or `None` if the genome
    /// has no enabled genes.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History, NNGenome};
    ///
    /// let config = GeneticConfig {
    ///     initial_expression_chance: 1.0,
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut history = History::new(&config);
    /// let mut rng = rand::thread_rng();
    /// let mut genome = NNGenome::new(&config, &mut rng);
    ///
    /// let node = genome.mutate_add_node(&mut history, &config, &mut rng).unwrap();
    /// assert_eq!(node.id(), 3);
    /// assert_eq!(genome.genes().count(), 4);
    /// assert_eq!(genome.genes().filter(|g| !g.enabled()).count(), 1);
    /// ```
    pub fn mutate_add_node<R: Rng + ?Sized>(
        &mut self,
        history: &mut History,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> Option<&Node> {
        let split = match self
            .genes
            .iter()
            .enumerate()
            .filter(|(_, g)| g.enabled())
            .map(|(i, _)| i)
            .choose(rng)
        {
            Some(i) => i,
            None => {
                log::trace!("node addition mutation on genome without enabled genes");
                return None;
            }
        };
        self.genes[split].set_enabled(false);
        let (input, output) = self.genes[split].endpoints();
        let weight = self.genes[split].weight();
        let split_innovation = self.genes[split].innovation();

        let nodes = &self.nodes;
        let new_node = history.split_node_id(split_innovation, |id| {
            nodes.iter().any(|n| n.id() == id)
        });
        let activation_type = config
            .activation_types
            .choose(rng)
            .copied()
            .unwrap_or(ActivationType::Sigmoid);
        self.nodes
            .push(Node::new(new_node, NodeType::Neuron, activation_type));

        let input_gene = history.get_innovation_number(input, new_node);
        let output_gene = history.get_innovation_number(new_node, output);
        self.genes.push(Gene::new(input_gene, input, new_node, 1.0));
        self.genes.push(Gene::new(output_gene, new_node, output, weight));

        self.refresh_network();
        self.nodes.last()
    }

    /// Induces a _node deletion mutation_: a randomly chosen
    /// hidden node is removed, along with every gene
    /// connected to it.
    ///
    /// Returns the removed node and genes, or `None`
    /// if the genome has no hidden nodes.
    pub fn mutate_remove_node<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<(Node, Vec<Gene>)> {
        let index = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.node_type() == NodeType::Neuron)
            .map(|(i, _)| i)
            .choose(rng)?;
        let node = self.nodes.remove(index);
        let (removed, kept): (Vec<Gene>, Vec<Gene>) = std::mem::take(&mut self.genes)
            .into_iter()
            .partition(|g| g.input() == node.id() || g.output() == node.id());
        self.genes = kept;
        self.refresh_network();
        Some((node, removed))
    }

    /// Induces a _gene deletion mutation_: a randomly
    /// chosen gene is removed. Nodes are left in place.
    ///
    /// Returns the removed gene, or `None` if the
    /// genome has no genes.
    pub fn mutate_remove_connection<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Gene> {
        let index = (0..self.genes.len()).choose(rng)?;
        let gene = self.genes.remove(index);
        self.refresh_network();
        Some(gene)
    }

    /// Mutates the genome: every non-sensor node and every gene
    /// is mutated, then each structural mutation takes place
    /// with its configured probability.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History, NNGenome};
    ///
    /// let config = GeneticConfig {
    ///     initial_expression_chance: 1.0,
    ///     add_node_rate: 1.0,
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut history = History::new(&config);
    /// let mut rng = rand::thread_rng();
    /// let mut genome = NNGenome::new(&config, &mut rng);
    ///
    /// genome.mutate(&mut history, &config, &mut rng);
    ///
    /// assert_eq!(genome.nodes().count(), 4);
    /// ```
    pub fn mutate<R: Rng + ?Sized>(
        &mut self,
        history: &mut History,
        config: &GeneticConfig,
        rng: &mut R,
    ) {
        for node in &mut self.nodes {
            node.mutate(config, rng);
        }
        for gene in &mut self.genes {
            gene.mutate(config, rng);
        }

        if rng.gen::<f32>() < config.add_node_rate {
            self.mutate_add_node(history, config, rng);
        }
        if rng.gen::<f32>() < config.add_connection_rate {
            self.mutate_add_connection(history, config, rng);
        }
        if rng.gen::<f32>() < config.remove_node_rate {
            self.mutate_remove_node(rng);
        }
        if rng.gen::<f32>() < config.remove_connection_rate {
            self.mutate_remove_connection(rng);
        }
        self.refresh_network();
    }

    /// Combines the genome with `parent`, assuming `self` is the
    /// fitter of the two, and returns their child.
    ///
    /// The child inherits the structure of `self`. Genes present
    /// in both parents are copied from either at random; if the gene
    /// is disabled in either parent, the copy is disabled with
    /// probability [`disabled_gene_inheritance_chance`] and enabled
    /// otherwise. Genes only present in `self` are copied as they are.
    /// The child's fitness is 0.
    ///
    /// [`disabled_gene_inheritance_chance`]: GeneticConfig::disabled_gene_inheritance_chance
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, NNGenome};
    ///
    /// let config = GeneticConfig {
    ///     initial_expression_chance: 1.0,
    ///     weight_min_value: -1.0,
    ///     weight_max_value: 1.0,
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut rng = rand::thread_rng();
    /// let fitter = NNGenome::new(&config, &mut rng);
    /// let other = NNGenome::new(&config, &mut rng);
    ///
    /// let child = fitter.crossover(&other, &config, &mut rng);
    ///
    /// assert!(child.genes().map(|g| g.innovation()).eq(fitter.genes().map(|g| g.innovation())));
    /// ```
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        parent: &NNGenome,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> NNGenome {
        let genes: Vec<Gene> = self
            .genes
            .iter()
            .map(|gene| match parent.matching_gene(gene.innovation()) {
                Some(index) => {
                    let other = &parent.genes[index];
                    let chosen = if rng.gen::<bool>() { gene } else { other };
                    let mut child_gene = chosen.clone_between(gene.input(), gene.output());
                    if !gene.enabled() || !other.enabled() {
                        child_gene
                            .set_enabled(rng.gen::<f32>() >= config.disabled_gene_inheritance_chance);
                    }
                    child_gene
                }
                None => gene.clone(),
            })
            .collect();

        let referenced: HashSet<NodeId, RandomState> = genes
            .iter()
            .flat_map(|g| [g.input(), g.output()])
            .collect();
        let nodes = self
            .nodes
            .iter()
            .filter(|n| n.node_type() != NodeType::Neuron || referenced.contains(&n.id()))
            .cloned()
            .collect();

        let mut child = NNGenome {
            nodes,
            genes,
            input_count: self.input_count,
            output_count: self.output_count,
            bias: self.bias,
            layers: 0,
            fitness: 0.0,
            network: Network::default(),
        };
        child.refresh_network();
        child
    }

    /// Returns the index, within the genome's genes, of the
    /// gene with the given innovation number, if present.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, NNGenome};
    ///
    /// let genome = NNGenome::new(&GeneticConfig {
    ///     initial_expression_chance: 1.0,
    ///     ..GeneticConfig::zero()
    /// }, &mut rand::thread_rng());
    ///
    /// assert_eq!(genome.matching_gene(1), Some(1));
    /// assert_eq!(genome.matching_gene(7), None);
    /// ```
    pub fn matching_gene(&self, innovation: Innovation) -> Option<usize> {
        self.genes.iter().position(|g| g.innovation() == innovation)
    }

    /// Returns the genetic distance between two genomes:
    ///
    /// `(excess_gene_factor ⨯ E + disjoint_gene_factor ⨯ D) / N + common_weight_factor ⨯ W`
    ///
    /// where `E` counts the unmatched genes beyond the other genome's
    /// highest innovation number, `D` the remaining unmatched genes,
    /// `W` is the mean absolute weight difference of matching genes,
    /// and `N` is the larger gene count, or 1 if it is below
    /// [`distance_normalization_floor`].
    ///
    /// [`distance_normalization_floor`]: GeneticConfig::distance_normalization_floor
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, NNGenome};
    ///
    /// let config = GeneticConfig {
    ///     initial_expression_chance: 1.0,
    ///     weight_max_value: 1.0,
    ///     excess_gene_factor: 1.0,
    ///     disjoint_gene_factor: 1.0,
    ///     common_weight_factor: 0.4,
    ///     ..GeneticConfig::zero()
    /// };
    /// let genome = NNGenome::new(&config, &mut rand::thread_rng());
    ///
    /// assert_eq!(NNGenome::genetic_distance(&genome, &genome.clone(), &config), 0.0);
    /// ```
    pub fn genetic_distance(first: &NNGenome, second: &NNGenome, config: &GeneticConfig) -> f32 {
        let first_weights: HashMap<Innovation, f32, RandomState> = first
            .genes
            .iter()
            .map(|g| (g.innovation(), g.weight()))
            .collect();
        let second_weights: HashMap<Innovation, f32, RandomState> = second
            .genes
            .iter()
            .map(|g| (g.innovation(), g.weight()))
            .collect();

        // Unmatched genes past this innovation number are excess.
        let excess_threshold = first
            .max_innovation()
            .zip(second.max_innovation())
            .map(|(a, b)| a.min(b));
        let is_excess = |innovation: Innovation| match excess_threshold {
            Some(threshold) => innovation > threshold,
            None => true,
        };

        let mut excess = 0;
        let mut disjoint = 0;
        let mut weight_difference = 0.0;
        let mut matching = 0;
        for gene in &first.genes {
            match second_weights.get(&gene.innovation()) {
                Some(other) => {
                    weight_difference += (gene.weight() - other).abs();
                    matching += 1;
                }
                None if is_excess(gene.innovation()) => excess += 1,
                None => disjoint += 1,
            }
        }
        for gene in &second.genes {
            if !first_weights.contains_key(&gene.innovation()) {
                if is_excess(gene.innovation()) {
                    excess += 1;
                } else {
                    disjoint += 1;
                }
            }
        }

        let gene_count = first.genes.len().max(second.genes.len());
        let normalization = if gene_count < config.distance_normalization_floor || gene_count == 0
        {
            1.0
        } else {
            gene_count as f32
        };
        let average_weight_difference = if matching > 0 {
            weight_difference / matching as f32
        } else {
            0.0
        };

        (config.excess_gene_factor * excess as f32 + config.disjoint_gene_factor * disjoint as f32)
            / normalization
            + config.common_weight_factor * average_weight_difference
    }

    /// Returns whether the genome has the input and
    /// output counts the configuration asks for.
    pub fn conforms_to(&self, config: &GeneticConfig) -> bool {
        self.input_count == config.input_count.get()
            && self.output_count == config.output_count.get()
    }

    fn max_innovation(&self) -> Option<Innovation> {
        self.genes.iter().map(Gene::innovation).max()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Returns an iterator over the genome's genes, in creation order.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, NNGenome};
    ///
    /// let genome = NNGenome::new(&GeneticConfig::zero(), &mut rand::thread_rng());
    ///
    /// for gene in genome.genes() {
    ///     println!("{}", gene);
    /// }
    /// ```
    pub fn genes(&self) -> impl Iterator<Item = &Gene> {
        self.genes.iter()
    }

    /// Returns an iterator over the genome's nodes, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Returns the genome's input and output counts.
    pub fn io_counts(&self) -> (usize, usize) {
        (self.input_count, self.output_count)
    }

    /// Returns the bias node's ID.
    pub fn bias(&self) -> NodeId {
        self.bias
    }

    /// Returns the number of layers in the genome's network.
    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Returns the genome's network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Sets the genome's fitness.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, NNGenome};
    ///
    /// let mut genome = NNGenome::new(&GeneticConfig::zero(), &mut rand::thread_rng());
    ///
    /// genome.set_fitness(10.0);
    /// assert_eq!(genome.fitness(), 10.0);
    /// ```
    pub fn set_fitness(&mut self, fitness: f32) {
        self.fitness = fitness;
    }

    /// Returns the genome's fitness.
    pub fn fitness(&self) -> f32 {
        self.fitness
    }
}

impl PartialEq for NNGenome {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
            && self.genes == other.genes
            && self.input_count == other.input_count
            && self.output_count == other.output_count
            && self.bias == other.bias
            && self.layers == other.layers
            && self.fitness == other.fitness
    }
}

impl evoneat::Genome for NNGenome {
    type Config = GeneticConfig;
    type InnovationHistory = History;

    fn new<R: Rng + ?Sized>(config: &GeneticConfig, rng: &mut R) -> NNGenome {
        NNGenome::new(config, rng)
    }

    fn conforms_to(&self, config: &GeneticConfig) -> bool {
        NNGenome::conforms_to(self, config)
    }

    fn genetic_distance(first: &NNGenome, second: &NNGenome, config: &GeneticConfig) -> f32 {
        NNGenome::genetic_distance(first, second, config)
    }

    fn crossover<R: Rng + ?Sized>(
        &self,
        other: &NNGenome,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> NNGenome {
        NNGenome::crossover(self, other, config, rng)
    }

    fn mutate<R: Rng + ?Sized>(&mut self, history: &mut History, config: &GeneticConfig, rng: &mut R) {
        NNGenome::mutate(self, history, config, rng)
    }

    fn set_fitness(&mut self, fitness: f32) {
        NNGenome::set_fitness(self, fitness)
    }

    fn fitness(&self) -> f32 {
        NNGenome::fitness(self)
    }
}

impl fmt::Display for NNGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: Vec<String> = self.nodes.iter().map(Node::to_string).collect();
        let genes: Vec<String> = self.genes.iter().map(Gene::to_string).collect();
        write!(
            f,
            "Genome {{\n\tfitness: {:.3},\n\tlayers: {},\n\tnodes: [{}],\n\tgenes: [{}]\n}}",
            self.fitness,
            self.layers,
            nodes.join(", "),
            genes.join(", "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::num::NonZeroUsize;

    fn config(inputs: usize, outputs: usize) -> GeneticConfig {
        GeneticConfig {
            input_count: NonZeroUsize::new(inputs).unwrap(),
            output_count: NonZeroUsize::new(outputs).unwrap(),
            weight_min_value: -2.0,
            weight_max_value: 2.0,
            ..GeneticConfig::zero()
        }
    }

    fn assert_layering_is_consistent(genome: &NNGenome) {
        let layer_of = |id: NodeId| genome.node(id).unwrap().layer();
        for gene in genome.genes() {
            assert!(
                layer_of(gene.input()) < layer_of(gene.output()),
                "gene {} is not feed-forward in {}",
                gene,
                genome
            );
        }
        let output_layer = genome.layers() - 1;
        for node in genome.nodes() {
            match node.node_type() {
                NodeType::Sensor | NodeType::Bias => assert_eq!(node.layer(), 0),
                NodeType::Actuator => assert_eq!(node.layer(), output_layer),
                NodeType::Neuron => assert!((1..output_layer).contains(&node.layer())),
            }
        }
    }

    #[test]
    fn new_fully_connected() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for input_count in 1..8 {
            for output_count in 1..8 {
                let mut config = config(input_count, output_count);
                config.initial_expression_chance = 1.0;
                config.output_activation_types = vec![ActivationType::Gaussian, ActivationType::Tanh];

                let genome = NNGenome::new(&config, &mut rng);
                let bias = input_count + output_count;

                assert_eq!(genome.genes().count(), (input_count + 1) * output_count);
                assert_eq!(genome.nodes().count(), bias + 1);
                assert_eq!(genome.bias(), bias);
                assert_eq!(genome.layers(), 2);
                assert!(genome.fully_connected());
                for gene in genome.genes() {
                    let source_index = if gene.input() == bias {
                        input_count
                    } else {
                        gene.input()
                    };
                    assert_eq!(
                        gene.innovation(),
                        source_index * output_count + (gene.output() - input_count)
                    );
                    assert!((-2.0..=2.0).contains(&gene.weight()));
                }
                for node in genome.nodes().filter(|n| n.node_type() == NodeType::Actuator) {
                    let expected = config
                        .output_activation_types
                        .get(node.id() - input_count)
                        .copied()
                        .unwrap_or(ActivationType::Sigmoid);
                    assert_eq!(node.activation_type(), expected);
                }
            }
        }
    }

    #[test]
    fn new_unconnected() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let genome = NNGenome::new(&config(3, 2), &mut rng);

        assert_eq!(genome.genes().count(), 0);
        assert!(!genome.fully_connected());
    }

    #[test]
    fn add_gene_rejections() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        // Inputs 0 and 1, output 2, bias 3.
        let mut genome = NNGenome::new(&config(2, 1), &mut rng);
        genome.add_node(4, ActivationType::Sigmoid).unwrap();
        genome.add_gene(10, 0, 4, 1.0).unwrap();
        genome.add_gene(11, 4, 2, 1.0).unwrap();

        assert_eq!(
            genome.add_gene(10, 1, 2, 1.0),
            Err(StructuralViolation::DuplicateGeneId(10))
        );
        assert_eq!(
            genome.add_gene(12, 0, 4, 1.0),
            Err(StructuralViolation::DuplicateEndpoints {
                id: 12,
                input: 0,
                output: 4
            })
        );
        assert_eq!(
            genome.add_gene(12, 0, 9, 1.0),
            Err(StructuralViolation::NonexistentEndpoints(0, 9))
        );
        assert_eq!(
            genome.add_gene(12, 2, 4, 1.0),
            Err(StructuralViolation::InvalidSource(2))
        );
        assert_eq!(
            genome.add_gene(12, 4, 1, 1.0),
            Err(StructuralViolation::InvalidDestination(1))
        );
        assert_eq!(
            genome.add_gene(12, 4, 3, 1.0),
            Err(StructuralViolation::InvalidDestination(3))
        );
        assert_eq!(genome.genes().count(), 2);
    }

    #[test]
    fn add_gene_rejects_cycles() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut genome = NNGenome::new(&config(1, 1), &mut rng);
        genome.add_node(3, ActivationType::Sigmoid).unwrap();
        genome.add_node(4, ActivationType::Sigmoid).unwrap();
        genome.add_gene(0, 3, 4, 1.0).unwrap();

        assert_eq!(genome.add_gene(1, 4, 3, 1.0), Err(StructuralViolation::Cycle));
        assert_eq!(genome.add_gene(1, 3, 3, 1.0), Err(StructuralViolation::Cycle));
        assert_eq!(genome.genes().count(), 1);
    }

    #[test]
    fn hidden_nodes_are_layered_by_longest_path() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        // Input 0, output 1, bias 2.
        let mut genome = NNGenome::new(&config(1, 1), &mut rng);
        for id in 3..6 {
            genome.add_node(id, ActivationType::Sigmoid).unwrap();
        }
        genome.add_gene(0, 0, 3, 1.0).unwrap();
        genome.add_gene(1, 3, 4, 1.0).unwrap();
        genome.add_gene(2, 0, 4, 1.0).unwrap();
        genome.add_gene(3, 4, 1, 1.0).unwrap();

        let layer_of = |id| genome.node(id).unwrap().layer();
        assert_eq!(layer_of(0), 0);
        assert_eq!(layer_of(3), 1);
        assert_eq!(layer_of(4), 2);
        // Unconnected hidden nodes sit on the first hidden layer.
        assert_eq!(layer_of(5), 1);
        assert_eq!(layer_of(1), 3);
        assert_eq!(genome.layers(), 4);
    }

    #[test]
    fn disabled_genes_still_shape_layers() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut genome = NNGenome::new(&config(1, 1), &mut rng);
        genome.add_node(3, ActivationType::Sigmoid).unwrap();
        genome.add_node(4, ActivationType::Sigmoid).unwrap();
        genome.add_gene(0, 3, 4, 1.0).unwrap();
        assert!(genome.set_gene_enabled(0, false));

        assert_eq!(genome.node(4).unwrap().layer(), 2);
        assert_layering_is_consistent(&genome);
    }

    #[test]
    fn mutate_add_node_splits_gene() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut config = config(1, 1);
        config.initial_expression_chance = 1.0;
        let mut history = History::new(&config);
        let mut genome = NNGenome::new(&config, &mut rng);
        genome.set_gene_enabled(1, false);

        let weight = genome.genes().next().unwrap().weight();
        let node = genome
            .mutate_add_node(&mut history, &config, &mut rng)
            .unwrap()
            .id();
        assert_eq!(node, 3);
        assert!(!genome.genes().next().unwrap().enabled());

        let into = genome.genes().find(|g| g.endpoints() == (0, 3)).unwrap();
        let out_of = genome.genes().find(|g| g.endpoints() == (3, 1)).unwrap();
        assert_eq!(into.weight(), 1.0);
        assert_eq!(out_of.weight(), weight);
        assert_eq!(into.innovation(), 2);
        assert_eq!(out_of.innovation(), 3);
        assert_layering_is_consistent(&genome);

        // Nothing left enabled to split.
        genome.set_gene_enabled(2, false);
        genome.set_gene_enabled(3, false);
        assert!(genome.mutate_add_node(&mut history, &config, &mut rng).is_none());
    }

    #[test]
    fn identical_splits_share_innovations() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut config = config(1, 1);
        config.initial_expression_chance = 1.0;
        let mut history = History::new(&config);

        let mut a = NNGenome::new(&config, &mut rng);
        let mut b = NNGenome::new(&config, &mut rng);
        a.set_gene_enabled(1, false);
        b.set_gene_enabled(1, false);
        a.mutate_add_node(&mut history, &config, &mut rng);
        b.mutate_add_node(&mut history, &config, &mut rng);

        let innovations = |g: &NNGenome| g.genes().map(|g| (g.innovation(), g.endpoints())).collect::<Vec<_>>();
        assert_eq!(innovations(&a), innovations(&b));
        assert_eq!(
            a.nodes().map(Node::id).collect::<Vec<_>>(),
            b.nodes().map(Node::id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn resplitting_a_gene_allocates_fresh_node() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut config = config(1, 1);
        config.initial_expression_chance = 1.0;
        let mut history = History::new(&config);
        let mut genome = NNGenome::new(&config, &mut rng);
        genome.set_gene_enabled(1, false);

        genome.mutate_add_node(&mut history, &config, &mut rng);
        // Re-enable the split gene and disable the new ones so it is split again.
        genome.set_gene_enabled(0, true);
        genome.set_gene_enabled(2, false);
        genome.set_gene_enabled(3, false);
        let second = genome
            .mutate_add_node(&mut history, &config, &mut rng)
            .unwrap()
            .id();

        assert_eq!(second, 4);
        let mut innovations: Vec<_> = genome.genes().map(Gene::innovation).collect();
        innovations.sort_unstable();
        innovations.dedup();
        assert_eq!(innovations.len(), genome.genes().count());
        assert_layering_is_consistent(&genome);
    }

    #[test]
    fn mutate_add_connection_respects_layers() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let config = config(2, 2);
        let mut history = History::new(&config);
        let mut genome = NNGenome::new(&config, &mut rng);

        // 3 sources into 2 outputs.
        for _ in 0..6 {
            assert!(genome
                .mutate_add_connection(&mut history, &config, &mut rng)
                .is_some());
            assert_layering_is_consistent(&genome);
        }
        assert!(genome.fully_connected());
        assert!(genome
            .mutate_add_connection(&mut history, &config, &mut rng)
            .is_none());
        for gene in genome.genes() {
            assert_eq!(
                history.get_innovation_number(gene.input(), gene.output()),
                gene.innovation()
            );
        }
    }

    #[test]
    fn remove_mutations() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut config = config(2, 1);
        config.initial_expression_chance = 1.0;
        let mut history = History::new(&config);
        let mut genome = NNGenome::new(&config, &mut rng);

        assert!(genome.mutate_remove_node(&mut rng).is_none());
        let node = genome
            .mutate_add_node(&mut history, &config, &mut rng)
            .unwrap()
            .id();

        let (removed, genes) = genome.mutate_remove_node(&mut rng).unwrap();
        assert_eq!(removed.id(), node);
        assert_eq!(genes.len(), 2);
        assert!(genome
            .genes()
            .all(|g| g.input() != node && g.output() != node));
        // The split gene survives, disabled, next to the other two.
        assert_eq!(genome.genes().count(), 3);
        assert_eq!(genome.genes().filter(|g| !g.enabled()).count(), 1);

        let node_count = genome.nodes().count();
        assert!(genome.mutate_remove_connection(&mut rng).is_some());
        assert!(genome.mutate_remove_connection(&mut rng).is_some());
        assert!(genome.mutate_remove_connection(&mut rng).is_some());
        assert!(genome.mutate_remove_connection(&mut rng).is_none());
        assert_eq!(genome.nodes().count(), node_count);
    }

    #[test]
    fn random_mutations_keep_invariants() {
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        let config = GeneticConfig {
            initial_expression_chance: 0.5,
            activation_types: ActivationType::ALL.to_vec(),
            activation_mutate_rate: 0.2,
            weight_mutate_rate: 0.8,
            weight_replace_rate: 0.1,
            weight_init_stdev: 1.0,
            weight_perturbation_scale: 0.5,
            enabled_mutate_rate: 0.1,
            add_node_rate: 0.5,
            add_connection_rate: 0.7,
            remove_node_rate: 0.05,
            remove_connection_rate: 0.05,
            ..config(3, 2)
        };
        let mut history = History::new(&config);
        let mut genome = NNGenome::new(&config, &mut rng);

        for _ in 0..300 {
            genome.mutate(&mut history, &config, &mut rng);
            assert_layering_is_consistent(&genome);

            let mut pairs: Vec<_> = genome.genes().map(Gene::endpoints).collect();
            pairs.sort_unstable();
            pairs.dedup();
            assert_eq!(pairs.len(), genome.genes().count());
            assert!(genome.genes().all(|g| (-2.0..=2.0).contains(&g.weight())));

            let outputs = genome.feed_forward(&[0.5, -0.5, 1.0]).unwrap();
            assert_eq!(outputs.len(), 2);
        }
        assert!(genome.nodes().count() > 6);
    }

    #[test]
    fn crossover_inherits_fitter_structure() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut config = config(2, 1);
        config.initial_expression_chance = 1.0;
        config.add_node_rate = 1.0;
        let mut history = History::new(&config);

        let mut fitter = NNGenome::new(&config, &mut rng);
        let mut other = NNGenome::new(&config, &mut rng);
        fitter.mutate(&mut history, &config, &mut rng);
        other.mutate(&mut history, &config, &mut rng);
        other.mutate(&mut history, &config, &mut rng);

        let child = fitter.crossover(&other, &config, &mut rng);

        assert_eq!(child.fitness(), 0.0);
        assert_eq!(child.genes().count(), fitter.genes().count());
        for (child_gene, gene) in child.genes().zip(fitter.genes()) {
            assert_eq!(child_gene.innovation(), gene.innovation());
            assert_eq!(child_gene.endpoints(), gene.endpoints());
            match other.matching_gene(gene.innovation()) {
                Some(i) => {
                    let other_gene = &other.genes[i];
                    assert!(
                        child_gene.weight() == gene.weight()
                            || child_gene.weight() == other_gene.weight()
                    );
                }
                None => assert_eq!(child_gene, gene),
            }
        }
        assert_eq!(
            child.nodes().map(Node::id).collect::<Vec<_>>(),
            fitter.nodes().map(Node::id).collect::<Vec<_>>()
        );
        assert_layering_is_consistent(&child);
    }

    #[test]
    fn crossover_disabled_inheritance() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut config = config(1, 1);
        config.initial_expression_chance = 1.0;

        let fitter = NNGenome::new(&config, &mut rng);
        let mut other = fitter.clone();
        other.set_gene_enabled(0, false);

        config.disabled_gene_inheritance_chance = 1.0;
        let child = fitter.crossover(&other, &config, &mut rng);
        assert!(!child.genes[0].enabled());
        assert!(child.genes[1].enabled());

        config.disabled_gene_inheritance_chance = 0.0;
        let child = fitter.crossover(&other, &config, &mut rng);
        assert!(child.genes().all(Gene::enabled));
    }

    #[test]
    fn genetic_distance() {
        const EXCESS_FACTOR: f32 = 0.4;
        const DISJOINT_FACTOR: f32 = 0.6;
        const WEIGHT_FACTOR: f32 = 0.8;
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut config = config(2, 1);
        config.excess_gene_factor = EXCESS_FACTOR;
        config.disjoint_gene_factor = DISJOINT_FACTOR;
        config.common_weight_factor = WEIGHT_FACTOR;
        config.distance_normalization_floor = 20;

        // Inputs 0 and 1, output 2, bias 3.
        let mut genome1 = NNGenome::new(&config, &mut rng);
        let mut genome2 = NNGenome::new(&config, &mut rng);
        genome1.add_node(4, ActivationType::Sigmoid).unwrap();
        genome2.add_node(5, ActivationType::Sigmoid).unwrap();

        genome1.add_gene(1, 0, 2, -2.0).unwrap();
        genome2.add_gene(1, 0, 2, 2.0).unwrap();

        genome1.add_gene(2, 1, 4, 5.0).unwrap();
        genome2.add_gene(3, 1, 5, 5.0).unwrap();

        genome1.add_gene(4, 1, 2, 3.0).unwrap();
        genome2.add_gene(4, 1, 2, 6.0).unwrap();

        genome1.add_gene(5, 4, 2, 5.0).unwrap();
        genome2.add_gene(6, 5, 2, 1.0).unwrap();
        genome2.add_gene(7, 3, 5, 1.0).unwrap();

        // Disjoint: 2, 3. Excess (beyond 5): 6, 7. Unmatched 5 is disjoint.
        let expected =
            EXCESS_FACTOR * 2.0 + DISJOINT_FACTOR * 3.0 + WEIGHT_FACTOR * ((4.0 + 3.0) / 2.0);
        assert!((NNGenome::genetic_distance(&genome1, &genome2, &config) - expected).abs() < 1e-5);
        assert!((NNGenome::genetic_distance(&genome2, &genome1, &config) - expected).abs() < 1e-5);
    }

    #[test]
    fn genetic_distance_normalizes_large_genomes() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut config = config(1, 1);
        config.excess_gene_factor = 1.0;
        config.distance_normalization_floor = 2;

        let empty = NNGenome::new(&config, &mut rng);
        let mut full = empty.clone();
        full.add_gene(0, 0, 1, 1.0).unwrap();
        full.add_gene(1, 2, 1, 1.0).unwrap();

        // Two excess genes over two genes.
        assert_eq!(NNGenome::genetic_distance(&empty, &full, &config), 1.0);
        assert_eq!(NNGenome::genetic_distance(&empty, &empty, &config), 0.0);
    }

    #[test]
    fn clone_is_equal() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let mut config = config(2, 2);
        config.initial_expression_chance = 1.0;
        config.add_node_rate = 1.0;
        let mut history = History::new(&config);
        let mut genome = NNGenome::new(&config, &mut rng);
        genome.mutate(&mut history, &config, &mut rng);
        genome.set_fitness(3.5);

        let mut copy = genome.clone();
        assert_eq!(copy, genome);
        assert_eq!(
            copy.feed_forward(&[0.1, 0.2]).unwrap(),
            genome.feed_forward(&[0.1, 0.2]).unwrap()
        );

        copy.set_fitness(1.0);
        assert_ne!(copy, genome);
    }
}
