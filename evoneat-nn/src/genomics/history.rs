use super::GeneticConfig;
use crate::{Innovation, NodeId};

use ahash::RandomState;
use evoneat::InnovationHistory;
use serde::{Deserialize, Serialize};

use std::collections::HashMap;

/// A `History` keeps track of gene and node innovations in a
/// population, in order to make sure identical mutations
/// are assigned the same innovation numbers.
///
/// For gene innovations the input and output nodes are used to
/// identify identical mutations, and the corresponding innovation
/// number is recorded.
///
/// For node innovations the split gene is used to identify
/// identical mutations, and the ID of the node inserted in
/// its place is recorded. The genes around the new node are
/// then numbered like any other gene innovation.
///
/// Records are never removed, so numbers are never reused
/// during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    next_gene_innovation: Innovation,
    next_node_id: NodeId,
    gene_innovations: HashMap<(NodeId, NodeId), Innovation, RandomState>,
    node_splits: HashMap<Innovation, NodeId, RandomState>,
}

impl InnovationHistory for History {
    type Config = GeneticConfig;

    fn new(config: &GeneticConfig) -> History {
        Self::new(config)
    }
}

impl History {
    /// Creates a new History using the specified configuration.
    ///
    /// Every gene an initial genome may carry is registered
    /// up-front: the gene from source `s` (the `s`-th input, or
    /// the bias node for `s = input_count`) to the `o`-th output
    /// is given the innovation number `s ⨯ output_count + o`.
    /// Gene innovation numbers handed out afterwards start at
    /// `(input_count + 1) ⨯ output_count`, and node IDs at
    /// `input_count + output_count + 1`.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History};
    /// use std::num::NonZeroUsize;
    ///
    /// let history = History::new(&GeneticConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     output_count: NonZeroUsize::new(3).unwrap(),
    ///     ..GeneticConfig::zero()
    /// });
    ///
    /// assert_eq!(history.max_gene_innovation(), 8);
    /// assert_eq!(history.max_node_id(), 5);
    /// ```
    pub fn new(config: &GeneticConfig) -> History {
        let input_count = config.input_count.get();
        let output_count = config.output_count.get();
        let bias = input_count + output_count;

        let gene_innovations = (0..=input_count)
            // Cartesian product of sources and outputs...
            .flat_map(|s| (0..output_count).map(move |o| (s, o)))
            // ...keyed by node IDs, with the bias as the last source.
            .map(|(s, o)| {
                let source = if s == input_count { bias } else { s };
                ((source, input_count + o), s * output_count + o)
            })
            .collect();

        History {
            next_gene_innovation: (input_count + 1) * output_count,
            next_node_id: bias + 1,
            gene_innovations,
            node_splits: HashMap::default(),
        }
    }

    /// Returns the innovation number of the gene between
    /// `input` and `output`, registering a new one if no
    /// such gene has been seen before.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History};
    ///
    /// let mut history = History::new(&GeneticConfig::zero());
    ///
    /// let innovation = history.get_innovation_number(5, 9);
    /// assert_eq!(history.get_innovation_number(5, 9), innovation);
    /// assert_ne!(history.get_innovation_number(9, 5), innovation);
    /// ```
    pub fn get_innovation_number(&mut self, input: NodeId, output: NodeId) -> Innovation {
        let next_gene_innovation = &mut self.next_gene_innovation;
        *self
            .gene_innovations
            .entry((input, output))
            .or_insert_with(|| {
                let innovation = *next_gene_innovation;
                *next_gene_innovation += 1;
                innovation
            })
    }

    /// Returns the ID of the node that splits `split_gene`.
    ///
    /// The first split of a gene registers a new node ID, which
    /// every later split of the same gene reuses. If `is_taken`
    /// reports the recorded ID as already present in the splitting
    /// genome (it split the same gene before), a fresh ID is
    /// returned instead, and the record is left untouched.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History};
    ///
    /// let mut history = History::new(&GeneticConfig::zero());
    ///
    /// let node = history.split_node_id(0, |_| false);
    /// assert_eq!(history.split_node_id(0, |_| false), node);
    /// assert_ne!(history.split_node_id(0, |id| id == node), node);
    /// ```
    pub fn split_node_id<F>(&mut self, split_gene: Innovation, is_taken: F) -> NodeId
    where
        F: Fn(NodeId) -> bool,
    {
        match self.node_splits.get(&split_gene) {
            Some(&id) if !is_taken(id) => id,
            Some(_) => self.allocate_node_id(&is_taken),
            None => {
                let id = self.allocate_node_id(&is_taken);
                self.node_splits.insert(split_gene, id);
                id
            }
        }
    }

    /// Hands out the next node ID not present in the splitting genome.
    fn allocate_node_id<F>(&mut self, is_taken: &F) -> NodeId
    where
        F: Fn(NodeId) -> bool,
    {
        loop {
            let id = self.next_node_id;
            self.next_node_id += 1;
            if !is_taken(id) {
                return id;
            }
        }
    }

    /// Returns the highest gene innovation number generated.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History};
    ///
    /// let history = History::new(&GeneticConfig::zero());
    ///
    /// // One input and the bias, both wired to one output.
    /// assert_eq!(history.max_gene_innovation(), 1);
    /// ```
    pub fn max_gene_innovation(&self) -> Innovation {
        self.next_gene_innovation - 1
    }

    /// Returns the highest node ID generated.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, History};
    ///
    /// let history = History::new(&GeneticConfig::zero());
    ///
    /// // Input 0, output 1, bias 2.
    /// assert_eq!(history.max_node_id(), 2);
    /// ```
    pub fn max_node_id(&self) -> NodeId {
        self.next_node_id - 1
    }

    /// Returns an iterator over the complete record of
    /// gene innovations, in the format
    /// `((input node, output node), gene innovation)`.
    /// No ordering is guaranteed.
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
    ///
    /// // Add mutations to the history through genome mutation.
    /// NNGenome::new(&config, &mut rng).mutate_add_node(&mut history, &config, &mut rng);
    ///
    /// for ((input_node, output_node), gene) in history.gene_innovation_history() {
    ///     println!("gene innovation with id {} from node {} to node {}",
    ///         gene, input_node, output_node);
    /// }
    /// ```
    pub fn gene_innovation_history(
        &self,
    ) -> impl Iterator<Item = (&(NodeId, NodeId), &Innovation)> {
        self.gene_innovations.iter()
    }

    /// Returns an iterator over the complete record of
    /// node innovations, in the format `(split gene, new node)`.
    /// No ordering is guaranteed.
    pub fn node_split_history(&self) -> impl Iterator<Item = (&Innovation, &NodeId)> {
        self.node_splits.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::num::NonZeroUsize;

    fn config(inputs: usize, outputs: usize) -> GeneticConfig {
        GeneticConfig {
            input_count: NonZeroUsize::new(inputs).unwrap(),
            output_count: NonZeroUsize::new(outputs).unwrap(),
            ..GeneticConfig::zero()
        }
    }

    #[test]
    fn preallocates_initial_layout() {
        for inputs in 1..6 {
            for outputs in 1..6 {
                let history = History::new(&config(inputs, outputs));
                let bias = inputs + outputs;

                assert_eq!(history.gene_innovation_history().count(), (inputs + 1) * outputs);
                for ((input, output), innovation) in history.gene_innovation_history() {
                    let source_index = if *input == bias { inputs } else { *input };
                    assert!(*input < inputs || *input == bias);
                    assert!((inputs..bias).contains(output));
                    assert_eq!(*innovation, source_index * outputs + (output - inputs));
                }
                assert_eq!(history.max_node_id(), bias);
            }
        }
    }

    #[test]
    fn innovation_numbers_are_idempotent_and_distinct() {
        let mut history = History::new(&config(3, 2));
        let first = history.max_gene_innovation() + 1;

        let a = history.get_innovation_number(0, 10);
        let b = history.get_innovation_number(10, 3);
        let c = history.get_innovation_number(1, 10);

        assert_eq!((a, b, c), (first, first + 1, first + 2));
        assert_eq!(history.get_innovation_number(10, 3), b);
        assert_eq!(history.get_innovation_number(0, 3), 0);
        assert_eq!(history.max_gene_innovation(), first + 2);
    }

    #[test]
    fn no_collisions_across_many_pairs() {
        let mut history = History::new(&config(2, 2));
        let mut seen = HashSet::new();
        for input in 0..20 {
            for output in 0..20 {
                let innovation = history.get_innovation_number(input, output);
                let again = history.get_innovation_number(input, output);
                assert_eq!(innovation, again);
                seen.insert(innovation);
            }
        }
        assert_eq!(seen.len(), 400);
    }

    #[test]
    fn splits_share_node_ids() {
        let mut history = History::new(&config(2, 1));

        let node = history.split_node_id(4, |_| false);
        assert_eq!(node, 4);
        assert_eq!(history.split_node_id(4, |_| false), node);

        let other = history.split_node_id(5, |_| false);
        assert_ne!(other, node);

        let fresh = history.split_node_id(4, |id| id == node);
        assert!(fresh > other);
        // The original record survives a duplicate split.
        assert_eq!(history.split_node_id(4, |_| false), node);
        assert_eq!(history.node_split_history().count(), 2);
    }

    #[test]
    fn skips_ids_in_use() {
        let mut history = History::new(&config(1, 1));
        let node = history.split_node_id(0, |id| id == 3 || id == 4);
        assert_eq!(node, 5);
    }
}
