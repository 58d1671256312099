use super::GeneticConfig;
use crate::{Innovation, NodeId};

use std::fmt;

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Genes are the principal components of genomes.
/// They are created between two nodes, and become
/// network connections in the genome's phenotype.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Gene {
    id: Innovation,
    input: NodeId,
    output: NodeId,
    weight: f32,
    enabled: bool,
}

impl Gene {
    /// Returns a new _enabled_ gene with the specified parameters.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::Gene;
    ///
    /// let gene = Gene::new(42, 3, 9, 2.0);
    /// ```
    pub fn new(id: Innovation, input: NodeId, output: NodeId, weight: f32) -> Gene {
        Gene {
            id,
            input,
            output,
            weight,
            enabled: true,
        }
    }

    /// Returns a random weight, drawn uniformly from
    /// [`weight_min_value`, `weight_max_value`].
    pub(super) fn random_weight<R: Rng + ?Sized>(config: &GeneticConfig, rng: &mut R) -> f32 {
        let upper = config.weight_max_value.max(config.weight_min_value);
        rng.gen_range(config.weight_min_value..=upper)
    }

    /// Mutates the gene. With probability [`weight_replace_rate`]
    /// the weight is [randomized]; otherwise, with probability
    /// [`weight_mutate_rate`], it is [perturbed]. Independently,
    /// the gene's enabled flag is toggled with probability
    /// [`enabled_mutate_rate`].
    ///
    /// [`weight_replace_rate`]: GeneticConfig::weight_replace_rate
    /// [`weight_mutate_rate`]: GeneticConfig::weight_mutate_rate
    /// [`enabled_mutate_rate`]: GeneticConfig::enabled_mutate_rate
    /// [randomized]: Gene::randomize_weight
    /// [perturbed]: Gene::perturb_weight
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{Gene, GeneticConfig};
    ///
    /// let mut gene = Gene::new(42, 3, 9, 2.0);
    ///
    /// gene.mutate(&GeneticConfig {
    ///     enabled_mutate_rate: 1.0,
    ///     ..GeneticConfig::zero()
    /// }, &mut rand::thread_rng());
    ///
    /// assert_eq!(gene.weight(), 2.0);
    /// assert!(!gene.enabled());
    /// ```
    pub fn mutate<R: Rng + ?Sized>(&mut self, config: &GeneticConfig, rng: &mut R) {
        if rng.gen::<f32>() < config.weight_replace_rate {
            self.randomize_weight(config, rng);
        } else if rng.gen::<f32>() < config.weight_mutate_rate {
            self.perturb_weight(config, rng);
        }
        if rng.gen::<f32>() < config.enabled_mutate_rate {
            self.enabled = !self.enabled;
        }
    }

    /// Randomizes the gene's weight. Uses a uniform
    /// distribution over [`weight_min_value`, `weight_max_value`].
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{Gene, GeneticConfig};
    ///
    /// let mut gene = Gene::new(42, 3, 9, 2.0);
    ///
    /// gene.randomize_weight(&GeneticConfig {
    ///     weight_min_value: -5.0,
    ///     weight_max_value: -1.0,
    ///     ..GeneticConfig::zero()
    /// }, &mut rand::thread_rng());
    ///
    /// assert!((-5.0..=-1.0).contains(&gene.weight()));
    /// ```
    pub fn randomize_weight<R: Rng + ?Sized>(&mut self, config: &GeneticConfig, rng: &mut R) {
        self.weight = Self::random_weight(config, rng);
    }

    /// Nudges the gene's weight by a sample of
    /// `Normal(weight_init_mean, weight_init_stdev)`
    /// scaled by [`weight_perturbation_scale`]. The
    /// result is clamped into the configured weight bounds.
    ///
    /// [`weight_perturbation_scale`]: GeneticConfig::weight_perturbation_scale
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{Gene, GeneticConfig};
    ///
    /// let mut gene = Gene::new(42, 3, 9, 3.0);
    ///
    /// gene.perturb_weight(&GeneticConfig {
    ///     weight_init_mean: 50.0,
    ///     weight_perturbation_scale: 0.02,
    ///     weight_min_value: -5.0,
    ///     weight_max_value: 5.0,
    ///     ..GeneticConfig::zero()
    /// }, &mut rand::thread_rng());
    ///
    /// assert_eq!(gene.weight(), 4.0);
    /// ```
    pub fn perturb_weight<R: Rng + ?Sized>(&mut self, config: &GeneticConfig, rng: &mut R) {
        let delta = match Normal::new(config.weight_init_mean, config.weight_init_stdev) {
            Ok(normal) => normal.sample(rng),
            Err(_) => config.weight_init_mean,
        };
        self.weight = config.clamp_weight(self.weight + delta * config.weight_perturbation_scale);
    }

    /// Returns a copy of the gene between different endpoints,
    /// keeping its innovation number, weight and enabled flag.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::Gene;
    ///
    /// let gene = Gene::new(42, 3, 9, 2.0);
    /// let copy = gene.clone_between(4, 10);
    ///
    /// assert_eq!(copy.innovation(), 42);
    /// assert_eq!(copy.endpoints(), (4, 10));
    /// assert_eq!(copy.weight(), 2.0);
    /// ```
    pub fn clone_between(&self, input: NodeId, output: NodeId) -> Gene {
        Gene {
            input,
            output,
            ..self.clone()
        }
    }

    /// Returns the gene's innovation number.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::Gene;
    ///
    /// let gene = Gene::new(42, 3, 9, 2.0);
    ///
    /// assert_eq!(gene.innovation(), 42);
    /// ```
    pub fn innovation(&self) -> Innovation {
        self.id
    }

    /// Returns the gene's input node's ID.
    pub fn input(&self) -> NodeId {
        self.input
    }

    /// Returns the gene's output node's ID.
    pub fn output(&self) -> NodeId {
        self.output
    }

    /// Returns the gene's input and output node IDs.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.input, self.output)
    }

    /// Returns the gene's weight.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Sets the gene's weight.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::Gene;
    ///
    /// let mut gene = Gene::new(42, 3, 9, 2.0);
    ///
    /// gene.set_weight(-5.0);
    ///
    /// assert_eq!(gene.weight(), -5.0);
    /// ```
    pub fn set_weight(&mut self, w: f32) {
        self.weight = w;
    }

    /// Returns whether the gene is expressed in the network.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::Gene;
    ///
    /// let gene = Gene::new(42, 3, 9, 2.0);
    ///
    /// assert!(gene.enabled());
    /// ```
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the gene's enabled flag.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:?}[{:?}->{:?}, {:.3}]{}",
            if self.enabled { "" } else { "(" },
            self.id,
            self.input,
            self.output,
            self.weight,
            if self.enabled { "" } else { ")" },
        )
    }
}
