use super::{ActivationType, ConfigError};

use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Configuration data for genome generation
/// and inter-genome operations.
///
/// # Note
/// All quantities expressing probabilities
/// should be in the range [0.0, 1.0]. Using
/// values that are not in this bound may result
/// in odd behaviours and/or incorrect programs.
/// [`validate`] checks this, among other things.
///
/// [`validate`]: GeneticConfig::validate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Number of inputs in a genome.
    pub input_count: NonZeroUsize,
    /// Number of outputs in a genome.
    pub output_count: NonZeroUsize,
    /// Possible activation types for hidden nodes in a genome.
    /// If an empty vector is given, nodes will default
    /// to [`Sigmoid`].
    ///
    /// [`Sigmoid`]: crate::genomics::ActivationType
    pub activation_types: Vec<ActivationType>,
    /// Activation types of output nodes in a genome.
    /// If fewer than [`output_count`] are specified,
    /// the default is [`Sigmoid`].
    ///
    /// [`output_count`]: GeneticConfig::output_count
    /// [`Sigmoid`]: crate::genomics::ActivationType
    pub output_activation_types: Vec<ActivationType>,
    /// Whether the bias node is exempt from activation mutation.
    pub fixed_bias_activation: bool,
    /// Chance of a node's activation type being replaced during mutation.
    pub activation_mutate_rate: f32,
    /// Chance that a gene between an input-output node pair
    /// is created during initial genome generation.
    pub initial_expression_chance: f32,
    /// Lower bound of gene weights.
    pub weight_min_value: f32,
    /// Upper bound of gene weights.
    pub weight_max_value: f32,
    /// Mean of the weight perturbation distribution.
    pub weight_init_mean: f32,
    /// Standard deviation of the weight perturbation distribution.
    pub weight_init_stdev: f32,
    /// Factor applied to each sampled weight perturbation.
    pub weight_perturbation_scale: f32,
    /// Chance of a gene weight being perturbed during mutation, if not replaced.
    pub weight_mutate_rate: f32,
    /// Chance of a gene weight being replaced during mutation.
    pub weight_replace_rate: f32,
    /// Chance of a gene's enabled flag being toggled during mutation.
    pub enabled_mutate_rate: f32,
    /// Chance of a node addition mutation taking place during mutation.
    pub add_node_rate: f32,
    /// Chance of a gene addition mutation taking place during mutation.
    pub add_connection_rate: f32,
    /// Chance of a node deletion mutation taking place during mutation.
    pub remove_node_rate: f32,
    /// Chance of a gene deletion mutation taking place during mutation.
    pub remove_connection_rate: f32,
    /// Chance that a gene disabled in either parent is
    /// inherited disabled by their child.
    pub disabled_gene_inheritance_chance: f32,
    /// Weight of excess genes in genetic distance.
    pub excess_gene_factor: f32,
    /// Weight of disjoint genes in genetic distance.
    pub disjoint_gene_factor: f32,
    /// Weight of the common gene weight average in genetic distance.
    pub common_weight_factor: f32,
    /// Genomes with fewer genes than this are not
    /// size-normalized in genetic distance.
    pub distance_normalization_floor: usize,
}

impl GeneticConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, false, empty, or in the case of
    /// `NonZeroUsize`s, 1.
    ///
    /// # Note
    /// This value is not suitable for use in most experiments.
    /// It is meant as a way to fill in unused values during
    /// configuration instantiation.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::GeneticConfig;
    ///
    /// let cfg1 = GeneticConfig::zero();
    ///
    /// let cfg2 = GeneticConfig {
    ///     // Specify some values here...
    ///     add_node_rate: 1.0,
    ///     weight_max_value: 1.0,
    ///     // Default the rest...
    ///     ..GeneticConfig::zero()
    /// };
    /// ```
    pub const fn zero() -> GeneticConfig {
        GeneticConfig {
            input_count: NonZeroUsize::MIN,
            output_count: NonZeroUsize::MIN,
            activation_types: vec![],
            output_activation_types: vec![],
            fixed_bias_activation: false,
            activation_mutate_rate: 0.0,
            initial_expression_chance: 0.0,
            weight_min_value: 0.0,
            weight_max_value: 0.0,
            weight_init_mean: 0.0,
            weight_init_stdev: 0.0,
            weight_perturbation_scale: 0.0,
            weight_mutate_rate: 0.0,
            weight_replace_rate: 0.0,
            enabled_mutate_rate: 0.0,
            add_node_rate: 0.0,
            add_connection_rate: 0.0,
            remove_node_rate: 0.0,
            remove_connection_rate: 0.0,
            disabled_gene_inheritance_chance: 0.0,
            excess_gene_factor: 0.0,
            disjoint_gene_factor: 0.0,
            common_weight_factor: 0.0,
            distance_normalization_floor: 0,
        }
    }

    /// Checks that probabilities lie in [0, 1], that the
    /// weight bounds are ordered, and that the perturbation
    /// parameters are non-negative.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::GeneticConfig;
    ///
    /// assert!(GeneticConfig::default().validate().is_ok());
    /// assert!(GeneticConfig {
    ///     add_node_rate: 1.5,
    ///     ..GeneticConfig::default()
    /// }
    /// .validate()
    /// .is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("activation_mutate_rate", self.activation_mutate_rate),
            ("initial_expression_chance", self.initial_expression_chance),
            ("weight_mutate_rate", self.weight_mutate_rate),
            ("weight_replace_rate", self.weight_replace_rate),
            ("enabled_mutate_rate", self.enabled_mutate_rate),
            ("add_node_rate", self.add_node_rate),
            ("add_connection_rate", self.add_connection_rate),
            ("remove_node_rate", self.remove_node_rate),
            ("remove_connection_rate", self.remove_connection_rate),
            (
                "disabled_gene_inheritance_chance",
                self.disabled_gene_inheritance_chance,
            ),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }

        let non_negatives = [
            ("weight_init_stdev", self.weight_init_stdev),
            ("weight_perturbation_scale", self.weight_perturbation_scale),
            ("excess_gene_factor", self.excess_gene_factor),
            ("disjoint_gene_factor", self.disjoint_gene_factor),
            ("common_weight_factor", self.common_weight_factor),
        ];
        for (name, value) in non_negatives {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { name, value });
            }
        }

        if self.weight_min_value > self.weight_max_value {
            return Err(ConfigError::InvertedWeightBounds {
                min: self.weight_min_value,
                max: self.weight_max_value,
            });
        }
        Ok(())
    }

    /// Clamps a weight into the configured bounds.
    pub(crate) fn clamp_weight(&self, weight: f32) -> f32 {
        weight.max(self.weight_min_value).min(self.weight_max_value)
    }
}

impl Default for GeneticConfig {
    /// A single-input, single-output configuration with
    /// the customary NEAT mutation rates.
    fn default() -> GeneticConfig {
        GeneticConfig {
            activation_types: vec![ActivationType::Sigmoid],
            output_activation_types: vec![],
            fixed_bias_activation: true,
            activation_mutate_rate: 0.0,
            initial_expression_chance: 1.0,
            weight_min_value: -30.0,
            weight_max_value: 30.0,
            weight_init_mean: 0.0,
            weight_init_stdev: 1.0,
            weight_perturbation_scale: 0.02,
            weight_mutate_rate: 0.8,
            weight_replace_rate: 0.1,
            enabled_mutate_rate: 0.01,
            add_node_rate: 0.03,
            add_connection_rate: 0.05,
            remove_node_rate: 0.0,
            remove_connection_rate: 0.0,
            disabled_gene_inheritance_chance: 0.75,
            excess_gene_factor: 1.0,
            disjoint_gene_factor: 1.0,
            common_weight_factor: 0.4,
            distance_normalization_floor: 20,
            ..GeneticConfig::zero()
        }
    }
}
