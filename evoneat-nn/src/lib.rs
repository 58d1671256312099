//! # evoneat-nn
//! A neural network-based implementation of the [`evoneat`] crate's `Genome` trait.
//!
//! Provides an [`NNGenome`] type usable in `evoneat` `Population`s. Each genome
//! keeps a layered, feed-forward [`Network`] phenotype in sync with its genes,
//! so it can be evaluated directly through [`NNGenome::feed_forward`].
//!
//! [`NNGenome`]: crate::genomics::NNGenome
//! [`NNGenome::feed_forward`]: crate::genomics::NNGenome::feed_forward
//! [`Network`]: crate::networks::Network
//!
//! # Example usage: Evolution of XOR function approximator
//! ```
//! use evoneat::{Population, PopulationConfig};
//! use evoneat_nn::genomics::{ActivationType, GeneticConfig, NNGenome};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use std::num::NonZeroUsize;
//!
//! // Allowed error margin for neural net answers.
//! const ERROR_MARGIN: f32 = 0.3;
//!
//! fn evaluate_xor(genome: &mut NNGenome) -> f32 {
//!     let values = [
//!         ([0.0, 0.0], 0.0),
//!         ([0.0, 1.0], 1.0),
//!         ([1.0, 0.0], 1.0),
//!         ([1.0, 1.0], 0.0),
//!     ];
//!
//!     let mut error_sum = 0.0;
//!     for (input, output) in values.iter() {
//!         let error = match genome.feed_forward(input) {
//!             Ok(result) => (result[0] - output).abs(),
//!             Err(_) => 1.0,
//!         };
//!         if error >= ERROR_MARGIN {
//!             error_sum += error;
//!         }
//!     }
//!
//!     (4.0 - error_sum).powf(2.0)
//! }
//!
//! let genetic_config = GeneticConfig {
//!     input_count: NonZeroUsize::new(2).unwrap(),
//!     output_count: NonZeroUsize::new(1).unwrap(),
//!     activation_types: vec![ActivationType::Sigmoid],
//!     output_activation_types: vec![ActivationType::Sigmoid],
//!     ..GeneticConfig::default()
//! };
//!
//! let population_config = PopulationConfig {
//!     size: NonZeroUsize::new(50).unwrap(),
//!     fitness_threshold: 16.0,
//!     ..PopulationConfig::default()
//! };
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let mut population = Population::<_, _, NNGenome>::new(population_config, genetic_config, &mut rng);
//! for _ in 0..10 {
//!     population.evaluate_fitness(evaluate_xor);
//!     population.evolve(&mut rng);
//!     if population.fitness_threshold_reached() {
//!         if let Some(champion) = population.best_genome() {
//!             println!("Solution found!: {}", champion);
//!         }
//!         break;
//!     }
//! }
//! assert!(population.genomes().count() <= 50);
//! ```

pub mod genomics;
pub mod networks;

/// Identifier type used to designate historically
/// identical gene mutations for the purposes of
/// genome comparison and genetic tracking.
pub type Innovation = usize;

/// Identifier of a node within a genome. Inputs take
/// ids `0..I`, outputs `I..I+O`, and the bias node `I+O`.
/// Hidden node ids are handed out by the population's
/// [`History`](crate::genomics::History).
pub type NodeId = usize;
