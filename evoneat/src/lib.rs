//! An implementation of NeuroEvolution of Augmenting Topologies,
//! following the 2002 paper: <http://nn.cs.utexas.edu/keyword?stanley:ec02>
//!
//! The population engine is generic over the [`Genome`] trait, so any
//! genomic structure with a distance, crossover and mutation can be
//! evolved. Genomes live in a single arena owned by the [`Population`];
//! species refer to them by [`GenomeId`]. Each generation goes through
//! speciation, ranking, culling and reproduction, in that order.
//! Generational population logging is also supported, see [`logging`].
//!
//! A neural network-based genome is supplied by the `evoneat-nn` crate.
//!
//! # Example usage: Evolution of XOR function approximator, using `evoneat-nn`
//! ```
//! use evoneat::{Population, PopulationConfig};
//! use evoneat_nn::genomics::{GeneticConfig, NNGenome};
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
//!     let mut errors = [0.0, 0.0, 0.0, 0.0];
//!     for (i, (input, output)) in values.iter().enumerate() {
//!         errors[i] = match genome.feed_forward(input) {
//!             Ok(result) => (result[0] - output).abs(),
//!             Err(_) => 1.0,
//!         };
//!         if errors[i] < ERROR_MARGIN {
//!             errors[i] = 0.0;
//!         }
//!     }
//!
//!     (4.0 - errors.iter().copied().sum::<f32>()).powf(2.0)
//! }
//!
//! let genetic_config = GeneticConfig {
//!     input_count: NonZeroUsize::new(2).unwrap(),
//!     output_count: NonZeroUsize::new(1).unwrap(),
//!     weight_min_value: -5.0,
//!     weight_max_value: 5.0,
//!     ..GeneticConfig::default()
//! };
//!
//! let population_config = PopulationConfig {
//!     size: NonZeroUsize::new(150).unwrap(),
//!     distance_threshold: 3.0,
//!     fitness_threshold: 15.5,
//!     ..PopulationConfig::default()
//! };
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let mut population = Population::<_, _, NNGenome>::new(population_config, genetic_config, &mut rng);
//! for _ in 0..20 {
//!     population.evaluate_fitness(evaluate_xor);
//!     population.evolve(&mut rng);
//!     if population.fitness_threshold_reached() {
//!         if let Some(champion) = population.best_genome() {
//!             println!("Solution found!: {}", champion);
//!         }
//!         break;
//!     }
//! }
//! ```

mod genome;
mod populations;

pub use genome::*;
pub use populations::*;
