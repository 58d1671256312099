use super::ConfigError;

use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Configuration data for population generation
/// and evolution.
///
/// # Note
/// All quantities expressing fractions should be in
/// the range [0.0, 1.0]. [`validate`] reports values
/// outside their bounds.
///
/// [`validate`]: PopulationConfig::validate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Size of the population.
    pub size: NonZeroUsize,
    /// Genetic distance threshold, beyond which
    /// genomes are considered as belonging to
    /// different species.
    pub distance_threshold: f32,
    /// Top n of each species which is copied
    /// as-is to the next generation.
    pub elitism: usize,
    /// Top n species, ranked by fitness, which are
    /// never culled for stagnation.
    pub species_elitism: usize,
    /// Number of generations a species may go without
    /// improving its best fitness before being culled.
    pub max_stagnation: usize,
    /// Species whose average fitness falls below this
    /// fraction of the mean species average are culled.
    pub bad_species_threshold: f32,
    /// Minimum number of members kept in each species
    /// after culling, and of offspring allotted to it.
    pub min_species_size: usize,
    /// Top % of each species which survives
    /// to take part in mating.
    pub survival_threshold: f32,
    /// Whether evolution should ignore the fitness
    /// threshold as a termination criterion.
    pub no_fitness_termination: bool,
    /// Fitness at which a run is considered solved.
    pub fitness_threshold: f32,
}

impl PopulationConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, false, or in the case of
    /// `NonZeroUsize`s, 1.
    ///
    /// # Note
    /// This value is not suitable for use in most experiments.
    /// It is meant as a way to abbreviate configuration
    /// instantiation, or to fill in unused values.
    ///
    /// # Examples
    /// ```
    /// use evoneat::PopulationConfig;
    ///
    /// let cfg1 = PopulationConfig::zero();
    ///
    /// let cfg2 = PopulationConfig {
    ///     // Specify some values here...
    ///     max_stagnation: 20,
    ///     // Default the rest...
    ///     ..PopulationConfig::zero()
    /// };
    /// ```
    pub const fn zero() -> PopulationConfig {
        PopulationConfig {
            size: NonZeroUsize::MIN,
            distance_threshold: 0.0,
            elitism: 0,
            species_elitism: 0,
            max_stagnation: 0,
            bad_species_threshold: 0.0,
            min_species_size: 0,
            survival_threshold: 0.0,
            no_fitness_termination: false,
            fitness_threshold: 0.0,
        }
    }

    /// Checks that every value is within its bounds.
    ///
    /// # Errors
    /// Returns the first offending value found.
    ///
    /// # Examples
    /// ```
    /// use evoneat::{ConfigError, PopulationConfig};
    ///
    /// assert!(PopulationConfig::default().validate().is_ok());
    ///
    /// let config = PopulationConfig {
    ///     survival_threshold: 1.5,
    ///     ..PopulationConfig::default()
    /// };
    /// assert_eq!(
    ///     config.validate(),
    ///     Err(ConfigError::InvalidFraction { name: "survival_threshold", value: 1.5 })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("survival_threshold", self.survival_threshold),
            ("bad_species_threshold", self.bad_species_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidFraction { name, value });
            }
        }
        for (name, value) in [
            ("distance_threshold", self.distance_threshold),
            ("fitness_threshold", self.fitness_threshold),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        if self.min_species_size > self.size.get() {
            return Err(ConfigError::OversizedSpecies {
                min_species_size: self.min_species_size,
                size: self.size.get(),
            });
        }
        Ok(())
    }
}

impl Default for PopulationConfig {
    /// Values in line with the settings used for
    /// the XOR experiment in the original NEAT paper.
    fn default() -> PopulationConfig {
        PopulationConfig {
            size: NonZeroUsize::new(150).unwrap_or(NonZeroUsize::MIN),
            distance_threshold: 3.0,
            elitism: 1,
            species_elitism: 2,
            max_stagnation: 15,
            bad_species_threshold: 0.2,
            min_species_size: 2,
            survival_threshold: 0.2,
            no_fitness_termination: false,
            fitness_threshold: 15.9,
        }
    }
}
