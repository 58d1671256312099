use thiserror::Error;

/// An error type for rejected [`PopulationConfig`] values.
///
/// [`PopulationConfig`]: crate::PopulationConfig
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{name}` must be a fraction in [0, 1], got {value}")]
    InvalidFraction { name: &'static str, value: f32 },
    #[error("`{name}` must be non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("`min_species_size` of {min_species_size} exceeds the population size of {size}")]
    OversizedSpecies { min_species_size: usize, size: usize },
}
