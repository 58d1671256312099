//! Per-generation snapshots of a population's state.
use super::{Population, SpeciesID};

use crate::Genome;

use std::fmt;

/// Defines different possible reporting levels for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportingLevel {
    /// Clones the entire population.
    AllGenomes,
    /// Clones species and their champions.
    SpeciesChampions,
    /// Clones only the population champion.
    PopulationChampion,
    /// Clones no genomes.
    NoGenomes,
}

/// A snapshot of a population.
#[derive(Clone, Debug)]
pub struct Log<G> {
    pub generation_number: usize,
    pub generation_sample: GenerationMemberRecord<G>,
    pub species_count: usize,
    pub best_fitness: f32,
    /// Named statistics over all genomes. Empty
    /// if the population held no genomes.
    pub genome_stats: Vec<(String, Stats)>,
}

impl<G> fmt::Display for Log<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Log {{")?;
        writeln!(f, "\tgeneration_number: {}", self.generation_number)?;
        writeln!(f, "\tspecies_count: {}", self.species_count)?;
        writeln!(f, "\tbest_fitness: {}", self.best_fitness)?;
        for (name, stats) in &self.genome_stats {
            writeln!(f, "\t{}: {:?}", name, stats)?;
        }
        write!(f, "}}")
    }
}

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub maximum: f32,
    pub minimum: f32,
    pub mean: f32,
    pub median: f32,
}

impl Stats {
    /// Returns statistics about numbers in a sequence,
    /// or `None` if the sequence is empty.
    ///
    /// # Examples
    /// ```
    /// use evoneat::logging::Stats;
    ///
    /// let stats = Stats::from([-2.0, -1.0, 0.5, 1.0, 1.5].iter().copied()).unwrap();
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    ///
    /// assert_eq!(Stats::from(std::iter::empty()), None);
    /// ```
    pub fn from(data: impl Iterator<Item = f32>) -> Option<Stats> {
        let mut data: Vec<f32> = data.collect();
        if data.is_empty() {
            return None;
        }
        data.sort_by(f32::total_cmp);

        let mid = data.len() / 2;
        let median = if data.len() % 2 == 0 {
            (data[mid - 1] + data[mid]) / 2.0
        } else {
            data[mid]
        };
        Some(Stats {
            maximum: data[data.len() - 1],
            minimum: data[0],
            mean: data.iter().sum::<f32>() / data.len() as f32,
            median,
        })
    }
}

/// A reporting-level dependant store
/// of genomes from a population.
#[derive(Clone, Debug)]
pub enum GenerationMemberRecord<G> {
    /// Species IDs, genomes and stagnation level.
    Species(Vec<(SpeciesID, Vec<G>, usize)>),
    /// Only species IDs, species champions, and stagnation level.
    SpeciesChampions(Vec<(SpeciesID, G, usize)>),
    /// Only population champion.
    PopulationChampion(G),
    /// Empty.
    None,
}

/// A log of the evolution of a population over time.
#[derive(Clone, Debug)]
pub struct EvolutionLogger<G> {
    reporting_level: ReportingLevel,
    logs: Vec<Log<G>>,
}

impl<G: Genome + Clone> EvolutionLogger<G> {
    /// Returns a logger with the appropiate reporting level.
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::NNGenome as G;
    /// use evoneat::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let logger = EvolutionLogger::<G>::new(ReportingLevel::NoGenomes);
    /// ```
    pub fn new(reporting_level: ReportingLevel) -> EvolutionLogger<G> {
        EvolutionLogger {
            reporting_level,
            logs: vec![],
        }
    }

    /// Store a snapshot of a population.
    ///
    /// The `genome_stat_extractor` provides a way of
    /// obtaining arbitrary statistics on the population,
    /// where each statistic is named by `stat_names`.
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::{GeneticConfig, NNGenome as G};
    /// use evoneat::{Population, PopulationConfig};
    /// use evoneat::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut logger = EvolutionLogger::<G>::new(ReportingLevel::NoGenomes);
    /// # let genetic_config = GeneticConfig::zero();
    /// let population = Population::<_, _, G>::new(
    ///     PopulationConfig::zero(),
    ///     genetic_config,
    ///     &mut rand::thread_rng(),
    /// );
    ///
    /// // Do something with the population...
    /// // Then log a snapshot.
    /// logger.log(&population, |g| [g.fitness()], ["fitness"]);
    /// assert_eq!(logger.iter().count(), 1);
    /// ```
    pub fn log<C, H, F, const N: usize>(
        &mut self,
        population: &Population<C, H, G>,
        genome_stat_extractor: F,
        stat_names: [&str; N],
    ) where
        G: Genome<InnovationHistory = H, Config = C>,
        F: Fn(&G) -> [f32; N],
    {
        let samples: Vec<[f32; N]> = population.genomes().map(genome_stat_extractor).collect();
        let genome_stats = stat_names
            .iter()
            .map(|name| name.to_string())
            .zip(unzip_n_vecs(samples))
            .filter_map(|(name, data)| Stats::from(data.into_iter()).map(|stats| (name, stats)))
            .collect();

        let generation_sample = match self.reporting_level {
            ReportingLevel::AllGenomes => GenerationMemberRecord::Species(
                population
                    .species()
                    .map(|s| {
                        let members = s
                            .members()
                            .iter()
                            .filter_map(|id| population.genome(*id))
                            .cloned()
                            .collect();
                        (s.id(), members, s.time_stagnated())
                    })
                    .collect(),
            ),
            ReportingLevel::SpeciesChampions => GenerationMemberRecord::SpeciesChampions(
                population
                    .species()
                    .filter_map(|s| {
                        population
                            .species_champion(s)
                            .map(|champion| (s.id(), champion.clone(), s.time_stagnated()))
                    })
                    .collect(),
            ),
            ReportingLevel::PopulationChampion => match population.champion() {
                Some(champion) => GenerationMemberRecord::PopulationChampion(champion.clone()),
                None => GenerationMemberRecord::None,
            },
            ReportingLevel::NoGenomes => GenerationMemberRecord::None,
        };

        self.logs.push(Log {
            generation_number: population.generation(),
            generation_sample,
            species_count: population.species().count(),
            best_fitness: population.best_fitness(),
            genome_stats,
        })
    }

    /// Iterate over all logged snapshots.
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::NNGenome as G;
    /// use evoneat::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let logger = EvolutionLogger::<G>::new(ReportingLevel::AllGenomes);
    /// // Log some stuff... then
    /// for log in logger.iter() {
    ///     println!("{}", log);
    /// }
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = &Log<G>> {
        self.logs.iter()
    }

    /// Returns the most recent snapshot.
    pub fn last(&self) -> Option<&Log<G>> {
        self.logs.last()
    }
}

/// Transposes a sequence of N-arrays into N sequences.
fn unzip_n_vecs<T: Clone, const N: usize>(arrays: Vec<[T; N]>) -> Vec<Vec<T>> {
    let mut vecs = vec![Vec::with_capacity(arrays.len()); N];
    for items in arrays {
        for (vec, item) in vecs.iter_mut().zip(items) {
            vec.push(item);
        }
    }
    vecs
}
