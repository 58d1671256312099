//! A Population is a collection of genomes.
//! These are grouped into species, which can
//! be evolved using a genome evaluation function
//! as the source of selective pressure.
//!
//! Each call to [`Population::evolve`] runs one generation:
//! [speciation], [ranking], [champion selection],
//! [stagnation culling], [underperformer culling],
//! [survivor selection] and [reproduction]. Each step is
//! also exposed on its own.
//!
//! [speciation]: Population::speciate
//! [ranking]: Population::sort_species
//! [champion selection]: Population::set_best_genome
//! [stagnation culling]: Population::kill_stagnant_species
//! [underperformer culling]: Population::kill_bad_species
//! [survivor selection]: Population::update_species
//! [reproduction]: Population::reproduce_species
mod config;
mod errors;
pub mod logging;
mod offspring_factory;
mod species;

use crate::{Genome, InnovationHistory};
pub use config::PopulationConfig;
pub use errors::ConfigError;
use offspring_factory::OffspringFactory;
pub use species::{Species, SpeciesID};

use rand::Rng;
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

/// Key of a genome within a population.
/// IDs are handed out in increasing order
/// and never reused by the same population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenomeId(pub u64);

/// A population of genomes.
///
/// The population is the sole owner of its genomes;
/// species only hold their IDs. Cloning a population
/// therefore yields species and a champion that refer
/// to the clone's own genomes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Population<C, H, G> {
    genomes: BTreeMap<GenomeId, G>,
    species: Vec<Species>,
    history: H,
    generation: usize,
    next_genome_id: u64,
    historical_species_count: usize,
    best_genome: Option<GenomeId>,
    best_fitness: f32,
    average_fitness: f32,
    population_config: PopulationConfig,
    genetic_config: C,
}

impl<C, H, G> Population<C, H, G>
where
    G: Genome<InnovationHistory = H, Config = C>,
{
    /// Creates a new population using the passed configurations.
    /// It holds [`size`] randomized genomes, not yet speciated.
    ///
    /// The type of `genetic_config` depends on the implementation
    /// of [`Genome`], and is effectively opaque to the population.
    ///
    /// [`size`]: PopulationConfig::size
    /// [`Genome`]: crate::Genome
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::{GeneticConfig, NNGenome as G};
    /// use evoneat::{Population, PopulationConfig};
    /// use std::num::NonZeroUsize;
    ///
    /// let pop_config = PopulationConfig {
    ///     size: NonZeroUsize::new(10).unwrap(),
    ///     ..PopulationConfig::zero()
    /// };
    /// # let genetic_config = GeneticConfig::zero();
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let population = Population::<_, _, G>::new(pop_config, genetic_config, &mut rand::thread_rng());
    ///
    /// assert_eq!(population.genomes().count(), 10);
    /// assert_eq!(population.species().count(), 0);
    /// assert_eq!(population.generation(), 0);
    /// ```
    pub fn new<R: Rng + ?Sized>(
        population_config: PopulationConfig,
        genetic_config: C,
        rng: &mut R,
    ) -> Population<C, H, G>
    where
        H: InnovationHistory<Config = C>,
    {
        let size = population_config.size.get();
        Population {
            genomes: (0..size)
                .map(|i| (GenomeId(i as u64), G::new(&genetic_config, rng)))
                .collect(),
            species: vec![],
            history: H::new(&genetic_config),
            generation: 0,
            next_genome_id: size as u64,
            historical_species_count: 0,
            best_genome: None,
            best_fitness: 0.0,
            average_fitness: 0.0,
            population_config,
            genetic_config,
        }
    }

    /// Creates a new population using the passed configurations,
    /// and seeds it with the specified genomes. Each non-empty group
    /// of genomes is assigned to its own species, with the first as
    /// the species representative. If the number of seed genomes is
    /// not as large as the configured population size, the remaining
    /// space is filled with randomized genomes.
    ///
    /// Returns `None` if either the configured population size is
    /// lesser than the number of seed genomes, or any of the genomes
    /// are incompatible with the specified genetic config, as established
    /// by [`Genome::conforms_to`].
    ///
    /// [`Genome::conforms_to`]: crate::Genome::conforms_to
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::{GeneticConfig, NNGenome};
    /// use evoneat::{Population, PopulationConfig};
    ///
    /// let pop_config = PopulationConfig {
    ///     // Set desired configuration
    ///     size: std::num::NonZeroUsize::new(100).unwrap(),
    ///     ..PopulationConfig::zero()
    /// };
    /// let mut rng = rand::thread_rng();
    /// # let genetic_config = GeneticConfig::zero();
    /// # let g1 = NNGenome::new(&genetic_config, &mut rng);
    /// # let g2 = NNGenome::new(&genetic_config, &mut rng);
    /// # let g3 = NNGenome::new(&genetic_config, &mut rng);
    ///
    /// // With `g1`, `g2` and `g3` of a suitable type implementing `Genome`...
    /// let population = Population::new_seeded(
    ///     vec![vec![g1, g2], vec![g3]],
    ///     pop_config,
    ///     genetic_config,
    ///     &mut rng,
    /// ).unwrap();
    ///
    /// assert_eq!(population.genomes().count(), 100);
    /// assert_eq!(population.species().map(|s| s.len()).collect::<Vec<_>>(), vec![2, 1]);
    /// ```
    pub fn new_seeded<R: Rng + ?Sized>(
        seeds: Vec<Vec<G>>,
        population_config: PopulationConfig,
        genetic_config: C,
        rng: &mut R,
    ) -> Option<Population<C, H, G>>
    where
        H: InnovationHistory<Config = C>,
    {
        let seed_count: usize = seeds.iter().map(Vec::len).sum();
        if population_config.size.get() < seed_count {
            return None;
        }
        if !seeds
            .iter()
            .flatten()
            .all(|g| g.conforms_to(&genetic_config))
        {
            return None;
        }

        let mut population = Population {
            genomes: BTreeMap::new(),
            species: vec![],
            history: H::new(&genetic_config),
            generation: 0,
            next_genome_id: 0,
            historical_species_count: 0,
            best_genome: None,
            best_fitness: 0.0,
            average_fitness: 0.0,
            population_config,
            genetic_config,
        };
        for group in seeds.into_iter().filter(|g| !g.is_empty()) {
            let ids: Vec<GenomeId> = group
                .into_iter()
                .map(|g| population.insert_genome(g))
                .collect();
            if let Some((&representative, rest)) = ids.split_first() {
                let mut species = Species::new(
                    SpeciesID(0, population.historical_species_count),
                    representative,
                );
                species.members.extend_from_slice(rest);
                population.species.push(species);
                population.historical_species_count += 1;
            }
        }
        for _ in seed_count..population.population_config.size.get() {
            let genome = G::new(&population.genetic_config, rng);
            population.insert_genome(genome);
        }
        Some(population)
    }

    /// Adds a genome to the population under a fresh ID.
    fn insert_genome(&mut self, genome: G) -> GenomeId {
        let id = GenomeId(self.next_genome_id);
        self.next_genome_id += 1;
        self.genomes.insert(id, genome);
        id
    }

    /// Evaluates the fitness of each genome in the
    /// population using the passed evaluator.
    ///
    /// The evaluator receives each genome mutably, so
    /// that it may run the genome's phenotype.
    ///
    /// # Panics
    /// Panics if the evaluator returns a negative or NaN fitness.
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::{GeneticConfig, NNGenome as G};
    /// use evoneat::{Population, PopulationConfig};
    ///
    /// # let genetic_config = GeneticConfig::zero();
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut population = Population::<_, _, G>::new(
    ///     PopulationConfig::zero(),
    ///     genetic_config,
    ///     &mut rand::thread_rng(),
    /// );
    ///
    /// population.evaluate_fitness(|g| {
    ///     # // Networks with outputs closer to 0 are given higher scores.
    ///     # let output = g.feed_forward(&[1.0]).unwrap()[0];
    ///     # let fitness = (1.0 - output).powf(2.0);
    ///     // Compute genome's fitness...
    ///     return fitness;
    /// });
    /// ```
    pub fn evaluate_fitness<E>(&mut self, mut evaluator: E)
    where
        E: FnMut(&mut G) -> f32,
    {
        for genome in self.genomes.values_mut() {
            let fitness = evaluator(genome);
            assert!(fitness >= 0.0, "fitness function returned {}", fitness);
            genome.set_fitness(fitness);
        }
    }

    /// Evolves the population by one generation: speciates
    /// all genomes, ranks species, records the champion, culls
    /// stagnant and underperforming species, trims each species
    /// to its survivors, and breeds the next generation from them.
    ///
    /// Fitness should have been [evaluated] beforehand. Whether
    /// the run is solved can be checked afterwards through
    /// [`fitness_threshold_reached`].
    ///
    /// [evaluated]: Population::evaluate_fitness
    /// [`fitness_threshold_reached`]: Population::fitness_threshold_reached
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::{GeneticConfig, NNGenome as G};
    /// use evoneat::{Population, PopulationConfig};
    ///
    /// # let genetic_config = GeneticConfig::zero();
    /// let mut rng = rand::thread_rng();
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut population = Population::<_, _, G>::new(
    ///     PopulationConfig {
    ///         size: std::num::NonZeroUsize::new(20).unwrap(),
    ///         distance_threshold: 1.0,
    ///         survival_threshold: 0.5,
    ///         ..PopulationConfig::zero()
    ///     },
    ///     genetic_config,
    ///     &mut rng,
    /// );
    ///
    /// population.evaluate_fitness(|g| {
    ///     # let fitness = g.feed_forward(&[1.0]).unwrap()[0].abs();
    ///     // Compute genome's fitness...
    ///     return fitness;
    /// });
    /// population.evolve(&mut rng);
    ///
    /// assert_eq!(population.generation(), 1);
    /// assert_eq!(population.genomes().count(), 20);
    /// ```
    pub fn evolve<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.speciate();
        self.sort_species();
        self.set_best_genome();
        self.kill_stagnant_species();
        self.kill_bad_species();
        self.update_species();
        self.reproduce_species(rng);
        log::info!(
            "generation {}: {} species, best fitness {:.3}, average fitness {:.3}",
            self.generation,
            self.species.len(),
            self.best_fitness,
            self.average_fitness,
        );
    }

    /// Assigns every genome to a species.
    ///
    /// Memberships are cleared, then each genome joins the first
    /// species whose representative lies within the
    /// [distance threshold], or founds a new species. Species left
    /// empty are dropped, and representatives that ended up in
    /// another species are replaced by their species' first member.
    ///
    /// [distance threshold]: PopulationConfig::distance_threshold
    pub fn speciate(&mut self) {
        for species in &mut self.species {
            species.members.clear();
        }

        let mut founded = 0;
        for (&id, genome) in &self.genomes {
            let threshold = self.population_config.distance_threshold;
            let genetic_config = &self.genetic_config;
            let genomes = &self.genomes;
            let compatible = self.species.iter_mut().find(|s| {
                genomes.get(&s.representative).map_or(false, |representative| {
                    G::genetic_distance(representative, genome, genetic_config) < threshold
                })
            });
            match compatible {
                Some(species) => species.add_to_species(id),
                None => {
                    self.species.push(Species::new(
                        SpeciesID(self.generation, self.historical_species_count),
                        id,
                    ));
                    self.historical_species_count += 1;
                    founded += 1;
                }
            }
        }

        self.species.retain(|s| !s.members.is_empty());
        for species in &mut self.species {
            if !species.members.contains(&species.representative) {
                species.representative = species.members[0];
            }
        }
        log::debug!(
            "speciated {} genomes into {} species ({} new)",
            self.genomes.len(),
            self.species.len(),
            founded
        );
    }

    /// Ranks every species' members, updates species fitness
    /// and stagnation, and sorts species by decreasing best
    /// fitness. The population's average fitness becomes the
    /// mean of the species' average fitnesses.
    pub fn sort_species(&mut self) {
        for species in &mut self.species {
            species.update_fitness(&self.genomes);
        }
        self.species
            .sort_by(|a, b| b.best_fitness.total_cmp(&a.best_fitness));
        self.average_fitness = self.mean_species_fitness();
    }

    fn mean_species_fitness(&self) -> f32 {
        if self.species.is_empty() {
            0.0
        } else {
            self.species.iter().map(|s| s.average_fitness).sum::<f32>() / self.species.len() as f32
        }
    }

    /// Records the genome with the highest fitness in the
    /// population as its best genome, along with its fitness.
    pub fn set_best_genome(&mut self) {
        match self.champion_entry().map(|(id, g)| (id, g.fitness())) {
            Some((id, fitness)) => {
                self.best_genome = Some(id);
                self.best_fitness = fitness;
            }
            None => self.best_genome = None,
        }
    }

    fn champion_entry(&self) -> Option<(GenomeId, &G)> {
        self.genomes
            .iter()
            .max_by(|(_, a), (_, b)| a.fitness().total_cmp(&b.fitness()))
            .map(|(id, g)| (*id, g))
    }

    /// Removes every species that has gone more than
    /// [`max_stagnation`] generations without improving,
    /// along with its members. The [`species_elitism`] species
    /// with the highest best fitness are spared; ties keep
    /// their current order.
    ///
    /// [`max_stagnation`]: PopulationConfig::max_stagnation
    /// [`species_elitism`]: PopulationConfig::species_elitism
    pub fn kill_stagnant_species(&mut self) {
        let protected = self.population_config.species_elitism;
        let max_stagnation = self.population_config.max_stagnation;
        self.species
            .sort_by(|a, b| b.best_fitness.total_cmp(&a.best_fitness));
        let (kept, stagnant): (Vec<_>, Vec<_>) = std::mem::take(&mut self.species)
            .into_iter()
            .enumerate()
            .partition(|(rank, s)| *rank < protected || s.stagnation <= max_stagnation);
        self.species = kept.into_iter().map(|(_, s)| s).collect();
        if !stagnant.is_empty() {
            log::debug!("culling {} stagnant species", stagnant.len());
        }
        for (_, species) in stagnant {
            self.remove_members(&species);
        }
    }

    /// Removes every species whose average fitness is below
    /// [`bad_species_threshold`] times the mean species average,
    /// along with its members.
    ///
    /// [`bad_species_threshold`]: PopulationConfig::bad_species_threshold
    pub fn kill_bad_species(&mut self) {
        let cutoff = self.population_config.bad_species_threshold * self.mean_species_fitness();
        let (kept, bad): (Vec<_>, Vec<_>) = std::mem::take(&mut self.species)
            .into_iter()
            .partition(|s| s.average_fitness >= cutoff);
        self.species = kept;
        if !bad.is_empty() {
            log::debug!("culling {} underperforming species", bad.len());
        }
        for species in bad {
            self.remove_members(&species);
        }
    }

    fn remove_members(&mut self, species: &Species) {
        for id in &species.members {
            self.genomes.remove(id);
        }
    }

    /// Trims each species to its top members: a fraction
    /// [`survival_threshold`] of them, but no fewer than
    /// [`min_species_size`] (nor than one) where possible.
    /// Discarded members leave the population, and each
    /// species' champion becomes its representative.
    ///
    /// [`survival_threshold`]: PopulationConfig::survival_threshold
    /// [`min_species_size`]: PopulationConfig::min_species_size
    pub fn update_species(&mut self) {
        for species in &mut self.species {
            species.sort_members(&self.genomes);
            let survivors = species.count_survivors(&self.population_config);
            for id in species.members.split_off(survivors) {
                self.genomes.remove(&id);
            }
            if let Some(champion) = species.members.first() {
                species.representative = *champion;
            }
        }
    }

    /// Replaces the population with the next generation.
    ///
    /// Offspring are allotted to species in proportion to their
    /// average fitness, at least [`min_species_size`] each, and
    /// exactly [`size`] in total. The top [`elitism`] members of
    /// each species carry over unchanged, keeping their IDs; every
    /// other slot is filled by mating two members chosen by
    /// fitness-proportional selection. Genomes that are not
    /// carried over leave the population, as do species left
    /// without offspring.
    ///
    /// If no species remain, the population is refilled
    /// with randomized genomes.
    ///
    /// [`min_species_size`]: PopulationConfig::min_species_size
    /// [`size`]: PopulationConfig::size
    /// [`elitism`]: PopulationConfig::elitism
    pub fn reproduce_species<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.species.is_empty() {
            log::warn!("no species left to reproduce, refilling population with new genomes");
            self.genomes.clear();
            for _ in 0..self.population_config.size.get() {
                let genome = G::new(&self.genetic_config, rng);
                self.insert_genome(genome);
            }
            self.best_genome = None;
            self.generation += 1;
            return;
        }

        for species in &mut self.species {
            species.sort_members(&self.genomes);
        }
        let allotted = self.allot_offspring();
        let offspring = OffspringFactory::new(
            &self.species,
            &self.genomes,
            &mut self.history,
            &self.genetic_config,
            &self.population_config,
        )
        .generate_offspring(&allotted, rng);

        let mut previous = std::mem::take(&mut self.genomes);
        let mut next_genome_id = self.next_genome_id;
        for (species, offspring) in self.species.iter_mut().zip(offspring) {
            species.members.clear();
            for id in offspring.elites {
                if let Some(genome) = previous.remove(&id) {
                    self.genomes.insert(id, genome);
                    species.members.push(id);
                }
            }
            for child in offspring.children {
                let id = GenomeId(next_genome_id);
                next_genome_id += 1;
                self.genomes.insert(id, child);
                species.members.push(id);
            }
            if !species.members.contains(&species.representative) {
                if let Some(first) = species.members.first() {
                    species.representative = *first;
                }
            }
        }
        self.next_genome_id = next_genome_id;

        self.species.retain(|s| !s.members.is_empty());
        if let Some(best) = self.best_genome {
            if !self.genomes.contains_key(&best) {
                self.best_genome = None;
            }
        }
        self.generation += 1;
    }

    /// Allots offspring to each species, proportionally to its
    /// average fitness and no fewer than `min_species_size`,
    /// summing exactly to the population size.
    fn allot_offspring(&self) -> Vec<usize> {
        let size = self.population_config.size.get();
        let fitness_sum: f32 = self.species.iter().map(|s| s.average_fitness).sum();
        let shares: Vec<f32> = if fitness_sum > 0.0 {
            self.species
                .iter()
                .map(|s| s.average_fitness / fitness_sum * size as f32)
                .collect()
        } else {
            log::warn!("all species have zero fitness, allotting offspring evenly");
            vec![size as f32 / self.species.len() as f32; self.species.len()]
        };

        let mut allotted = round_retain_sum(&shares);
        for offspring in &mut allotted {
            *offspring = (*offspring).max(self.population_config.min_species_size);
        }

        let mut total: usize = allotted.iter().sum();
        while total > size {
            // Largest allotment first, later species on ties.
            let largest = allotted
                .iter()
                .enumerate()
                .max_by_key(|(i, offspring)| (**offspring, *i))
                .map(|(i, _)| i);
            match largest {
                Some(i) if allotted[i] > 0 => {
                    allotted[i] -= 1;
                    total -= 1;
                }
                _ => break,
            }
        }
        if total < size {
            allotted[0] += size - total;
        }
        allotted
    }

    /// Returns whether the population's best fitness has
    /// reached the [fitness threshold], unless fitness-based
    /// termination is [disabled].
    ///
    /// [fitness threshold]: PopulationConfig::fitness_threshold
    /// [disabled]: PopulationConfig::no_fitness_termination
    pub fn fitness_threshold_reached(&self) -> bool {
        !self.population_config.no_fitness_termination
            && self.best_fitness >= self.population_config.fitness_threshold
    }

    /// Resets the population to an initial randomized state,
    /// with a fresh innovation history.
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::{GeneticConfig, NNGenome as G};
    /// use evoneat::{Population, PopulationConfig};
    ///
    /// # let genetic_config = GeneticConfig::zero();
    /// let mut rng = rand::thread_rng();
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut population = Population::<_, _, G>::new(
    ///     PopulationConfig::zero(),
    ///     genetic_config,
    ///     &mut rng,
    /// );
    ///
    /// // Evolve the population on some task, until it degenerates.
    /// population.reset(&mut rng);
    /// assert_eq!(population.generation(), 0);
    /// ```
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R)
    where
        C: Clone,
        H: InnovationHistory<Config = C>,
    {
        *self = Population::new(
            self.population_config.clone(),
            self.genetic_config.clone(),
            rng,
        );
    }

    /// Returns the currently best-performing genome.
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::{GeneticConfig, NNGenome as G};
    /// use evoneat::{Population, PopulationConfig};
    ///
    /// # let genetic_config = GeneticConfig::zero();
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut population = Population::<_, _, G>::new(
    ///     PopulationConfig {
    ///         size: std::num::NonZeroUsize::new(20).unwrap(),
    ///         ..PopulationConfig::zero()
    ///     },
    ///     genetic_config,
    ///     &mut rand::thread_rng(),
    /// );
    ///
    /// let mut fitness = 0.0;
    /// population.evaluate_fitness(move |_| {
    ///     fitness += 10.0;
    ///     fitness
    /// });
    ///
    /// assert_eq!(population.champion().unwrap().fitness(), 20.0 * 10.0);
    /// ```
    pub fn champion(&self) -> Option<&G> {
        self.champion_entry().map(|(_, g)| g)
    }

    /// Returns the genome recorded by the last call to
    /// [`set_best_genome`], if it is still in the population.
    ///
    /// [`set_best_genome`]: Population::set_best_genome
    pub fn best_genome(&self) -> Option<&G> {
        self.best_genome.and_then(|id| self.genomes.get(&id))
    }

    /// Returns the ID of the genome recorded by the
    /// last call to [`set_best_genome`].
    ///
    /// [`set_best_genome`]: Population::set_best_genome
    pub fn best_genome_id(&self) -> Option<GenomeId> {
        self.best_genome
    }

    /// Returns the fitness recorded by the last
    /// call to [`set_best_genome`].
    ///
    /// [`set_best_genome`]: Population::set_best_genome
    pub fn best_fitness(&self) -> f32 {
        self.best_fitness
    }

    /// Returns the mean of the species' average
    /// fitnesses, as of the last ranking.
    pub fn average_fitness(&self) -> f32 {
        self.average_fitness
    }

    /// Returns an iterator over all current genomes.
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::{GeneticConfig, NNGenome as G};
    /// use evoneat::{Population, PopulationConfig};
    ///
    /// # let genetic_config = GeneticConfig::zero();
    /// // With `G` a suitable type implementing `Genome`...
    /// let population = Population::<_, _, G>::new(
    ///     PopulationConfig::zero(),
    ///     genetic_config,
    ///     &mut rand::thread_rng(),
    /// );
    ///
    /// for genome in population.genomes() {
    ///     println!("{}", genome);
    /// }
    /// ```
    pub fn genomes(&self) -> impl Iterator<Item = &G> {
        self.genomes.values()
    }

    /// Returns an iterator over all current
    /// genomes along with their IDs, in ID order.
    pub fn genomes_with_ids(&self) -> impl Iterator<Item = (GenomeId, &G)> {
        self.genomes.iter().map(|(id, g)| (*id, g))
    }

    /// Returns the genome with the given ID, if
    /// it is part of the population.
    pub fn genome(&self, id: GenomeId) -> Option<&G> {
        self.genomes.get(&id)
    }

    /// Returns an iterator over all current species.
    ///
    /// # Examples
    /// ```
    /// # use evoneat_nn::genomics::{GeneticConfig, NNGenome as G};
    /// use evoneat::{Population, PopulationConfig};
    ///
    /// # let genetic_config = GeneticConfig::zero();
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut population = Population::<_, _, G>::new(
    ///     PopulationConfig::zero(),
    ///     genetic_config,
    ///     &mut rand::thread_rng(),
    /// );
    /// population.speciate();
    ///
    /// for species in population.species() {
    ///     println!(
    ///         "Species {:?} contains the following genomes: {:?}",
    ///         species.id(),
    ///         species.members(),
    ///     );
    /// }
    /// ```
    pub fn species(&self) -> impl Iterator<Item = &Species> {
        self.species.iter()
    }

    /// Returns the best-performing member of `species`.
    pub fn species_champion(&self, species: &Species) -> Option<&G> {
        species
            .champion(&self.genomes)
            .and_then(|id| self.genomes.get(&id))
    }

    /// Returns the current generation number.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns the population's innovation history.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Returns the population's configuration.
    pub fn population_config(&self) -> &PopulationConfig {
        &self.population_config
    }

    /// Returns the configuration handed to genomes.
    pub fn genetic_config(&self) -> &C {
        &self.genetic_config
    }
}

/// Rounds all values to positive whole numbers
/// while preserving their order and sum, assuming it is also whole.
/// Rounding is done in the manner that minimizes
/// the average error to the original set of values.
fn round_retain_sum(values: &[f32]) -> Vec<usize> {
    let total_sum = values.iter().sum::<f32>().round() as usize;
    let mut truncated: Vec<(usize, usize, f32)> = values
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let u = f.floor();
            let e = f - u;
            (i, u as usize, e)
        })
        .collect();
    let truncated_sum: usize = truncated.iter().map(|(_, u, _)| *u).sum();
    let remainder = total_sum.saturating_sub(truncated_sum).min(truncated.len());
    // Sort in decreasing order of error
    truncated.sort_by(|a, b| b.2.total_cmp(&a.2));
    for (_, u, _) in &mut truncated[..remainder] {
        *u += 1;
    }
    truncated.sort_by_key(|(i, ..)| *i);
    truncated.iter().map(|(_, u, _)| *u).collect()
}
