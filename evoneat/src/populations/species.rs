use super::GenomeId;
use crate::populations::PopulationConfig;
use crate::Genome;

use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

/// Species identifier. Specifies
/// the generation in which the species
/// was born, and the count of species
/// created in the population before
/// the one identified (i.e, if it was the
/// third species ever created, born in
/// generation 5, it will be species [5, 2]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpeciesID(pub usize, pub usize);

/// Species are collections of reproductively
/// compatible (within a certain [genetic distance])
/// genomes. Membership is determined by calculating
/// the genetic distance to a _representative_, a
/// member of the species chosen each generation.
///
/// Species only refer to their members by [`GenomeId`];
/// the genomes themselves belong to the population.
///
/// Species stagnate after [`max_stagnation`]
/// generations without improving their best fitness,
/// and are thereafter culled.
///
/// [genetic distance]: PopulationConfig::distance_threshold
/// [`max_stagnation`]: PopulationConfig::max_stagnation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub(super) id: SpeciesID,
    pub(super) representative: GenomeId,
    pub(super) members: Vec<GenomeId>,
    pub(super) best_fitness: f32,
    pub(super) average_fitness: f32,
    pub(super) stagnation: usize,
}

impl Species {
    /// Creates a new species with the specified ID and
    /// representative. The representative is also the
    /// species' first member.
    ///
    /// # Examples
    /// ```
    /// use evoneat::{GenomeId, Species, SpeciesID};
    ///
    /// let species = Species::new(SpeciesID(1, 0), GenomeId(7));
    ///
    /// assert_eq!(species.representative(), GenomeId(7));
    /// assert_eq!(species.members(), &[GenomeId(7)]);
    /// ```
    pub fn new(id: SpeciesID, representative: GenomeId) -> Species {
        Species {
            id,
            representative,
            members: vec![representative],
            best_fitness: 0.0,
            average_fitness: 0.0,
            stagnation: 0,
        }
    }

    /// Returns the species' ID.
    pub fn id(&self) -> SpeciesID {
        self.id
    }

    /// Returns the ID of the species' representative.
    pub fn representative(&self) -> GenomeId {
        self.representative
    }

    /// Adds a genome to the species.
    /// The representative is left unchanged.
    ///
    /// # Examples
    /// ```
    /// use evoneat::{GenomeId, Species, SpeciesID};
    ///
    /// let mut species = Species::new(SpeciesID(1, 0), GenomeId(7));
    /// species.add_to_species(GenomeId(9));
    ///
    /// assert_eq!(species.members(), &[GenomeId(7), GenomeId(9)]);
    /// assert_eq!(species.representative(), GenomeId(7));
    /// ```
    pub fn add_to_species(&mut self, genome: GenomeId) {
        self.members.push(genome);
    }

    /// Returns the IDs of the species' members. Once the species
    /// has been ranked, they are in decreasing order of fitness.
    pub fn members(&self) -> &[GenomeId] {
        &self.members
    }

    /// Returns the number of members in the species.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns whether the species has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the best fitness the species has reached.
    pub fn best_fitness(&self) -> f32 {
        self.best_fitness
    }

    /// Returns the species' _member-count adjusted_
    /// fitness. I.e., the average of the species'
    /// genome's fitnesses, as of its last ranking.
    pub fn average_fitness(&self) -> f32 {
        self.average_fitness
    }

    /// Returns the number of generations since the
    /// species' best fitness last improved.
    pub fn time_stagnated(&self) -> usize {
        self.stagnation
    }

    /// Sorts the species' members by fitness in descending order.
    pub(super) fn sort_members<G: Genome>(&mut self, genomes: &BTreeMap<GenomeId, G>) {
        self.members
            .sort_by(|a, b| genomes[b].fitness().total_cmp(&genomes[a].fitness()));
    }

    /// Ranks the species' members and updates its fitness
    /// records: the average member fitness, the best fitness
    /// reached and, through it, stagnation.
    pub(super) fn update_fitness<G: Genome>(&mut self, genomes: &BTreeMap<GenomeId, G>) {
        self.sort_members(genomes);
        if self.members.is_empty() {
            self.average_fitness = 0.0;
            self.stagnation += 1;
            return;
        }

        let fitness_sum: f32 = self.members.iter().map(|id| genomes[id].fitness()).sum();
        self.average_fitness = fitness_sum / self.members.len() as f32;

        let best = genomes[&self.members[0]].fitness();
        if best > self.best_fitness {
            self.best_fitness = best;
            self.stagnation = 0;
        } else {
            self.stagnation += 1;
        }
    }

    /// Returns the ID of the species' best-performing member.
    pub(super) fn champion<G: Genome>(&self, genomes: &BTreeMap<GenomeId, G>) -> Option<GenomeId> {
        self.members
            .iter()
            .copied()
            .max_by(|a, b| genomes[a].fitness().total_cmp(&genomes[b].fitness()))
    }

    /// Number of members carried over unchanged into the next generation.
    pub(super) fn count_elite(&self, config: &PopulationConfig) -> usize {
        self.members.len().min(config.elitism)
    }

    /// Number of top members kept after culling: at least
    /// `min_species_size` and at least one, but never more
    /// than the species has.
    pub(super) fn count_survivors(&self, config: &PopulationConfig) -> usize {
        let by_threshold = (self.members.len() as f32 * config.survival_threshold).ceil() as usize;
        by_threshold
            .max(config.min_species_size)
            .max(1)
            .min(self.members.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::num::NonZeroUsize;

    #[derive(Debug)]
    struct Scored(f32);

    struct NoHistory;

    impl crate::InnovationHistory for NoHistory {
        type Config = ();

        fn new(_: &()) -> NoHistory {
            NoHistory
        }
    }

    impl Genome for Scored {
        type Config = ();
        type InnovationHistory = NoHistory;

        fn new<R: Rng + ?Sized>(_: &(), _: &mut R) -> Scored {
            Scored(0.0)
        }

        fn conforms_to(&self, _: &()) -> bool {
            true
        }

        fn genetic_distance(first: &Scored, second: &Scored, _: &()) -> f32 {
            (first.0 - second.0).abs()
        }

        fn crossover<R: Rng + ?Sized>(&self, _: &Scored, _: &(), _: &mut R) -> Scored {
            Scored(self.0)
        }

        fn mutate<R: Rng + ?Sized>(&mut self, _: &mut NoHistory, _: &(), _: &mut R) {}

        fn set_fitness(&mut self, fitness: f32) {
            self.0 = fitness;
        }

        fn fitness(&self) -> f32 {
            self.0
        }
    }

    fn arena(fitnesses: &[f32]) -> BTreeMap<GenomeId, Scored> {
        fitnesses
            .iter()
            .enumerate()
            .map(|(i, f)| (GenomeId(i as u64), Scored(*f)))
            .collect()
    }

    fn species_of(genomes: &BTreeMap<GenomeId, Scored>) -> Species {
        let mut ids = genomes.keys().copied();
        let mut species = Species::new(SpeciesID(0, 0), ids.next().unwrap());
        for id in ids {
            species.add_to_species(id);
        }
        species
    }

    #[test]
    fn update_fitness_ranks_members() {
        let genomes = arena(&[5.0, 20.0, 10.0]);
        let mut species = species_of(&genomes);

        species.update_fitness(&genomes);

        assert_eq!(species.members(), &[GenomeId(1), GenomeId(2), GenomeId(0)]);
        assert_eq!(species.average_fitness(), (5.0 + 20.0 + 10.0) / 3.0);
        assert_eq!(species.best_fitness(), 20.0);
        assert_eq!(species.time_stagnated(), 0);
        assert_eq!(species.champion(&genomes), Some(GenomeId(1)));
        // Ranking does not move the representative.
        assert_eq!(species.representative(), GenomeId(0));
    }

    #[test]
    fn stagnation_counts_generations_without_improvement() {
        let mut genomes = arena(&[3.0, 4.0]);
        let mut species = species_of(&genomes);

        species.update_fitness(&genomes);
        species.update_fitness(&genomes);
        genomes.get_mut(&GenomeId(0)).unwrap().set_fitness(1.0);
        species.update_fitness(&genomes);
        assert_eq!(species.time_stagnated(), 2);

        genomes.get_mut(&GenomeId(0)).unwrap().set_fitness(4.5);
        species.update_fitness(&genomes);
        assert_eq!(species.time_stagnated(), 0);
        assert_eq!(species.best_fitness(), 4.5);
    }

    #[test]
    fn survivors_respect_minimum_size() {
        let genomes = arena(&[1.0; 11]);
        let species = species_of(&genomes);
        let config = |survival_threshold, min_species_size| PopulationConfig {
            size: NonZeroUsize::new(11).unwrap(),
            survival_threshold,
            min_species_size,
            ..PopulationConfig::zero()
        };

        assert_eq!(species.count_survivors(&config(0.0, 2)), 2);
        assert_eq!(species.count_survivors(&config(0.2, 2)), 3);
        assert_eq!(species.count_survivors(&config(0.0, 0)), 1);
        assert_eq!(species.count_survivors(&config(1.0, 20)), 11);
    }

    #[test]
    fn elite_is_bounded_by_size() {
        let genomes = arena(&[1.0, 2.0]);
        let species = species_of(&genomes);
        let config = PopulationConfig {
            elitism: 5,
            ..PopulationConfig::zero()
        };

        assert_eq!(species.count_elite(&config), 2);
    }
}
