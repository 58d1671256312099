use super::*;

use rand::seq::SliceRandom;

/// The next generation of a single species.
pub(super) struct SpeciesOffspring<G> {
    /// Members carried over unchanged.
    pub(super) elites: Vec<GenomeId>,
    /// Newly bred genomes.
    pub(super) children: Vec<G>,
}

/// Auxiliary type for offspring generation.
/// Handles all the tasks of generating a population's
/// offspring according to the specified configs
/// and allotted offspring.
pub(super) struct OffspringFactory<'a, C, H, G> {
    species: &'a [Species],
    genomes: &'a BTreeMap<GenomeId, G>,
    history: &'a mut H,
    genetic_config: &'a C,
    population_config: &'a PopulationConfig,
}

impl<'a, C, H, G> OffspringFactory<'a, C, H, G>
where
    G: Genome<InnovationHistory = H, Config = C>,
{
    pub(super) fn new(
        species: &'a [Species],
        genomes: &'a BTreeMap<GenomeId, G>,
        history: &'a mut H,
        genetic_config: &'a C,
        population_config: &'a PopulationConfig,
    ) -> OffspringFactory<'a, C, H, G> {
        OffspringFactory {
            species,
            genomes,
            history,
            genetic_config,
            population_config,
        }
    }

    /// Generate the allotted offspring, one entry per species.
    /// Species members are expected to be ranked.
    pub(super) fn generate_offspring<R: Rng + ?Sized>(
        &mut self,
        allotted_offspring: &[usize],
        rng: &mut R,
    ) -> Vec<SpeciesOffspring<G>> {
        let all_species = self.species;
        let mut offspring = Vec::with_capacity(all_species.len());
        for (species, allotted) in all_species.iter().zip(allotted_offspring) {
            let elite = species.count_elite(self.population_config).min(*allotted);
            offspring.push(SpeciesOffspring {
                elites: species.members[..elite].to_vec(),
                children: self.mated_offspring(species, allotted - elite, rng),
            });
        }
        offspring
    }

    /// Choose pairs of parents from the species, by
    /// fitness-proportional selection, and mate them.
    fn mated_offspring<R: Rng + ?Sized>(
        &mut self,
        species: &Species,
        offspring: usize,
        rng: &mut R,
    ) -> Vec<G> {
        if species.members.is_empty() {
            if offspring > 0 {
                log::warn!("no eligible parents in species {:?}", species.id());
            }
            return vec![];
        }
        let genomes = self.genomes;
        (0..offspring)
            .map(|_| {
                let parent1 = &genomes[&Self::choose_parent(&species.members, genomes, rng)];
                let parent2 = &genomes[&Self::choose_parent(&species.members, genomes, rng)];
                G::mate(parent1, parent2, self.history, self.genetic_config, rng)
            })
            .collect()
    }

    /// Roulette-wheel selection over the members' fitnesses.
    /// Falls back to a uniform choice if all fitnesses are 0.
    fn choose_parent<R: Rng + ?Sized>(
        members: &[GenomeId],
        genomes: &BTreeMap<GenomeId, G>,
        rng: &mut R,
    ) -> GenomeId {
        match members.choose_weighted(rng, |id| genomes[id].fitness()) {
            Ok(id) => *id,
            Err(_) => members[rng.gen_range(0..members.len())],
        }
    }
}
