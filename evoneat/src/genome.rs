use rand::Rng;

/// An interface for genomes that can be used by NEAT.
///
/// All randomness is drawn from the `rng` passed to each
/// operation, so that runs driven by a seeded generator
/// are reproducible.
pub trait Genome: Sized {
    type Config;
    type InnovationHistory: InnovationHistory<Config = Self::Config>;

    /// Returns a randomized genome.
    fn new<R: Rng + ?Sized>(config: &Self::Config, rng: &mut R) -> Self;

    /// Returns whether the genome is structurally
    /// compatible with the configuration, e.g. whether
    /// it has the configured input and output counts.
    fn conforms_to(&self, config: &Self::Config) -> bool;

    /// Returns the genetic distance between two genomes.
    fn genetic_distance(first: &Self, second: &Self, config: &Self::Config) -> f32;

    /// Combines the genome with `other` and returns their child.
    /// `self` is assumed to be the fitter of the two.
    fn crossover<R: Rng + ?Sized>(&self, other: &Self, config: &Self::Config, rng: &mut R)
        -> Self;

    /// Mutates the genome, recording any
    /// structural innovation in `history`.
    fn mutate<R: Rng + ?Sized>(
        &mut self,
        history: &mut Self::InnovationHistory,
        config: &Self::Config,
        rng: &mut R,
    );

    /// Combines two genomes and returns a mutated "child" genome.
    /// The fitter parent (the first one on ties) leads the crossover.
    fn mate<R: Rng + ?Sized>(
        parent1: &Self,
        parent2: &Self,
        history: &mut Self::InnovationHistory,
        config: &Self::Config,
        rng: &mut R,
    ) -> Self {
        let (fitter, other) = if parent2.fitness() > parent1.fitness() {
            (parent2, parent1)
        } else {
            (parent1, parent2)
        };
        let mut child = fitter.crossover(other, config, rng);
        child.mutate(history, config, rng);
        child
    }

    /// Sets the genome's fitness value.
    ///
    /// Should make sure that the fitness value is ≥0;
    /// otherwise NEAT will probably break.
    fn set_fitness(&mut self, fitness: f32);

    /// Returns the genome's fitness value.
    fn fitness(&self) -> f32;
}

/// An Innovation History is used to keep track
/// of genetic innovations throught successive
/// generations of genomes.
///
/// A population owns exactly one history for the
/// whole run, and hands it to every mutation.
pub trait InnovationHistory {
    type Config;

    fn new(config: &Self::Config) -> Self;
}
