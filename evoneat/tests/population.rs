use evoneat::{GenomeId, Population, PopulationConfig};
use evoneat_nn::genomics::{ActivationType, GeneticConfig, History, NNGenome};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use std::collections::BTreeSet;
use std::num::NonZeroUsize;

type NNPopulation = Population<GeneticConfig, History, NNGenome>;

fn genetic_config(inputs: usize, outputs: usize) -> GeneticConfig {
    GeneticConfig {
        input_count: NonZeroUsize::new(inputs).unwrap(),
        output_count: NonZeroUsize::new(outputs).unwrap(),
        activation_types: vec![ActivationType::Sigmoid, ActivationType::Tanh],
        add_node_rate: 0.2,
        add_connection_rate: 0.3,
        remove_node_rate: 0.02,
        remove_connection_rate: 0.02,
        ..GeneticConfig::default()
    }
}

fn population_config(size: usize) -> PopulationConfig {
    PopulationConfig {
        size: NonZeroUsize::new(size).unwrap(),
        distance_threshold: 1.0,
        ..PopulationConfig::default()
    }
}

/// Sum of outputs, shifted to stay non-negative.
fn evaluate(genome: &mut NNGenome) -> f32 {
    let (inputs, _) = genome.io_counts();
    match genome.feed_forward(&vec![1.0; inputs]) {
        Ok(outputs) => outputs.iter().map(|o| o + 1.0).sum(),
        Err(_) => 0.0,
    }
}

fn assert_partitioned(population: &NNPopulation) {
    let ids: BTreeSet<GenomeId> = population.genomes_with_ids().map(|(id, _)| id).collect();
    let mut members = BTreeSet::new();
    for species in population.species() {
        assert!(!species.is_empty());
        assert!(species.members().contains(&species.representative()));
        for id in species.members() {
            assert!(members.insert(*id), "{:?} is in two species", id);
        }
    }
    assert_eq!(members, ids);
}

#[test]
fn initial_population() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let population: NNPopulation =
        Population::new(population_config(10), genetic_config(5, 2), &mut rng);

    assert_eq!(population.genomes().count(), 10);
    assert_eq!(population.species().count(), 0);
    assert_eq!(population.generation(), 0);
    for genome in population.genomes() {
        assert_eq!(genome.io_counts(), (5, 2));
        assert_eq!(genome.genes().count(), 12);
        assert_eq!(genome.fitness(), 0.0);
    }
}

#[test]
fn evolution_preserves_invariants() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut population: NNPopulation =
        Population::new(population_config(40), genetic_config(3, 2), &mut rng);

    for generation in 1..=30 {
        population.evaluate_fitness(evaluate);
        population.evolve(&mut rng);

        assert_eq!(population.generation(), generation);
        assert_eq!(population.genomes().count(), 40);
        assert_partitioned(&population);
        for genome in population.genomes() {
            assert_eq!(genome.io_counts(), (3, 2));
            let layer_of = |id| genome.nodes().find(|n| n.id() == id).unwrap().layer();
            for gene in genome.genes() {
                assert!(layer_of(gene.input()) < layer_of(gene.output()));
            }
        }
    }
    assert!(population.best_fitness() > 0.0);
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = |seed| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut population: NNPopulation =
            Population::new(population_config(20), genetic_config(2, 1), &mut rng);
        for _ in 0..10 {
            population.evaluate_fitness(evaluate);
            population.evolve(&mut rng);
        }
        population
    };

    let (first, second) = (run(5), run(5));

    assert!(first.genomes().eq(second.genomes()));
    assert!(first.species().eq(second.species()));
    assert_eq!(first.best_fitness(), second.best_fitness());
    assert_eq!(
        first.history().max_gene_innovation(),
        second.history().max_gene_innovation()
    );
}

#[test]
fn cloned_population_evolves_independently() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut population: NNPopulation =
        Population::new(population_config(20), genetic_config(2, 1), &mut rng);
    for _ in 0..5 {
        population.evaluate_fitness(evaluate);
        population.evolve(&mut rng);
    }

    let snapshot = population.clone();
    population.evaluate_fitness(evaluate);
    population.evolve(&mut rng);

    assert_eq!(snapshot.generation(), 5);
    assert_eq!(population.generation(), 6);
    for species in snapshot.species() {
        for id in species.members() {
            assert!(snapshot.genome(*id).is_some());
        }
    }
}

#[test]
fn seeded_population_keeps_seed_species() {
    let config = genetic_config(2, 1);
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let seeds = vec![
        vec![NNGenome::new(&config, &mut rng), NNGenome::new(&config, &mut rng)],
        vec![NNGenome::new(&config, &mut rng)],
    ];

    let population: NNPopulation =
        Population::new_seeded(seeds, population_config(15), config.clone(), &mut rng).unwrap();

    assert_eq!(population.genomes().count(), 15);
    assert_eq!(population.species().map(|s| s.len()).collect::<Vec<_>>(), vec![2, 1]);

    let foreign = NNGenome::new(&genetic_config(3, 1), &mut rng);
    assert!(
        NNPopulation::new_seeded(vec![vec![foreign]], population_config(15), config, &mut rng)
            .is_none()
    );
}
