use evoneat::logging::{EvolutionLogger, ReportingLevel, Stats};
use evoneat::{Population, PopulationConfig};
use evoneat_nn::genomics::{ActivationType, GeneticConfig, History, NNGenome};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

use std::error::Error;
use std::num::NonZeroUsize;
use std::path::PathBuf;

type XorPopulation = Population<GeneticConfig, History, NNGenome>;

const ERROR_MARGIN: f32 = 0.3;

/// Settings for a batch of XOR runs, loadable from a RON file.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct Experiment {
    seed: u64,
    runs: usize,
    max_generations: usize,
    champion_path: Option<PathBuf>,
    genetic: GeneticConfig,
    population: PopulationConfig,
}

impl Default for Experiment {
    fn default() -> Experiment {
        Experiment {
            seed: 0,
            runs: 20,
            max_generations: 300,
            champion_path: None,
            genetic: GeneticConfig {
                input_count: NonZeroUsize::new(2).unwrap_or(NonZeroUsize::MIN),
                output_count: NonZeroUsize::MIN,
                activation_types: vec![ActivationType::Sigmoid],
                output_activation_types: vec![ActivationType::Sigmoid],
                ..GeneticConfig::default()
            },
            population: PopulationConfig {
                fitness_threshold: 16.0,
                ..PopulationConfig::default()
            },
        }
    }
}

fn evaluate_xor(genome: &mut NNGenome) -> f32 {
    let values = [
        ([0.0, 0.0], 0.0),
        ([0.0, 1.0], 1.0),
        ([1.0, 0.0], 1.0),
        ([1.0, 1.0], 0.0),
    ];

    let mut errors = [0.0; 4];
    for (i, (input, output)) in values.iter().enumerate() {
        errors[i] = match genome.feed_forward(input) {
            Ok(result) => (result[0] - output).abs(),
            Err(_) => 1.0,
        };
        if errors[i] < ERROR_MARGIN {
            errors[i] = 0.0;
        }
    }

    (4.0 - errors.iter().copied().sum::<f32>()).powf(2.0)
}

/// Evolves a population until it solves XOR or runs out of
/// generations. Returns the population and whether it succeeded.
fn run(experiment: &Experiment, seed: u64) -> (XorPopulation, bool) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut logger = EvolutionLogger::new(ReportingLevel::NoGenomes);
    let mut population: XorPopulation = Population::new(
        experiment.population.clone(),
        experiment.genetic.clone(),
        &mut rng,
    );

    for _ in 0..experiment.max_generations {
        population.evaluate_fitness(evaluate_xor);
        population.evolve(&mut rng);
        logger.log(
            &population,
            |g| [g.fitness(), g.nodes().count() as f32, g.genes().count() as f32],
            ["fitness", "nodes", "genes"],
        );
        if let Some(log) = logger.last() {
            log::debug!("{}", log);
        }
        if population.fitness_threshold_reached() {
            return (population, true);
        }
    }
    (population, false)
}

fn load_experiment() -> Result<Experiment, Box<dyn Error>> {
    let experiment: Experiment = match std::env::args_os().nth(1) {
        Some(path) => {
            log::info!("loading experiment from {:?}", path);
            ron::from_str(&std::fs::read_to_string(path)?)?
        }
        None => Experiment::default(),
    };
    experiment.genetic.validate()?;
    experiment.population.validate()?;
    Ok(experiment)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let experiment = load_experiment()?;

    let mut generations = vec![];
    let mut champion: Option<NNGenome> = None;
    for i in 0..experiment.runs {
        let seed = experiment.seed.wrapping_add(i as u64);
        let (population, solved) = run(&experiment, seed);
        if solved {
            log::info!("run {} solved XOR in {} generations", i, population.generation());
            generations.push(population.generation() as f32);
            if champion.is_none() {
                champion = population.best_genome().cloned();
            }
        } else {
            log::warn!(
                "run {} failed, best fitness {:.3}",
                i,
                population.best_fitness()
            );
        }
    }

    let failures = experiment.runs - generations.len();
    println!(
        "Successful run generation count {:?}, {}% failure rate over {} runs",
        Stats::from(generations.into_iter()),
        failures as f32 * 100.0 / experiment.runs.max(1) as f32,
        experiment.runs
    );

    if let Some(mut champion) = champion {
        println!("{}", ron::ser::to_string_pretty(&champion, Default::default())?);
        for input in [[0.0f32, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]] {
            println!("{:?} -> {:?}", input, champion.feed_forward(&input)?);
        }
        if let Some(path) = &experiment.champion_path {
            champion.save(path)?;
            log::info!("champion saved to {}", path.display());
        }
    }
    Ok(())
}
