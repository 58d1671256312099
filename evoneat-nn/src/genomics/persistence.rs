use super::{Gene, NNGenome, Node, NodeType, SerializationError, StructuralViolation};
use crate::networks::Network;
use crate::NodeId;

use ahash::RandomState;
use serde::Deserialize;

use std::collections::HashSet;
use std::convert::TryFrom;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// The serialized form of an [`NNGenome`], checked
/// against every genome invariant before use.
#[derive(Deserialize)]
pub struct GenomeRecord {
    nodes: Vec<Node>,
    genes: Vec<Gene>,
    input_count: usize,
    output_count: usize,
    bias: NodeId,
    #[allow(dead_code)]
    layers: usize,
    fitness: f32,
}

impl TryFrom<GenomeRecord> for NNGenome {
    type Error = StructuralViolation;

    fn try_from(record: GenomeRecord) -> Result<NNGenome, StructuralViolation> {
        let GenomeRecord {
            nodes,
            genes,
            input_count,
            output_count,
            bias,
            fitness,
            ..
        } = record;

        let first_hidden = input_count
            .checked_add(output_count)
            .ok_or(StructuralViolation::MisplacedNode(bias))?;

        let mut ids: HashSet<NodeId, RandomState> = HashSet::default();
        for node in &nodes {
            if !ids.insert(node.id()) {
                return Err(StructuralViolation::DuplicateNodeId(node.id()));
            }
        }
        for node in &nodes {
            let expected = if node.id() < input_count {
                NodeType::Sensor
            } else if node.id() < first_hidden {
                NodeType::Actuator
            } else if node.id() == bias {
                NodeType::Bias
            } else {
                NodeType::Neuron
            };
            if node.node_type() != expected {
                return Err(StructuralViolation::MisplacedNode(node.id()));
            }
        }
        if bias != first_hidden {
            return Err(StructuralViolation::MisplacedNode(bias));
        }
        if let Some(missing) = (0..=bias).find(|id| !ids.contains(id)) {
            return Err(StructuralViolation::MissingNode(missing));
        }

        let mut genome = NNGenome {
            nodes,
            genes: Vec::with_capacity(genes.len()),
            input_count,
            output_count,
            bias,
            layers: 0,
            fitness,
            network: Network::default(),
        };
        for gene in genes {
            genome.check_gene_viability(gene.innovation(), gene.input(), gene.output())?;
            genome.genes.push(gene);
        }
        genome.generate_network()?;
        Ok(genome)
    }
}

impl NNGenome {
    /// Writes the genome to `path`, creating or truncating
    /// the file. The network is not stored; it is rebuilt
    /// on [`load`].
    ///
    /// [`load`]: NNGenome::load
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SerializationError> {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    /// Reads a genome previously written by [`save`].
    ///
    /// [`save`]: NNGenome::save
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or decoded,
    /// or if the decoded genome breaks a structural invariant.
    ///
    /// # Examples
    /// ```no_run
    /// use evoneat_nn::genomics::NNGenome;
    ///
    /// let mut champion = NNGenome::load("champion.bin").unwrap();
    /// println!("{:?}", champion.feed_forward(&[1.0, 0.0]));
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<NNGenome, SerializationError> {
        let reader = BufReader::new(File::open(path)?);
        let record: GenomeRecord = bincode::deserialize_from(reader)?;
        Ok(NNGenome::try_from(record)?)
    }

    /// Encodes the genome into bytes.
    ///
    /// # Examples
    /// ```
    /// use evoneat_nn::genomics::{GeneticConfig, NNGenome};
    ///
    /// let genome = NNGenome::new(&GeneticConfig {
    ///     initial_expression_chance: 1.0,
    ///     ..GeneticConfig::zero()
    /// }, &mut rand::thread_rng());
    ///
    /// let bytes = genome.to_bytes().unwrap();
    /// assert_eq!(NNGenome::from_bytes(&bytes).unwrap(), genome);
    /// ```
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decodes a genome from bytes produced by [`to_bytes`].
    ///
    /// [`to_bytes`]: NNGenome::to_bytes
    ///
    /// # Errors
    /// Returns an error if the bytes cannot be decoded,
    /// or if the decoded genome breaks a structural invariant.
    pub fn from_bytes(bytes: &[u8]) -> Result<NNGenome, SerializationError> {
        let record: GenomeRecord = bincode::deserialize(bytes)?;
        Ok(NNGenome::try_from(record)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::{ActivationType, GeneticConfig, History};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::num::NonZeroUsize;

    fn evolved_genome(seed: u64) -> NNGenome {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let config = GeneticConfig {
            input_count: NonZeroUsize::new(2).unwrap(),
            output_count: NonZeroUsize::new(2).unwrap(),
            initial_expression_chance: 1.0,
            activation_types: vec![ActivationType::Tanh, ActivationType::ReLU],
            weight_min_value: -3.0,
            weight_max_value: 3.0,
            add_node_rate: 0.8,
            add_connection_rate: 0.8,
            enabled_mutate_rate: 0.1,
            ..GeneticConfig::zero()
        };
        let mut history = History::new(&config);
        let mut genome = NNGenome::new(&config, &mut rng);
        for _ in 0..10 {
            genome.mutate(&mut history, &config, &mut rng);
        }
        genome.set_fitness(7.25);
        genome
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genome.bin");
        let mut genome = evolved_genome(0);

        genome.save(&path).unwrap();
        let mut loaded = NNGenome::load(&path).unwrap();

        assert_eq!(loaded, genome);
        assert_eq!(loaded.fitness(), 7.25);
        for inputs in [[0.0, 0.0], [1.0, -1.0], [0.3, 0.9]] {
            assert_eq!(
                loaded.feed_forward(&inputs).unwrap(),
                genome.feed_forward(&inputs).unwrap()
            );
        }
    }

    #[test]
    fn empty_genome_round_trip() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let genome = NNGenome::new(&GeneticConfig::zero(), &mut rng);

        let loaded = NNGenome::from_bytes(&genome.to_bytes().unwrap()).unwrap();
        assert_eq!(loaded, genome);
        assert_eq!(loaded.genes().count(), 0);
    }

    #[test]
    fn json_round_trip() {
        let genome = evolved_genome(3);

        let json = serde_json::to_string(&genome).unwrap();
        let loaded: NNGenome = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded, genome);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            NNGenome::load(dir.path().join("nothing.bin")),
            Err(SerializationError::Io(_))
        ));
    }

    #[test]
    fn truncated_bytes() {
        let bytes = evolved_genome(1).to_bytes().unwrap();
        assert!(matches!(
            NNGenome::from_bytes(&bytes[..bytes.len() / 2]),
            Err(SerializationError::Encoding(_))
        ));
    }

    #[test]
    fn invalid_records_are_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        // Input 0, output 1, bias 2.
        let mut genome = NNGenome::new(&GeneticConfig::zero(), &mut rng);
        genome.add_node(3, ActivationType::Sigmoid).unwrap();
        genome.add_node(4, ActivationType::Sigmoid).unwrap();
        genome.add_gene(7, 3, 4, 1.0).unwrap();
        let json = serde_json::to_value(&genome).unwrap();

        let decode = |value: serde_json::Value| -> Result<NNGenome, StructuralViolation> {
            let record: GenomeRecord = serde_json::from_value(value).unwrap();
            NNGenome::try_from(record)
        };
        assert!(decode(json.clone()).is_ok());

        let mut cyclic = json.clone();
        cyclic["genes"]
            .as_array_mut()
            .unwrap()
            .push(serde_json::to_value(Gene::new(8, 4, 3, 1.0)).unwrap());
        assert_eq!(decode(cyclic), Err(StructuralViolation::Cycle));

        let mut duplicate = json.clone();
        duplicate["genes"]
            .as_array_mut()
            .unwrap()
            .push(serde_json::to_value(Gene::new(7, 0, 1, 1.0)).unwrap());
        assert_eq!(decode(duplicate), Err(StructuralViolation::DuplicateGeneId(7)));

        let mut missing_bias = json.clone();
        missing_bias["nodes"].as_array_mut().unwrap().remove(2);
        assert_eq!(decode(missing_bias), Err(StructuralViolation::MissingNode(2)));

        let mut misplaced = json;
        misplaced["nodes"][0]["node_type"] = serde_json::json!("Neuron");
        assert_eq!(decode(misplaced), Err(StructuralViolation::MisplacedNode(0)));
    }

    #[test]
    fn invalid_bytes_report_structure() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut genome = NNGenome::new(&GeneticConfig::zero(), &mut rng);
        genome.add_node(3, ActivationType::Sigmoid).unwrap();
        let mut bytes = genome.to_bytes().unwrap();

        // The first encoded node id: a u64 after the node count.
        bytes[8] = 3;
        assert!(matches!(
            NNGenome::from_bytes(&bytes),
            Err(SerializationError::Invalid(StructuralViolation::DuplicateNodeId(3)))
        ));
    }

    #[test]
    fn oversized_counts_are_rejected() {
        // nodes, genes, input_count, output_count, bias, layers, fitness
        let bytes = bincode::serialize(&(
            Vec::<Node>::new(),
            Vec::<Gene>::new(),
            usize::MAX,
            1usize,
            0usize,
            0usize,
            0.0f32,
        ))
        .unwrap();

        assert!(matches!(
            NNGenome::from_bytes(&bytes),
            Err(SerializationError::Invalid(StructuralViolation::MisplacedNode(0)))
        ));
    }
}
