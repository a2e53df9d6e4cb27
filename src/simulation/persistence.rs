//! Generation files: plain text, one feeder per line.
//!
//! ```text
//! <run id>
//! <generation>
//! <name>\t<gene 0>\t<gene 1>\t...\t<gene 4N-1>
//! ```
//!
//! Genes are written with the shortest representation that parses back to the
//! same `f32`, so a save/load round trip reproduces them exactly.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use ndarray::Array1;

use super::error::PersistenceError;
use super::feeder::Feeder;
use super::genes::Genes;
use super::params::Params;

/// One saved feeder: its name and gene vector.
#[derive(Debug, Clone, PartialEq)]
pub struct GenomeEntry {
    /// Feeder name.
    pub name: String,
    /// Controller weights.
    pub genes: Genes,
}

/// Contents of a generation file.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationFile {
    /// Identifier of the run that produced the population.
    pub run_id: u64,
    /// Generation index of the population.
    pub generation: u32,
    /// Saved feeders, in ranking order.
    pub entries: Vec<GenomeEntry>,
}

impl GenerationFile {
    /// Captures names and genes of a population.
    pub fn from_feeders(run_id: u64, generation: u32, feeders: &[Feeder]) -> Self {
        Self {
            run_id,
            generation,
            entries: feeders
                .iter()
                .map(|f| GenomeEntry {
                    name: f.name.clone(),
                    genes: f.genes().clone(),
                })
                .collect(),
        }
    }

    /// Renders the file contents.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.run_id);
        let _ = writeln!(out, "{}", self.generation);
        for entry in &self.entries {
            out.push_str(&entry.name);
            for gene in &entry.genes {
                let _ = write!(out, "\t{gene}");
            }
            out.push('\n');
        }
        out
    }

    /// Parses file contents, checking them against `params`.
    ///
    /// Every agent line must hold exactly `4 * sensor_count` genes and there
    /// must be exactly `population_size` agent lines. Blank lines after the
    /// header are ignored.
    pub fn parse(text: &str, params: &Params) -> Result<Self, PersistenceError> {
        let mut lines = text.lines().enumerate();

        let run_id = parse_header(lines.next(), 1, "run id")?;
        let generation = parse_header(lines.next(), 2, "generation")?;

        let expected = params.gene_len();
        let mut entries = Vec::new();
        for (idx, line) in lines {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            let name = fields.next().unwrap_or_default().to_string();
            let raw: Vec<&str> = fields.collect();
            if raw.len() != expected {
                return Err(PersistenceError::ColumnCount {
                    line: line_no,
                    expected,
                    found: raw.len(),
                });
            }

            let mut genes = Vec::with_capacity(expected);
            for (index, value) in raw.iter().enumerate() {
                match value.trim().parse::<f32>() {
                    Ok(gene) if gene.is_finite() => genes.push(gene),
                    _ => {
                        return Err(PersistenceError::InvalidGene {
                            line: line_no,
                            index,
                            value: (*value).to_string(),
                        });
                    }
                }
            }
            entries.push(GenomeEntry {
                name,
                genes: Array1::from_vec(genes),
            });
        }

        if entries.len() != params.population_size {
            return Err(PersistenceError::PopulationSize {
                expected: params.population_size,
                found: entries.len(),
            });
        }

        Ok(Self {
            run_id,
            generation,
            entries,
        })
    }

    /// Checks an already built file against `params`: population size, gene
    /// count per entry and finite genes.
    pub fn validate(&self, params: &Params) -> Result<(), PersistenceError> {
        let expected = params.gene_len();
        for (entry, genome) in self.entries.iter().enumerate() {
            if genome.genes.len() != expected {
                return Err(PersistenceError::GeneCount {
                    entry,
                    expected,
                    found: genome.genes.len(),
                });
            }
            if let Some(index) = genome.genes.iter().position(|g| !g.is_finite()) {
                return Err(PersistenceError::InvalidGene {
                    line: entry + 3,
                    index,
                    value: genome.genes[index].to_string(),
                });
            }
        }
        if self.entries.len() != params.population_size {
            return Err(PersistenceError::PopulationSize {
                expected: params.population_size,
                found: self.entries.len(),
            });
        }
        Ok(())
    }

    /// Writes the file to disk.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        fs::write(path, self.render()).map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads and parses a file from disk.
    pub fn load(path: impl AsRef<Path>, params: &Params) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, params)
    }
}

fn parse_header<T: std::str::FromStr>(
    line: Option<(usize, &str)>,
    line_no: usize,
    name: &'static str,
) -> Result<T, PersistenceError> {
    let (_, raw) = line.ok_or(PersistenceError::MissingHeader {
        line: line_no,
        name,
    })?;
    raw.trim()
        .parse()
        .map_err(|_| PersistenceError::InvalidHeader {
            line: line_no,
            name,
            value: raw.to_string(),
        })
}

/// Default file name for saving a generation, stamped with the local time.
pub fn default_save_path(run_id: u64, generation: u32) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("feeders_run{run_id}_gen{generation}_{stamp}.txt"))
}
