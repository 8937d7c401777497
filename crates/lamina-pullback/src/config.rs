//! Lamination descriptions: base, branch specs and initial leaves.
//!
//! A description is read with the `config` crate from a TOML, JSON or YAML
//! file and layered with `LAMINA_*` environment overrides. Points are written
//! in fraction text syntax (`"_001"`, `"1_010"`, `"3,11_"`) and only turned
//! into domain values by [`LaminationConfig::resolve`], which reports every
//! problem it finds at once.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use lamina_branch::BranchSpec;
use lamina_core::error::{ConfigError, LaminaError};
use lamina_core::{Chord, CircularFraction, Polygon};

/// Default number of generations to compute.
pub const DEFAULT_GENERATIONS: usize = 3;

/// Prefix for environment overrides, e.g. `LAMINA_GENERATIONS=5`.
pub const ENV_PREFIX: &str = "LAMINA";

/// One branch spec as written in a description file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchEntry {
    /// The two chord endpoints.
    pub chord: Vec<String>,
    /// Endpoints the branch claims.
    #[serde(default)]
    pub endpoints: Vec<String>,
    #[serde(default)]
    pub flip: bool,
}

/// Serialisable description of a lamination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaminationConfig {
    pub base: u32,
    #[serde(default = "default_generations")]
    pub generations: usize,
    #[serde(default)]
    pub branches: Vec<BranchEntry>,
    #[serde(default)]
    pub leaves: Vec<Vec<String>>,
}

fn default_generations() -> usize {
    DEFAULT_GENERATIONS
}

/// A description converted to domain values.
#[derive(Debug, Clone)]
pub struct LaminationSetup {
    pub base: u32,
    pub generations: usize,
    pub specs: Vec<BranchSpec>,
    pub leaves: Vec<Polygon>,
}

impl LaminationSetup {
    /// Load and resolve the description at `path`, with `LAMINA_*` overrides.
    pub fn open(path: &Path) -> Result<Self, LaminaError> {
        Self::open_with_env(path, ENV_PREFIX)
    }

    pub fn open_with_env(path: &Path, prefix: &str) -> Result<Self, LaminaError> {
        Ok(LaminationConfig::load_with_env(path, prefix)?.resolve()?)
    }
}

/// The binary rabbit: one critical diameter from 1/7 to 9/14 and the
/// period-3 triangle.
impl Default for LaminationConfig {
    fn default() -> Self {
        Self {
            base: 2,
            generations: DEFAULT_GENERATIONS,
            branches: vec![BranchEntry {
                chord: vec!["_001".to_string(), "1_010".to_string()],
                endpoints: vec!["_001".to_string()],
                flip: false,
            }],
            leaves: vec![vec!["_001".to_string(), "_010".to_string(), "_100".to_string()]],
        }
    }
}

impl LaminationConfig {
    /// `<config dir>/lamina/lamination.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lamina")
            .join("lamination.toml")
    }

    /// Read `path` (format from its extension) plus `LAMINA_*` overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(path, ENV_PREFIX)
    }

    /// Read `path` with overrides from variables named `<prefix>_<FIELD>`.
    pub fn load_with_env(path: &Path, prefix: &str) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix(prefix).try_parsing(true));
        Self::build(builder)
    }

    /// Read a description from TOML text alone. The environment is not
    /// consulted.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let builder = config::Config::builder().add_source(config::File::from_str(text, config::FileFormat::Toml));
        Self::build(builder)
    }

    fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self, ConfigError> {
        builder
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(|e| ConfigError::Load(e.to_string()))
    }

    /// Parse every point and assemble the branch specs and leaves.
    pub fn resolve(&self) -> Result<LaminationSetup, ConfigError> {
        if let Err(source) = CircularFraction::zero(self.base) {
            return Err(ConfigError::Fraction {
                field: "base".to_string(),
                source,
            });
        }

        let mut errors = Vec::new();
        if self.branches.len() > self.base as usize {
            errors.push(ConfigError::TooManyBranches {
                got: self.branches.len(),
                base: self.base,
            });
        }

        let mut specs = Vec::with_capacity(self.branches.len());
        for (i, entry) in self.branches.iter().enumerate() {
            let field = format!("branches[{i}]");
            let chord = self.points(&format!("{field}.chord"), &entry.chord, &mut errors);
            let endpoints = self.points(&format!("{field}.endpoints"), &entry.endpoints, &mut errors);

            if entry.chord.len() != 2 {
                errors.push(ConfigError::ChordArity {
                    field: format!("{field}.chord"),
                    got: entry.chord.len(),
                });
            }

            if let Ok([a, b]) = <[CircularFraction; 2]>::try_from(chord) {
                let spec = BranchSpec::new(Chord::new(a, b), endpoints);
                specs.push(if entry.flip { spec.flipped() } else { spec });
            }
        }

        let leaves = self
            .leaves
            .iter()
            .enumerate()
            .map(|(i, texts)| Polygon::new(self.points(&format!("leaves[{i}]"), texts, &mut errors)))
            .collect();

        if !errors.is_empty() {
            return Err(ConfigError::Invalid(errors));
        }
        Ok(LaminationSetup {
            base: self.base,
            generations: self.generations,
            specs,
            leaves,
        })
    }

    fn points(&self, field: &str, texts: &[String], errors: &mut Vec<ConfigError>) -> Vec<CircularFraction> {
        let mut points = Vec::with_capacity(texts.len());
        for (i, text) in texts.iter().enumerate() {
            match CircularFraction::parse(self.base, text) {
                Ok(point) => points.push(point),
                Err(source) => errors.push(ConfigError::Fraction {
                    field: format!("{field}[{i}]"),
                    source,
                }),
            }
        }
        points
    }
}
