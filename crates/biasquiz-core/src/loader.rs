//! Question bank loader.
//!
//! Tries an ordered list of candidate sources, takes the first one that yields
//! any claims, shuffles them and truncates to the configured limit. Absent or
//! malformed candidates never abort the lookup; they only disqualify
//! themselves.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::config::QuizConfig;
use crate::error::QuizError;
use crate::model::Claim;

/// Maximum number of claims in one quiz unless configured otherwise.
pub const DEFAULT_LIMIT: usize = 10;

/// Candidate locations searched when no source is configured.
pub const DEFAULT_SOURCES: [&str; 3] = [
    "./biases.json",
    "./data/biases.json",
    "./biases/data/biases.json",
];

/// On-disk document layout: `{ "biases": [ ... ] }`.
#[derive(Debug, Deserialize)]
struct ClaimDocument {
    #[serde(default)]
    biases: Vec<Claim>,
}

/// Parse a claim document from a JSON string.
pub fn parse_claims_str(content: &str, source_name: &str) -> Result<Vec<Claim>> {
    let doc: ClaimDocument = serde_json::from_str(content)
        .with_context(|| format!("failed to parse JSON in {source_name}"))?;
    Ok(doc.biases)
}

/// Read and parse a single claim document from disk.
pub fn parse_claims_file(path: &Path) -> Result<Vec<Claim>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read claim file: {}", path.display()))?;
    parse_claims_str(&content, &path.display().to_string())
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// One candidate location for a claim document.
pub trait ClaimSource: Send + Sync {
    /// Human-readable name used in logs and in the no-data message.
    fn name(&self) -> String;

    /// Fetch the raw document. `Ok(None)` means the source does not exist.
    fn fetch(&self) -> io::Result<Option<String>>;
}

/// A claim document stored at a filesystem path.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ClaimSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// A claim document held in memory.
#[derive(Debug, Clone)]
pub struct InlineSource {
    name: String,
    content: String,
}

impl InlineSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

impl ClaimSource for InlineSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn fetch(&self) -> io::Result<Option<String>> {
        Ok(Some(self.content.clone()))
    }
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Produces a shuffled, length-limited claim list from candidate sources.
pub struct ClaimLoader {
    sources: Vec<Box<dyn ClaimSource>>,
    limit: usize,
}

impl std::fmt::Debug for ClaimLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimLoader")
            .field("sources", &self.source_names())
            .field("limit", &self.limit)
            .finish()
    }
}

impl Default for ClaimLoader {
    fn default() -> Self {
        Self::from_paths(DEFAULT_SOURCES.iter().map(PathBuf::from), DEFAULT_LIMIT)
    }
}

impl ClaimLoader {
    /// A loader with no sources yet.
    pub fn new(limit: usize) -> Self {
        Self {
            sources: Vec::new(),
            limit,
        }
    }

    /// A loader over filesystem paths, tried in the given order.
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>, limit: usize) -> Self {
        paths
            .into_iter()
            .fold(Self::new(limit), |loader, p| loader.with_source(FileSource::new(p)))
    }

    pub fn from_config(config: &QuizConfig) -> Self {
        Self::from_paths(config.sources.iter().cloned(), config.limit)
    }

    /// Append a candidate source after the existing ones.
    pub fn with_source(mut self, source: impl ClaimSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Load, shuffle and truncate claims using the thread-local RNG.
    pub fn load(&self) -> Result<Vec<Claim>, QuizError> {
        self.load_with_rng(&mut rand::thread_rng())
    }

    /// Same as [`ClaimLoader::load`] with a caller-supplied RNG.
    pub fn load_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Claim>, QuizError> {
        let Some((name, mut claims)) = self.first_non_empty() else {
            return Err(QuizError::NoData {
                searched: self.source_names(),
            });
        };

        claims.shuffle(rng);
        claims.truncate(self.limit);
        tracing::debug!(source = %name, count = claims.len(), "loaded claims");
        Ok(claims)
    }

    fn first_non_empty(&self) -> Option<(String, Vec<Claim>)> {
        for source in &self.sources {
            let name = source.name();
            let content = match source.fetch() {
                Ok(Some(content)) => content,
                Ok(None) => {
                    tracing::debug!("claim source {name} not found, trying next");
                    continue;
                }
                Err(e) => {
                    tracing::warn!("skipping claim source {name}: {e}");
                    continue;
                }
            };

            match parse_claims_str(&content, &name) {
                Ok(claims) if !claims.is_empty() => return Some((name, claims)),
                Ok(_) => tracing::debug!("claim source {name} has no records, trying next"),
                Err(e) => tracing::warn!("skipping {name}: {e:#}"),
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A warning from claim bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based record position (if applicable).
    pub position: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a claim bank for records that would make a poor quiz.
pub fn validate_claims(claims: &[Claim]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if claims.is_empty() {
        warnings.push(ValidationWarning {
            position: None,
            message: "no records under \"biases\"".into(),
        });
        return warnings;
    }

    let mut seen_titles = std::collections::HashSet::new();
    for (idx, claim) in claims.iter().enumerate() {
        let position = Some(idx + 1);

        if claim.title.trim().is_empty() {
            warnings.push(ValidationWarning {
                position,
                message: "title is empty".into(),
            });
        } else if !seen_titles.insert(claim.title.trim().to_lowercase()) {
            warnings.push(ValidationWarning {
                position,
                message: format!("duplicate title: {}", claim.title),
            });
        }

        if claim.definition.trim().is_empty() {
            warnings.push(ValidationWarning {
                position,
                message: "definition is empty".into(),
            });
        }
    }

    warnings
}
