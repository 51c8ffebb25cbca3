//! Configuration type definitions

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::autocorrelation::DEFAULT_KERNELS;
use crate::similarity::ScoringWeights;

/// Default OAI-PMH endpoint for arXiv metadata
pub const DEFAULT_BASE_URL: &str = "https://export.arxiv.org/oai2";

/// Default common-word list file
pub const DEFAULT_COMMON_WORDS: &str = "common.txt";

/// Advisor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Path to the `word:rank` common-word list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_words: Option<PathBuf>,

    /// Comparator weights
    #[serde(default)]
    pub scoring: ScoringWeights,

    #[serde(default)]
    pub autocorrelation: AutocorrelationConfig,

    /// Metadata download and cache settings
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Autocorrelation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutocorrelationConfig {
    /// Substring lengths compared at each position
    #[serde(default = "default_kernels")]
    pub kernels: Vec<usize>,
}

impl Default for AutocorrelationConfig {
    fn default() -> Self {
        Self {
            kernels: default_kernels(),
        }
    }
}

fn default_kernels() -> Vec<usize> {
    DEFAULT_KERNELS.to_vec()
}

/// Metadata fetch configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// OAI-PMH endpoint; the `GetRecord` query is appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory holding cached `<id>.xml` records
    #[serde(default = "default_metadata_dir")]
    pub metadata_dir: PathBuf,

    /// Read cached records before going to the network
    #[serde(default = "default_true")]
    pub use_local_copy: bool,

    /// Write downloaded records to the cache
    #[serde(default = "default_true")]
    pub save_local_copy: bool,

    /// Accept identifiers dated after the current year
    #[serde(default)]
    pub allow_future_years: bool,

    /// Whole-request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            metadata_dir: default_metadata_dir(),
            use_local_copy: true,
            save_local_copy: true,
            allow_future_years: false,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_metadata_dir() -> PathBuf {
    PathBuf::from("./metadata")
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}
