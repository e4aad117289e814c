//! Demo configuration.
//!
//! Precedence: command line (or its `TONAL_*` environment variable) >
//! config file > built-in defaults.
//!
//! ```toml
//! bind = "127.0.0.1:8501"
//! variant = "lexicon"
//! artifact = "sentiment_model_multiclass.json"
//! resources = "/usr/share/tonal"
//!
//! [thresholds]
//! positive = 0.05
//! negative = -0.05
//! ```

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use tonal_types::{ConfigError, Thresholds, Variant};

/// Default classifier artifact, resolved against the working directory.
pub const DEFAULT_ARTIFACT: &str = "sentiment_model_multiclass.json";

/// Why the config file could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Command line.
#[derive(Debug, Default, Parser)]
#[command(name = "tonal-demo", version, about = "Single-page sentiment demo")]
pub struct Cli {
    /// TOML config file
    #[arg(short, long, env = "TONAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen address
    #[arg(long, env = "TONAL_BIND")]
    pub bind: Option<SocketAddr>,

    /// Which demo to serve: classifier | lexicon
    #[arg(long, env = "TONAL_VARIANT")]
    pub variant: Option<Variant>,

    /// Classifier artifact (JSON)
    #[arg(long, env = "TONAL_ARTIFACT")]
    pub artifact: Option<PathBuf>,

    /// Directory with stopwords.txt, lemmas.txt, vader_lexicon.txt overrides
    #[arg(long, env = "TONAL_RESOURCES")]
    pub resources: Option<PathBuf>,

    /// Compound score at or above which text is Positive
    #[arg(long, env = "TONAL_POSITIVE_THRESHOLD", allow_hyphen_values = true)]
    pub positive_threshold: Option<f64>,

    /// Compound score at or below which text is Negative
    #[arg(long, env = "TONAL_NEGATIVE_THRESHOLD", allow_hyphen_values = true)]
    pub negative_threshold: Option<f64>,
}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub bind: SocketAddr,
    pub variant: Variant,
    pub artifact: PathBuf,
    pub resources: Option<PathBuf>,
    pub thresholds: Thresholds,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8501)),
            variant: Variant::Classifier,
            artifact: PathBuf::from(DEFAULT_ARTIFACT),
            resources: None,
            thresholds: Thresholds::default(),
        }
    }
}

impl DemoConfig {
    /// Parses a TOML config. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigFileError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigFileError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Config file (if any) with command-line overrides applied, validated.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply(cli);
        config.validate()?;
        Ok(config)
    }

    /// Overrides every field the command line set.
    pub fn apply(&mut self, cli: &Cli) {
        if let Some(bind) = cli.bind {
            self.bind = bind;
        }
        if let Some(variant) = cli.variant {
            self.variant = variant;
        }
        if let Some(artifact) = &cli.artifact {
            self.artifact = artifact.clone();
        }
        if let Some(resources) = &cli.resources {
            self.resources = Some(resources.clone());
        }
        if let Some(positive) = cli.positive_threshold {
            self.thresholds.positive = positive;
        }
        if let Some(negative) = cli.negative_threshold {
            self.thresholds.negative = negative;
        }
    }

    /// Rejects settings no pipeline can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = DemoConfig::default();
        assert_eq!(config.variant, Variant::Classifier);
        assert_eq!(config.artifact, PathBuf::from(DEFAULT_ARTIFACT));
        assert_eq!(config.thresholds, Thresholds::default());
        assert_eq!(config.bind.port(), 8501);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = DemoConfig::from_toml_str(
            r#"
            variant = "lexicon"

            [thresholds]
            positive = 0.2
            "#,
        )
        .unwrap();
        assert_eq!(config.variant, Variant::Lexicon);
        assert_eq!(config.thresholds.positive, 0.2);
        assert_eq!(config.thresholds.negative, -0.05);
        assert_eq!(config.artifact, PathBuf::from(DEFAULT_ARTIFACT));
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(DemoConfig::from_toml_str("colour = \"red\"").is_err());
        assert!(DemoConfig::from_toml_str("[thresholds]\nneutral = 0.0").is_err());
        assert!(DemoConfig::from_toml_str("variant = \"bert\"").is_err());
    }

    #[test]
    fn cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "variant = \"lexicon\"\nbind = \"0.0.0.0:9000\"").unwrap();

        let cli = Cli::parse_from([
            "tonal-demo",
            "--config",
            file.path().to_str().unwrap(),
            "--variant",
            "classifier",
            "--negative-threshold",
            "-0.3",
        ]);
        let config = DemoConfig::resolve(&cli).unwrap();

        assert_eq!(config.variant, Variant::Classifier);
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.thresholds.negative, -0.3);
    }

    #[test]
    fn inverted_thresholds_fail_validation() {
        let cli = Cli {
            positive_threshold: Some(-0.5),
            negative_threshold: Some(0.5),
            ..Cli::default()
        };
        assert!(DemoConfig::resolve(&cli).is_err());
    }

    #[test]
    fn missing_config_file_is_error() {
        let err = DemoConfig::from_file(Path::new("/nonexistent/tonal.toml")).unwrap_err();
        assert!(matches!(err, ConfigFileError::Io { .. }));
    }

    #[test]
    fn variant_aliases_on_command_line() {
        let cli = Cli::parse_from(["tonal-demo", "--variant", "vader"]);
        assert_eq!(cli.variant, Some(Variant::Lexicon));
    }
}
