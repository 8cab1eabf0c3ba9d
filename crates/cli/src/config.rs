use anyhow::{Context, Result, anyhow};
use resolver::{PathResolver, StrategyChain, StrategyKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = ".solresolve.yml";

/// Main configuration structure for solresolve
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolResolveConfig {
    /// Resolution settings
    #[serde(default)]
    pub resolver: ResolverSettings,

    /// Output configuration
    #[serde(default)]
    pub output: OutputSettings,
}

/// How imports are resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Never search above this directory
    pub ceiling: Option<PathBuf>,

    /// Parse each directory's remappings once per run
    pub cache_config: bool,

    /// Strategies to run; they always run in the standard order
    pub strategies: Vec<StrategyKind>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            ceiling: None,
            cache_config: true,
            strategies: StrategyKind::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

/// Output format for resolution results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
}

impl OutputFormat {
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Some(OutputFormat::Console),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

impl SolResolveConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: SolResolveConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Use `config_file` if given, otherwise `.solresolve.yml` in the working
    /// directory if present, otherwise defaults
    pub fn load_from_defaults_and_file(config_file: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_file {
            return Self::load_from_file(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            tracing::debug!("Using config file {}", default_path.display());
            return Self::load_from_file(default_path);
        }

        Ok(Self::default())
    }

    /// Write a default configuration file
    pub fn create_default_config_file<P: AsRef<Path>>(path: P) -> Result<()> {
        Self::default().save_to_file(path)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let strategies = &self.resolver.strategies;
        if strategies.is_empty() {
            return Err(anyhow!("At least one resolution strategy must be enabled"));
        }

        for (i, kind) in strategies.iter().enumerate() {
            if strategies[..i].contains(kind) {
                return Err(anyhow!("Strategy '{}' is listed more than once", kind));
            }
        }

        Ok(())
    }

    /// Build a resolver from these settings
    pub fn to_resolver(&self) -> PathResolver {
        let settings = &self.resolver;
        let mut builder = PathResolver::builder()
            .cache_config(settings.cache_config)
            .strategies(StrategyChain::from_kinds(&settings.strategies));

        if let Some(ceiling) = &settings.ceiling {
            builder = builder.ceiling(ceiling.clone());
        }

        builder.build()
    }
}
