//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use listing_filter::config::EngineConfig;
use listing_filter::log::{FilterLog, LogLevel, NoopLog};
use listing_filter::schema::FieldDescriptor;
use listing_filter::{FilterError, ListingEngine};
use listing_observability::{LogFormat, StructuredLogger};

use crate::output::Output;
use crate::snapshot::Snapshot;

/// Execution context for CLI commands.
pub struct Context {
    /// Engine configuration.
    pub config: EngineConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            EngineConfig::load(path).with_context(|| format!("Failed to load config: {}", path))?
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((_, Ok(config))) => config,
                Some((path, Err(e))) => {
                    output.warn(&format!("Ignoring {}: {}", path.display(), e));
                    EngineConfig::default()
                }
                None => EngineConfig::default(),
            }
        };

        Ok(Self { config, output, cwd })
    }

    /// Find the nearest config file in the directory tree.
    ///
    /// The first file found wins, even when it fails to load.
    fn find_config(start: &Path) -> Option<(PathBuf, Result<EngineConfig, FilterError>)> {
        let config_names = ["listings.toml", ".listings.toml", "listings.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    let loaded = EngineConfig::load(&config_path);
                    return Some((config_path, loaded));
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Load a snapshot file.
    pub fn snapshot(&self, path: &str) -> Result<Snapshot> {
        let path = self.resolve_path(path);
        self.output.debug(&format!("Loading snapshot {}", path.display()));
        Snapshot::load(&path)
    }

    /// Engine over `schema` with the loaded config.
    ///
    /// Verbose runs get engine events on stderr; otherwise they are dropped.
    pub fn engine(&self, schema: Vec<FieldDescriptor>, collection: Option<&str>) -> ListingEngine {
        self.engine_with(self.config.clone(), schema, collection)
    }

    /// Engine over `schema` with an adjusted config.
    pub fn engine_with(
        &self,
        config: EngineConfig,
        schema: Vec<FieldDescriptor>,
        collection: Option<&str>,
    ) -> ListingEngine {
        ListingEngine::builder(schema)
            .config(config)
            .log(self.log(collection))
            .build()
    }

    fn log(&self, collection: Option<&str>) -> Arc<dyn FilterLog> {
        if !self.output.is_verbose() {
            return Arc::new(NoopLog);
        }

        let format = if self.output.is_json() {
            LogFormat::Json
        } else {
            LogFormat::Human
        };
        let mut logger = StructuredLogger::new()
            .with_min_level(LogLevel::Debug)
            .with_format(format);
        if let Some(collection) = collection {
            logger = logger.with_collection(collection);
        }
        Arc::new(logger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        Context {
            config: EngineConfig::default(),
            output: Output::new(false, true),
            cwd: PathBuf::from("/data"),
        }
    }

    #[test]
    fn test_resolve_path() {
        let ctx = context();
        assert_eq!(ctx.resolve_path("snap.json"), PathBuf::from("/data/snap.json"));
        assert_eq!(ctx.resolve_path("/tmp/snap.json"), PathBuf::from("/tmp/snap.json"));
    }

    #[test]
    fn test_quiet_context_disables_engine_logs() {
        let ctx = context();
        assert!(!ctx.log(Some("guest-posts")).enabled(LogLevel::Error));
    }

    #[test]
    fn test_invalid_discovered_config_is_reported() {
        let dir = std::env::temp_dir().join(format!("listings-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("listings.toml"), "currency = [").unwrap();

        let found = Context::find_config(&dir);
        std::fs::remove_dir_all(&dir).unwrap();

        let (path, loaded) = found.unwrap();
        assert_eq!(path, dir.join("listings.toml"));
        assert!(matches!(loaded, Err(FilterError::Config(_))));
    }
}
