use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::seed;
use crate::services::AppServices;
use billing_core::DEFAULT_TAX_RATE;
use billing_db::Db;

/// Paths and policy needed to run the billing app.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub seed_defaults_path: PathBuf,
    /// Policy-wide statutory tax rate; injected here so a rate change never
    /// touches the engine.
    pub tax_rate: f64,
}

/// Application state shared by frontend backends.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db_path: PathBuf, seed_defaults_path: PathBuf, tax_rate: f64) -> Self {
        let config = AppConfig {
            db_path,
            seed_defaults_path,
            tax_rate,
        };
        let services = AppServices::new(&config);
        Self { config, services }
    }

    pub fn with_default_tax_rate(db_path: PathBuf, seed_defaults_path: PathBuf) -> Self {
        Self::new(db_path, seed_defaults_path, DEFAULT_TAX_RATE)
    }

    pub fn is_fresh_db(&self) -> bool {
        !self.config.db_path.exists()
    }

    pub fn setup_db(&self) -> Result<()> {
        let mut db = self.open_db()?;
        db.migrate()?;
        Ok(())
    }

    /// Create the schema and, on a fresh database, load the starter
    /// contracts and customers.
    pub fn initialize(&self) -> Result<()> {
        let is_fresh_db = self.is_fresh_db();
        self.setup_db()
            .map_err(|err| AppError::Message(format!("initialize db: {}", err)))?;
        if is_fresh_db {
            self.apply_seed_defaults()?;
        }
        Ok(())
    }

    pub fn open_db(&self) -> Result<Db> {
        Ok(Db::open(&self.config.db_path)?)
    }

    pub fn apply_seed_defaults(&self) -> Result<()> {
        seed::apply_seed_defaults(&self.config.db_path, &self.config.seed_defaults_path)
    }
}
