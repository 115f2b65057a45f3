use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::error::Result;
use billing_core::{Contract, Customer};
use billing_db::Db;

/// Contracts and customer records loaded into a fresh database, either from
/// the operator-editable defaults file or from the embedded starter data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub contracts: Vec<Contract>,
    #[serde(default)]
    pub customers: Vec<Customer>,
}

pub fn apply_seed_defaults(db_path: &Path, defaults_path: &Path) -> Result<()> {
    let seed = if defaults_path.exists() {
        load_seed_defaults(defaults_path)?
    } else {
        load_initial_seed()?
    };
    let db = Db::open(db_path)?;
    for contract in &seed.contracts {
        db.upsert_contract(contract)?;
    }
    for customer in &seed.customers {
        db.upsert_customer(customer)?;
    }
    Ok(())
}

pub fn load_seed_defaults(path: &Path) -> Result<SeedData> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(AppError::from)
}

pub fn load_initial_seed() -> Result<SeedData> {
    let data = include_str!("../initial-contracts.json");
    serde_json::from_str(data).map_err(AppError::from)
}

pub fn write_seed_defaults(path: &Path, seed: &SeedData) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, seed).map_err(AppError::from)
}
