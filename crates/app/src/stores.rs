use billing_core::{Contract, MeterReading};
use billing_db::Db;

use crate::error::Result;

/// Read access to per-device contract terms.
pub trait ContractStore {
    fn get(&mut self, device_id: &str) -> Result<Option<Contract>>;
}

/// Append-only meter-reading history, queryable for the latest prior entry.
pub trait MeterHistoryStore {
    fn latest(&mut self, device_id: &str) -> Result<Option<MeterReading>>;
    fn append(&mut self, reading: &MeterReading) -> Result<MeterReading>;
}

impl ContractStore for Db {
    fn get(&mut self, device_id: &str) -> Result<Option<Contract>> {
        Ok(self.get_contract(device_id)?)
    }
}

impl MeterHistoryStore for Db {
    fn latest(&mut self, device_id: &str) -> Result<Option<MeterReading>> {
        Ok(self.latest_reading(device_id)?)
    }

    fn append(&mut self, reading: &MeterReading) -> Result<MeterReading> {
        Ok(self.insert_reading(reading)?)
    }
}
