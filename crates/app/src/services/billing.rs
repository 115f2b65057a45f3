use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use crate::stores::{ContractStore, MeterHistoryStore};
use crate::util::time::{format_timestamp, period_label};
use billing_core::{BillResult, BillingEngine, MeterReading};
use billing_db::Db;

/// One mutex per device id. Two concurrent recordings for the same device
/// must not both read the same "previous reading" and then both append.
#[derive(Clone, Default)]
struct DeviceLocks {
    inner: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl DeviceLocks {
    fn for_device(&self, device_id: &str) -> Arc<Mutex<()>> {
        let mut map = match self.inner.lock() {
            Ok(map) => map,
            Err(poisoned) => poisoned.into_inner(),
        };
        map.entry(device_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[derive(Clone)]
pub struct BillingService {
    config: SharedConfig,
    locks: DeviceLocks,
}

impl BillingService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self {
            config,
            locks: DeviceLocks::default(),
        }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    fn engine(&self) -> BillingEngine {
        BillingEngine::new(self.config.tax_rate)
    }

    /// Record a new meter reading and produce the bill for the elapsed
    /// period. The reading is appended only after the bill computes
    /// successfully, and recordings for one device are serialized.
    pub fn record_and_bill(
        &self,
        device_id: &str,
        color_count: i64,
        bw_count: i64,
        now: DateTime<Utc>,
    ) -> Result<BillResult> {
        let lock = self.locks.for_device(device_id);
        let _held = match lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut db = self.db()?;
        record_and_bill_with(&self.engine(), &mut db, device_id, color_count, bw_count, now)
    }

    /// Compute the bill a reading would produce without persisting it.
    pub fn preview(&self, device_id: &str, color_count: i64, bw_count: i64) -> Result<BillResult> {
        let mut db = self.db()?;
        let contract = ContractStore::get(&mut db, device_id)?
            .ok_or_else(|| AppError::UnknownDevice(device_id.to_string()))?;
        let previous = db
            .latest(device_id)?
            .unwrap_or_else(|| MeterReading::baseline(device_id));
        let current = unsaved_reading(device_id, color_count, bw_count, Utc::now());
        Ok(self.engine().compute_bill(&contract, &previous, &current)?)
    }

    /// Latest recorded reading, if any. What the operator sees as the
    /// "previous counts" before entering new ones.
    pub fn latest_reading(&self, device_id: &str) -> Result<Option<MeterReading>> {
        let db = self.db()?;
        Ok(db.latest_reading(device_id)?)
    }

    /// Full reading history for a device, oldest first.
    pub fn history(&self, device_id: &str) -> Result<Vec<MeterReading>> {
        let db = self.db()?;
        Ok(db.list_readings(device_id)?)
    }
}

/// The read-compute-write cycle behind `record_and_bill`, written against
/// the store traits. The append is the last effect: a rejected reading is
/// never persisted.
pub fn record_and_bill_with<S>(
    engine: &BillingEngine,
    store: &mut S,
    device_id: &str,
    color_count: i64,
    bw_count: i64,
    now: DateTime<Utc>,
) -> Result<BillResult>
where
    S: ContractStore + MeterHistoryStore,
{
    let contract = store
        .get(device_id)?
        .ok_or_else(|| AppError::UnknownDevice(device_id.to_string()))?;
    let previous = store
        .latest(device_id)?
        .unwrap_or_else(|| MeterReading::baseline(device_id));
    let current = unsaved_reading(device_id, color_count, bw_count, now);
    let bill = engine.compute_bill(&contract, &previous, &current)?;
    store.append(&current)?;
    Ok(bill)
}

fn unsaved_reading(
    device_id: &str,
    color_count: i64,
    bw_count: i64,
    now: DateTime<Utc>,
) -> MeterReading {
    MeterReading {
        id: None,
        device_id: device_id.to_string(),
        period: period_label(now),
        color_count,
        bw_count,
        recorded_at: format_timestamp(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billing_core::{Contract, TaxType};
    use chrono::TimeZone;

    #[derive(Default)]
    struct MemStore {
        contracts: HashMap<String, Contract>,
        readings: Vec<MeterReading>,
    }

    impl ContractStore for MemStore {
        fn get(&mut self, device_id: &str) -> Result<Option<Contract>> {
            Ok(self.contracts.get(device_id).cloned())
        }
    }

    impl MeterHistoryStore for MemStore {
        fn latest(&mut self, device_id: &str) -> Result<Option<MeterReading>> {
            Ok(self
                .readings
                .iter()
                .rev()
                .find(|r| r.device_id == device_id)
                .cloned())
        }

        fn append(&mut self, reading: &MeterReading) -> Result<MeterReading> {
            let mut stored = reading.clone();
            stored.id = Some(self.readings.len() as i64 + 1);
            self.readings.push(stored.clone());
            Ok(stored)
        }
    }

    fn store_with_contract() -> MemStore {
        let mut store = MemStore::default();
        store.contracts.insert(
            "DEV001".to_string(),
            Contract {
                device_id: "DEV001".to_string(),
                monthly_rent: 1000.0,
                color_unit_price: 3.0,
                bw_unit_price: 0.5,
                color_giveaway: 50,
                bw_giveaway: 100,
                color_error_rate: 0.02,
                bw_error_rate: 0.01,
                color_basic: 200,
                bw_basic: 500,
                tax_type: TaxType::Exclusive,
                notes: String::new(),
            },
        );
        store
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 31, 9, 0, 0).unwrap()
    }

    #[test]
    fn first_reading_bills_against_zero_baseline() {
        let engine = BillingEngine::default();
        let mut store = store_with_contract();

        let bill =
            record_and_bill_with(&engine, &mut store, "DEV001", 1200, 5300, at()).expect("bill");

        assert_eq!(bill.color.used_pages, 1200);
        assert_eq!(bill.bw.used_pages, 5300);
        assert_eq!(store.readings.len(), 1);
        assert_eq!(store.readings[0].period, "202508");
        assert_eq!(store.readings[0].recorded_at, "2025/08/31-09:00");
    }

    #[test]
    fn second_reading_bills_the_delta() {
        let engine = BillingEngine::default();
        let mut store = store_with_contract();

        record_and_bill_with(&engine, &mut store, "DEV001", 1000, 5000, at()).expect("first");
        let bill =
            record_and_bill_with(&engine, &mut store, "DEV001", 1200, 5300, at()).expect("second");

        assert_eq!(bill.color.used_pages, 200);
        assert_eq!(bill.bw.used_pages, 300);
        assert_eq!(bill.total, 1943);
        assert_eq!(store.readings.len(), 2);
    }

    #[test]
    fn unknown_device_aborts_before_any_write() {
        let engine = BillingEngine::default();
        let mut store = MemStore::default();

        let err =
            record_and_bill_with(&engine, &mut store, "NOPE", 10, 10, at()).unwrap_err();

        assert!(matches!(err, AppError::UnknownDevice(_)));
        assert!(store.readings.is_empty());
    }

    #[test]
    fn rejected_reading_is_not_persisted() {
        let engine = BillingEngine::default();
        let mut store = store_with_contract();

        let err =
            record_and_bill_with(&engine, &mut store, "DEV001", -1, 10, at()).unwrap_err();

        assert!(matches!(
            err,
            AppError::Billing(billing_core::BillingError::InvalidReading(_))
        ));
        assert!(store.readings.is_empty());
    }

    #[test]
    fn regressed_counter_is_recorded_but_flagged() {
        let engine = BillingEngine::default();
        let mut store = store_with_contract();

        record_and_bill_with(&engine, &mut store, "DEV001", 1000, 5000, at()).expect("first");
        let bill =
            record_and_bill_with(&engine, &mut store, "DEV001", 900, 5300, at()).expect("second");

        assert!(bill.counter_regressed);
        assert_eq!(bill.color.used_pages, 0);
        assert_eq!(bill.bw.used_pages, 300);
        // The odometer value itself is kept so the next delta is sane.
        assert_eq!(store.readings.last().map(|r| r.color_count), Some(900));
    }
}
