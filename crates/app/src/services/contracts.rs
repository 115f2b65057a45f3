use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use billing_core::Contract;
use billing_db::Db;

#[derive(Clone)]
pub struct ContractsService {
    config: SharedConfig,
}

impl ContractsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn get(&self, device_id: &str) -> Result<Contract> {
        self.db()?
            .get_contract(device_id)?
            .ok_or_else(|| AppError::UnknownDevice(device_id.to_string()))
    }

    pub fn find(&self, device_id: &str) -> Result<Option<Contract>> {
        Ok(self.db()?.get_contract(device_id)?)
    }

    pub fn upsert(&self, contract: &Contract) -> Result<()> {
        validate_terms(contract)?;
        self.db()?.upsert_contract(contract)?;
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<Contract>> {
        Ok(self.db()?.list_contracts()?)
    }
}

/// Reject malformed terms at the edit edge, before they can ever reach the
/// billing engine.
fn validate_terms(contract: &Contract) -> Result<()> {
    if contract.device_id.trim().is_empty() {
        return Err(AppError::InvalidInput("device_id must not be empty".to_string()));
    }
    if contract.monthly_rent < 0.0
        || contract.color_unit_price < 0.0
        || contract.bw_unit_price < 0.0
        || contract.color_giveaway < 0
        || contract.bw_giveaway < 0
        || contract.color_basic < 0
        || contract.bw_basic < 0
    {
        return Err(AppError::InvalidInput(format!(
            "contract terms for {} must be non-negative",
            contract.device_id
        )));
    }
    for rate in [contract.color_error_rate, contract.bw_error_rate] {
        if !(0.0..1.0).contains(&rate) {
            return Err(AppError::InvalidInput(format!(
                "error rates for {} must be within [0, 1)",
                contract.device_id
            )));
        }
    }
    Ok(())
}
