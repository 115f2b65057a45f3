use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use billing_core::Customer;
use billing_db::Db;

#[derive(Clone)]
pub struct CustomersService {
    config: SharedConfig,
}

impl CustomersService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn get(&self, device_id: &str) -> Result<Customer> {
        self.db()?
            .get_customer(device_id)?
            .ok_or_else(|| AppError::NotFound(format!("no customer for device {}", device_id)))
    }

    pub fn find(&self, device_id: &str) -> Result<Option<Customer>> {
        Ok(self.db()?.get_customer(device_id)?)
    }

    pub fn upsert(&self, customer: &Customer) -> Result<()> {
        self.db()?.upsert_customer(customer)?;
        Ok(())
    }

    pub fn search(&self, keyword: &str) -> Result<Vec<Customer>> {
        Ok(self.db()?.search_customers(keyword)?)
    }
}
