mod billing;
mod contracts;
mod customers;

use std::sync::Arc;

use crate::app::AppConfig;
use crate::error::Result;
use billing_db::Db;

pub use billing::{BillingService, record_and_bill_with};
pub use contracts::ContractsService;
pub use customers::CustomersService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub billing: BillingService,
    pub contracts: ContractsService,
    pub customers: CustomersService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            billing: BillingService::new(shared.clone()),
            contracts: ContractsService::new(shared.clone()),
            customers: CustomersService::new(shared),
        }
    }
}

fn open_db(config: &SharedConfig) -> Result<Db> {
    Ok(Db::open(&config.db_path)?)
}
