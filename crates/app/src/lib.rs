pub mod app;
pub mod error;
pub mod seed;
pub mod services;
pub mod startup;
pub mod stores;
pub mod util;

pub use app::{AppConfig, AppState};
pub use error::{AppError, Result};
pub use seed::{SeedData, apply_seed_defaults, load_seed_defaults, write_seed_defaults};
pub use services::{
    AppServices, BillingService, ContractsService, CustomersService, record_and_bill_with,
};
pub use startup::{AppPaths, ensure_app_data_dir};
pub use stores::{ContractStore, MeterHistoryStore};
pub use util::time::{format_timestamp, period_label};
