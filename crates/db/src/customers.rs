use billing_core::Customer;
use rusqlite::{OptionalExtension, params};

use crate::Db;
use crate::error::{DbError, Result};
use crate::helpers::row_to_customer;

const CUSTOMER_COLUMNS: &str = "device_id, customer_name, device_number, machine_model, tax_id, \
     install_address, service_person, contract_number, contract_start, contract_end";

impl Db {
    pub fn get_customer(&self, device_id: &str) -> Result<Option<Customer>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM customer WHERE device_id = ?1",
                    CUSTOMER_COLUMNS
                ),
                params![device_id],
                row_to_customer,
            )
            .optional()
            .map_err(DbError::from)
    }

    pub fn upsert_customer(&self, customer: &Customer) -> Result<()> {
        self.conn.execute(
            &format!(
                "INSERT OR REPLACE INTO customer ({}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                CUSTOMER_COLUMNS
            ),
            params![
                customer.device_id,
                customer.customer_name,
                customer.device_number,
                customer.machine_model,
                customer.tax_id,
                customer.install_address,
                customer.service_person,
                customer.contract_number,
                customer.contract_start,
                customer.contract_end,
            ],
        )?;
        Ok(())
    }

    /// Substring match on customer name, for operators who only know the
    /// customer rather than the device id.
    pub fn search_customers(&self, keyword: &str) -> Result<Vec<Customer>> {
        let pattern = format!("%{}%", keyword);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM customer WHERE customer_name LIKE ?1 ORDER BY device_id ASC",
            CUSTOMER_COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![pattern], row_to_customer)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
