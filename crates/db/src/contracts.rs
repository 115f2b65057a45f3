use billing_core::Contract;
use rusqlite::{OptionalExtension, params};

use crate::Db;
use crate::error::{DbError, Result};
use crate::helpers::row_to_contract;

const CONTRACT_COLUMNS: &str = "device_id, monthly_rent, color_unit_price, bw_unit_price, \
     color_giveaway, bw_giveaway, color_error_rate, bw_error_rate, \
     color_basic, bw_basic, tax_type, notes";

impl Db {
    pub fn get_contract(&self, device_id: &str) -> Result<Option<Contract>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM contract WHERE device_id = ?1",
                    CONTRACT_COLUMNS
                ),
                params![device_id],
                row_to_contract,
            )
            .optional()
            .map_err(DbError::from)
    }

    pub fn upsert_contract(&self, contract: &Contract) -> Result<()> {
        self.conn.execute(
            &format!(
                "INSERT OR REPLACE INTO contract ({}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                CONTRACT_COLUMNS
            ),
            params![
                contract.device_id,
                contract.monthly_rent,
                contract.color_unit_price,
                contract.bw_unit_price,
                contract.color_giveaway,
                contract.bw_giveaway,
                contract.color_error_rate,
                contract.bw_error_rate,
                contract.color_basic,
                contract.bw_basic,
                contract.tax_type.as_str(),
                contract.notes,
            ],
        )?;
        Ok(())
    }

    pub fn list_contracts(&self) -> Result<Vec<Contract>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM contract ORDER BY device_id ASC",
            CONTRACT_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], row_to_contract)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
