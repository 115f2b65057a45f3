use billing_core::MeterReading;
use rusqlite::{OptionalExtension, params};

use crate::Db;
use crate::error::{DbError, Result};
use crate::helpers::row_to_reading;

impl Db {
    /// Most recent reading for a device, by insertion order. Readings are
    /// append-only, so the highest rowid is the latest.
    pub fn latest_reading(&self, device_id: &str) -> Result<Option<MeterReading>> {
        self.conn
            .query_row(
                "SELECT id, device_id, period, color_count, bw_count, recorded_at \
                 FROM meter_reading WHERE device_id = ?1 \
                 ORDER BY id DESC LIMIT 1",
                params![device_id],
                row_to_reading,
            )
            .optional()
            .map_err(DbError::from)
    }

    pub fn insert_reading(&self, reading: &MeterReading) -> Result<MeterReading> {
        self.conn.execute(
            "INSERT INTO meter_reading (device_id, period, color_count, bw_count, recorded_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                reading.device_id,
                reading.period,
                reading.color_count,
                reading.bw_count,
                reading.recorded_at,
            ],
        )?;
        let mut stored = reading.clone();
        stored.id = Some(self.conn.last_insert_rowid());
        Ok(stored)
    }

    pub fn list_readings(&self, device_id: &str) -> Result<Vec<MeterReading>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, device_id, period, color_count, bw_count, recorded_at \
             FROM meter_reading WHERE device_id = ?1 \
             ORDER BY id ASC",
        )?;
        let rows = stmt
            .query_map(params![device_id], row_to_reading)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
