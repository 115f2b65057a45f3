use billing_core::{Contract, Customer, MeterReading, TaxType};
use rusqlite::Row;
use rusqlite::types::Type;

pub(crate) fn row_to_contract(row: &Row<'_>) -> std::result::Result<Contract, rusqlite::Error> {
    let tax_text: String = row.get(10)?;
    let tax_type = TaxType::parse(&tax_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            10,
            Type::Text,
            format!("unrecognized tax_type {:?}", tax_text).into(),
        )
    })?;
    Ok(Contract {
        device_id: row.get(0)?,
        monthly_rent: row.get(1)?,
        color_unit_price: row.get(2)?,
        bw_unit_price: row.get(3)?,
        color_giveaway: row.get(4)?,
        bw_giveaway: row.get(5)?,
        color_error_rate: row.get(6)?,
        bw_error_rate: row.get(7)?,
        color_basic: row.get(8)?,
        bw_basic: row.get(9)?,
        tax_type,
        notes: row.get(11)?,
    })
}

pub(crate) fn row_to_reading(row: &Row<'_>) -> std::result::Result<MeterReading, rusqlite::Error> {
    Ok(MeterReading {
        id: row.get(0)?,
        device_id: row.get(1)?,
        period: row.get(2)?,
        color_count: row.get(3)?,
        bw_count: row.get(4)?,
        recorded_at: row.get(5)?,
    })
}

pub(crate) fn row_to_customer(row: &Row<'_>) -> std::result::Result<Customer, rusqlite::Error> {
    Ok(Customer {
        device_id: row.get(0)?,
        customer_name: row.get(1)?,
        device_number: row.get(2)?,
        machine_model: row.get(3)?,
        tax_id: row.get(4)?,
        install_address: row.get(5)?,
        service_person: row.get(6)?,
        contract_number: row.get(7)?,
        contract_start: row.get(8)?,
        contract_end: row.get(9)?,
    })
}
