use serde::{Deserialize, Serialize};

/// Default statutory tax rate applied when no override is configured.
pub const DEFAULT_TAX_RATE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxType {
    /// Quoted rent and unit prices already contain tax.
    Inclusive,
    /// Tax is added on top of the quoted subtotal.
    Exclusive,
}

impl TaxType {
    pub fn parse(value: &str) -> Option<TaxType> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inclusive" => Some(TaxType::Inclusive),
            "exclusive" => Some(TaxType::Exclusive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaxType::Inclusive => "inclusive",
            TaxType::Exclusive => "exclusive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub device_id: String,
    pub monthly_rent: f64,
    pub color_unit_price: f64,
    pub bw_unit_price: f64,
    pub color_giveaway: i64,
    pub bw_giveaway: i64,
    pub color_error_rate: f64,
    pub bw_error_rate: f64,
    pub color_basic: i64,
    pub bw_basic: i64,
    pub tax_type: TaxType,
    #[serde(default)]
    pub notes: String,
}

/// Cumulative odometer snapshot reported by the device. Counts only ever
/// grow in normal operation; a lower value than the previous reading means
/// the counter was reset or misread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterReading {
    pub id: Option<i64>,
    pub device_id: String,
    pub period: String,
    pub color_count: i64,
    pub bw_count: i64,
    pub recorded_at: String,
}

impl MeterReading {
    /// Zero baseline used when a device has no recorded history yet.
    pub fn baseline(device_id: &str) -> MeterReading {
        MeterReading {
            id: None,
            device_id: device_id.to_string(),
            period: String::new(),
            color_count: 0,
            bw_count: 0,
            recorded_at: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub device_id: String,
    pub customer_name: String,
    pub device_number: String,
    pub machine_model: String,
    pub tax_id: String,
    pub install_address: String,
    pub service_person: String,
    pub contract_number: String,
    pub contract_start: String,
    pub contract_end: String,
}

/// One billed channel (color or black/white) of a bill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLine {
    pub used_pages: i64,
    pub billed_pages: i64,
    /// Line amount at 2-decimal precision.
    pub amount: f64,
    /// True when the current count was lower than the previous one and the
    /// delta was clamped to zero.
    pub regressed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillResult {
    pub color: PageLine,
    pub bw: PageLine,
    pub monthly_rent: f64,
    /// Rent plus both line amounts, at 2-decimal precision. For inclusive
    /// contracts this figure still contains tax.
    pub subtotal: f64,
    pub untaxed: i64,
    pub tax: i64,
    pub total: i64,
    pub counter_regressed: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("invalid contract: {0}")]
    InvalidContract(String),
    #[error("invalid reading: {0}")]
    InvalidReading(String),
}

/// Round half away from zero to a whole unit. Invoicing rounding, not the
/// round-to-even the standard library would give for exact halves.
pub fn round_half_up(value: f64) -> f64 {
    if value < 0.0 {
        -((-value + 0.5).floor())
    } else {
        (value + 0.5).floor()
    }
}

/// Half-up rounding at currency-subunit (2 decimal) precision.
pub fn round2(value: f64) -> f64 {
    round_half_up(value * 100.0) / 100.0
}

#[derive(Debug, Clone, Copy)]
pub struct BillingEngine {
    tax_rate: f64,
}

impl Default for BillingEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TAX_RATE)
    }
}

impl BillingEngine {
    pub fn new(tax_rate: f64) -> Self {
        Self { tax_rate }
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    /// Turn a pair of consecutive meter readings into an itemized bill.
    /// Pure computation; the caller owns all storage effects.
    pub fn compute_bill(
        &self,
        contract: &Contract,
        previous: &MeterReading,
        current: &MeterReading,
    ) -> Result<BillResult, BillingError> {
        validate_contract(contract)?;
        validate_reading(previous)?;
        validate_reading(current)?;

        let color = bill_channel(
            previous.color_count,
            current.color_count,
            contract.color_giveaway,
            contract.color_error_rate,
            contract.color_basic,
            contract.color_unit_price,
        );
        let bw = bill_channel(
            previous.bw_count,
            current.bw_count,
            contract.bw_giveaway,
            contract.bw_error_rate,
            contract.bw_basic,
            contract.bw_unit_price,
        );

        let monthly_rent = round2(contract.monthly_rent);
        let subtotal = contract.monthly_rent + color.amount + bw.amount;

        let (untaxed, tax, total) = match contract.tax_type {
            TaxType::Exclusive => {
                let untaxed = round_half_up(subtotal) as i64;
                let tax = round_half_up(subtotal * self.tax_rate) as i64;
                (untaxed, tax, untaxed + tax)
            }
            TaxType::Inclusive => {
                let total = round_half_up(subtotal) as i64;
                let untaxed = round_half_up(subtotal / (1.0 + self.tax_rate)) as i64;
                (untaxed, total - untaxed, total)
            }
        };

        Ok(BillResult {
            color,
            bw,
            monthly_rent,
            subtotal: round2(subtotal),
            untaxed,
            tax,
            total,
            counter_regressed: color.regressed || bw.regressed,
        })
    }
}

/// Page adjustment pipeline for one channel, in contract order: delta,
/// giveaway, error-rate correction, minimum floor, pricing.
fn bill_channel(
    previous_count: i64,
    current_count: i64,
    giveaway: i64,
    error_rate: f64,
    basic: i64,
    unit_price: f64,
) -> PageLine {
    let delta = current_count - previous_count;
    let regressed = delta < 0;
    let used_pages = delta.max(0);

    let after_giveaway = (used_pages - giveaway).max(0);
    let adjusted = round_half_up(after_giveaway as f64 * (1.0 - error_rate)) as i64;
    let billed_pages = if basic > 0 { adjusted.max(basic) } else { adjusted };

    PageLine {
        used_pages,
        billed_pages,
        amount: round2(billed_pages as f64 * unit_price),
        regressed,
    }
}

fn validate_contract(contract: &Contract) -> Result<(), BillingError> {
    let numeric = [
        ("monthly_rent", contract.monthly_rent),
        ("color_unit_price", contract.color_unit_price),
        ("bw_unit_price", contract.bw_unit_price),
        ("color_giveaway", contract.color_giveaway as f64),
        ("bw_giveaway", contract.bw_giveaway as f64),
        ("color_error_rate", contract.color_error_rate),
        ("bw_error_rate", contract.bw_error_rate),
        ("color_basic", contract.color_basic as f64),
        ("bw_basic", contract.bw_basic as f64),
    ];
    for (field, value) in numeric {
        if value < 0.0 || !value.is_finite() {
            return Err(BillingError::InvalidContract(format!(
                "{} must be non-negative, got {}",
                field, value
            )));
        }
    }
    for (field, rate) in [
        ("color_error_rate", contract.color_error_rate),
        ("bw_error_rate", contract.bw_error_rate),
    ] {
        if rate >= 1.0 {
            return Err(BillingError::InvalidContract(format!(
                "{} must be below 1, got {}",
                field, rate
            )));
        }
    }
    Ok(())
}

fn validate_reading(reading: &MeterReading) -> Result<(), BillingError> {
    if reading.color_count < 0 || reading.bw_count < 0 {
        return Err(BillingError::InvalidReading(format!(
            "negative meter counts for {}: color={} bw={}",
            reading.device_id, reading.color_count, reading.bw_count
        )));
    }
    Ok(())
}
