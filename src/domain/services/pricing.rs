use crate::config::Config;
use crate::error::AppError;
use chrono::NaiveDate;

/// Exactly one policy applies per deployment; the two are never mixed for
/// the same booking record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PricingPolicy {
    TaxInclusive { rate: f64 },
    FlatFee { fee: i64 },
}

impl PricingPolicy {
    pub fn from_config(config: &Config) -> Self {
        match config.pricing_policy.as_str() {
            "flat_fee" => PricingPolicy::FlatFee { fee: config.service_fee },
            _ => PricingPolicy::TaxInclusive { rate: config.tax_rate },
        }
    }

    /// Total in major currency units for a stay. The final charge amount is
    /// always computed here, never taken from the client.
    pub fn compute_total(&self, nightly_price: i64, nights: i32) -> Result<i64, AppError> {
        if nightly_price <= 0 {
            return Err(AppError::Validation("Nightly price must be positive".into()));
        }
        if nights < 1 {
            return Err(AppError::Validation("Nights must be at least 1".into()));
        }

        let base = nightly_price * nights as i64;
        match self {
            PricingPolicy::TaxInclusive { rate } => {
                // Half-up rounding on the tax component.
                let tax = (base as f64 * rate).round() as i64;
                Ok(base + tax)
            }
            PricingPolicy::FlatFee { fee } => Ok(base + fee),
        }
    }
}

/// Uses the supplied night count when sane, otherwise recomputes it from the
/// date span. Callers validate `check_out > check_in` beforehand.
pub fn resolve_nights(check_in: NaiveDate, check_out: NaiveDate, supplied: Option<i32>) -> i32 {
    match supplied {
        Some(n) if n >= 1 => n,
        _ => (check_out - check_in).num_days() as i32,
    }
}
