use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{CalculationError, Result};
use crate::time::{self, AVERAGE_MONTH_DAYS};
use crate::types::InterestMode;

/// interest accrued on a corrected value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestAccrual {
    pub interest: Money,
    /// day count under the day-after convention
    pub days_counted: Decimal,
    /// monthly-equivalent period count the rate was applied over
    pub monthly_periods: Decimal,
}

/// simple or compound interest on a corrected base value
///
/// interest accrues from the day after the base date through the day after
/// the end date inclusive, so both bounds shift forward one day before
/// differencing; the rate is applied on a monthly-equivalent pro-rata basis
/// whatever unit it is quoted in
pub fn interest_on(
    corrected: Money,
    rate: Rate,
    mode: InterestMode,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<InterestAccrual> {
    let from = start.succ_opt().ok_or(CalculationError::ArithmeticOverflow {
        stage: "interest accrual window",
    })?;
    let to = end.succ_opt().ok_or(CalculationError::ArithmeticOverflow {
        stage: "interest accrual window",
    })?;

    let days_counted = time::days_between(from, to);
    let monthly_periods = days_counted / AVERAGE_MONTH_DAYS;

    if !rate.is_positive() {
        return Ok(InterestAccrual {
            interest: Money::ZERO,
            days_counted,
            monthly_periods,
        });
    }

    let interest = match mode {
        InterestMode::Simple => {
            let multiplier = rate.as_decimal().checked_mul(monthly_periods).ok_or(
                CalculationError::ArithmeticOverflow {
                    stage: "simple interest",
                },
            )?;
            corrected
                .checked_mul(multiplier)
                .ok_or(CalculationError::ArithmeticOverflow {
                    stage: "simple interest",
                })?
        }
        InterestMode::Compound => {
            // periods are fractional, so this is real exponentiation
            let growth = (Decimal::ONE + rate.as_decimal())
                .checked_powd(monthly_periods)
                .ok_or(CalculationError::ArithmeticOverflow {
                    stage: "compound interest factor",
                })?;
            corrected
                .checked_mul(growth - Decimal::ONE)
                .ok_or(CalculationError::ArithmeticOverflow {
                    stage: "compound interest",
                })?
        }
    };

    Ok(InterestAccrual {
        interest,
        days_counted,
        monthly_periods,
    })
}
