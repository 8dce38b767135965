use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{CalculationError, Result};
use crate::time::{self, AVERAGE_MONTH_DAYS};
use crate::types::{AccrualMode, PeriodUnit, WholeMonthRounding};

/// elapsed-time figures for one calculation
///
/// `periods` is the count the accrual math consumes; the display fields are
/// audit-trail figures rounded independently of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElapsedPeriods {
    pub mode: AccrualMode,
    pub unit: PeriodUnit,
    /// period count in `unit`, fractional under pro-rata
    pub periods: Decimal,
    /// fully elapsed calendar months, when the calendar policy applied
    pub whole_months: Option<i64>,
    /// days rounded to the nearest integer
    pub days_display: Decimal,
    /// months to 2 decimal places
    pub months_display: Decimal,
    /// years to 2 decimal places
    pub years_display: Decimal,
}

/// engine converting a date range into a period count
pub struct PeriodEngine {
    pub rounding: WholeMonthRounding,
}

impl PeriodEngine {
    pub fn new(rounding: WholeMonthRounding) -> Self {
        Self { rounding }
    }

    /// elapsed periods between two dates under the given accrual mode
    ///
    /// the range must be non-empty; a reversed or empty range is an error,
    /// never a negative count
    pub fn elapsed(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        mode: AccrualMode,
        unit: PeriodUnit,
    ) -> Result<ElapsedPeriods> {
        if end <= start {
            return Err(CalculationError::InvalidRange { start, end });
        }

        let days = time::days_between(start, end);
        let months = time::months_between(start, end);
        let years = time::years_between(start, end);

        match mode {
            AccrualMode::ProRata => Ok(ElapsedPeriods {
                mode,
                unit,
                periods: match unit {
                    PeriodUnit::Daily => days,
                    PeriodUnit::Monthly => months,
                    PeriodUnit::Yearly => years,
                },
                whole_months: None,
                days_display: days.round(),
                months_display: months.round_dp(2),
                years_display: years.round_dp(2),
            }),
            AccrualMode::WholePeriod => match self.rounding {
                WholeMonthRounding::CalendarBoundary => {
                    let whole = time::whole_calendar_months(start, end);
                    let whole_dec = Decimal::from(whole);
                    let day_equivalent = whole_dec * AVERAGE_MONTH_DAYS;
                    let whole_years = whole_dec / Decimal::from(12);

                    Ok(ElapsedPeriods {
                        mode,
                        unit,
                        periods: match unit {
                            PeriodUnit::Daily => day_equivalent,
                            PeriodUnit::Monthly => whole_dec,
                            PeriodUnit::Yearly => whole_years,
                        },
                        whole_months: Some(whole),
                        days_display: day_equivalent.round(),
                        months_display: whole_dec,
                        years_display: whole_years.round_dp(2),
                    })
                }
                WholeMonthRounding::AverageMonthFloor => Ok(ElapsedPeriods {
                    mode,
                    unit,
                    periods: match unit {
                        PeriodUnit::Daily => days.floor(),
                        PeriodUnit::Monthly => months.floor(),
                        PeriodUnit::Yearly => years.floor(),
                    },
                    whole_months: None,
                    days_display: days.round(),
                    months_display: months.round_dp(2),
                    years_display: years.round_dp(2),
                }),
            },
        }
    }
}

impl Default for PeriodEngine {
    fn default() -> Self {
        Self::new(WholeMonthRounding::default())
    }
}
