use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{CalculationError, Result};
use crate::types::{AccrualMode, CaseDetails, InterestMode, PeriodUnit};

/// immutable input of one monetary update calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub principal: Money,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// index name resolved against the registry
    pub index: String,
    pub accrual_mode: AccrualMode,
    pub interest_rate: Rate,
    pub interest_period: PeriodUnit,
    pub interest_mode: InterestMode,
    pub penalty_rate: Rate,
    pub fee_rate: Rate,
    pub case: CaseDetails,
}

impl CalculationRequest {
    /// correction-only request; interest, penalty and fee default to zero
    /// and accrual to whole periods
    pub fn new(
        principal: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
        index: impl Into<String>,
    ) -> Self {
        Self {
            principal,
            start_date,
            end_date,
            index: index.into(),
            accrual_mode: AccrualMode::WholePeriod,
            interest_rate: Rate::ZERO,
            interest_period: PeriodUnit::Monthly,
            interest_mode: InterestMode::Simple,
            penalty_rate: Rate::ZERO,
            fee_rate: Rate::ZERO,
            case: CaseDetails::default(),
        }
    }

    /// build from iso date strings, mapping parse failures into the
    /// validation taxonomy
    pub fn with_iso_dates(
        principal: Money,
        start: &str,
        end: &str,
        index: impl Into<String>,
    ) -> Result<Self> {
        let start_date = start
            .parse()
            .map_err(|_| CalculationError::InvalidDate {
                field: "start",
                message: start.to_string(),
            })?;
        let end_date = end.parse().map_err(|_| CalculationError::InvalidDate {
            field: "end",
            message: end.to_string(),
        })?;

        Ok(Self::new(principal, start_date, end_date, index))
    }

    /// update the debt through the provider's current date
    pub fn through_today(
        principal: Money,
        start_date: NaiveDate,
        index: impl Into<String>,
        time_provider: &SafeTimeProvider,
    ) -> Self {
        Self::new(
            principal,
            start_date,
            time_provider.now().date_naive(),
            index,
        )
    }

    pub fn with_accrual_mode(mut self, mode: AccrualMode) -> Self {
        self.accrual_mode = mode;
        self
    }

    /// fractional periods instead of whole ones
    pub fn pro_rata(self) -> Self {
        self.with_accrual_mode(AccrualMode::ProRata)
    }

    pub fn with_interest(mut self, rate: Rate, period: PeriodUnit, mode: InterestMode) -> Self {
        self.interest_rate = rate;
        self.interest_period = period;
        self.interest_mode = mode;
        self
    }

    pub fn with_penalty(mut self, rate: Rate) -> Self {
        self.penalty_rate = rate;
        self
    }

    pub fn with_fee(mut self, rate: Rate) -> Self {
        self.fee_rate = rate;
        self
    }

    pub fn with_case(mut self, case: CaseDetails) -> Self {
        self.case = case;
        self
    }

    /// check preconditions; the orchestrator runs this before any
    /// provider call
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(CalculationError::InvalidPrincipal {
                amount: self.principal,
            });
        }
        if self.end_date <= self.start_date {
            return Err(CalculationError::InvalidRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.interest_rate.is_negative() {
            return Err(CalculationError::NegativeRate {
                field: "interest",
                rate: self.interest_rate,
            });
        }
        if self.penalty_rate.is_negative() {
            return Err(CalculationError::NegativeRate {
                field: "penalty",
                rate: self.penalty_rate,
            });
        }
        if self.fee_rate.is_negative() {
            return Err(CalculationError::NegativeRate {
                field: "fee",
                rate: self.fee_rate,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn base_request() -> CalculationRequest {
        CalculationRequest::new(
            Money::from_major(1_000),
            date(2024, 1, 1),
            date(2024, 4, 1),
            "IPCA (IBGE)",
        )
    }

    #[test]
    fn test_defaults_are_correction_only() {
        let request = base_request();
        assert_eq!(request.accrual_mode, AccrualMode::WholePeriod);
        assert!(request.interest_rate.is_zero());
        assert!(request.penalty_rate.is_zero());
        assert!(request.fee_rate.is_zero());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_iso_date_parsing() {
        let request = CalculationRequest::with_iso_dates(
            Money::from_major(500),
            "2023-06-15",
            "2024-06-15",
            "IGP-M (FGV)",
        )
        .unwrap();
        assert_eq!(request.start_date, date(2023, 6, 15));
        assert_eq!(request.end_date, date(2024, 6, 15));

        let err = CalculationRequest::with_iso_dates(
            Money::from_major(500),
            "15/06/2023",
            "2024-06-15",
            "IGP-M (FGV)",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CalculationError::InvalidDate { field: "start", .. }
        ));
    }

    #[test]
    fn test_through_today_uses_time_provider() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap(),
        ));
        let request = CalculationRequest::through_today(
            Money::from_major(1_000),
            date(2024, 1, 1),
            "IPCA (IBGE)",
            &time,
        );
        assert_eq!(request.end_date, date(2024, 4, 1));
    }

    #[test]
    fn test_validation_rejects_nonpositive_principal() {
        let mut request = base_request();
        request.principal = Money::ZERO;
        assert!(matches!(
            request.validate().unwrap_err(),
            CalculationError::InvalidPrincipal { .. }
        ));
    }

    #[test]
    fn test_validation_rejects_empty_range() {
        let mut request = base_request();
        request.end_date = request.start_date;
        assert!(matches!(
            request.validate().unwrap_err(),
            CalculationError::InvalidRange { .. }
        ));
    }

    #[test]
    fn test_validation_rejects_negative_rates() {
        let request = base_request().with_penalty(Rate::from_percentage(dec!(-2)));
        assert!(matches!(
            request.validate().unwrap_err(),
            CalculationError::NegativeRate { field: "penalty", .. }
        ));
    }

    #[test]
    fn test_builder_chain() {
        let request = base_request()
            .pro_rata()
            .with_interest(
                Rate::from_percentage(dec!(1)),
                PeriodUnit::Monthly,
                InterestMode::Compound,
            )
            .with_penalty(Rate::from_percentage(dec!(2)))
            .with_fee(Rate::from_percentage(dec!(10)))
            .with_case(CaseDetails::new().creditor("Acme Ltda"));

        assert_eq!(request.accrual_mode, AccrualMode::ProRata);
        assert_eq!(request.interest_mode, InterestMode::Compound);
        assert_eq!(request.case.creditor.as_deref(), Some("Acme Ltda"));
        assert!(request.validate().is_ok());
    }
}
