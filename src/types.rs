use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a calculation record
pub type CalculationId = Uuid;

/// policy for converting a date range into a period count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccrualMode {
    /// fractional periods, partial months count proportionally
    ProRata,
    /// only fully elapsed periods count
    WholePeriod,
}

/// unit the interest rate is quoted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodUnit {
    Daily,
    Monthly,
    Yearly,
}

/// interest capitalization regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterestMode {
    /// linear on the corrected value
    Simple,
    /// exponential on the corrected value
    Compound,
}

/// rounding direction for whole-period counts
///
/// the two policies coexisted in practice; the calendar-boundary floor is
/// the default and the average-month floor is kept selectable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WholeMonthRounding {
    /// floor at calendar-month boundaries: a trailing partial month is
    /// dropped when the end day-of-month has not reached the start's
    #[default]
    CalendarBoundary,
    /// floor of the 30.4375-day average-month fraction
    AverageMonthFloor,
}

/// optional case metadata echoed into the calculation record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CaseDetails {
    pub description: Option<String>,
    pub case_number: Option<String>,
    pub creditor: Option<String>,
    pub debtor: Option<String>,
}

impl CaseDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn case_number(mut self, number: impl Into<String>) -> Self {
        self.case_number = Some(number.into());
        self
    }

    pub fn creditor(mut self, name: impl Into<String>) -> Self {
        self.creditor = Some(name.into());
        self
    }

    pub fn debtor(mut self, name: impl Into<String>) -> Self {
        self.debtor = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_details_builder() {
        let case = CaseDetails::new()
            .description("contract damages")
            .case_number("0001234-56.2020.8.26.0100")
            .creditor("Acme Ltda")
            .debtor("Foo S.A.");

        assert_eq!(case.description.as_deref(), Some("contract damages"));
        assert!(case.case_number.is_some());
    }

    #[test]
    fn test_default_rounding_policy() {
        assert_eq!(
            WholeMonthRounding::default(),
            WholeMonthRounding::CalendarBoundary
        );
    }
}
