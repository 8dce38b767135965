use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::decimal::Factor;
use crate::index::provider::{IndexDataProvider, ProviderError};
use crate::index::registry::IndexRegistry;
use crate::time;
use crate::types::AccrualMode;

/// why a calculation fell back to the neutral factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectionFallback {
    /// index name not present in the registry
    UnknownIndex,
    /// provider unreachable or refused the request
    ProviderUnavailable,
    /// provider payload could not be interpreted
    MalformedSeries,
}

/// outcome of resolving an index over a date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorResolution {
    pub factor: Factor,
    /// monthly variations folded into the factor
    pub points_applied: usize,
    /// set when the neutral factor was substituted
    pub fallback: Option<CorrectionFallback>,
}

impl FactorResolution {
    fn neutral(fallback: CorrectionFallback) -> Self {
        Self {
            factor: Factor::NEUTRAL,
            points_applied: 0,
            fallback: Some(fallback),
        }
    }
}

/// resolves an index name and date range into one accumulated factor
pub struct FactorResolver<P> {
    registry: IndexRegistry,
    provider: P,
}

impl<P: IndexDataProvider> FactorResolver<P> {
    pub fn new(provider: P) -> Self {
        Self {
            registry: IndexRegistry::new(),
            provider,
        }
    }

    pub fn with_registry(provider: P, registry: IndexRegistry) -> Self {
        Self { registry, provider }
    }

    pub fn registry(&self) -> &IndexRegistry {
        &self.registry
    }

    /// accumulated correction factor for an index over a date range
    ///
    /// every failure path degrades to the neutral factor with a fallback
    /// note; a broken index feed must not make the calculator unusable
    pub async fn resolve(
        &self,
        index: &str,
        start: NaiveDate,
        end: NaiveDate,
        mode: AccrualMode,
    ) -> FactorResolution {
        let Some(series_code) = self.registry.series_code(index) else {
            warn!(index, "unknown correction index, no correction applied");
            return FactorResolution::neutral(CorrectionFallback::UnknownIndex);
        };

        // the provider publishes a month's variation under the following
        // month's nominal date, so one extra leading month is requested
        let query_start = time::months_back(time::first_of_month(start), 1);

        // whole-period accrual never counts a month that has not fully
        // elapsed
        let effective_end = match mode {
            AccrualMode::ProRata => end,
            AccrualMode::WholePeriod => time::last_of_prev_month(end),
        };

        // padded so the trailing point survives the labeling offset
        let query_end = time::months_ahead(effective_end, 2);

        let entries = match self
            .provider
            .monthly_series(series_code, query_start, query_end)
            .await
        {
            Ok(entries) => entries,
            Err(err @ ProviderError::Malformed { .. }) => {
                warn!(index, %err, "malformed index series, no correction applied");
                return FactorResolution::neutral(CorrectionFallback::MalformedSeries);
            }
            Err(err) => {
                warn!(index, %err, "index provider unavailable, no correction applied");
                return FactorResolution::neutral(CorrectionFallback::ProviderUnavailable);
            }
        };

        let window_start = time::first_of_month(start);
        let window_end = time::first_of_month(effective_end);

        let mut factor = Factor::NEUTRAL;
        let mut points_applied = 0;
        for entry in entries {
            // a point labeled with month M measures month M-1
            let measured = time::months_back(time::first_of_month(entry.date), 1);
            if measured >= window_start && measured <= window_end {
                factor = factor.compound(entry.variation);
                points_applied += 1;
            }
        }

        debug!(index, %factor, points_applied, "accumulated correction factor");
        FactorResolution {
            factor,
            points_applied,
            fallback: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::provider::{SeriesEntry, StaticProvider};
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// jan..mar 2024 variations of 1%, 2% and 0.5%, published under the
    /// following months' nominal dates
    fn quarterly_table() -> StaticProvider {
        StaticProvider::default()
            .with_entry(date(2024, 1, 1), dec!(9.9)) // measures dec 2023
            .with_entry(date(2024, 2, 1), dec!(1))
            .with_entry(date(2024, 3, 1), dec!(2))
            .with_entry(date(2024, 4, 1), dec!(0.5))
            .with_entry(date(2024, 5, 1), dec!(7.7)) // measures apr 2024
    }

    #[tokio::test]
    async fn test_whole_period_quarter() {
        let resolver = FactorResolver::new(quarterly_table());
        let resolution = resolver
            .resolve(
                "IPCA (IBGE)",
                date(2024, 1, 1),
                date(2024, 4, 1),
                AccrualMode::WholePeriod,
            )
            .await;

        assert_eq!(resolution.points_applied, 3);
        assert_eq!(
            resolution.factor.as_decimal(),
            dec!(1.01) * dec!(1.02) * dec!(1.005)
        );
        assert!(resolution.fallback.is_none());
    }

    #[tokio::test]
    async fn test_pro_rata_includes_partial_end_month() {
        let resolver = FactorResolver::new(quarterly_table());
        let resolution = resolver
            .resolve(
                "IPCA (IBGE)",
                date(2024, 1, 1),
                date(2024, 4, 15),
                AccrualMode::ProRata,
            )
            .await;

        // pro-rata keeps april's point, whole-period would not
        assert_eq!(resolution.points_applied, 4);
        assert_eq!(
            resolution.factor.as_decimal(),
            dec!(1.01) * dec!(1.02) * dec!(1.005) * dec!(1.077)
        );
    }

    #[tokio::test]
    async fn test_compounding_is_associative_across_subranges() {
        let resolver = FactorResolver::new(quarterly_table());

        let combined = resolver
            .resolve(
                "IPCA (IBGE)",
                date(2024, 1, 1),
                date(2024, 4, 1),
                AccrualMode::WholePeriod,
            )
            .await;
        let first = resolver
            .resolve(
                "IPCA (IBGE)",
                date(2024, 1, 1),
                date(2024, 2, 1),
                AccrualMode::WholePeriod,
            )
            .await;
        let second = resolver
            .resolve(
                "IPCA (IBGE)",
                date(2024, 2, 1),
                date(2024, 4, 1),
                AccrualMode::WholePeriod,
            )
            .await;

        assert_eq!(
            combined.factor.as_decimal(),
            first.factor.as_decimal() * second.factor.as_decimal()
        );
    }

    #[tokio::test]
    async fn test_unknown_index_is_neutral() {
        let resolver = FactorResolver::new(quarterly_table());
        let resolution = resolver
            .resolve(
                "TR (extinct)",
                date(2024, 1, 1),
                date(2024, 4, 1),
                AccrualMode::WholePeriod,
            )
            .await;

        assert!(resolution.factor.is_neutral());
        assert_eq!(resolution.points_applied, 0);
        assert_eq!(resolution.fallback, Some(CorrectionFallback::UnknownIndex));
    }

    #[tokio::test]
    async fn test_empty_effective_window_is_neutral_without_fallback() {
        let resolver = FactorResolver::new(quarterly_table());
        // whole-period within a single month: no fully elapsed month
        let resolution = resolver
            .resolve(
                "IPCA (IBGE)",
                date(2024, 1, 5),
                date(2024, 1, 20),
                AccrualMode::WholePeriod,
            )
            .await;

        assert!(resolution.factor.is_neutral());
        assert_eq!(resolution.points_applied, 0);
        assert!(resolution.fallback.is_none());
    }

    struct FailingProvider;

    #[async_trait]
    impl IndexDataProvider for FailingProvider {
        async fn monthly_series(
            &self,
            _series_code: u32,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<SeriesEntry>, ProviderError> {
            Err(ProviderError::Unavailable {
                detail: "status 503".to_string(),
            })
        }
    }

    struct MalformedProvider;

    #[async_trait]
    impl IndexDataProvider for MalformedProvider {
        async fn monthly_series(
            &self,
            _series_code: u32,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<SeriesEntry>, ProviderError> {
            Err(ProviderError::Malformed {
                detail: "unexpected html body".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_to_neutral() {
        let resolver = FactorResolver::new(FailingProvider);
        let resolution = resolver
            .resolve(
                "IPCA (IBGE)",
                date(2024, 1, 1),
                date(2024, 4, 1),
                AccrualMode::WholePeriod,
            )
            .await;

        assert!(resolution.factor.is_neutral());
        assert_eq!(
            resolution.fallback,
            Some(CorrectionFallback::ProviderUnavailable)
        );
    }

    #[tokio::test]
    async fn test_malformed_payload_degrades_to_neutral() {
        let resolver = FactorResolver::new(MalformedProvider);
        let resolution = resolver
            .resolve(
                "IPCA (IBGE)",
                date(2024, 1, 1),
                date(2024, 4, 1),
                AccrualMode::WholePeriod,
            )
            .await;

        assert_eq!(
            resolution.fallback,
            Some(CorrectionFallback::MalformedSeries)
        );
    }

    /// records the window actually sent to the provider
    struct WindowSpy {
        calls: AtomicUsize,
        expected_start: NaiveDate,
        expected_end: NaiveDate,
    }

    #[async_trait]
    impl IndexDataProvider for WindowSpy {
        async fn monthly_series(
            &self,
            _series_code: u32,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<SeriesEntry>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(start, self.expected_start);
            assert_eq!(end, self.expected_end);
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_query_window_whole_period() {
        // start mid-january, end mid-april: query runs from dec 1 (one
        // leading month) to may 31 (march 31 effective end plus two months)
        let spy = WindowSpy {
            calls: AtomicUsize::new(0),
            expected_start: date(2023, 12, 1),
            expected_end: date(2024, 5, 31),
        };
        let resolver = FactorResolver::new(spy);
        let resolution = resolver
            .resolve(
                "IPCA (IBGE)",
                date(2024, 1, 15),
                date(2024, 4, 15),
                AccrualMode::WholePeriod,
            )
            .await;

        assert_eq!(resolver.provider.calls.load(Ordering::SeqCst), 1);
        assert!(resolution.factor.is_neutral());
    }

    #[tokio::test]
    async fn test_query_window_pro_rata_uses_end_as_is() {
        let spy = WindowSpy {
            calls: AtomicUsize::new(0),
            expected_start: date(2023, 12, 1),
            expected_end: date(2024, 6, 15),
        };
        let resolver = FactorResolver::new(spy);
        resolver
            .resolve(
                "IPCA (IBGE)",
                date(2024, 1, 15),
                date(2024, 4, 15),
                AccrualMode::ProRata,
            )
            .await;

        assert_eq!(resolver.provider.calls.load(Ordering::SeqCst), 1);
    }

    /// decimal string variations must be honored exactly as parsed
    #[tokio::test]
    async fn test_factor_is_nonnegative_for_large_negative_variation() {
        let provider = StaticProvider::default().with_entry(date(2024, 2, 1), dec!(-100));
        let resolver = FactorResolver::new(provider);
        let resolution = resolver
            .resolve(
                "IPCA (IBGE)",
                date(2024, 1, 1),
                date(2024, 2, 1),
                AccrualMode::WholePeriod,
            )
            .await;

        assert_eq!(resolution.factor.as_decimal(), Decimal::ZERO);
    }
}
