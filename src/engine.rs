use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use chrono::NaiveDate;

use crate::decimal::{Factor, Money, Rate};
use crate::errors::{CalculationError, Result};
use crate::index::{CorrectionFallback, FactorResolver, IndexDataProvider, IndexRegistry};
use crate::interest::{apply_surcharges, interest_on};
use crate::period::{ElapsedPeriods, PeriodEngine};
use crate::request::CalculationRequest;
use crate::types::{
    AccrualMode, CalculationId, CaseDetails, InterestMode, PeriodUnit, WholeMonthRounding,
};

/// immutable record of one completed calculation, carrying every
/// intermediate figure a practitioner needs to reproduce the update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub id: CalculationId,
    pub case: CaseDetails,

    // request echo
    pub principal: Money,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub index: String,
    pub accrual_mode: AccrualMode,
    pub interest_rate: Rate,
    pub interest_period: PeriodUnit,
    pub interest_mode: InterestMode,
    pub penalty_rate: Rate,
    pub fee_rate: Rate,

    // audit trail
    pub factor: Factor,
    pub variation_percent: Decimal,
    /// set when the neutral factor was substituted for the index
    pub correction_fallback: Option<CorrectionFallback>,
    pub corrected_value: Money,
    pub interest_value: Money,
    pub penalty_value: Money,
    pub fee_value: Money,
    pub subtotal: Money,
    pub final_value: Money,
    pub elapsed: ElapsedPeriods,
}

impl CalculationResult {
    /// true when the index resolved normally
    pub fn correction_applied(&self) -> bool {
        self.correction_fallback.is_none()
    }
}

/// orchestrates correction, interest, penalty and fee into one result
pub struct UpdateEngine<P> {
    resolver: FactorResolver<P>,
    periods: PeriodEngine,
}

impl<P: IndexDataProvider> UpdateEngine<P> {
    pub fn new(provider: P) -> Self {
        Self {
            resolver: FactorResolver::new(provider),
            periods: PeriodEngine::default(),
        }
    }

    pub fn with_registry(provider: P, registry: IndexRegistry) -> Self {
        Self {
            resolver: FactorResolver::with_registry(provider, registry),
            periods: PeriodEngine::default(),
        }
    }

    /// select the whole-period rounding policy
    pub fn with_rounding(mut self, rounding: WholeMonthRounding) -> Self {
        self.periods = PeriodEngine::new(rounding);
        self
    }

    /// index names the engine can resolve
    pub fn registry(&self) -> &IndexRegistry {
        self.resolver.registry()
    }

    /// run one calculation
    ///
    /// validation failures stop the pipeline before any provider call;
    /// later stages run strictly in sequence, each consuming the previous
    /// stage's output
    pub async fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResult> {
        request.validate()?;

        let resolution = self
            .resolver
            .resolve(
                &request.index,
                request.start_date,
                request.end_date,
                request.accrual_mode,
            )
            .await;

        let corrected_value = request
            .principal
            .checked_mul(resolution.factor.as_decimal())
            .ok_or(CalculationError::ArithmeticOverflow {
                stage: "corrected value",
            })?;

        let elapsed = self.periods.elapsed(
            request.start_date,
            request.end_date,
            request.accrual_mode,
            request.interest_period,
        )?;

        let accrual = interest_on(
            corrected_value,
            request.interest_rate,
            request.interest_mode,
            request.start_date,
            request.end_date,
        )?;

        let surcharges = apply_surcharges(
            corrected_value,
            accrual.interest,
            request.penalty_rate,
            request.fee_rate,
        );

        debug!(
            principal = %request.principal,
            factor = %resolution.factor,
            corrected = %corrected_value,
            interest = %accrual.interest,
            penalty = %surcharges.penalty,
            fee = %surcharges.fee,
            final_value = %surcharges.final_value,
            "calculation breakdown"
        );

        Ok(CalculationResult {
            id: Uuid::new_v4(),
            case: request.case.clone(),
            principal: request.principal,
            start_date: request.start_date,
            end_date: request.end_date,
            index: request.index.clone(),
            accrual_mode: request.accrual_mode,
            interest_rate: request.interest_rate,
            interest_period: request.interest_period,
            interest_mode: request.interest_mode,
            penalty_rate: request.penalty_rate,
            fee_rate: request.fee_rate,
            factor: resolution.factor,
            variation_percent: resolution.factor.variation_percent(),
            correction_fallback: resolution.fallback,
            corrected_value,
            interest_value: accrual.interest,
            penalty_value: surcharges.penalty,
            fee_value: surcharges.fee,
            subtotal: surcharges.subtotal,
            final_value: surcharges.final_value,
            elapsed,
        })
    }
}
