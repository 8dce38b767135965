pub mod decimal;
pub mod engine;
pub mod errors;
pub mod index;
pub mod interest;
pub mod period;
pub mod request;
pub mod time;
pub mod types;

// re-export key types
pub use decimal::{Factor, Money, Rate};
pub use engine::{CalculationResult, UpdateEngine};
pub use errors::{CalculationError, Result};
pub use index::{
    CorrectionFallback, FactorResolution, FactorResolver, IndexDataProvider, IndexRegistry,
    ProviderError, SeriesEntry, SgsClient, StaticProvider,
};
pub use interest::{interest_on, InterestAccrual, SurchargeBreakdown};
pub use period::{ElapsedPeriods, PeriodEngine};
pub use request::CalculationRequest;
pub use types::{
    AccrualMode, CalculationId, CaseDetails, InterestMode, PeriodUnit, WholeMonthRounding,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
