pub mod provider;
pub mod registry;
pub mod resolver;

pub use provider::{
    IndexDataProvider, ProviderError, SeriesEntry, SgsClient, StaticProvider, SGS_BASE_URL,
};
pub use registry::IndexRegistry;
pub use resolver::{CorrectionFallback, FactorResolution, FactorResolver};
