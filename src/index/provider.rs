use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

/// default endpoint of the Banco Central SGS series api
pub const SGS_BASE_URL: &str = "https://api.bcb.gov.br/dados/serie/bcdata.sgs";

/// one monthly observation as published by the series provider
///
/// by provider convention the variation published under `date` measures the
/// month preceding it; callers re-attribute before using the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesEntry {
    pub date: NaiveDate,
    /// percentage variation, e.g. 0.83 for +0.83%
    pub variation: Decimal,
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("series request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("series endpoint unavailable: {detail}")]
    Unavailable {
        detail: String,
    },

    #[error("malformed series payload: {detail}")]
    Malformed {
        detail: String,
    },
}

/// source of monthly index variation series
#[async_trait]
pub trait IndexDataProvider: Send + Sync {
    /// ordered monthly observations covering the inclusive date range
    async fn monthly_series(
        &self,
        series_code: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SeriesEntry>, ProviderError>;
}

/// wire row of the SGS json payload
#[derive(Debug, Deserialize)]
struct SgsRow {
    data: String,
    valor: String,
}

/// http client for the Banco Central SGS monthly series api
pub struct SgsClient {
    http: reqwest::Client,
    base_url: String,
}

impl SgsClient {
    pub fn new() -> Self {
        Self::with_base_url(SGS_BASE_URL)
    }

    /// point the client at a different endpoint (proxies, test servers)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// the api takes dd/MM/yyyy query dates
    fn format_date(d: NaiveDate) -> String {
        d.format("%d/%m/%Y").to_string()
    }

    fn parse_rows(rows: Vec<SgsRow>) -> Result<Vec<SeriesEntry>, ProviderError> {
        rows.into_iter()
            .map(|row| {
                let date = NaiveDate::parse_from_str(&row.data, "%d/%m/%Y").map_err(|_| {
                    ProviderError::Malformed {
                        detail: format!("unparseable observation date: {}", row.data),
                    }
                })?;
                // some series publish decimal commas
                let variation =
                    Decimal::from_str(&row.valor.replace(',', ".")).map_err(|_| {
                        ProviderError::Malformed {
                            detail: format!("unparseable variation value: {}", row.valor),
                        }
                    })?;
                Ok(SeriesEntry { date, variation })
            })
            .collect()
    }
}

impl Default for SgsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IndexDataProvider for SgsClient {
    async fn monthly_series(
        &self,
        series_code: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SeriesEntry>, ProviderError> {
        let url = format!("{}/{}/dados", self.base_url, series_code);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("formato", "json".to_string()),
                ("dataInicial", Self::format_date(start)),
                ("dataFinal", Self::format_date(end)),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Unavailable {
                detail: format!("series {series_code} returned status {status}"),
            });
        }

        let body = response.text().await?;
        let rows: Vec<SgsRow> =
            serde_json::from_str(&body).map_err(|err| ProviderError::Malformed {
                detail: err.to_string(),
            })?;

        Self::parse_rows(rows)
    }
}

/// provider serving a fixed in-memory table, for tests, demos and callers
/// that maintain their own series snapshots
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    entries: Vec<SeriesEntry>,
}

impl StaticProvider {
    pub fn new(entries: Vec<SeriesEntry>) -> Self {
        Self { entries }
    }

    /// add one observation, keeping the table chronologically ordered
    pub fn with_entry(mut self, date: NaiveDate, variation: Decimal) -> Self {
        self.entries.push(SeriesEntry { date, variation });
        self.entries.sort_by_key(|e| e.date);
        self
    }
}

#[async_trait]
impl IndexDataProvider for StaticProvider {
    async fn monthly_series(
        &self,
        _series_code: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SeriesEntry>, ProviderError> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .copied()
            .collect())
    }
}
