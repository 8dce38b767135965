use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug)]
pub enum CalculationError {
    #[error("principal must be positive: {amount}")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid {field} date: {message}")]
    InvalidDate {
        field: &'static str,
        message: String,
    },

    #[error("end date {end} must be after start date {start}")]
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("negative {field} rate: {rate}")]
    NegativeRate {
        field: &'static str,
        rate: Rate,
    },

    #[error("arithmetic overflow while computing {stage}")]
    ArithmeticOverflow {
        stage: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, CalculationError>;
