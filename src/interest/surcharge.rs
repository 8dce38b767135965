use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

/// penalty and fee figures layered over the corrected value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeBreakdown {
    pub penalty: Money,
    pub subtotal: Money,
    pub fee: Money,
    pub final_value: Money,
}

/// flat-percentage penalty on the corrected value
pub fn penalty_on(corrected: Money, rate: Rate) -> Money {
    if !rate.is_positive() {
        return Money::ZERO;
    }
    corrected.percentage(rate.as_percentage())
}

/// flat-percentage fee on a running subtotal
pub fn fee_on(subtotal: Money, rate: Rate) -> Money {
    if !rate.is_positive() {
        return Money::ZERO;
    }
    subtotal.percentage(rate.as_percentage())
}

/// layer penalty and fee over the corrected value plus interest
///
/// the penalty base is the corrected value alone; the fee base is the
/// running subtotal including interest and penalty
pub fn apply_surcharges(
    corrected: Money,
    interest: Money,
    penalty_rate: Rate,
    fee_rate: Rate,
) -> SurchargeBreakdown {
    let penalty = penalty_on(corrected, penalty_rate);
    let subtotal = corrected + interest + penalty;
    let fee = fee_on(subtotal, fee_rate);

    SurchargeBreakdown {
        penalty,
        subtotal,
        fee,
        final_value: subtotal + fee,
    }
}
