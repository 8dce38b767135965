pub mod accrual;
pub mod surcharge;

pub use accrual::{interest_on, InterestAccrual};
pub use surcharge::{apply_surcharges, fee_on, penalty_on, SurchargeBreakdown};
