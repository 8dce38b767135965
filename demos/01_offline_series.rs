/// offline usage - serve the index table from memory instead of the api
use monetary_update_rs::chrono::NaiveDate;
use monetary_update_rs::{AccrualMode, CalculationRequest, Money, StaticProvider, UpdateEngine};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // monthly variations for jan..apr 2024, published under the provider's
    // following-month nominal dates
    let provider = StaticProvider::default()
        .with_entry(date(2024, 2, 1), dec!(0.42))
        .with_entry(date(2024, 3, 1), dec!(0.83))
        .with_entry(date(2024, 4, 1), dec!(0.16))
        .with_entry(date(2024, 5, 1), dec!(0.38));

    let engine = UpdateEngine::new(provider);

    let base = CalculationRequest::new(
        Money::from_major(5_000),
        date(2024, 1, 10),
        date(2024, 4, 20),
        "IPCA (IBGE)",
    );

    // whole-period accrual drops the unfinished trailing month
    let whole = engine.calculate(&base).await?;
    // pro-rata keeps it
    let pro_rata = engine
        .calculate(&base.clone().with_accrual_mode(AccrualMode::ProRata))
        .await?;

    println!("whole-period factor: {}", whole.factor);
    println!("pro-rata factor:     {}", pro_rata.factor);
    println!(
        "corrected: {} vs {}",
        whole.corrected_value.round_dp(2),
        pro_rata.corrected_value.round_dp(2)
    );

    Ok(())
}
