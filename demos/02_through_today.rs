/// time control - pin "today" with the time provider for reproducible runs
use monetary_update_rs::chrono::{NaiveDate, TimeZone, Utc};
use monetary_update_rs::{
    CalculationRequest, Money, SafeTimeProvider, StaticProvider, TimeSource, UpdateEngine,
};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a pinned clock keeps the "update through today" request stable in
    // tests and replays; swap in TimeSource::System for production
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap(),
    ));

    let provider = StaticProvider::default()
        .with_entry(date(2024, 2, 1), dec!(0.42))
        .with_entry(date(2024, 3, 1), dec!(0.83))
        .with_entry(date(2024, 4, 1), dec!(0.16))
        .with_entry(date(2024, 5, 1), dec!(0.38));

    let engine = UpdateEngine::new(provider);

    let request = CalculationRequest::through_today(
        Money::from_major(2_500),
        date(2024, 1, 1),
        "IPCA (IBGE)",
        &time,
    );

    let result = engine.calculate(&request).await?;

    println!("updated through: {}", result.end_date);
    println!("factor:          {}", result.factor);
    println!("final value:     {}", result.final_value.round_dp(2));

    Ok(())
}
