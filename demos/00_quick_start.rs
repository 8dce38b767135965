/// quick start - update a debt against the live SGS index feed
use monetary_update_rs::{
    CalculationRequest, InterestMode, Money, PeriodUnit, Rate, SgsClient, UpdateEngine,
};
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let engine = UpdateEngine::new(SgsClient::new());

    // R$ 10,000 owed since mid-2020, IPCA correction plus 1% simple
    // monthly interest and 10% attorney fees
    let request = CalculationRequest::with_iso_dates(
        Money::from_major(10_000),
        "2020-06-15",
        "2024-06-15",
        "IPCA (IBGE)",
    )?
    .with_interest(
        Rate::from_percentage(dec!(1)),
        PeriodUnit::Monthly,
        InterestMode::Simple,
    )
    .with_fee(Rate::from_percentage(dec!(10)));

    let result = engine.calculate(&request).await?;

    println!("index factor:    {}", result.factor);
    println!("corrected value: {}", result.corrected_value.round_dp(2));
    println!("interest:        {}", result.interest_value.round_dp(2));
    println!("fees:            {}", result.fee_value.round_dp(2));
    println!("final value:     {}", result.final_value.round_dp(2));
    if !result.correction_applied() {
        println!("warning: no correction applied ({:?})", result.correction_fallback);
    }

    Ok(())
}
