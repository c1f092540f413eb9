use crate::api::validation::validate_zip_code;
use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_pricing(config: &Config, name: &str, zip_code: &str) -> anyhow::Result<()> {
    if validate_zip_code(zip_code).is_err() {
        println!("Invalid ZIP code: {zip_code}. Expected 5 digits, e.g. 10001");
        return Ok(());
    }

    let state = SharedState::new(config.clone()).await?;

    let quotes = match state.pricing.get_pricing(name, zip_code).await {
        Ok(quotes) => quotes,
        Err(e) => {
            println!("✗ {e}");
            return Ok(());
        }
    };

    println!("Pricing for {name} in {zip_code} ({} options)", quotes.len());
    println!("{:-<78}", "");
    println!(
        "{:<26} {:<20} {:>10} {:>8} {:>10}",
        "Plan", "Pharmacy", "Cost", "Copay", "Deductible"
    );

    for quote in &quotes {
        println!(
            "{:<26} {:<20} {:>10.2} {:>8.2} {:>10.2}",
            quote.plan_type, quote.pharmacy_type, quote.cost, quote.copay, quote.deductible
        );
    }

    if let Some(cheapest) = quotes.iter().min_by(|a, b| a.cost.total_cmp(&b.cost)) {
        println!();
        println!(
            "Lowest: ${:.2} with {} at a {}",
            cheapest.cost, cheapest.plan_type, cheapest.pharmacy_type
        );
    }

    Ok(())
}
