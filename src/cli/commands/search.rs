use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_search_drug(config: &Config, name: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    println!("Searching for: {name}");

    match state.resolver.resolve(name).await {
        Ok(drug) => {
            println!();
            println!("✓ {}", drug.name);
            println!("  Generic:      {}", drug.generic_name);
            println!("  Brand:        {}", drug.brand_name);
            if !drug.ndc.is_empty() {
                println!("  NDC:          {}", drug.ndc);
            }
            if !drug.manufacturer.is_empty() {
                println!("  Manufacturer: {}", drug.manufacturer);
            }
        }
        Err(e) => println!("✗ {e}"),
    }

    Ok(())
}
