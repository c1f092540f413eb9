use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_alternatives(config: &Config, name: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    let alternatives = match state.alternatives.find_alternatives(name).await {
        Ok(alternatives) => alternatives,
        Err(e) => {
            println!("✗ {e}");
            return Ok(());
        }
    };

    if alternatives.is_empty() {
        println!("No generic alternatives found for '{name}'");
        return Ok(());
    }

    println!("Generic alternatives for {name}:");
    for alt in alternatives {
        println!(
            "• {} (save ~{:.1}%, {})",
            alt.name, alt.estimated_savings, alt.availability
        );
    }

    Ok(())
}
