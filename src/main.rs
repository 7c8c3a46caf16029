use anyhow::Result;
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;
use unit_parsing::errors::error_logging;
use unit_parsing::{observability, ParserConfig, QuantityExtractor, UnitPriceCalculator};

/// Extract quantities and unit prices from product-label strings
#[derive(Parser, Debug)]
#[command(name = "unit-parsing", version, about)]
struct Cli {
    /// JSON parser configuration (overrides UNIT_PARSING_CONFIG_PATH)
    #[arg(long, short = 'c', env = "UNIT_PARSING_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Print one JSON object per input instead of plain text
    #[arg(long)]
    json: bool,

    /// Label or price-tag strings to parse
    #[arg(required = true)]
    texts: Vec<String>,
}

fn load_config(cli: &Cli) -> Result<ParserConfig> {
    let config = match &cli.config {
        Some(path) => ParserConfig::from_file(path),
        None => ParserConfig::from_env(),
    };
    config.map_err(|e| {
        error_logging::log_config_error(&e, "UNIT_PARSING_CONFIG_PATH", "load_config");
        anyhow::anyhow!("Failed to load parser configuration: {}", e)
    })
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    observability::init_tracing()?;

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!("{}", config.summary());

    let extractor = QuantityExtractor::with_config(config.clone())?;
    let calculator = UnitPriceCalculator::with_config(config)?;

    for text in &cli.texts {
        let quantity = extractor.extract(text);
        let unit_price = calculator.calculate(text);

        if cli.json {
            let line = json!({
                "input": text,
                "quantity": quantity.as_ref().ok(),
                "quantity_error": quantity.as_ref().err().map(|e| e.to_string()),
                "unit_price": unit_price.as_ref().ok(),
                "unit_price_error": unit_price.as_ref().err().map(|e| e.to_string()),
            });
            println!("{}", line);
        } else {
            println!("{}", text);
            match quantity {
                Ok(bundle) => println!("  quantity:   {}", bundle),
                Err(e) => println!("  quantity:   {}", e),
            }
            match unit_price {
                Ok(price) => println!("  unit price: {}", price),
                Err(e) => println!("  unit price: {}", e),
            }
        }
    }

    Ok(())
}
