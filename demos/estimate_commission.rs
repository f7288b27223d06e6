use std::env;
use std::str::FromStr;

use rust_decimal::Decimal;
use tarifario::{Channel, estimate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Usage: estimate_commission <amount> [channel]
    let args: Vec<String> = env::args().collect();

    let base = Decimal::from_str(args.get(1).map(String::as_str).unwrap_or("100"))?;

    let channels = match args.get(2) {
        Some(id) => vec![Channel::from(id.as_str())],
        None => Channel::ALL.to_vec(),
    };

    for channel in channels {
        let result = estimate(base, channel);
        println!(
            "{:<40} commission S/ {:>8}  total S/ {:>10}",
            channel.label(),
            result.commission,
            result.total
        );
    }

    Ok(())
}
