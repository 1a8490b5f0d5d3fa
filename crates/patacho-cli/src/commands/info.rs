use anyhow::Result;
use chrono::Local;

use patacho_core::page::NAV;
use patacho_core::AppConfig;

pub fn run(config: &AppConfig) -> Result<()> {
    let event = &config.event;
    let today = Local::now().date_naive();

    println!("{}", event.couple);
    println!(
        "  {} to {}",
        event.date.format("%d/%m/%Y"),
        event.end_date.format("%d/%m/%Y")
    );
    println!("  {} - {}", event.venue, event.location);
    println!("  Dress code: {}", event.dress_code);

    let days = event.days_until(today);
    if event.is_over(today) {
        println!("\nThe celebration is over.");
    } else if days > 1 {
        println!("\n{} days to go.", days);
    } else if days == 1 {
        println!("\nTomorrow!");
    } else {
        println!("\nHappening now.");
    }

    println!("\nSections:");
    for item in NAV {
        println!("  {:<16} #{}", item.label, item.target);
    }

    Ok(())
}
