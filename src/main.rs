use anyhow::Result;
use std::io;

use dining_ledger::config::setup_tracing;
use dining_ledger::{Cli, Commands, Config, Restaurant, Shell, VERSION};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let config = Config::from_cli(&cli);
    setup_tracing(&config);

    let restaurant = Restaurant::new();
    if config.seed_demo {
        restaurant.seed_demo();
    }

    match cli.command() {
        Commands::Shell => run_shell(restaurant, &config)?,
        Commands::Demo => run_demo(restaurant)?,
        Commands::Export => run_export(restaurant)?,
        Commands::Tui => run_ui_mode(restaurant)?,
    }

    Ok(())
}

fn run_shell(restaurant: Restaurant, config: &Config) -> Result<()> {
    println!("🍽️  Dining Ledger {} - type `help` for commands", VERSION);

    let shell = Shell::new(restaurant, config);
    shell.run(io::stdin().lock(), io::stdout())?;

    println!();
    Ok(())
}

fn run_export(restaurant: Restaurant) -> Result<()> {
    restaurant.seed_demo_if_empty();
    println!("{}", restaurant.to_json()?);
    Ok(())
}

fn run_demo(restaurant: Restaurant) -> Result<()> {
    restaurant.seed_demo_if_empty();

    let meals = restaurant.meals();

    println!("🍽️  Dining Ledger - relationship tour");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("\n🧑 Customers");
    for customer in restaurant.all_customers() {
        let waiters: Vec<String> = customer
            .waiters(meals, restaurant.waiters())?
            .into_iter()
            .map(|w| w.name)
            .collect();
        println!(
            "   {:<8} {} meals, spent {:>7.2}, served by [{}]",
            customer.name,
            customer.meals(meals).len(),
            customer.total_spent(meals),
            waiters.join(", ")
        );
    }

    println!("\n🤵 Waiters");
    for waiter in restaurant.all_waiters() {
        let best = match waiter.best_tipper(meals, restaurant.customers())? {
            Some(customer) => customer.name,
            None => "-".to_string(),
        };
        println!(
            "   {:<8} {} meals, tips {:>6.2}, best tipper {}",
            waiter.name,
            waiter.meals(meals).len(),
            waiter.total_tips(meals),
            best
        );
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ {} meals recorded", meals.count());

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(restaurant: Restaurant) -> Result<()> {
    restaurant.seed_demo_if_empty();

    let mut app = dining_ledger::ui::App::new(restaurant);
    dining_ledger::ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_restaurant: Restaurant) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
