// Dining Ledger - Core Library
// Customers and waiters related only through the meals they share.
// Exposes all modules for use in the CLI, the shell and tests

pub mod config;
pub mod entities;
pub mod error;
pub mod restaurant;
pub mod shell;

// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use config::{Cli, Commands, Config};
pub use entities::{
    Entity, Named, Registry,
    Customer, CustomerRegistry,
    Waiter, WaiterRegistry,
    Meal, MealRegistry, STANDARD_TIP_RATE,
};
pub use error::DiningError;
pub use restaurant::{Restaurant, Snapshot};
pub use shell::{Shell, ShellCommand};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
