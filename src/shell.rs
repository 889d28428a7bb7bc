// 🐚 Interactive shell - drive the registries one line at a time
//
// Each line is one command. Entities are addressed by name (first match in
// creation order). A failing command prints its error and the loop goes on.

use std::io::{self, BufRead, Write};
use tracing::debug;

use crate::config::Config;
use crate::entities::{Customer, Meal, Waiter};
use crate::error::{DiningError, Result};
use crate::restaurant::Restaurant;

pub const HELP: &str = "\
commands:
  customer <name> <age>                  create a customer
  waiter <name> <years>                  create a waiter
  meal <customer> <waiter> <total> [tip|auto]
                                         record a meal (tip defaults to 0)
  customers | waiters | meals            list a registry
  meals-of <customer>                    meals of a customer
  waiters-of <customer>                  waiters who served a customer
  served-by <waiter>                     customers a waiter served
  best-tipper <waiter>                   customer who tipped a waiter best
  reset                                  empty every registry
  help | quit";

// ============================================================================
// COMMANDS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Tip {
    /// No tip given (0)
    Omitted,
    Amount(f64),
    /// Configured tip rate applied to the total
    Auto,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    AddCustomer { name: String, age: u32 },
    AddWaiter { name: String, experience: u32 },
    AddMeal { customer: String, waiter: String, total: f64, tip: Tip },
    Customers,
    Waiters,
    Meals,
    MealsOf(String),
    WaitersOf(String),
    ServedBy(String),
    BestTipper(String),
    Reset,
    Help,
    Quit,
}

fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T> {
    value.parse().map_err(|_| DiningError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn usage(usage: &str) -> DiningError {
    DiningError::InvalidCommand(format!("usage: {}", usage))
}

impl ShellCommand {
    /// Parse one input line; `Ok(None)` for a blank line
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&head, args)) = words.split_first() else {
            return Ok(None);
        };

        let command = match (head, args) {
            ("customer", [name, age]) => ShellCommand::AddCustomer {
                name: name.to_string(),
                age: parse_number("age", age)?,
            },
            ("customer", _) => return Err(usage("customer <name> <age>")),
            ("waiter", [name, years]) => ShellCommand::AddWaiter {
                name: name.to_string(),
                experience: parse_number("experience", years)?,
            },
            ("waiter", _) => return Err(usage("waiter <name> <years>")),
            ("meal", [customer, waiter, total, rest @ ..]) if rest.len() <= 1 => {
                let tip = match rest.first() {
                    None => Tip::Omitted,
                    Some(&"auto") => Tip::Auto,
                    Some(tip) => Tip::Amount(parse_number("tip", tip)?),
                };
                ShellCommand::AddMeal {
                    customer: customer.to_string(),
                    waiter: waiter.to_string(),
                    total: parse_number("total", total)?,
                    tip,
                }
            }
            ("meal", _) => return Err(usage("meal <customer> <waiter> <total> [tip|auto]")),
            ("customers", []) => ShellCommand::Customers,
            ("waiters", []) => ShellCommand::Waiters,
            ("meals", []) => ShellCommand::Meals,
            ("meals-of", [name]) => ShellCommand::MealsOf(name.to_string()),
            ("waiters-of", [name]) => ShellCommand::WaitersOf(name.to_string()),
            ("served-by", [name]) => ShellCommand::ServedBy(name.to_string()),
            ("best-tipper", [name]) => ShellCommand::BestTipper(name.to_string()),
            ("reset", []) => ShellCommand::Reset,
            ("help", _) | ("?", _) => ShellCommand::Help,
            ("quit", _) | ("exit", _) => ShellCommand::Quit,
            _ => return Err(DiningError::InvalidCommand(line.trim().to_string())),
        };

        Ok(Some(command))
    }
}

// ============================================================================
// SHELL
// ============================================================================

pub struct Shell {
    restaurant: Restaurant,
    tip_rate: f64,
}

impl Shell {
    pub fn new(restaurant: Restaurant, config: &Config) -> Self {
        Shell {
            restaurant,
            tip_rate: config.tip_rate,
        }
    }

    pub fn restaurant(&self) -> &Restaurant {
        &self.restaurant
    }

    fn customer(&self, name: &str) -> Result<Customer> {
        self.restaurant
            .customers()
            .find_by_name(name)
            .ok_or_else(|| DiningError::UnknownName {
                kind: "customer",
                name: name.to_string(),
            })
    }

    fn waiter(&self, name: &str) -> Result<Waiter> {
        self.restaurant
            .waiters()
            .find_by_name(name)
            .ok_or_else(|| DiningError::UnknownName {
                kind: "waiter",
                name: name.to_string(),
            })
    }

    /// One line describing a meal, names resolved where possible
    fn describe_meal(&self, meal: &Meal) -> String {
        let customer = self
            .restaurant
            .customers()
            .find_by_id(&meal.customer_id)
            .map(|c| c.name)
            .unwrap_or_else(|| format!("<{}>", meal.customer_id));
        let waiter = self
            .restaurant
            .waiters()
            .find_by_id(&meal.waiter_id)
            .map(|w| w.name)
            .unwrap_or_else(|| format!("<{}>", meal.waiter_id));

        format!(
            "{} served by {}: total {:.2}, tip {:.2}",
            customer, waiter, meal.total, meal.tip
        )
    }

    fn describe_meals(&self, meals: &[Meal]) -> Vec<String> {
        if meals.is_empty() {
            return vec!["(no meals)".to_string()];
        }
        meals.iter().map(|meal| self.describe_meal(meal)).collect()
    }

    /// Run one command and return the lines to print
    pub fn execute(&self, command: &ShellCommand) -> Result<Vec<String>> {
        debug!(?command, "Shell command");
        let meals = self.restaurant.meals();

        let lines = match command {
            ShellCommand::AddCustomer { name, age } => {
                let customer = self.restaurant.add_customer(name.as_str(), *age);
                vec![format!("customer {} ({})", customer.name, customer.id)]
            }
            ShellCommand::AddWaiter { name, experience } => {
                let waiter = self.restaurant.add_waiter(name.as_str(), *experience);
                vec![format!("waiter {} ({})", waiter.name, waiter.id)]
            }
            ShellCommand::AddMeal { customer, waiter, total, tip } => {
                let customer = self.customer(customer)?;
                let waiter = self.waiter(waiter)?;
                let tip = match tip {
                    Tip::Omitted => 0.0,
                    Tip::Amount(amount) => *amount,
                    Tip::Auto => total * self.tip_rate,
                };
                let meal = customer.create_meal(meals, &waiter, *total, tip);
                vec![self.describe_meal(&meal)]
            }
            ShellCommand::Customers => self
                .restaurant
                .all_customers()
                .iter()
                .map(|c| format!("{} (age {})", c.name, c.age))
                .collect(),
            ShellCommand::Waiters => self
                .restaurant
                .all_waiters()
                .iter()
                .map(|w| format!("{} ({} years)", w.name, w.experience))
                .collect(),
            ShellCommand::Meals => self.describe_meals(&self.restaurant.all_meals()),
            ShellCommand::MealsOf(name) => self.describe_meals(&self.customer(name)?.meals(meals)),
            ShellCommand::WaitersOf(name) => self
                .customer(name)?
                .waiters(meals, self.restaurant.waiters())?
                .into_iter()
                .map(|w| w.name)
                .collect(),
            ShellCommand::ServedBy(name) => self
                .waiter(name)?
                .customers(meals, self.restaurant.customers())?
                .into_iter()
                .map(|c| c.name)
                .collect(),
            ShellCommand::BestTipper(name) => {
                match self.waiter(name)?.best_tipper(meals, self.restaurant.customers())? {
                    Some(customer) => vec![customer.name],
                    None => vec![format!("{} has not served any meals", name)],
                }
            }
            ShellCommand::Reset => {
                self.restaurant.reset();
                vec!["all registries cleared".to_string()]
            }
            ShellCommand::Help => vec![HELP.to_string()],
            ShellCommand::Quit => Vec::new(),
        };

        Ok(lines)
    }

    /// Read commands from `input` until end of input or `quit`
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;

            match ShellCommand::parse(&line) {
                Ok(Some(ShellCommand::Quit)) => return Ok(()),
                Ok(Some(command)) => match self.execute(&command) {
                    Ok(lines) => {
                        for line in lines {
                            writeln!(output, "{}", line)?;
                        }
                    }
                    Err(e) => writeln!(output, "error: {}", e)?,
                },
                Ok(None) => {}
                Err(e) => writeln!(output, "error: {}", e)?,
            }

            write!(output, "> ")?;
            output.flush()?;
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> Shell {
        Shell::new(Restaurant::new(), &Config::default())
    }

    fn run(shell: &Shell, script: &str) -> String {
        let mut output = Vec::new();
        shell.run(script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            ShellCommand::parse("customer Howard 30").unwrap(),
            Some(ShellCommand::AddCustomer { name: "Howard".to_string(), age: 30 })
        );
        assert_eq!(
            ShellCommand::parse("  meal Howard Terrance 10 1.5 ").unwrap(),
            Some(ShellCommand::AddMeal {
                customer: "Howard".to_string(),
                waiter: "Terrance".to_string(),
                total: 10.0,
                tip: Tip::Amount(1.5),
            })
        );
        assert_eq!(
            ShellCommand::parse("meal Howard Terrance 10").unwrap(),
            Some(ShellCommand::AddMeal {
                customer: "Howard".to_string(),
                waiter: "Terrance".to_string(),
                total: 10.0,
                tip: Tip::Omitted,
            })
        );
        assert_eq!(
            ShellCommand::parse("best-tipper Terrance").unwrap(),
            Some(ShellCommand::BestTipper("Terrance".to_string()))
        );
        assert_eq!(ShellCommand::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            ShellCommand::parse("customer Howard old").unwrap_err(),
            DiningError::InvalidNumber { field: "age", value: "old".to_string() }
        );
        assert!(matches!(
            ShellCommand::parse("customer Howard"),
            Err(DiningError::InvalidCommand(_))
        ));
        assert!(matches!(
            ShellCommand::parse("meal a b 1 2 3"),
            Err(DiningError::InvalidCommand(_))
        ));
        assert!(matches!(
            ShellCommand::parse("dance"),
            Err(DiningError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_meal_with_auto_tip_uses_configured_rate() {
        let config = Config { tip_rate: 0.1, ..Config::default() };
        let shell = Shell::new(Restaurant::new(), &config);

        run(&shell, "customer Howard 30\nwaiter Terrance 1\nmeal Howard Terrance 50 auto\n");

        let meals = shell.restaurant().all_meals();
        assert_eq!(meals.len(), 1);
        assert!((meals[0].tip - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_session_relationship_queries() {
        let shell = shell();
        let output = run(
            &shell,
            "customer Howard 30\n\
             waiter Terrance 1\n\
             waiter Joe 3\n\
             meal Howard Terrance 10 1\n\
             meal Howard Joe 10 4\n\
             waiters-of Howard\n\
             best-tipper Joe\n",
        );

        assert!(output.contains("Terrance\nJoe\n"));
        assert!(output.contains("> Howard\n"));
        assert_eq!(shell.restaurant().all_meals().len(), 2);
    }

    #[test]
    fn test_best_tipper_without_meals() {
        let shell = shell();
        let output = run(&shell, "waiter Terrance 1\nbest-tipper Terrance\n");

        assert!(output.contains("Terrance has not served any meals"));
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let shell = shell();
        let output = run(&shell, "meals-of Nobody\ncustomer Howard 30\ncustomers\n");

        assert!(output.contains("error: Unknown customer: Nobody"));
        assert!(output.contains("Howard (age 30)"));
    }

    #[test]
    fn test_quit_stops_reading() {
        let shell = shell();
        run(&shell, "customer Howard 30\nquit\ncustomer Daniel 25\n");

        assert_eq!(shell.restaurant().all_customers().len(), 1);
    }

    #[test]
    fn test_reset_clears_registries() {
        let shell = Shell::new(Restaurant::seeded_demo(), &Config::default());
        let output = run(&shell, "reset\nmeals\n");

        assert!(output.contains("all registries cleared"));
        assert!(output.contains("(no meals)"));
        assert!(shell.restaurant().all_customers().is_empty());
    }
}
