// 🤵 Waiter Entity - serves many customers, through meals
//
// "Waiter name is a VALUE (can change), Waiter UUID is IDENTITY"
//
// Mirrors Customer: no direct references, every relationship question is a
// scan of the meal registry filtered on this waiter's id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::customer::{Customer, CustomerRegistry};
use super::meal::{Meal, MealRegistry};
use super::registry::{Entity, Named, Registry};
use crate::error::Result;

/// Registry of all waiters
pub type WaiterRegistry = Registry<Waiter>;

// ============================================================================
// WAITER ENTITY
// ============================================================================

/// Identity: UUID (never changes)
/// Values: name, experience in years (can change)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waiter {
    /// Stable identity (UUID) - NEVER changes
    pub id: String,

    pub name: String,

    /// Years of experience
    pub experience: u32,

    pub created_at: DateTime<Utc>,
}

impl Waiter {
    /// Create new waiter entity with UUID
    pub fn new(name: impl Into<String>, experience: u32) -> Self {
        Waiter {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            experience,
            created_at: Utc::now(),
        }
    }

    /// Record a meal this waiter served to `customer`
    pub fn create_meal(&self, meals: &MealRegistry, customer: &Customer, total: f64, tip: f64) -> Meal {
        meals.register(Meal::new(self.id.clone(), customer.id.clone(), total, tip))
    }

    /// Every meal served by this waiter, in meal registry order
    pub fn meals(&self, meals: &MealRegistry) -> Vec<Meal> {
        meals.filter(|meal| meal.waiter_id == self.id)
    }

    /// The meal with the largest tip.
    ///
    /// Only a strictly larger tip replaces the current best, so on a tie the
    /// earliest meal wins. Meals with a NaN tip never count. `None` when
    /// this waiter has no meal with a comparable tip.
    pub fn best_tip(&self, meals: &MealRegistry) -> Option<Meal> {
        self.meals(meals)
            .into_iter()
            .filter(|meal| !meal.tip.is_nan())
            .fold(None, |best: Option<Meal>, meal| match best {
                Some(current) if meal.tip > current.tip => Some(meal),
                Some(current) => Some(current),
                None => Some(meal),
            })
    }

    /// Customer of the best tipped meal, or `None` when `best_tip` finds none
    pub fn best_tipper(&self, meals: &MealRegistry, customers: &CustomerRegistry) -> Result<Option<Customer>> {
        let Some(meal) = self.best_tip(meals) else {
            debug!(waiter = %self.id, "No comparable tips, no best tipper");
            return Ok(None);
        };

        let customer = customers.get(&meal.customer_id).inspect_err(|_| {
            warn!(waiter = %self.id, customer = %meal.customer_id, "Meal references unknown customer");
        })?;

        debug!(waiter = %self.id, customer = %customer.id, tip = meal.tip, "Best tipper");
        Ok(Some(customer))
    }

    /// Customer id of each meal, same order, duplicates kept
    pub fn customer_ids(&self, meals: &MealRegistry) -> Vec<String> {
        self.meals(meals)
            .into_iter()
            .map(|meal| meal.customer_id)
            .collect()
    }

    /// Customer of each meal, resolved against the customer registry
    pub fn customers(&self, meals: &MealRegistry, customers: &CustomerRegistry) -> Result<Vec<Customer>> {
        self.customer_ids(meals)
            .iter()
            .map(|customer_id| customers.get(customer_id))
            .collect()
    }

    /// Sum of the tips of every meal
    pub fn total_tips(&self, meals: &MealRegistry) -> f64 {
        self.meals(meals).iter().map(|meal| meal.tip).sum()
    }
}

impl Entity for Waiter {
    const KIND: &'static str = "Waiter";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for Waiter {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Same waiter when the ids match.
impl PartialEq for Waiter {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Waiter {}

// ============================================================================
// TESTS
// ============================================================================
