// 🧑 Customer Entity - dines with many waiters, through meals
//
// "Customer name is a VALUE (can change), Customer UUID is IDENTITY"
//
// A customer holds no references to waiters or meals. Its meals are found
// by scanning the meal registry for its id, and its waiters are the waiter
// of each of those meals, in the same order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::meal::{Meal, MealRegistry};
use super::registry::{Entity, Named, Registry};
use super::waiter::{Waiter, WaiterRegistry};
use crate::error::Result;

/// Registry of all customers
pub type CustomerRegistry = Registry<Customer>;

// ============================================================================
// CUSTOMER ENTITY
// ============================================================================

/// Identity: UUID (never changes)
/// Values: name, age (can change)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Stable identity (UUID) - NEVER changes
    pub id: String,

    pub name: String,
    pub age: u32,

    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Create new customer entity with UUID
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Customer {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            age,
            created_at: Utc::now(),
        }
    }

    /// Record a meal this customer had with `waiter`
    pub fn create_meal(&self, meals: &MealRegistry, waiter: &Waiter, total: f64, tip: f64) -> Meal {
        meals.register(Meal::new(waiter.id.clone(), self.id.clone(), total, tip))
    }

    /// Every meal of this customer, in meal registry order.
    ///
    /// Recomputed on each call, so it always reflects the registry as it is now.
    pub fn meals(&self, meals: &MealRegistry) -> Vec<Meal> {
        meals.filter(|meal| meal.customer_id == self.id)
    }

    /// Waiter id of each meal, same order, duplicates kept
    pub fn waiter_ids(&self, meals: &MealRegistry) -> Vec<String> {
        self.meals(meals)
            .into_iter()
            .map(|meal| meal.waiter_id)
            .collect()
    }

    /// Waiter of each meal, resolved against the waiter registry.
    ///
    /// Fails with `NotFound` if a meal points at a waiter that is not
    /// registered.
    pub fn waiters(&self, meals: &MealRegistry, waiters: &WaiterRegistry) -> Result<Vec<Waiter>> {
        let resolved = self
            .waiter_ids(meals)
            .iter()
            .map(|waiter_id| {
                waiters.get(waiter_id).inspect_err(|_| {
                    warn!(customer = %self.id, waiter = %waiter_id, "Meal references unknown waiter");
                })
            })
            .collect::<Result<Vec<Waiter>>>()?;

        debug!(customer = %self.id, count = resolved.len(), "Resolved waiters");
        Ok(resolved)
    }

    /// Sum of the totals of every meal
    pub fn total_spent(&self, meals: &MealRegistry) -> f64 {
        self.meals(meals).iter().map(|meal| meal.total).sum()
    }
}

impl Entity for Customer {
    const KIND: &'static str = "Customer";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for Customer {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Two customers are the same entity when their ids match; name and age
/// are values and play no part.
impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Customer {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_creation() {
        let customer = Customer::new("Howard", 30);

        assert!(!customer.id.is_empty());
        assert_eq!(customer.name, "Howard");
        assert_eq!(customer.age, 30);
    }

    #[test]
    fn test_same_values_different_identity() {
        let a = Customer::new("Howard", 30);
        let b = Customer::new("Howard", 30);
        assert_ne!(a, b);

        let mut renamed = a.clone();
        renamed.name = "Howie".to_string();
        assert_eq!(a, renamed);
    }

    #[test]
    fn test_create_meal_links_customer_and_waiter() {
        let meals = MealRegistry::new();
        let howard = Customer::new("Howard", 30);
        let terrance = Waiter::new("Terrance", 1);

        let meal = howard.create_meal(&meals, &terrance, 10.0, 1.0);

        assert_eq!(meal.customer_id, howard.id);
        assert_eq!(meal.waiter_id, terrance.id);
        assert_eq!(meals.all(), vec![meal.clone()]);
        assert_eq!(howard.meals(&meals), vec![meal]);
    }

    #[test]
    fn test_meals_only_include_own_meals() {
        let meals = MealRegistry::new();
        let howard = Customer::new("Howard", 30);
        let daniel = Customer::new("Daniel", 25);
        let terrance = Waiter::new("Terrance", 1);

        let first = howard.create_meal(&meals, &terrance, 10.0, 1.0);
        daniel.create_meal(&meals, &terrance, 20.0, 2.0);
        let third = howard.create_meal(&meals, &terrance, 30.0, 3.0);

        assert_eq!(howard.meals(&meals), vec![first, third]);
        assert_eq!(daniel.meals(&meals).len(), 1);
    }

    #[test]
    fn test_meals_reflect_registry_at_call_time() {
        let meals = MealRegistry::new();
        let howard = Customer::new("Howard", 30);
        let terrance = Waiter::new("Terrance", 1);

        assert!(howard.meals(&meals).is_empty());
        howard.create_meal(&meals, &terrance, 10.0, 1.0);
        assert_eq!(howard.meals(&meals).len(), 1);
        meals.clear();
        assert!(howard.meals(&meals).is_empty());
    }

    #[test]
    fn test_waiters_keep_duplicates_and_order() {
        let meals = MealRegistry::new();
        let waiters = WaiterRegistry::new();
        let howard = Customer::new("Howard", 30);
        let terrance = waiters.register(Waiter::new("Terrance", 1));
        let joe = waiters.register(Waiter::new("Joe", 4));

        howard.create_meal(&meals, &terrance, 10.0, 1.0);
        howard.create_meal(&meals, &joe, 10.0, 1.0);
        howard.create_meal(&meals, &terrance, 10.0, 1.0);

        let served_by = howard.waiters(&meals, &waiters).unwrap();
        assert_eq!(served_by, vec![terrance.clone(), joe.clone(), terrance.clone()]);
        assert_eq!(
            howard.waiter_ids(&meals),
            vec![terrance.id.clone(), joe.id, terrance.id]
        );
    }

    #[test]
    fn test_waiters_with_unregistered_waiter_fails() {
        let meals = MealRegistry::new();
        let waiters = WaiterRegistry::new();
        let howard = Customer::new("Howard", 30);
        let ghost = Waiter::new("Ghost", 0);

        howard.create_meal(&meals, &ghost, 10.0, 1.0);

        let result = howard.waiters(&meals, &waiters);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Waiter not found"));
    }

    #[test]
    fn test_total_spent() {
        let meals = MealRegistry::new();
        let howard = Customer::new("Howard", 30);
        let terrance = Waiter::new("Terrance", 1);

        assert_eq!(howard.total_spent(&meals), 0.0);
        howard.create_meal(&meals, &terrance, 10.0, 1.0);
        howard.create_meal(&meals, &terrance, 15.5, 2.0);
        assert_eq!(howard.total_spent(&meals), 25.5);
    }

    #[test]
    fn test_customer_registry_update() {
        let registry = CustomerRegistry::new();
        let howard = registry.register(Customer::new("Howard", 30));

        let older = registry.update(&howard.id, |c| c.age = 31).unwrap();
        assert_eq!(older.age, 31);
        assert_eq!(older, howard);
        assert_eq!(registry.find_by_name("Howard").unwrap().age, 31);
    }
}
