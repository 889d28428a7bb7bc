// 🏠 Restaurant - owns the three registries
//
// The restaurant is where registries live. It hands them out by reference
// so entity queries can be called against them, constructs and registers
// new entities, and offers reset() so every test starts from empty.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::entities::{
    Customer, CustomerRegistry, Meal, MealRegistry, Waiter, WaiterRegistry,
};
use crate::error::Result;

#[derive(Clone, Default)]
pub struct Restaurant {
    customers: CustomerRegistry,
    waiters: WaiterRegistry,
    meals: MealRegistry,
}

/// Point-in-time copy of every registry, in creation order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub customers: Vec<Customer>,
    pub waiters: Vec<Waiter>,
    pub meals: Vec<Meal>,
}

impl Restaurant {
    /// Create a restaurant with empty registries
    pub fn new() -> Self {
        Self::default()
    }

    /// Restaurant pre-loaded with the demo data set
    ///
    /// Howard dines with Terrance, Joe and Andrew; Daniel with Terrance and
    /// Esmery. Lisa, Josh and Steven each dine once with Terrance.
    pub fn seeded_demo() -> Self {
        let restaurant = Self::new();
        restaurant.seed_demo();
        restaurant
    }

    /// Add the demo data set to whatever is already registered
    pub fn seed_demo(&self) {
        let howard = self.add_customer("Howard", 30);
        let daniel = self.add_customer("Daniel", 30);
        let lisa = self.add_customer("Lisa", 24);
        let josh = self.add_customer("Josh", 41);
        let steven = self.add_customer("Steven", 35);

        let terrance = self.add_waiter("Terrance", 1);
        let joe = self.add_waiter("Joe", 3);
        let esmery = self.add_waiter("Esmery", 5);
        let andrew = self.add_waiter("Andrew", 2);

        howard.create_meal(&self.meals, &terrance, 30.0, 2.0);
        howard.create_meal(&self.meals, &joe, 25.0, 5.0);
        howard.create_meal(&self.meals, &andrew, 40.0, 6.0);
        daniel.create_meal(&self.meals, &terrance, 22.0, 4.0);
        daniel.create_meal(&self.meals, &esmery, 18.0, 3.0);
        lisa.create_meal(&self.meals, &terrance, 35.0, 5.0);
        josh.create_meal(&self.meals, &terrance, 12.0, 1.0);
        steven.create_meal(&self.meals, &terrance, 28.0, 3.0);

        info!(
            customers = self.customers.count(),
            waiters = self.waiters.count(),
            meals = self.meals.count(),
            "Seeded demo data"
        );
    }

    /// Seed the demo data set unless customers already exist.
    /// Returns whether anything was seeded.
    pub fn seed_demo_if_empty(&self) -> bool {
        if !self.customers.is_empty() {
            return false;
        }
        self.seed_demo();
        true
    }

    pub fn customers(&self) -> &CustomerRegistry {
        &self.customers
    }

    pub fn waiters(&self) -> &WaiterRegistry {
        &self.waiters
    }

    pub fn meals(&self) -> &MealRegistry {
        &self.meals
    }

    /// Construct and register a customer
    pub fn add_customer(&self, name: impl Into<String>, age: u32) -> Customer {
        self.customers.register(Customer::new(name, age))
    }

    /// Construct and register a waiter
    pub fn add_waiter(&self, name: impl Into<String>, experience: u32) -> Waiter {
        self.waiters.register(Waiter::new(name, experience))
    }

    /// Construct and register a meal
    pub fn add_meal(&self, waiter: &Waiter, customer: &Customer, total: f64, tip: f64) -> Meal {
        self.meals.register(Meal::new(waiter.id.clone(), customer.id.clone(), total, tip))
    }

    pub fn all_customers(&self) -> Vec<Customer> {
        self.customers.all()
    }

    pub fn all_waiters(&self) -> Vec<Waiter> {
        self.waiters.all()
    }

    pub fn all_meals(&self) -> Vec<Meal> {
        self.meals.all()
    }

    /// Empty all three registries.
    ///
    /// Each registry is cleared under its own lock, so the reset is not
    /// atomic across registries: a concurrent reader may see meals gone while
    /// customers or waiters remain.
    pub fn reset(&self) {
        self.meals.clear();
        self.customers.clear();
        self.waiters.clear();
        info!("Restaurant reset");
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            customers: self.customers.all(),
            waiters: self.waiters.all(),
            meals: self.meals.all(),
        }
    }

    /// Snapshot as pretty printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}

// ============================================================================
// TESTS
// ============================================================================
