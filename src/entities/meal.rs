// 🍽️ Meal Entity - the join between Customer and Waiter
//
// A meal records that one waiter served one customer, plus the values that
// belong to that association (total and tip). Customers and waiters never
// point at each other directly; every Customer <-> Waiter question is
// answered by scanning the meal registry.
//
// References are ids. Nothing checks that they resolve at construction
// time: a dangling id only fails where it is looked up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::registry::{Entity, Registry};

/// Tip rate used by [`Meal::with_standard_tip`]
pub const STANDARD_TIP_RATE: f64 = 0.20;

/// Registry of all meals
pub type MealRegistry = Registry<Meal>;

// ============================================================================
// MEAL ENTITY
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    /// Stable identity (UUID) - NEVER changes
    pub id: String,

    /// Waiter ID (foreign key to Waiter entity)
    pub waiter_id: String,

    /// Customer ID (foreign key to Customer entity)
    pub customer_id: String,

    pub total: f64,
    pub tip: f64,

    pub created_at: DateTime<Utc>,
}

impl Meal {
    /// Create a meal, storing every value verbatim
    pub fn new(waiter_id: String, customer_id: String, total: f64, tip: f64) -> Self {
        Meal {
            id: uuid::Uuid::new_v4().to_string(),
            waiter_id,
            customer_id,
            total,
            tip,
            created_at: Utc::now(),
        }
    }

    /// Create a meal with no tip
    pub fn untipped(waiter_id: String, customer_id: String, total: f64) -> Self {
        Self::new(waiter_id, customer_id, total, 0.0)
    }

    /// Create a meal tipping `rate` of the total (0.15 = 15%)
    pub fn with_tip_rate(waiter_id: String, customer_id: String, total: f64, rate: f64) -> Self {
        Self::new(waiter_id, customer_id, total, total * rate)
    }

    /// Create a meal tipping the standard 20%
    pub fn with_standard_tip(waiter_id: String, customer_id: String, total: f64) -> Self {
        Self::with_tip_rate(waiter_id, customer_id, total, STANDARD_TIP_RATE)
    }

    /// Total plus tip
    pub fn grand_total(&self) -> f64 {
        self.total + self.tip
    }
}

impl Entity for Meal {
    const KIND: &'static str = "Meal";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Meals are the same meal when their ids match.
impl PartialEq for Meal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Meal {}

// ============================================================================
// TESTS
// ============================================================================
