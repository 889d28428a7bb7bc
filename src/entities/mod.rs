// Entity Models
// "Identity persists, values change"
//
// Each entity has:
// - Stable identity (UUID) that NEVER changes
// - Mutable values (name, age, experience, ...)
// - Registry holding every instance in creation order
//
// Customer and Waiter never reference each other. Meal is the join entity
// that carries both ids; every Customer <-> Waiter relationship goes
// through it.

pub mod registry;
pub mod customer;
pub mod waiter;
pub mod meal;

pub use registry::{Entity, Named, Registry};
pub use customer::{Customer, CustomerRegistry};
pub use waiter::{Waiter, WaiterRegistry};
pub use meal::{Meal, MealRegistry, STANDARD_TIP_RATE};
