//! Deal inputs: acquisition, operation, expense vectors and scheduled events

mod data;
mod events;
mod expenses;
mod loader;

pub use data::{Acquisition, HoldingCosts, Operation};
pub use events::{
    event_at, CapitalComponent, ExpenseChange, ExpenseChangeEvent, RefinanceEvent,
    RentChangeEvent, Scheduled, ValueChangeEvent,
};
pub use expenses::{ExpenseCategory, MonthlyExpenses, MonthlyIncome};
pub use loader::{load_config, parse_config};
