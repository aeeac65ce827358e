//! Shopper session: state, actions, reducer and store.
//!
//! Every user interaction is an [`Action`]. [`reduce`] turns the current
//! [`SessionState`] and an action into the next state without touching the
//! original, and [`Storefront`] keeps the latest state and logs each step.

mod reducer;
mod selection;
mod state;
mod store;

pub use reducer::{reduce, Action};
pub use selection::ProductSelection;
pub use state::{SessionState, View};
pub use store::Storefront;
