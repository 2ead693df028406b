//! Presentation layer of Hooked: the view-model core and the per-screen
//! view-models built on it.
//!
//! Screens never talk to repositories directly; every view-model is handed
//! the use-cases it needs by the composition root.

pub mod features;
pub mod validation;
pub mod view_model;

pub use validation::ValidationError;
pub use view_model::{HookedViewModel, Store, UNEXPECTED_ERROR, ViewModel};
