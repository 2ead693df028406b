//! The `hooked` application: settings, composition root, navigation and the
//! command-line front end.

pub mod commands;
pub mod container;
pub mod error;
pub mod features;
pub mod navigation;
pub mod screen;
pub mod settings;

pub use container::AppContainer;
pub use error::{AppError, Result};
pub use features::Features;
pub use screen::Screen;
pub use settings::Settings;
