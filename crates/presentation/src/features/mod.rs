//! One view-model per screen.

pub mod auth;
pub mod catches;
pub mod skunks;
