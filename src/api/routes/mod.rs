//! API route handlers

pub mod health;
pub mod leagues;
pub mod members;
pub mod profile;
pub mod sync;
