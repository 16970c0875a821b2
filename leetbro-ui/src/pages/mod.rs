//! Application pages

pub mod dashboard;
pub mod leagues;
pub mod profile;

pub use dashboard::Dashboard;
pub use leagues::Leagues;
pub use profile::Profile;
