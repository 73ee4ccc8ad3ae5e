//! EV range estimation and home-storage payback engines.

pub mod config;
pub mod error;
/// CSV export of study results.
pub mod io;
pub mod payback;
/// Physics-based consumption and range model with scenario catalog.
pub mod range;
pub mod rounding;
