pub mod aggregate;
pub mod cache;
pub mod config;
pub mod dates;
pub mod error;
pub mod espn;
pub mod handler;
pub mod ical;
pub mod league;
pub mod model;
