//! Enrollment manager: teacher assignment and lesson rosters.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
