//! Team domain module.
//!
//! A team owns its membership list; users do not know their team.

mod aggregate;

pub use aggregate::Team;
