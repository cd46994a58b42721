//! Page extractors
//!
//! `links` reads the tournament index, `innings` reads one match scorecard.

mod innings;
mod links;

pub use innings::*;
pub use links::*;
