#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod exercisedb;

pub use exercisedb::{Config, ExerciseDb};
