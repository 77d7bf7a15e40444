//! # Novastorm
//!
//! Top-down arcade shooter gameplay built on Nova Engine: ships, weapons,
//! items, loot, and the endless wave survival mode.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod components;
pub mod databases;
pub mod modes;
pub mod weapon;
