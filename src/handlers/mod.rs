// src/handlers/mod.rs

pub mod collector;
pub mod game;
pub mod ledger;
pub mod round;
