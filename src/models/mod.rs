// src/models/mod.rs

pub mod backend;
pub mod round;
pub mod round_record;
