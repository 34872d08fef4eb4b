// src/utils/mod.rs

pub mod console;
pub mod openrouter;
