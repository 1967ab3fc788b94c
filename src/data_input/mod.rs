// src/data_input/mod.rs

pub mod synthetic;
