// src/utils/mod.rs

pub mod response;
