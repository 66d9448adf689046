// src/handlers/mod.rs

pub mod category;
pub mod home;
pub mod quiz;
pub mod result;
