#![cfg_attr(not(test), forbid(unsafe_code))]

//! Shared models and configuration for the Aula platform.

pub mod config;
pub mod models;
