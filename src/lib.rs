pub mod catalog;
pub mod config;
pub mod contact;
pub mod csrf;
pub mod prom_metrics;
pub mod web;
