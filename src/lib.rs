//! Personnel ledger for employee records, vacation days and working hours.
//!
//! This crate keeps an in-memory registry of employees with their vacation
//! entitlement and signed hours ledger, imports and persists the registry as
//! CSV, records daily attendance and settles attendance days against
//! configurable work models.

#![warn(missing_docs)]

pub mod attendance;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod settlement;

mod storage;
