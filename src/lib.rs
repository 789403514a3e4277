//! bestseller-pipeline - weekly bestseller list ingestion and reporting.
//!
//! Core library exposing the three pipeline stages (retrieval, loading,
//! reporting) plus configuration and storage helpers used by the CLI.

pub mod config;
pub mod models;
pub mod reporting;
pub mod repository;
pub mod retrieval;
pub mod storage;
