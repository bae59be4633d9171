//! setup-guide - compose a project setup guide from rule templates
//!
//! Keywords select rules from a catalog, each selected rule pulls in the
//! rules it requires, and the result is rendered into one markdown document.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod sources;
