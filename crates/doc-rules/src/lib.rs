//! Admin screens for document request rules.
//!
//! Rule storage and matching live in an external backend; this crate holds the
//! shared catalog of enumerations, the page state for each screen, the HTML
//! views, and the REST client that talks to the backend.

pub mod backend;
pub mod catalog;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod views;
pub mod workflows;
