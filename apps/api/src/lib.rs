//! Job application tracker: validated records persisted per user, dashboard
//! views and CSV round trips over them, and model-backed CV tailoring.

pub mod ai;
pub mod applications;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod errors;
pub mod llm_client;
pub mod models;
pub mod routes;
pub mod state;
