//! Relay service for a classroom exercise: students work through the steps
//! of a marketing brief, submit their work, and teachers watch progress on a
//! dashboard.
//!
//! The service owns no durable state. Each route performs a single outbound
//! call — brief analysis goes to the Anthropic Messages API, submissions and
//! dashboard reads go to the spreadsheet web app that acts as the system of
//! record — and reshapes the reply.
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
