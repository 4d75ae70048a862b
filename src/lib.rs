//! Fund administration demo dashboard.
//!
//! A sidebar-driven single-page dashboard: an overview page built from
//! in-memory sample data, six onboarding/relationship forms that only
//! acknowledge submissions, and a static AML/KYC overview. Served over
//! HTTP by [`web::serve`].

pub mod analytics;
pub mod cli;
pub mod config;
pub mod forms;
pub mod navigation;
pub mod sample;
pub mod view;
pub mod web;
