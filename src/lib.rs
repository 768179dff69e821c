//! # RepoHealth Dashboard Library
//!
//! `repohealth` is a desktop client for the RepoHealth service. It fetches
//! the authenticated user's repositories and per-repository health reports
//! over HTTP and renders them as a searchable, sortable dashboard with a
//! 30-day commit-history chart.
//!
//! ## Features
//!
//! - Repository list with search, language filter and sort
//! - Aggregate stats (repository count, stars, forks, local favorites)
//! - Per-repository health scores and commit-history chart
//! - Cookie-based session display with OAuth login hand-off
//! - Light/dark theme following the system preference
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::{Arc, Mutex};
//!
//! use eframe::NativeOptions;
//! use repohealth::api::ApiClient;
//! use repohealth::app::AppWrapper;
//! use repohealth::config::Config;
//! use repohealth::RepoHealthApp;
//!
//! let client = ApiClient::new(&Config::load()).unwrap();
//! let app = Arc::new(Mutex::new(RepoHealthApp::new(client)));
//!
//! eframe::run_native(
//!     "RepoHealth",
//!     NativeOptions::default(),
//!     Box::new(|_cc| Ok(Box::new(AppWrapper { app }))),
//! )
//! .unwrap();
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use app::App as RepoHealthApp;
pub use types::{FilterState, HealthReport, Repository, SortKey};
