//! Fantasy Advisor
//!
//! A terminal chat client for a fantasy-football analysis backend.
//!
//! # Features
//!
//! - Keyword routing between full team analysis and quick chat answers
//! - Quick actions and trade evaluation
//! - Settings guard: no request goes out until league id and username are set
//! - Analysis panel with grade, brutality score, data-source badges and a
//!   collapsible execution trace
//!
//! # Quick Start
//!
//! ```bash
//! ADVISOR_API_URL=http://localhost:8000/api ./fantasy-advisor
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   lines    ┌─────────────┐   JSON/HTTP   ┌──────────────┐
//! │ Terminal │──────────▶│ ChatSession │──────────────▶│   Advisor    │
//! │  (REPL)  │◀──────────│ + Controller│◀──────────────│   backend    │
//! └──────────┘ transcript └──────┬──────┘               └──────────────┘
//!                                │
//!                                ▼
//!                          AnalysisPanel
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod panel;
pub mod settings;
pub mod traits;
