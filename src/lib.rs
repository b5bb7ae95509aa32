//! # arkaudit
//!
//! Audits a digital-preservation file inventory (a `files.db` produced by
//! the identification tooling) against the externally maintained
//! reference-files rulesets that say how each format should be handled
//! during the "convert unmanaged formats" workflow.
//!
//! The audit classifies every (PUID, signature, count) row of the
//! inventory's aggregate view into exactly one category, prints a
//! deterministic textual report, and can stage random example files for
//! unhandled formats so a human can triage them.
//!
//! ```text
//! ┌────────────────┐   ┌──────────────┐   ┌───────────┐
//! │ reference-files│──▶│   catalog     │──▶│ classify  │──▶ report
//! │ (7 JSON docs)  │   │ (merged sets) │   │ (reducer) │──▶ sample
//! └────────────────┘   └──────────────┘   └───────────┘
//!                                              ▲
//!                                  files.db ───┘ (read-only)
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`rulesets`] | Fetching and parsing the reference documents |
//! | [`catalog`] | Merged precedence-ordered classifier |
//! | [`classify`] | Pure row classification and tallying |
//! | [`report`] | Deterministic textual report |
//! | [`db`] | Read-only inventory access |
//! | [`sample`] | Example extraction for unhandled formats |
//! | [`audit`] | Full-run orchestration |

pub mod audit;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod db;
pub mod models;
pub mod report;
pub mod rulesets;
pub mod sample;
