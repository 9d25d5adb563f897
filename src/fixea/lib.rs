//! # fix-ea Architecture
//!
//! fix-ea finds and repairs AFP resource-fork streams that were stored as
//! `DosStream.*` extended attributes with a damaged header: the value starts
//! with `\0FP` instead of `AFP`. It can also append a null terminator to those
//! attributes.
//!
//! Like any good Unix tool the binary is thin. The engine is a library that
//! knows nothing about terminals, and the CLI is one client of it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses flags, reads the path from stdin if piped         │
//! │  - Prints reports, sets up logging, picks the exit code     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Resolves the path, checks -r targets a directory         │
//! │  - Dispatches to a single object or a tree walk             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - walk → process → read → classify/repair, select/append   │
//! │  - Returns `Outcome` bits, emits `Event`s to a `Reporter`   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - `AttrHost` / `AttrHandle` traits                         │
//! │  - FsHost (production), MemoryHost (testing)                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Object lifecycle
//!
//! Each object is opened, read once into an [`model::AttributeSet`], repaired
//! and/or appended to, and released before the next one is looked at. The set
//! owns the records; the "corrupted" and "to-append" selections are index
//! lists into it. The handle and the set are dropped together on every path
//! out of [`commands::process::run`].
//!
//! ## Results
//!
//! Nothing below the CLI fails a whole run because of one record or one
//! object. Every stage returns [`model::Outcome`] bits that are OR-ed up to a
//! single value, which the CLI turns into the exit status.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: The per-object pipeline and the tree walker
//! - [`store`]: Attribute access abstraction and implementations
//! - [`model`]: Records, sets, selections and outcomes
//! - [`config`]: Run options
//! - [`error`]: Error types and exit codes
//! - `cli`: Argument parsing, printing and logging for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
