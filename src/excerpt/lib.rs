//! # Excerpt Architecture
//!
//! Excerpt turns passages copied from a reading app into shareable cards:
//! it imports the Books clipboard format, lays the passage out inside a framed
//! card, and paints the card into a PNG. It is a library first; the binary is
//! one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, reads clipboard/stdin, prints results  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Merges config with per-call overrides, resolves fonts    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - paste, card, kind, config                                │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  Core (paste.rs, card/)      │ │  Preferences (prefs/)      │
//! │  - Pure parsing and render   │ │  - PreferencesStore trait  │
//! │  - Deterministic output      │ │  - File and memory stores  │
//! └──────────────────────────────┘ └────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Parsing, layout and rasterization take values and return values. The card
//! renderer always produces an image: a missing font degrades to the font
//! bundled in the binary rather than failing.
//!
//! ## Testing Strategy
//!
//! 1. **Core** (`paste.rs`, `card/`): unit tests of the parser and of layout
//!    geometry, plus pixel checks on small rasters.
//! 2. **Commands and API**: driven with `InMemoryPreferences` and temp dirs.
//! 3. **CLI** (`tests/`): runs the binary with `EXCERPT_HOME` pointing at a
//!    temp dir and the `builtin` font.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Logic behind each command
//! - [`paste`]: Books clipboard parser
//! - [`card`]: Card layout, fonts and rasterization
//! - [`prefs`]: Persisted preferences (last excerpt kind)
//! - [`model`]: Core data types (`Excerpt`, `ExcerptKind`)
//! - [`config`]: Rendering defaults
//! - [`init`]: Home directory and context setup
//! - [`editor`]: External editor integration
//! - [`clipboard`]: Cross-platform clipboard reading
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod card;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod init;
pub mod model;
pub mod paste;
pub mod prefs;
