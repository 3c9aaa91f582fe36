//! `EZLyric` - line-by-line lyric display for live performance.
//!
//! Loads plain-text or JSON song files, lets an operator step through the
//! lines and writes each shown line to a file watched by an overlay.

// Re-export public modules for use in integration tests and as a library
pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod logging;
pub mod navigator;
pub mod output;
pub mod services;
pub mod settings;
pub mod song;
pub mod ui;
