// SPDX-License-Identifier: GPL-3.0-only

//! Cipherboard - a scrambling soft keyboard for COSMIC desktop
//!
//! Cipherboard renders an on-screen keyboard that can scramble its own key
//! layout and round-trips every literal keystroke through an authenticated
//! session cipher before splicing it into the bound text field. The round
//! trip is an obfuscation step, not a security boundary: the key never
//! leaves the process and every token is consumed immediately.
//!
//! # Architecture
//!
//! - `app`: application model and COSMIC Application trait implementation
//! - `app_settings`: centralized application constants
//! - `config`: user configuration with cosmic_config persistence
//! - `crypto`: the per-session keystroke cipher (AES-256-GCM, fixed nonce)
//! - `i18n`: localization support using fluent translations
//! - `input`: shift/caps state and the bound-field registry
//! - `layout`: embedded layout definitions, the Thai shift table and the
//!   scramble passes
//! - `renderer`: keyboard widget state and libcosmic/iced rendering
//! - `state`: panel position persistence

pub mod app;
pub mod app_settings;
pub mod config;
pub mod crypto;
pub mod i18n;
pub mod input;
pub mod layout;
pub mod renderer;
pub mod state;

// Re-export the fl! macro for localization
pub use crate::i18n::LANGUAGE_LOADER;

// ============================================================================
// Integration Tests
// ============================================================================
