//! Shared library module for the ChessUnlocked app crate.
#![allow(missing_docs, clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub use self::{app::ChessUnlockedApp, config::AppConfig, session::SessionServices};

pub mod action;
pub mod app;
pub mod config;
pub mod flow;
pub mod session;
pub mod state;
pub mod ui;
pub mod version;
pub mod view_model_builder;
