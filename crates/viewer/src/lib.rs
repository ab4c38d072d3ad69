//! Headless route view core.
//!
//! `Viewer` owns the view state and a model of the map surface. UI events go
//! in, render commands and fetch plans come out; the host applies the
//! commands to its map/DOM and feeds backend completions back in.

pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod map;
pub mod panel;
pub mod session;
pub mod state;

pub use commands::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use event::*;
pub use session::*;
pub use state::*;
