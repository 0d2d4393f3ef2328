//! notestack - stacking toast notifications for terminal user interfaces.
//!
//! The [`notify`] module is the reusable widget: a [`notify::Notifier`] that
//! owns short-lived notes, stacks them in a screen corner and animates them
//! as notes come and go. The remaining modules make up the demo binary.

pub mod app;
pub mod commands;
pub mod config;
pub mod notify;
pub mod theme;
pub mod tui;
pub mod ui;
