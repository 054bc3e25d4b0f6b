//! TUI module for deskboard.
//!
//! Renders the widget board in a terminal with ratatui and crossterm and
//! drives drag-and-drop from the keyboard and the mouse.

pub mod app;
pub mod event;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
