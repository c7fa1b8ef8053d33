//! Ratatui widgets for the campo TUI.

pub mod command_bar;
pub mod entry_form;
pub mod help;
pub mod onboarding;
pub mod products;
pub mod records;
pub mod status;
pub mod summary;
pub mod tab_bar;
