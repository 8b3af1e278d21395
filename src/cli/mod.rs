//! Console front end: command dispatch, prompts, and text rendering.

pub mod commands;
pub mod output;
pub mod render;
pub mod shell;

pub use shell::run_shell;

use dialoguer::theme::ColorfulTheme;
use once_cell::sync::Lazy;

static THEME: Lazy<ColorfulTheme> = Lazy::new(ColorfulTheme::default);

/// Shared prompt theme so every dialog looks the same.
pub(crate) fn theme() -> &'static ColorfulTheme {
    &THEME
}
