//! Spinner for remote round trips, using indicatif.

use std::time::Duration;

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

use super::context::UiContext;
use super::theme::spinner_frames;

/// A spinner for indeterminate progress. Silent unless animation is allowed.
pub struct Spinner {
    bar: Option<IndicatifBar>,
}

impl Spinner {
    pub fn start(ctx: &UiContext, message: &str) -> Self {
        if !ctx.allows_animation() {
            return Self { bar: None };
        }
        let template = if ctx.color {
            "{spinner:.cyan} {msg}..."
        } else {
            "{spinner} {msg}..."
        };
        let pb = IndicatifBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template(template) {
            pb.set_style(style.tick_strings(spinner_frames(ctx.unicode)));
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        Self { bar: Some(pb) }
    }

    /// Clear the spinner line.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;
    use trace_core::theme::ThemeMode;

    #[test]
    fn test_spinner_is_silent_without_tty() {
        let ctx = UiContext {
            is_tty: false,
            color: false,
            unicode: true,
            width: 80,
            mode: OutputMode::Plain,
            palette: ThemeMode::Light,
        };
        let spinner = Spinner::start(&ctx, "Syncing");
        assert!(spinner.bar.is_none());
        spinner.finish();
    }
}
