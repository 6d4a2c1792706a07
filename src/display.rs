use spinoff::{Color, Spinner, spinners};
use std::io::IsTerminal;

use crate::io::preferences::Theme;

pub struct Display {
    instance: Option<Spinner>,
    no_animate: bool,
    theme: Theme,
}

impl Display {
    // The spinner api itself doesn't provide a way to create an empty instance, so we start
    // with none and only create one when there is something to wait for.
    pub fn new(no_animate: bool, theme: Theme) -> Self {
        Display {
            instance: None,
            no_animate,
            theme,
        }
    }

    /// Starts a spinner unless the user opted out or stdout is not a terminal.
    ///
    /// Auto-detecting terminals keeps the spinner from flooding pipes, so
    /// `pricebook raw | jq` works without `--no-animate`.
    pub fn start(&mut self, message: &str) {
        if self.no_animate || !std::io::stdout().is_terminal() || self.instance.is_some() {
            return;
        }

        self.instance = Some(Spinner::new(spinners::Dots, message.to_owned(), self.color()));
    }

    pub fn update_text(&mut self, message: String) {
        if let Some(spinner) = self.instance.as_mut() {
            spinner.update_text(message)
        }
    }

    pub fn stop_with_message(&mut self, message: &str) {
        // Note that it has to take ownership to prevent double stopping.
        match self.instance.take() {
            Some(mut s) => s.stop_with_message(message),
            None => println!("{}", message),
        }
    }

    fn color(&self) -> Color {
        match self.theme {
            Theme::Light => Color::Blue,
            Theme::Dark => Color::Cyan,
        }
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        if let Some(s) = self.instance.as_mut() {
            // .clear() leaves the cursor line behind, this doesn't.
            s.stop_with_message("");
        }
    }
}
