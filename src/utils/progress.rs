//! Spinner shown while an index is being built
//!
//! Without the `progress` feature the spinner compiles to nothing.

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

pub struct Spinner {
    #[cfg(feature = "progress")]
    bar: ProgressBar,
}

impl Spinner {
    /// Start a spinner with an initial message
    pub fn start(message: &str) -> Self {
        #[cfg(feature = "progress")]
        {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
                bar.set_style(style);
            }
            bar.set_message(message.to_string());
            bar.enable_steady_tick(std::time::Duration::from_millis(100));
            Self { bar }
        }

        #[cfg(not(feature = "progress"))]
        {
            let _ = message;
            Self {}
        }
    }

    pub fn set_message(&self, message: String) {
        #[cfg(feature = "progress")]
        self.bar.set_message(message);

        #[cfg(not(feature = "progress"))]
        let _ = message;
    }

    pub fn finish(&self, message: String) {
        #[cfg(feature = "progress")]
        self.bar.finish_with_message(message);

        #[cfg(not(feature = "progress"))]
        let _ = message;
    }
}
