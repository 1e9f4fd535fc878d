use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner on stderr while a sheet loads. Hidden when stderr is not a tty.
pub fn loading_spinner(source_name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/"])
        .template("{msg} {spinner}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Loading {}", source_name));
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
