//! Terminal progress for long transcodes.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use ipums_transcode::TranscodeEvent;

/// Spinner counting raw records. Hidden when stderr is not a terminal.
pub fn record_spinner(message: &str, hidden: bool) -> ProgressBar {
    if hidden || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.enable_steady_tick(Duration::from_millis(120));
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg} {human_pos} records ({per_sec})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar
}

/// Apply a transcoder event to the spinner.
pub fn apply_event(bar: &ProgressBar, event: TranscodeEvent) {
    match event {
        TranscodeEvent::Progress { records_read } => bar.set_position(records_read),
        TranscodeEvent::Finished { records_read } => {
            bar.set_position(records_read);
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_move_hidden_bar() {
        let bar = record_spinner("transcoding", true);
        apply_event(&bar, TranscodeEvent::Progress { records_read: 10_000 });
        assert_eq!(bar.position(), 10_000);
        apply_event(&bar, TranscodeEvent::Finished { records_read: 12_345 });
        assert_eq!(bar.position(), 12_345);
        assert!(bar.is_finished());
    }
}
