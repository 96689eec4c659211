use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::styling::{bright_green, bright_red, bright_yellow};

/// Spinner shown while a submitted job works through its lifecycle.
pub struct PollProgress {
    pb: ProgressBar,
}

impl PollProgress {
    pub fn start(message: &str) -> Self {
        let pb = create_spinner(bright_yellow(message).to_string());
        Self { pb }
    }

    /// Update the lifecycle status message.
    pub fn update(&self, message: &str) {
        self.pb.set_message(bright_yellow(message).to_string());
    }

    pub fn finish_success(self, message: &str) {
        self.pb
            .finish_with_message(bright_green(format!("{message} ✓")).to_string());
        eprintln!();
    }

    pub fn finish_failure(self, message: &str) {
        self.pb
            .finish_with_message(bright_red(format!("{message} ✗")).to_string());
        eprintln!();
    }
}

fn create_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {msg} {spinner}")
            .unwrap(),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
