mod progress;
mod styling;
mod summary;
mod tables;

pub use progress::PollProgress;
pub use styling::{dim, magenta_bold};
pub use summary::print_report;

/// Prints the profilens banner to stderr.
///
/// Displays the tool name, version, and description at the start of execution.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("🔭 profilens"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("GitHub Profile Analysis Client")
    );
}
