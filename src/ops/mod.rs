//! User-facing operations behind each command.
//!
//! Every operation writes its output to the given writer, so the binary passes
//! stdout and tests pass a buffer.

pub mod answer;
pub mod countdown;
pub mod history;
pub mod question;
pub mod today;

pub use answer::submit_answer;
pub use countdown::run_countdown;
pub use history::show_history;
pub use question::show_question;
pub use today::show_today;
