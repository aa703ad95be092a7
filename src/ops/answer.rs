//! Submitting today's answer.

use crate::editor::{compose_answer, Editor};
use crate::errors::AppResult;
use crate::scheduler::{format_countdown, Clock};
use crate::session::DailySession;
use std::io::Write;
use tracing::{debug, info};

/// Records an answer for today.
///
/// With `text` the answer is taken as given; without it the question is opened
/// in `editor` and whatever the user writes becomes the answer. Submitting again
/// on the same day replaces the earlier answer.
///
/// # Errors
///
/// - `AppError::EmptyAnswer` if the answer is blank
/// - `AppError::Editor` if the editor fails
/// - `AppError::Store` or `AppError::Lock` if the answer could not be saved
pub fn submit_answer<C: Clock>(
    session: &mut DailySession<C>,
    text: Option<&str>,
    editor: &dyn Editor,
    out: &mut impl Write,
) -> AppResult<()> {
    let answer = match text {
        Some(text) => text.to_string(),
        None => {
            debug!("No answer given, opening editor");
            compose_answer(editor, session.question())?
        }
    };

    let replacing = session.answered_today();
    session.set_draft(answer);
    let draft = session.draft().to_string();
    session.submit(&draft)?;

    info!(
        "Answer {} for {}",
        if replacing { "replaced" } else { "saved" },
        session.today()
    );

    if replacing {
        writeln!(out, "Replaced today's answer.")?;
    } else {
        writeln!(out, "Saved today's answer.")?;
    }

    let tier = session.streak_tier();
    writeln!(out, "Streak: {} {}", session.streak(), tier.symbol())?;
    if let Some(remaining) = session.time_remaining() {
        writeln!(out, "Next question in {}", format_countdown(remaining))?;
    }
    Ok(())
}
