//! The default view: today's question, its status and the streak.

use crate::constants;
use crate::errors::AppResult;
use crate::scheduler::{format_countdown, Clock};
use crate::session::DailySession;
use std::io::Write;
use tracing::debug;

/// Prints today's question, the answer if there is one, the streak, and the
/// time left until the next question.
pub fn show_today<C: Clock>(session: &DailySession<C>, out: &mut impl Write) -> AppResult<()> {
    debug!("Showing today's status");

    writeln!(
        out,
        "{}",
        session.today().date().format(constants::HISTORY_DATE_FORMAT)
    )?;
    writeln!(out, "{}", session.question())?;
    writeln!(out)?;

    match session.todays_entry() {
        Some(entry) if session.answered_today() => {
            writeln!(out, "Answered: {}", entry.answer)?;
        }
        _ => writeln!(out, "Not answered yet. Run `daybook answer` to reply.")?,
    }

    let streak = session.streak();
    let tier = session.streak_tier();
    writeln!(
        out,
        "Streak: {} {} {} ({})",
        streak,
        if streak == 1 { "day" } else { "days" },
        tier.symbol(),
        tier.label()
    )?;

    if let Some(remaining) = session.time_remaining() {
        writeln!(out, "Next question in {}", format_countdown(remaining))?;
    }

    Ok(())
}
