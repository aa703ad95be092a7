//! Live countdown to the next question.

use crate::constants;
use crate::errors::AppResult;
use crate::scheduler::{format_countdown, Clock, Tick};
use crate::session::DailySession;
use std::io::Write;
use std::time::Duration as StdDuration;
use tracing::{debug, info};

/// Shows a live countdown to midnight, then the new day's question.
///
/// The session is driven from a single-threaded tokio runtime that ticks once
/// per second. Ctrl-C stops the countdown early. If today is not answered yet
/// there is nothing to count down and the open question is printed instead.
pub fn run_countdown<C: Clock>(
    session: &mut DailySession<C>,
    out: &mut impl Write,
) -> AppResult<()> {
    let Some(remaining) = session.time_remaining() else {
        writeln!(out, "Today's question is still open:")?;
        writeln!(out, "{}", session.question())?;
        return Ok(());
    };

    write!(out, "Next question in {}", format_countdown(remaining))?;
    out.flush()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(drive(session, out))
}

async fn drive<C: Clock>(session: &mut DailySession<C>, out: &mut impl Write) -> AppResult<()> {
    let secs = u64::try_from(constants::TICK_INTERVAL_SECS).unwrap_or(1);
    let mut interval = tokio::time::interval(StdDuration::from_secs(secs));
    // The first tick completes immediately
    interval.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let tick = session.tick();
                if !render_tick(tick, session, out)? {
                    return Ok(());
                }
            }
            signal = &mut ctrl_c => {
                signal?;
                session.deactivate();
                writeln!(out)?;
                info!("Countdown interrupted");
                return Ok(());
            }
        }
    }
}

/// Writes the result of one tick. Returns whether the countdown goes on.
fn render_tick<C: Clock>(
    tick: Tick,
    session: &DailySession<C>,
    out: &mut impl Write,
) -> AppResult<bool> {
    match tick {
        Tick::Counting(remaining) => {
            write!(out, "\rNext question in {}", format_countdown(remaining))?;
            out.flush()?;
            Ok(true)
        }
        Tick::Expired => {
            writeln!(out, "\rNext question in {}", format_countdown(chrono::Duration::zero()))?;
            writeln!(out)?;
            writeln!(
                out,
                "{}",
                session.today().date().format(constants::HISTORY_DATE_FORMAT)
            )?;
            writeln!(out, "{}", session.question())?;
            Ok(false)
        }
        Tick::Idle => {
            debug!("Countdown stopped");
            writeln!(out)?;
            Ok(false)
        }
    }
}
