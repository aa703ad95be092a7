//! End-to-end tests of the daily lifecycle with a manual clock: answering,
//! the midnight rollover, reactivation from disk and the streak.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use daybook::journal_core::{DayKey, StreakTier};
use daybook::journal_io::EntryStore;
use daybook::questions::{QuestionResolver, QuestionSource};
use daybook::scheduler::{Clock, DayBoundaryScheduler, ManualClock, Tick};
use daybook::session::DailySession;
use std::path::Path;
use tempfile::tempdir;

const QUESTIONS: &str = r#"{
    "01-03": "What started this month?",
    "02-03": "What surprised you?",
    "03-03": "Who helped you?"
}"#;

fn at(month: u32, day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, month, day)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

fn activate(dir: &Path, clock: &ManualClock) -> DailySession<ManualClock> {
    DailySession::activate(
        EntryStore::in_dir(dir),
        QuestionResolver::new(QuestionSource::Json(QUESTIONS.to_string())),
        clock.clone(),
    )
}

/// Ticks until the countdown expires, moving the clock along with it.
fn run_to_midnight(session: &mut DailySession<ManualClock>, clock: &ManualClock) -> u32 {
    let mut ticks = 0;
    loop {
        clock.advance(Duration::seconds(1));
        ticks += 1;
        match session.tick() {
            Tick::Counting(_) => continue,
            Tick::Expired => return ticks,
            Tick::Idle => panic!("countdown was not running"),
        }
    }
}

#[test]
fn test_three_day_lifecycle() {
    let temp_dir = tempdir().unwrap();
    let clock = ManualClock::new(at(3, 1, 23, 58, 0));
    let mut session = activate(temp_dir.path(), &clock);

    assert_eq!(session.question(), "What started this month?");
    session.submit("A new notebook.").unwrap();
    assert_eq!(session.streak(), 1);

    assert_eq!(run_to_midnight(&mut session, &clock), 120);
    assert_eq!(session.today(), DayKey::from_ymd(2024, 3, 2).unwrap());
    assert_eq!(session.question(), "What surprised you?");
    assert!(!session.answered_today());
    assert_eq!(session.streak(), 1);

    session.submit("Snow in March.").unwrap();
    assert_eq!(session.streak(), 2);
    drop(session);

    // The next morning a fresh process picks up where the last one stopped
    clock.set(at(3, 3, 8, 0, 0));
    let mut session = activate(temp_dir.path(), &clock);
    assert_eq!(session.question(), "Who helped you?");
    assert!(!session.answered_today());
    assert_eq!(session.streak(), 2);

    session.submit("My neighbour.").unwrap();
    assert_eq!(session.streak(), 3);
    assert_eq!(session.entries().len(), 3);
    assert_eq!(session.time_remaining(), Some(Duration::hours(16)));
}

#[test]
fn test_skipped_day_resets_streak() {
    let temp_dir = tempdir().unwrap();
    let clock = ManualClock::new(at(3, 1, 12, 0, 0));

    activate(temp_dir.path(), &clock).submit("day one").unwrap();
    clock.set(at(3, 2, 12, 0, 0));
    activate(temp_dir.path(), &clock).submit("day two").unwrap();

    // Nothing on the 3rd
    clock.set(at(3, 4, 9, 0, 0));
    let mut session = activate(temp_dir.path(), &clock);
    assert_eq!(session.streak(), 0);
    assert_eq!(session.streak_tier(), StreakTier::Cold);

    session.submit("back again").unwrap();
    assert_eq!(session.streak(), 1);
}

#[test]
fn test_week_long_streak_reaches_top_tier() {
    let temp_dir = tempdir().unwrap();
    let clock = ManualClock::new(at(3, 1, 20, 0, 0));
    let mut session = activate(temp_dir.path(), &clock);

    for n in 1..=7 {
        session.submit(&format!("answer {}", n)).unwrap();
        assert_eq!(session.streak(), n);
        if n < 7 {
            run_to_midnight(&mut session, &clock);
        }
    }
    assert_eq!(session.streak_tier(), StreakTier::Legendary);
    assert_eq!(session.store().load().len(), 7);
}

#[test]
fn test_two_starts_leave_one_timer() {
    let clock = ManualClock::new(at(3, 1, 23, 59, 0));
    let mut scheduler = DayBoundaryScheduler::new();

    scheduler.start(clock.now());
    clock.advance(Duration::seconds(30));
    let current = scheduler.start(clock.now());

    assert_eq!(scheduler.active_timer(), Some(current));
    assert_eq!(scheduler.time_remaining(), Some(Duration::seconds(30)));

    let mut expirations = 0;
    for _ in 0..120 {
        if scheduler.tick() == Tick::Expired {
            expirations += 1;
        }
    }
    assert_eq!(expirations, 1);
}
