//! The daily session: one owner for everything a front end shows.
//!
//! A [`DailySession`] holds the loaded entries, today's question, the answer
//! gate flags, the draft answer and the day-boundary countdown. Front ends read
//! its getters and call [`submit`](DailySession::submit) and
//! [`tick`](DailySession::tick); nothing else mutates lifecycle state.

use crate::errors::{AppError, AppResult};
use crate::journal_core::{
    compute_streak, has_answered_today, upsert_for_today, DayKey, Entry, StreakTier,
};
use crate::journal_io::EntryStore;
use crate::questions::QuestionResolver;
use crate::scheduler::{Clock, DayBoundaryScheduler, Tick};
use chrono::Duration;
use tracing::{debug, info};

pub struct DailySession<C: Clock> {
    store: EntryStore,
    resolver: QuestionResolver,
    clock: C,
    entries: Vec<Entry>,
    today: DayKey,
    question: String,
    answered_today: bool,
    just_submitted: bool,
    draft: String,
    scheduler: DayBoundaryScheduler,
    rollover_callbacks: Vec<Box<dyn FnMut()>>,
}

impl<C: Clock> DailySession<C> {
    /// Loads entries and resolves today's question.
    ///
    /// If today is already answered the countdown to midnight starts right away.
    pub fn activate(store: EntryStore, resolver: QuestionResolver, clock: C) -> Self {
        let entries = store.load();
        let today = clock.today();
        let question = resolver.resolve_question(today).to_string();
        let answered_today = has_answered_today(&entries, today);

        let mut session = DailySession {
            store,
            resolver,
            clock,
            entries,
            today,
            question,
            answered_today,
            just_submitted: false,
            draft: String::new(),
            scheduler: DayBoundaryScheduler::new(),
            rollover_callbacks: Vec::new(),
        };

        if session.answered_today {
            session.scheduler.start(session.clock.now());
        }

        debug!(
            "Session activated for {} (answered: {}, entries: {})",
            session.today,
            session.answered_today,
            session.entries.len()
        );
        session
    }

    /// Records `answer` as today's entry, replacing any earlier one.
    ///
    /// The answer is trimmed before it is stored.
    ///
    /// # Errors
    ///
    /// - `AppError::EmptyAnswer` for an empty or whitespace-only answer; the
    ///   store is not touched
    /// - `AppError::Store` or `AppError::Lock` if saving fails; the session
    ///   keeps its previous entries and draft so the caller can retry
    pub fn submit(&mut self, answer: &str) -> AppResult<()> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(AppError::EmptyAnswer);
        }

        // The wall clock decides which day is written
        let today = self.clock.today();
        if today != self.today {
            // Keep the draft in case the save below fails
            let draft = std::mem::take(&mut self.draft);
            self.roll_over(today);
            self.draft = draft;
        }

        let updated = upsert_for_today(self.entries.clone(), self.today, &self.question, answer);
        self.store.save(&updated)?;

        self.entries = updated;
        self.answered_today = true;
        self.just_submitted = true;
        self.draft.clear();
        self.scheduler.start(self.clock.now());

        info!("Recorded answer for {}", self.today);
        Ok(())
    }

    /// Advances the countdown by one interval, resetting for the new day on expiry.
    ///
    /// If the countdown runs out before the wall clock has left the session's
    /// day, it is re-armed for the rest of that day and the tick reports the
    /// new remaining time instead of `Tick::Expired`.
    pub fn tick(&mut self) -> Tick {
        match self.scheduler.tick() {
            Tick::Expired => {
                let today = self.clock.today();
                if today == self.today {
                    debug!("Countdown ran ahead of the wall clock, re-arming");
                    self.scheduler.start(self.clock.now());
                    return self
                        .scheduler
                        .time_remaining()
                        .map_or(Tick::Idle, Tick::Counting);
                }
                self.roll_over(today);
                Tick::Expired
            }
            tick => tick,
        }
    }

    fn roll_over(&mut self, today: DayKey) {
        self.today = today;
        self.question = self.resolver.resolve_question(today).to_string();
        self.answered_today = has_answered_today(&self.entries, today);
        self.just_submitted = false;
        self.draft.clear();
        self.scheduler.stop();
        if self.answered_today {
            self.scheduler.start(self.clock.now());
        }

        info!("New day {}: {}", self.today, self.question);
        for callback in self.rollover_callbacks.iter_mut() {
            callback();
        }
    }

    /// Stops the countdown.
    pub fn deactivate(&mut self) {
        self.scheduler.stop();
    }

    /// Registers a callback run whenever the session moves to another day,
    /// whether the countdown expired or a submission found the clock elsewhere.
    pub fn on_rollover(&mut self, callback: Box<dyn FnMut()>) {
        self.rollover_callbacks.push(callback);
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn today(&self) -> DayKey {
        self.today
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Today's entry, if one has been answered.
    pub fn todays_entry(&self) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|entry| entry.day == self.today && entry.is_answered())
    }

    pub fn answered_today(&self) -> bool {
        self.answered_today
    }

    /// True between a successful submission and the next day boundary.
    pub fn just_submitted(&self) -> bool {
        self.just_submitted
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn streak(&self) -> u32 {
        compute_streak(&self.entries, self.today, self.answered_today)
    }

    pub fn streak_tier(&self) -> StreakTier {
        StreakTier::for_count(self.streak())
    }

    /// Time left until midnight while the countdown runs.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.scheduler.time_remaining()
    }

    pub fn scheduler(&self) -> &DayBoundaryScheduler {
        &self.scheduler
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }
}

impl<C: Clock> Drop for DailySession<C> {
    fn drop(&mut self) {
        self.scheduler.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants;
    use crate::errors::StoreError;
    use crate::questions::QuestionSource;
    use crate::scheduler::ManualClock;
    use chrono::{NaiveDate, NaiveDateTime};
    use chrono_tz::America::New_York;
    use chrono_tz::Tz;
    use std::cell::Cell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::{tempdir, TempDir};

    const QUESTIONS: &str =
        r#"{"14-01": "Yesterday's question?", "15-01": "Today's question?", "16-01": "Tomorrow's question?"}"#;

    fn at(d: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn day(d: u32) -> DayKey {
        DayKey::from_ymd(2024, 1, d).unwrap()
    }

    fn ny_day(m: u32, d: u32) -> DayKey {
        DayKey::from_ymd(2024, m, d).unwrap()
    }

    fn session_in_new_york(
        m: u32,
        d: u32,
        h: u32,
        min: u32,
    ) -> (TempDir, ManualClock<Tz>, DailySession<ManualClock<Tz>>) {
        let temp_dir = tempdir().unwrap();
        let local = NaiveDate::from_ymd_opt(2024, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap();
        let clock = ManualClock::in_zone(New_York, local);
        let session = DailySession::activate(
            EntryStore::in_dir(temp_dir.path()),
            resolver(),
            clock.clone(),
        );
        (temp_dir, clock, session)
    }

    fn resolver() -> QuestionResolver {
        QuestionResolver::new(QuestionSource::Json(QUESTIONS.to_string()))
    }

    fn session_at(now: NaiveDateTime) -> (TempDir, ManualClock, DailySession<ManualClock>) {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let clock = ManualClock::new(now);
        let session = DailySession::activate(
            EntryStore::in_dir(temp_dir.path()),
            resolver(),
            clock.clone(),
        );
        (temp_dir, clock, session)
    }

    #[test]
    fn test_activate_fresh_day() {
        let (_dir, _clock, session) = session_at(at(15, 9, 0, 0));

        assert_eq!(session.today(), day(15));
        assert_eq!(session.question(), "Today's question?");
        assert!(!session.answered_today());
        assert!(!session.just_submitted());
        assert!(session.time_remaining().is_none());
        assert_eq!(session.streak(), 0);
    }

    #[test]
    fn test_submit_persists_and_starts_countdown() {
        let (_dir, _clock, mut session) = session_at(at(15, 21, 0, 0));
        session.set_draft("  Walked by the sea.  ");
        let draft = session.draft().to_string();

        session.submit(&draft).expect("submit should succeed");

        assert!(session.answered_today());
        assert!(session.just_submitted());
        assert_eq!(session.draft(), "");
        assert_eq!(session.time_remaining(), Some(Duration::hours(3)));
        assert_eq!(session.streak(), 1);

        let stored = session.store().load();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].answer, "Walked by the sea.");
        assert_eq!(stored[0].question, "Today's question?");
        assert_eq!(stored[0].day, day(15));
        assert_eq!(session.todays_entry(), Some(&stored[0]));
    }

    #[test]
    fn test_resubmission_replaces_todays_entry() {
        let (_dir, _clock, mut session) = session_at(at(15, 9, 0, 0));
        session.submit("first").unwrap();
        session.submit("second").unwrap();

        let stored = session.store().load();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].answer, "second");
        assert!(session.scheduler().active_timer().is_some());
    }

    #[test]
    fn test_empty_answer_rejected_without_touching_store() {
        let (_dir, _clock, mut session) = session_at(at(15, 9, 0, 0));
        session.set_draft("   ");

        for answer in ["", "   ", "\n\t"] {
            match session.submit(answer) {
                Err(AppError::EmptyAnswer) => {}
                other => panic!("Expected EmptyAnswer, got {:?}", other),
            }
        }
        assert!(!session.store().path().exists());
        assert!(!session.answered_today());
        assert_eq!(session.draft(), "   ");
    }

    #[test]
    fn test_failed_save_keeps_state_for_retry() {
        let temp_dir = tempdir().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let clock = ManualClock::new(at(15, 9, 0, 0));
        let mut session = DailySession::activate(
            EntryStore::in_dir(&blocker.join("daybook")),
            resolver(),
            clock,
        );
        session.set_draft("keep me");

        let result = session.submit("keep me");
        match &result {
            Err(AppError::Store(StoreError::Directory { .. })) => {}
            other => panic!("Expected a store failure, got {:?}", other),
        }
        assert!(result.unwrap_err().is_write_failure());
        assert!(session.entries().is_empty());
        assert!(!session.answered_today());
        assert!(!session.just_submitted());
        assert_eq!(session.draft(), "keep me");
        assert!(session.time_remaining().is_none());
    }

    #[test]
    fn test_activate_when_already_answered() {
        let temp_dir = tempdir().unwrap();
        let store = EntryStore::in_dir(temp_dir.path());
        let entries = vec![
            Entry::new(day(13), "Q", "a"),
            Entry::new(day(14), "Q", "b"),
            Entry::new(day(15), "Q", "c"),
        ];
        store.save(&entries).unwrap();

        let session =
            DailySession::activate(store, resolver(), ManualClock::new(at(15, 23, 0, 0)));

        assert!(session.answered_today());
        assert!(!session.just_submitted());
        assert_eq!(session.time_remaining(), Some(Duration::hours(1)));
        assert_eq!(session.streak(), 3);
        assert_eq!(session.streak_tier(), StreakTier::Kindling);
    }

    #[test]
    fn test_streak_counts_yesterday_before_answering() {
        let temp_dir = tempdir().unwrap();
        let store = EntryStore::in_dir(temp_dir.path());
        store
            .save(&[Entry::new(day(14), "Q", "b"), Entry::new(day(13), "Q", "a")])
            .unwrap();

        let mut session =
            DailySession::activate(store, resolver(), ManualClock::new(at(15, 8, 0, 0)));
        assert_eq!(session.streak(), 2);

        session.submit("c").unwrap();
        assert_eq!(session.streak(), 3);
    }

    #[test]
    fn test_expiry_resets_for_new_day() {
        let (_dir, clock, mut session) = session_at(at(15, 23, 59, 58));
        let rollovers = Rc::new(Cell::new(0));
        let counter = Rc::clone(&rollovers);
        session.on_rollover(Box::new(move || counter.set(counter.get() + 1)));

        session.submit("late answer").unwrap();
        session.set_draft("half-written");

        clock.advance(Duration::seconds(1));
        assert_eq!(session.tick(), Tick::Counting(Duration::seconds(1)));
        assert!(session.answered_today());

        clock.advance(Duration::seconds(1));
        assert_eq!(session.tick(), Tick::Expired);

        assert_eq!(rollovers.get(), 1);
        assert_eq!(session.today(), day(16));
        assert!(!session.answered_today());
        assert!(!session.just_submitted());
        assert_eq!(session.draft(), "");
        assert_eq!(session.question(), "Tomorrow's question?");
        assert!(session.time_remaining().is_none());
        // Yesterday still counts until today is answered
        assert_eq!(session.streak(), 1);
    }

    #[test]
    fn test_expiry_waits_for_wall_clock_day() {
        let (_dir, clock, mut session) = session_at(at(15, 23, 59, 58));
        let rollovers = Rc::new(Cell::new(0));
        let counter = Rc::clone(&rollovers);
        session.on_rollover(Box::new(move || counter.set(counter.get() + 1)));
        session.submit("answer").unwrap();

        // The ticks run out while the clock still reads 23:59:59
        clock.advance(Duration::seconds(1));
        assert_eq!(session.tick(), Tick::Counting(Duration::seconds(1)));
        assert_eq!(session.tick(), Tick::Counting(Duration::seconds(1)));
        assert_eq!(session.today(), day(15));
        assert!(session.answered_today());
        assert_eq!(rollovers.get(), 0);

        clock.advance(Duration::seconds(1));
        assert_eq!(session.tick(), Tick::Expired);
        assert_eq!(session.today(), day(16));
        assert_eq!(rollovers.get(), 1);
    }

    #[test]
    fn test_submit_after_missed_boundary_notifies_rollover() {
        let (_dir, clock, mut session) = session_at(at(15, 9, 0, 0));
        let rollovers = Rc::new(Cell::new(0));
        let counter = Rc::clone(&rollovers);
        session.on_rollover(Box::new(move || counter.set(counter.get() + 1)));
        session.submit("a").unwrap();

        clock.set(at(16, 7, 0, 0));
        session.submit("b").unwrap();

        assert_eq!(session.today(), day(16));
        assert_eq!(rollovers.get(), 1);
        assert_eq!(session.store().load().len(), 2);
    }

    #[test]
    fn test_submit_follows_clock_set_back() {
        let (_dir, clock, mut session) = session_at(at(16, 0, 10, 0));
        clock.set(at(15, 23, 50, 0));

        session.submit("still the 15th").unwrap();

        assert_eq!(session.today(), day(15));
        assert_eq!(session.question(), "Today's question?");
        let stored = session.store().load();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].day, day(15));
        assert_eq!(session.time_remaining(), Some(Duration::minutes(10)));
    }

    #[test]
    fn test_fall_back_day_keeps_its_answers() {
        let (_dir, clock, mut session) = session_in_new_york(11, 3, 0, 30);
        session.submit("before dawn").unwrap();
        assert_eq!(
            session.time_remaining(),
            Some(Duration::hours(24) + Duration::minutes(30))
        );

        // 23.5 real hours later the wall clock reads 23:00 on the same day
        for _ in 0..(23 * 3600 + 1800) {
            clock.advance(Duration::seconds(1));
            assert!(matches!(session.tick(), Tick::Counting(_)));
        }
        assert_eq!(session.today(), ny_day(11, 3));
        assert_eq!(session.time_remaining(), Some(Duration::hours(1)));

        session.submit("late evening").unwrap();
        let stored = session.store().load();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].day, ny_day(11, 3));
        assert_eq!(stored[0].answer, "late evening");
    }

    #[test]
    fn test_spring_forward_day_rolls_over_at_midnight() {
        let (_dir, clock, mut session) = session_in_new_york(3, 10, 1, 0);
        session.submit("short night").unwrap();

        let mut ticks = 0;
        loop {
            clock.advance(Duration::seconds(1));
            ticks += 1;
            if session.tick() == Tick::Expired {
                break;
            }
        }

        assert_eq!(ticks, 22 * 3600);
        assert_eq!(session.today(), ny_day(3, 11));
        assert!(!session.answered_today());
    }

    #[test]
    fn test_submit_after_missed_boundary_writes_current_day() {
        let (_dir, clock, mut session) = session_at(at(15, 23, 0, 0));
        clock.set(at(16, 7, 0, 0));

        session.submit("morning answer").unwrap();

        assert_eq!(session.today(), day(16));
        let stored = session.store().load();
        assert_eq!(stored[0].day, day(16));
        assert_eq!(stored[0].question, "Tomorrow's question?");
    }

    #[test]
    fn test_missing_question_uses_fallback() {
        let (_dir, _clock, session) = session_at(at(20, 9, 0, 0));
        assert_eq!(session.question(), constants::FALLBACK_QUESTION);
    }

    #[test]
    fn test_deactivate_stops_countdown() {
        let (_dir, _clock, mut session) = session_at(at(15, 9, 0, 0));
        session.submit("answer").unwrap();
        assert!(session.time_remaining().is_some());

        session.deactivate();
        session.deactivate();
        assert!(session.time_remaining().is_none());
        assert_eq!(session.tick(), Tick::Idle);
        assert!(session.answered_today());
    }
}
