//! Countdown to the next local midnight.
//!
//! The scheduler is a tick-driven state machine. It owns no thread and never
//! sleeps: the caller arms it with [`DayBoundaryScheduler::start`] and then
//! calls [`DayBoundaryScheduler::tick`] once per interval.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Counting -> (tick ... tick) -> Idle   (expired, callbacks run)
//!            \-> stop() -> Idle
//! ```
//!
//! At most one timer is armed at a time. Every arm gets a fresh [`TimerId`],
//! so a driver holding an old id can tell it has been superseded.
//!
//! Time is measured between instants, not wall-clock readings, so a day with
//! a daylight saving change counts down 23 or 25 hours.

use crate::constants;
use crate::journal_core::DayKey;
use chrono::{DateTime, Duration, Local, LocalResult, NaiveDateTime, TimeZone, Utc};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info};

/// Wall-clock readings skipped by a forward clock change are searched in steps
/// of this many minutes.
const GAP_STEP_MINUTES: i64 = 15;
/// Covers a whole skipped day.
const GAP_SEARCH_STEPS: usize = 4 * 25;

/// Source of the current instant and the zone it is read in.
pub trait Clock {
    type Zone: TimeZone;

    /// The current instant in the clock's zone.
    fn now(&self) -> DateTime<Self::Zone>;

    /// The current local day.
    fn today(&self) -> DayKey {
        DayKey::from(self.now().date_naive())
    }
}

/// The system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Zone = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give another
/// to the code under test. [`advance`](Self::advance) lets real time pass;
/// [`set`](Self::set) changes what the wall clock reads.
#[derive(Debug, Clone)]
pub struct ManualClock<Tz: TimeZone = Utc> {
    zone: Tz,
    utc: Rc<Cell<NaiveDateTime>>,
}

impl ManualClock {
    /// A UTC clock, where wall time and elapsed time always agree.
    pub fn new(now: NaiveDateTime) -> Self {
        Self::in_zone(Utc, now)
    }
}

impl<Tz: TimeZone> ManualClock<Tz> {
    /// A clock in `zone` whose wall clock reads `local`.
    pub fn in_zone(zone: Tz, local: NaiveDateTime) -> Self {
        let utc = resolve_local(&zone, local).naive_utc();
        ManualClock {
            zone,
            utc: Rc::new(Cell::new(utc)),
        }
    }

    pub fn set(&self, local: NaiveDateTime) {
        self.utc.set(resolve_local(&self.zone, local).naive_utc());
    }

    pub fn advance(&self, by: Duration) {
        self.utc.set(self.utc.get() + by);
    }
}

impl<Tz: TimeZone> Clock for ManualClock<Tz> {
    type Zone = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.zone.from_utc_datetime(&self.utc.get())
    }
}

/// Identifies one arming of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Counting { remaining: Duration, timer: TimerId },
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing is armed.
    Idle,
    /// Still counting; the time left until midnight.
    Counting(Duration),
    /// The countdown reached zero on this tick.
    Expired,
}

/// Counts down to the next local midnight and announces it.
pub struct DayBoundaryScheduler {
    state: SchedulerState,
    interval: Duration,
    next_timer: u64,
    on_expire: Vec<Box<dyn FnMut()>>,
}

impl fmt::Debug for DayBoundaryScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DayBoundaryScheduler")
            .field("state", &self.state)
            .field("interval", &self.interval)
            .field("on_expire", &self.on_expire.len())
            .finish()
    }
}

impl Default for DayBoundaryScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl DayBoundaryScheduler {
    /// An idle scheduler ticking once per second.
    pub fn new() -> Self {
        Self::with_interval(Duration::seconds(constants::TICK_INTERVAL_SECS))
    }

    /// An idle scheduler whose ticks each consume `interval`.
    pub fn with_interval(interval: Duration) -> Self {
        DayBoundaryScheduler {
            state: SchedulerState::Idle,
            interval,
            next_timer: 0,
            on_expire: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The armed timer, if any.
    pub fn active_timer(&self) -> Option<TimerId> {
        match self.state {
            SchedulerState::Counting { timer, .. } => Some(timer),
            SchedulerState::Idle => None,
        }
    }

    /// Time left until midnight while counting.
    pub fn time_remaining(&self) -> Option<Duration> {
        match self.state {
            SchedulerState::Counting { remaining, .. } => Some(remaining),
            SchedulerState::Idle => None,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Registers a callback run every time the countdown expires.
    pub fn on_expire(&mut self, callback: Box<dyn FnMut()>) {
        self.on_expire.push(callback);
    }

    /// Arms a countdown from `now` to the next midnight in its zone.
    ///
    /// Any countdown already running is cancelled first.
    pub fn start<Tz: TimeZone>(&mut self, now: DateTime<Tz>) -> TimerId {
        self.stop();

        self.next_timer += 1;
        let timer = TimerId(self.next_timer);
        let remaining = next_local_midnight(&now) - now;
        self.state = SchedulerState::Counting { remaining, timer };

        debug!(
            "Armed day-boundary timer {:?}, {} until midnight",
            timer,
            format_countdown(remaining)
        );
        timer
    }

    /// Cancels the countdown. Calling it while idle does nothing.
    pub fn stop(&mut self) {
        if let SchedulerState::Counting { timer, .. } = self.state {
            debug!("Cancelled day-boundary timer {:?}", timer);
            self.state = SchedulerState::Idle;
        }
    }

    /// Advances the armed countdown by one interval.
    pub fn tick(&mut self) -> Tick {
        match self.state {
            SchedulerState::Idle => Tick::Idle,
            SchedulerState::Counting { remaining, timer } => {
                let remaining = remaining - self.interval;
                if remaining <= Duration::zero() {
                    self.expire(timer);
                    Tick::Expired
                } else {
                    self.state = SchedulerState::Counting { remaining, timer };
                    Tick::Counting(remaining)
                }
            }
        }
    }

    /// Like [`tick`](Self::tick), but only if `timer` is still the armed one.
    ///
    /// A superseded or cancelled id ticks nothing and reports `Tick::Idle`.
    pub fn tick_for(&mut self, timer: TimerId) -> Tick {
        if self.active_timer() == Some(timer) {
            self.tick()
        } else {
            Tick::Idle
        }
    }

    fn expire(&mut self, timer: TimerId) {
        self.state = SchedulerState::Idle;
        info!("Day boundary reached (timer {:?})", timer);
        for callback in self.on_expire.iter_mut() {
            callback();
        }
    }
}

/// The first instant of the calendar day after `now`, in `now`'s zone.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use daybook::scheduler::next_local_midnight;
///
/// let now = Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap();
/// let midnight = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(next_local_midnight(&now), midnight);
/// ```
pub fn next_local_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let zone = now.timezone();
    match now
        .date_naive()
        .succ_opt()
        .and_then(|tomorrow| tomorrow.and_hms_opt(0, 0, 0))
    {
        Some(midnight) => resolve_local(&zone, midnight),
        None => zone.from_utc_datetime(&NaiveDateTime::MAX),
    }
}

/// The instant at which the wall clock in `zone` reads `local`.
///
/// A reading that happens twice (clocks turned back) resolves to the earlier
/// instant. A reading that never happens (clocks turned forward) resolves to
/// the first instant after the gap.
pub fn resolve_local<Tz: TimeZone>(zone: &Tz, local: NaiveDateTime) -> DateTime<Tz> {
    let mut reading = local;
    for _ in 0..GAP_SEARCH_STEPS {
        match zone.from_local_datetime(&reading) {
            LocalResult::Single(instant) => return instant,
            LocalResult::Ambiguous(earliest, _) => return earliest,
            LocalResult::None => {
                match reading.checked_add_signed(Duration::minutes(GAP_STEP_MINUTES)) {
                    Some(later) => reading = later,
                    None => break,
                }
            }
        }
    }
    zone.from_utc_datetime(&local)
}

/// Formats a countdown as `HH:MM:SS`. Anything not positive is `00:00:00`.
///
/// ```
/// use chrono::Duration;
/// use daybook::scheduler::format_countdown;
///
/// assert_eq!(format_countdown(Duration::seconds(3_725)), "01:02:05");
/// assert_eq!(format_countdown(Duration::seconds(-4)), "00:00:00");
/// ```
pub fn format_countdown(remaining: Duration) -> String {
    if remaining <= Duration::zero() {
        return "00:00:00".to_string();
    }
    let total = remaining.num_seconds();
    let hours = total / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
