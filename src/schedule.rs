//! Daily and weekly run times, and the wake-run-sleep loop that honours them.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDateTime, NaiveTime, Weekday};
use tracing::{info, warn};

use crate::core::FsError;

/// When a batch should run, in local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Daily { at: NaiveTime },
    Weekly { day: Weekday, at: NaiveTime },
}

impl Schedule {
    /// Every day at `HH:MM`.
    ///
    /// # Errors
    ///
    /// `FsError::InvalidSchedule` if `at` is not a valid time.
    pub fn daily(at: &str) -> Result<Self, FsError> {
        Ok(Self::Daily {
            at: parse_time(at)?,
        })
    }

    /// Every week on `day` (e.g. `monday`, `fri`) at `HH:MM`.
    ///
    /// # Errors
    ///
    /// `FsError::InvalidSchedule` if the day or the time does not parse.
    pub fn weekly(day: &str, at: &str) -> Result<Self, FsError> {
        Ok(Self::Weekly {
            day: parse_weekday(day)?,
            at: parse_time(at)?,
        })
    }

    /// Parses `DAY@HH:MM`, e.g. `friday@16:30`.
    ///
    /// # Errors
    ///
    /// `FsError::InvalidSchedule` on any malformed part.
    pub fn parse_weekly(spec: &str) -> Result<Self, FsError> {
        let (day, at) = spec
            .split_once('@')
            .ok_or_else(|| FsError::InvalidSchedule(format!("expected DAY@HH:MM, got {spec:?}")))?;
        Self::weekly(day.trim(), at.trim())
    }

    /// The first occurrence strictly after `now`.
    pub fn next_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        match *self {
            Self::Daily { at } => {
                let today = now.date().and_time(at);
                if today > now {
                    today
                } else {
                    today + chrono::Duration::days(1)
                }
            }
            Self::Weekly { day, at } => {
                let ahead = (7 + i64::from(day.num_days_from_monday())
                    - i64::from(now.weekday().num_days_from_monday()))
                    % 7;
                let candidate = (now.date() + chrono::Duration::days(ahead)).and_time(at);
                if candidate > now {
                    candidate
                } else {
                    candidate + chrono::Duration::days(7)
                }
            }
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily { at } => write!(f, "daily at {}", at.format("%H:%M")),
            Self::Weekly { day, at } => write!(f, "every {day} at {}", at.format("%H:%M")),
        }
    }
}

/// Parses `HH:MM` (seconds optional).
///
/// # Errors
///
/// `FsError::InvalidSchedule` when the text is not a time of day.
pub fn parse_time(s: &str) -> Result<NaiveTime, FsError> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| FsError::InvalidSchedule(format!("invalid time {s:?}, expected HH:MM")))
}

/// Parses a weekday name, full or abbreviated, any case.
///
/// # Errors
///
/// `FsError::InvalidSchedule` when the text is not a weekday.
pub fn parse_weekday(s: &str) -> Result<Weekday, FsError> {
    s.parse::<Weekday>()
        .map_err(|_| FsError::InvalidSchedule(format!("invalid weekday {s:?}")))
}

#[derive(Debug, Clone)]
struct Job {
    schedule: Schedule,
    next_run: NaiveDateTime,
}

/// Holds the registered schedules and runs a task whenever one comes due.
#[derive(Debug, Clone)]
pub struct Scheduler {
    jobs: Vec<Job>,
    poll: Duration,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// An empty scheduler that checks once a minute.
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            poll: Duration::from_secs(60),
        }
    }

    #[must_use]
    pub fn poll_interval(mut self, poll: Duration) -> Self {
        self.poll = poll;
        self
    }

    /// Registers a schedule; its first run is the next occurrence after `now`.
    pub fn add(&mut self, schedule: Schedule, now: NaiveDateTime) {
        let next_run = schedule.next_after(now);
        info!(%schedule, next_run = %next_run, "schedule registered");
        self.jobs.push(Job { schedule, next_run });
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn schedules(&self) -> impl Iterator<Item = Schedule> + '_ {
        self.jobs.iter().map(|j| j.schedule)
    }

    /// The earliest pending run.
    pub fn next_run(&self) -> Option<NaiveDateTime> {
        self.jobs.iter().map(|j| j.next_run).min()
    }

    /// Advances every job that is due at `now`; true if at least one was.
    ///
    /// Several jobs due in the same tick cause a single run.
    pub fn take_due(&mut self, now: NaiveDateTime) -> bool {
        let mut due = false;
        for job in &mut self.jobs {
            if job.next_run <= now {
                job.next_run = job.schedule.next_after(now);
                due = true;
            }
        }
        due
    }

    /// Runs `task` whenever a schedule is due, until Ctrl+C.
    pub async fn run<F, Fut>(self, task: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        info!("scheduler started, press Ctrl+C to stop");
        self.run_until(task, async {
            // If the handler cannot be installed, run until the process is killed.
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
        .await;
    }

    /// Runs `task` whenever a schedule is due, until `shutdown` resolves.
    ///
    /// A batch in progress is never interrupted; shutdown is observed between checks.
    pub async fn run_until<F, Fut, S>(mut self, mut task: F, shutdown: S)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
        S: Future<Output = ()>,
    {
        if self.is_empty() {
            warn!("no schedules registered, nothing to run");
            return;
        }
        tokio::pin!(shutdown);
        loop {
            if self.take_due(Local::now().naive_local()) {
                task().await;
                if let Some(next) = self.next_run() {
                    info!(next_run = %next, "batch finished");
                }
            }
            tokio::select! {
                () = &mut shutdown => {
                    info!("scheduler stopped");
                    return;
                }
                () = tokio::time::sleep(self.poll) => {}
            }
        }
    }
}
