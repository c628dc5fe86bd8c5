use chrono::{DateTime, Local, NaiveDate, Utc};

/// Which calendar decides where one day ends and the next begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DayBoundary {
    /// The machine's local time zone.
    #[default]
    Local,
    Utc,
}

/// Source of the current instant and of "today".
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day used as the habit completion key.
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    boundary: DayBoundary,
}

impl SystemClock {
    pub fn new(boundary: DayBoundary) -> Self {
        Self { boundary }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        match self.boundary {
            DayBoundary::Local => Local::now().date_naive(),
            DayBoundary::Utc => Utc::now().date_naive(),
        }
    }
}
