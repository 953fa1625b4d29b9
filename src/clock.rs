use chrono::{DateTime, Local, NaiveTime, TimeZone};

/// Source of wall-clock time for the monitor.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl FixedClock {
    /// Today's date at the given local time of day.
    pub fn at(time: NaiveTime) -> Self {
        let naive = Local::now().date_naive().and_time(time);
        let instant = Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap_or_else(Local::now);
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Time-of-day interval during which the daily summary is reported.
/// Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl DailyWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let window = DailyWindow::new(hms(20, 0, 0), hms(21, 10, 0));

        assert!(window.contains(hms(20, 0, 0)));
        assert!(window.contains(hms(20, 45, 12)));
        assert!(window.contains(hms(21, 10, 0)));
        assert!(!window.contains(hms(19, 59, 59)));
        assert!(!window.contains(hms(21, 10, 1)));
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::at(hms(20, 30, 0));
        assert_eq!(clock.now().time(), hms(20, 30, 0));
    }
}
