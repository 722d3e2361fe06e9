use super::models::Period;

/// Period before (year, month); January rolls back to December of the previous year.
///
/// `month` must be in 1..=12. The year saturates at `i32::MIN`.
pub fn go_to_previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year.saturating_sub(1), 12)
    } else {
        (year, month - 1)
    }
}

/// Period after (year, month); December rolls over to January of the next year.
///
/// `month` must be in 1..=12. The year saturates at `i32::MAX`.
pub fn go_to_next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year.saturating_add(1), 1)
    } else {
        (year, month + 1)
    }
}

/// Owns the displayed period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthNavigator {
    cursor: Period,
}

impl MonthNavigator {
    pub fn new(start: Period) -> Self {
        Self { cursor: start }
    }

    pub fn current(&self) -> Period {
        self.cursor
    }

    pub fn next(&mut self) -> Period {
        self.cursor = self.cursor.next();
        self.cursor
    }

    pub fn previous(&mut self) -> Period {
        self.cursor = self.cursor.previous();
        self.cursor
    }

    pub fn jump_to(&mut self, period: Period) -> Period {
        self.cursor = period;
        self.cursor
    }
}
