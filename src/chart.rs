use crate::calendar::{AVG_DAYS_PER_MONTH, add_months, is_restricted_month};
use crate::timeline::DateRange;
use chrono::{Datelike, NaiveDate};

/// Maps calendar dates to horizontal pixel positions for the portfolio and
/// detail charts. Holds no scheduling logic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartViewport {
    pub view_start: NaiveDate,
    pub px_per_month: f64,
}

/// One month column of the display grid. `restricted` drives the
/// cross-hatching shown in non-subcontracted detail views; it is cosmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthCell {
    pub start: NaiveDate,
    pub x: f64,
    pub width: f64,
    pub restricted: bool,
}

impl ChartViewport {
    pub fn new(view_start: NaiveDate, px_per_month: f64) -> Self {
        Self {
            view_start,
            px_per_month,
        }
    }

    fn px_per_day(&self) -> f64 {
        self.px_per_month / AVG_DAYS_PER_MONTH
    }

    /// Horizontal offset of a date from the viewport origin, in pixels.
    pub fn x_offset(&self, date: NaiveDate) -> f64 {
        (date - self.view_start).num_days() as f64 * self.px_per_day()
    }

    pub fn range_x(&self, range: &DateRange) -> f64 {
        self.x_offset(range.start)
    }

    pub fn range_width(&self, range: &DateRange) -> f64 {
        self.x_offset(range.end) - self.x_offset(range.start)
    }

    /// Month columns covering `months` calendar months, starting from the
    /// first of the viewport's start month.
    pub fn month_grid(&self, months: u32) -> Vec<MonthCell> {
        let first = NaiveDate::from_ymd_opt(self.view_start.year(), self.view_start.month(), 1)
            .expect("viewport month is always valid");
        (0..months)
            .map(|index| {
                let start = add_months(first, index as i32);
                let next = add_months(first, index as i32 + 1);
                MonthCell {
                    start,
                    x: self.x_offset(start),
                    width: self.x_offset(next) - self.x_offset(start),
                    restricted: is_restricted_month(start),
                }
            })
            .collect()
    }
}
