use crate::calendar::{is_restricted_month, sub_months};
use chrono::NaiveDate;

/// Step budget for both directions of the seasonality search. Guarantees
/// termination for oversized work-month requirements; the walk then stops
/// short without signalling truncation.
pub const MAX_SEARCH_STEPS: u32 = 36;

/// Places the construction start by walking backward from the target
/// completion date until enough productive months are covered.
pub struct BackwardPlacement {
    target_end: NaiveDate,
    work_months: f64,
    subcontracted: bool,
}

impl BackwardPlacement {
    pub fn new(target_end: NaiveDate, work_months: f64, subcontracted: bool) -> Self {
        Self {
            target_end,
            work_months,
            subcontracted,
        }
    }

    /// Returns the construction start date. Subcontractors work year-round,
    /// so their placement takes the requirement as a plain month shift,
    /// truncating any fractional part. Self-executed work steps back one
    /// month at a time and only counts months outside the restricted windows
    /// toward the requirement; a fractional remainder needs one more whole
    /// productive month.
    pub fn execute(&self) -> NaiveDate {
        if self.subcontracted {
            return sub_months(self.target_end, self.work_months as i32);
        }

        let mut cursor = self.target_end;
        let mut productive: u32 = 0;
        let mut steps: u32 = 0;
        while f64::from(productive) < self.work_months && steps < MAX_SEARCH_STEPS {
            cursor = sub_months(cursor, 1);
            steps += 1;
            if !is_restricted_month(cursor) {
                productive += 1;
            }
        }
        cursor
    }
}
