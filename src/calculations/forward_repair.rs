use super::backward_placement::MAX_SEARCH_STEPS;
use crate::calendar::{add_months, is_restricted_month};
use chrono::NaiveDate;

/// Second scheduling pass, used when backward placement would start the
/// construction before the security lock date. Re-anchors the start at the
/// lock and searches forward for the completion date, counting productive
/// months the same way the backward walk does.
pub struct ForwardRepair {
    start: NaiveDate,
    work_months: f64,
    subcontracted: bool,
}

impl ForwardRepair {
    pub fn new(start: NaiveDate, work_months: f64, subcontracted: bool) -> Self {
        Self {
            start,
            work_months,
            subcontracted,
        }
    }

    /// Returns the repaired construction end date.
    pub fn execute(&self) -> NaiveDate {
        if self.subcontracted {
            return add_months(self.start, self.work_months as i32);
        }

        let mut cursor = self.start;
        let mut productive: u32 = 0;
        let mut steps: u32 = 0;
        while f64::from(productive) < self.work_months && steps < MAX_SEARCH_STEPS {
            cursor = add_months(cursor, 1);
            steps += 1;
            if !is_restricted_month(cursor) {
                productive += 1;
            }
        }
        cursor
    }
}
