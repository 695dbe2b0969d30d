use chrono::NaiveDate;

/// Inclusive date window applied to observations.
///
/// An unset bound imposes no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFilter {
    after: Option<NaiveDate>,
    before: Option<NaiveDate>,
}

impl DateFilter {
    pub fn new(after: Option<NaiveDate>, before: Option<NaiveDate>) -> Self {
        Self { after, before }
    }

    /// `false` when `date` falls strictly before `after` or strictly after
    /// `before`.
    pub fn includes(&self, date: NaiveDate) -> bool {
        if self.after.is_some_and(|after| date < after) {
            return false;
        }
        if self.before.is_some_and(|before| date > before) {
            return false;
        }
        true
    }

    pub fn is_unbounded(&self) -> bool {
        self.after.is_none() && self.before.is_none()
    }

    pub fn after(&self) -> Option<NaiveDate> {
        self.after
    }

    pub fn before(&self) -> Option<NaiveDate> {
        self.before
    }
}
