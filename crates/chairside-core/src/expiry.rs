//! Expiry classification for stocked medicines.
//!
//! A medicine's status is a pure function of its expiry date and the
//! reference day. The store applies it when a medicine is created and
//! whenever its expiry date changes; stored statuses are otherwise left
//! alone, so reads reflect the last write, not the current clock.

use chrono::NaiveDate;

use crate::models::MedicineStatus;

/// Days of remaining shelf life below which a medicine is flagged.
pub const WARNING_WINDOW_DAYS: i64 = 90;

/// Classify an expiry date relative to `today`.
///
/// A medicine expiring today is not yet expired but already inside the
/// warning window; one expiring in exactly [`WARNING_WINDOW_DAYS`] days
/// is the first to count as normal.
pub fn classify(expiry_date: NaiveDate, today: NaiveDate) -> MedicineStatus {
    let days_left = (expiry_date - today).num_days();
    if days_left < 0 {
        MedicineStatus::Expired
    } else if days_left < WARNING_WINDOW_DAYS {
        MedicineStatus::Warning
    } else {
        MedicineStatus::Normal
    }
}
