use crate::allocation::result::AdmittedEntry;
use crate::core::applicant::ApplicantRecord;
use std::cmp::Ordering;

/// Admission order: priority ascending, then score descending.
///
/// Records equal on both keys compare `Equal`, so a stable sort keeps them
/// in input order.
///
/// # Examples
///
/// ```
/// use admission_engine::allocation::order::admission_order;
/// use admission_engine::core::applicant::ApplicantRecord;
/// use std::cmp::Ordering;
///
/// let first_choice = ApplicantRecord::new("A", 150, 1);
/// let strong_second = ApplicantRecord::new("B", 290, 2);
/// assert_eq!(admission_order(&first_choice, &strong_second), Ordering::Less);
/// ```
pub fn admission_order(a: &ApplicantRecord, b: &ApplicantRecord) -> Ordering {
    compare_keys((a.priority(), a.score()), (b.priority(), b.score()))
}

fn compare_keys((a_priority, a_score): (i32, i32), (b_priority, b_score): (i32, i32)) -> Ordering {
    a_priority
        .cmp(&b_priority)
        .then_with(|| b_score.cmp(&a_score))
}

/// Whether a list of admitted entries is in admission order.
pub fn is_admission_ordered(entries: &[AdmittedEntry]) -> bool {
    entries.windows(2).all(|pair| {
        compare_keys(
            (pair[0].priority, pair[0].score),
            (pair[1].priority, pair[1].score),
        ) != Ordering::Greater
    })
}
