//! Due-date Urgency
//!
//! Display-only classification; it never affects ordering or what is saved.

use chrono::NaiveDate;

/// Days ahead (inclusive) that still count as "due soon"
pub const DUE_SOON_DAYS: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Completed,
    Overdue,
    DueSoon,
    DueLater,
    NoDueDate,
}

/// Compare calendar days only; completion wins over any date
pub fn classify(due_date: Option<NaiveDate>, is_completed: bool, today: NaiveDate) -> Urgency {
    if is_completed {
        return Urgency::Completed;
    }
    let Some(due) = due_date else {
        return Urgency::NoDueDate;
    };
    match (due - today).num_days() {
        d if d < 0 => Urgency::Overdue,
        d if d <= DUE_SOON_DAYS => Urgency::DueSoon,
        _ => Urgency::DueLater,
    }
}

impl Urgency {
    pub fn css_class(&self) -> &'static str {
        match self {
            Urgency::Completed => "todo-completed",
            Urgency::Overdue => "todo-overdue",
            Urgency::DueSoon => "todo-due-soon",
            Urgency::DueLater => "todo-due-later",
            Urgency::NoDueDate => "todo-no-date",
        }
    }

    /// Accent colour for the card border and due label
    pub fn color(&self) -> &'static str {
        match self {
            Urgency::Overdue => "red",
            Urgency::DueSoon => "orange",
            Urgency::DueLater => "green",
            Urgency::Completed | Urgency::NoDueDate => "#666",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::date;

    #[test]
    fn test_classification_boundaries() {
        let today = date(2024, 1, 10);
        let cases = [
            (date(2023, 12, 31), Urgency::Overdue),
            (date(2024, 1, 9), Urgency::Overdue),
            (date(2024, 1, 10), Urgency::DueSoon),
            (date(2024, 1, 11), Urgency::DueSoon),
            (date(2024, 1, 12), Urgency::DueSoon),
            (date(2024, 1, 13), Urgency::DueLater),
            (date(2025, 1, 1), Urgency::DueLater),
        ];
        for (due, expected) in cases {
            assert_eq!(classify(Some(due), false, today), expected, "due {}", due);
        }
    }

    #[test]
    fn test_completed_overrides_date() {
        let today = date(2024, 1, 10);
        assert_eq!(classify(Some(date(2020, 1, 1)), true, today), Urgency::Completed);
        assert_eq!(classify(Some(date(2024, 1, 11)), true, today), Urgency::Completed);
        assert_eq!(classify(None, true, today), Urgency::Completed);
    }

    #[test]
    fn test_missing_date() {
        assert_eq!(classify(None, false, date(2024, 1, 10)), Urgency::NoDueDate);
    }

    #[test]
    fn test_month_boundary() {
        // 2024 is a leap year: Feb 28 -> Mar 1 is two days
        assert_eq!(
            classify(Some(date(2024, 3, 1)), false, date(2024, 2, 28)),
            Urgency::DueSoon
        );
    }
}
