//! Word-of-the-day anchor selection.
//!
//! The anchor for a calendar date is `day_of_year mod len`, where
//! `day_of_year` is 1-based (January 1 is day 1, December 31 of a leap year
//! is day 366). The result is a 0-based index into the list it was computed
//! against. Consecutive days within a year map to consecutive indices
//! modulo `len`; the ordinal restarts on January 1, so the sequence jumps
//! at the year boundary.
//!
//! The anchor is never cached. Callers recompute it against the list they
//! are about to index, which may have shrunk since the last call.

use chrono::{Datelike, NaiveDate};

use crate::error::SelectionError;
use crate::word::Word;

/// 1-based ordinal day of `date` within its calendar year.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Index of the word to show on `date` in a list of `len` items.
///
/// # Errors
/// `SelectionError::EmptyList` when `len == 0`.
pub fn select_index_for_len(len: usize, date: NaiveDate) -> Result<usize, SelectionError> {
    if len == 0 {
        return Err(SelectionError::EmptyList);
    }
    Ok(day_of_year(date) as usize % len)
}

/// Index of the word to show on `date` in `list`.
///
/// # Errors
/// `SelectionError::EmptyList` when `list` is empty.
pub fn select_index<T>(list: &[T], date: NaiveDate) -> Result<usize, SelectionError> {
    select_index_for_len(list.len(), date)
}

/// The word to show on `date`.
pub fn select(words: &[Word], date: NaiveDate) -> Result<&Word, SelectionError> {
    let index = select_index(words, date)?;
    Ok(&words[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scenario_words() -> Vec<Word> {
        vec![
            Word::new("Ebullient", "cheerful and enthusiastic"),
            Word::new("Laconic", "using few words"),
            Word::new("Mendacious", "not telling the truth"),
        ]
    }

    #[test]
    fn day_of_year_is_one_based() {
        assert_eq!(day_of_year(date(2025, 1, 1)), 1);
        assert_eq!(day_of_year(date(2025, 1, 5)), 5);
        assert_eq!(day_of_year(date(2025, 12, 31)), 365);
        assert_eq!(day_of_year(date(2024, 12, 31)), 366);
    }

    #[test]
    fn january_fifth_selects_third_word() {
        let words = scenario_words();
        let jan5 = date(2025, 1, 5);
        assert_eq!(select_index(&words, jan5), Ok(2));
        assert_eq!(select(&words, jan5).unwrap().text, "Mendacious");
    }

    #[test]
    fn shrinking_list_shifts_the_anchor() {
        let mut words = scenario_words();
        words.retain(|w| w.text != "Mendacious");
        let jan5 = date(2025, 1, 5);
        assert_eq!(select_index(&words, jan5), Ok(1));
        assert_eq!(select(&words, jan5).unwrap().text, "Laconic");
    }

    #[test]
    fn empty_list_fails_explicitly() {
        let words: Vec<Word> = Vec::new();
        assert_eq!(
            select_index(&words, date(2025, 6, 1)),
            Err(SelectionError::EmptyList)
        );
        assert!(select(&words, date(2025, 6, 1)).is_err());
    }

    #[test]
    fn ordinal_restarts_at_year_boundary() {
        let n = 7;
        let dec31 = select_index_for_len(n, date(2025, 12, 31)).unwrap();
        let jan1 = select_index_for_len(n, date(2026, 1, 1)).unwrap();
        assert_eq!(dec31, 365 % 7);
        assert_eq!(jan1, 1);
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (1970i32..2100, 1u32..=366).prop_filter_map("valid ordinal", |(y, o)| {
            NaiveDate::from_yo_opt(y, o)
        })
    }

    proptest! {
        #[test]
        fn selection_is_deterministic(len in 1usize..500, d in any_date()) {
            let first = select_index_for_len(len, d).unwrap();
            let second = select_index_for_len(len, d).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn anchor_is_in_bounds(len in 1usize..500, d in any_date()) {
            prop_assert!(select_index_for_len(len, d).unwrap() < len);
        }

        #[test]
        fn consecutive_days_advance_by_one(len in 1usize..500, d in any_date()) {
            let next = d.succ_opt().unwrap();
            prop_assume!(next.year() == d.year());
            let today = select_index_for_len(len, d).unwrap();
            let tomorrow = select_index_for_len(len, next).unwrap();
            prop_assert_eq!(tomorrow, (today + 1) % len);
        }
    }
}
