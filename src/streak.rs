// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Daily behavioral check-ins.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::new_id;

pub const DEFAULT_TARGET_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub id: String,
    pub name: String,
    pub current_streak: u32,
    pub last_checked_date: NaiveDate,
    pub target_days: u32,
    #[serde(default)]
    pub history: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckIn {
    AlreadyCheckedIn,
    /// The date is before the last check-in; nothing changes.
    OutOfOrder,
    Continued,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInOutcome {
    pub kind: CheckIn,
    pub current_streak: u32,
    pub target_reached: bool,
}

impl Streak {
    /// A new streak counts `today` as its first day.
    pub fn start(name: &str, target_days: u32, today: NaiveDate) -> Self {
        Streak {
            id: new_id(),
            name: name.to_string(),
            current_streak: 1,
            last_checked_date: today,
            target_days,
            history: vec![today],
        }
    }

    pub fn check_in(&mut self, today: NaiveDate) -> CheckInOutcome {
        if today <= self.last_checked_date {
            let kind = if today == self.last_checked_date {
                CheckIn::AlreadyCheckedIn
            } else {
                CheckIn::OutOfOrder
            };
            return CheckInOutcome {
                kind,
                current_streak: self.current_streak,
                target_reached: false,
            };
        }

        let gap_days = (today - self.last_checked_date).num_days();
        let kind = if gap_days > 1 {
            self.current_streak = 1;
            CheckIn::Reset
        } else {
            self.current_streak = self.current_streak.saturating_add(1);
            CheckIn::Continued
        };
        self.history.push(today);
        self.last_checked_date = today;

        CheckInOutcome {
            kind,
            current_streak: self.current_streak,
            // milestone only, the counter keeps climbing
            target_reached: self.current_streak == self.target_days,
        }
    }

    pub fn days_to_target(&self) -> u32 {
        self.target_days.saturating_sub(self.current_streak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn streak_at(current: u32, last: &str, target: u32) -> Streak {
        let mut s = Streak::start("No Impulse Spending", target, date(last));
        s.current_streak = current;
        s
    }

    #[test]
    fn same_day_is_noop() {
        let mut s = streak_at(3, "2024-05-10", 7);
        let before = s.clone();
        let out = s.check_in(date("2024-05-10"));
        assert_eq!(out.kind, CheckIn::AlreadyCheckedIn);
        assert!(!out.target_reached);
        assert_eq!(s, before);
    }

    #[test]
    fn earlier_date_is_rejected() {
        let mut s = streak_at(1, "2024-05-10", 7);
        let before = s.clone();
        for day in ["2024-05-09", "2024-05-08", "2024-05-07"] {
            let out = s.check_in(date(day));
            assert_eq!(out.kind, CheckIn::OutOfOrder);
            assert_eq!(out.current_streak, 1);
        }
        assert_eq!(s, before);
        assert_eq!(s.check_in(date("2024-05-11")).kind, CheckIn::Continued);
    }

    #[test]
    fn two_day_gap_resets() {
        let mut s = streak_at(12, "2024-05-10", 14);
        let out = s.check_in(date("2024-05-12"));
        assert_eq!(out.kind, CheckIn::Reset);
        assert_eq!(s.current_streak, 1);
        assert_eq!(s.last_checked_date, date("2024-05-12"));
        assert_eq!(s.history.last(), Some(&date("2024-05-12")));
    }

    #[test]
    fn next_day_hits_target_once() {
        let mut s = streak_at(6, "2024-05-10", 7);
        let out = s.check_in(date("2024-05-11"));
        assert_eq!(out.kind, CheckIn::Continued);
        assert_eq!(s.current_streak, 7);
        assert!(out.target_reached);

        let again = s.check_in(date("2024-05-11"));
        assert!(!again.target_reached);
        let past = s.check_in(date("2024-05-12"));
        assert_eq!(past.current_streak, 8);
        assert!(!past.target_reached);
        assert_eq!(s.days_to_target(), 0);
    }

    #[test]
    fn history_appends_only_on_new_days() {
        let mut s = Streak::start("Daily Budget Check", 14, date("2024-01-01"));
        s.check_in(date("2024-01-02"));
        s.check_in(date("2024-01-02"));
        s.check_in(date("2024-01-05"));
        assert_eq!(
            s.history,
            vec![date("2024-01-01"), date("2024-01-02"), date("2024-01-05")]
        );
        assert_eq!(s.current_streak, 1);
    }

    #[test]
    fn reads_stored_shape() {
        let raw = r#"[{"id":"1","name":"No Impulse Spending","currentStreak":5,
            "lastCheckedDate":"2024-05-10","targetDays":7,"history":["2024-05-10","2024-05-09"]}]"#;
        let parsed: Vec<Streak> = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed[0].current_streak, 5);
        assert_eq!(parsed[0].history.len(), 2);
    }
}
