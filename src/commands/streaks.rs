// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::TrakrError;
use crate::repo::{Repository, STREAKS_KEY};
use crate::streak::{CheckIn, CheckInOutcome, Streak};
use crate::utils::{maybe_print_json, parse_date, pretty_table, today};
use anyhow::{Result, bail};
use chrono::NaiveDate;
use tracing::debug;

pub async fn handle(repo: &Repository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let target = *sub.get_one::<u32>("target").unwrap();
            let start = date_arg(sub)?;
            let mut streaks = repo.streaks().await?;
            let s = Streak::start(name, target, start);
            println!("Started '{}' (target {} days, id: {})", s.name, s.target_days, s.id);
            streaks.push(s);
            repo.save(STREAKS_KEY, &streaks).await?;
        }
        Some(("check", sub)) => {
            let key = sub.get_one::<String>("streak").unwrap();
            let out = check(repo, key, date_arg(sub)?).await?;
            match out.kind {
                CheckIn::AlreadyCheckedIn => println!("Already checked in today"),
                CheckIn::OutOfOrder => {
                    bail!("Check-in date is before the last check-in of this streak")
                }
                CheckIn::Continued => println!("Streak continues: {} days", out.current_streak),
                CheckIn::Reset => println!("Streak restarted at 1 day"),
            }
            if out.target_reached {
                println!("Target reached!");
            }
        }
        Some(("rm", sub)) => {
            let key = sub.get_one::<String>("streak").unwrap();
            let mut streaks = repo.streaks().await?;
            let idx = position(&streaks, key)?;
            let removed = streaks.remove(idx);
            repo.save(STREAKS_KEY, &streaks).await?;
            println!("Removed streak '{}'", removed.name);
        }
        Some(("list", sub)) => {
            let streaks = repo.streaks().await?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &streaks)? {
                let rows = streaks
                    .iter()
                    .map(|s| {
                        vec![
                            s.id.clone(),
                            s.name.clone(),
                            format!("{}/{}", s.current_streak, s.target_days),
                            s.days_to_target().to_string(),
                            s.last_checked_date.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Name", "Progress", "To go", "Last check-in"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}

fn date_arg(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("date") {
        Some(d) => Ok(parse_date(d)?),
        None => Ok(today()),
    }
}

fn position(streaks: &[Streak], key: &str) -> Result<usize> {
    let key = key.trim();
    streaks
        .iter()
        .position(|s| s.id == key)
        .or_else(|| {
            streaks
                .iter()
                .position(|s| s.name.eq_ignore_ascii_case(key))
        })
        .ok_or_else(|| TrakrError::not_found("Streak", key).into())
}

/// Runs one check-in and persists it when the count moved.
pub async fn check(repo: &Repository, key: &str, on: NaiveDate) -> Result<CheckInOutcome> {
    let mut streaks = repo.streaks().await?;
    let idx = position(&streaks, key)?;
    let out = streaks[idx].check_in(on);
    if matches!(out.kind, CheckIn::Continued | CheckIn::Reset) {
        repo.save(STREAKS_KEY, &streaks).await?;
    }
    debug!(streak = %streaks[idx].id, kind = ?out.kind, current = out.current_streak, "check-in");
    Ok(out)
}
