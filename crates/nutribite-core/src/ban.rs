//! Account ban evaluation.
//!
//! A user is effectively banned when the cached `status` column says
//! `banned` (any case) or when a scheduled `ban_effective_at` has passed.
//! The second case means the cache is stale and should be flipped; callers
//! use [`BanAssessment::needs_reconcile`] to decide whether to write.

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

use crate::entities::User;

/// Outcome of evaluating one user record at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BanAssessment {
    /// `status` column equals `banned`, case-insensitively
    pub status_banned: bool,
    /// `ban_effective_at` is set and not in the future
    pub schedule_elapsed: bool,
}

impl BanAssessment {
    /// Evaluate `user` at `now`. Pure; never fails.
    pub fn evaluate(user: &User, now: DateTime<Utc>) -> Self {
        Self {
            status_banned: user.status_is_banned(),
            schedule_elapsed: user.ban_effective_at.is_some_and(|at| at <= now),
        }
    }

    /// Access must be denied
    #[inline]
    pub fn is_blocked(self) -> bool {
        self.status_banned || self.schedule_elapsed
    }

    /// The scheduled ban is in force but `status` has not caught up
    #[inline]
    pub fn needs_reconcile(self) -> bool {
        self.schedule_elapsed && !self.status_banned
    }
}

/// Shorthand for `BanAssessment::evaluate(user, now).is_blocked()`
pub fn is_effectively_banned(user: &User, now: DateTime<Utc>) -> bool {
    BanAssessment::evaluate(user, now).is_blocked()
}

/// Leniently decode a stored `ban_effective_at` value.
///
/// Accepts RFC 3339 and the Postgres text rendering of `timestamptz`
/// (`2020-01-01 00:00:00+00`, with a trailing ` BC` for years before 1);
/// offset-less values are taken as UTC. Anything else, `infinity`
/// included, yields `None`.
pub fn parse_effective_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    match raw.strip_suffix(" BC") {
        // year N BC is astronomical year 1 - N
        Some(rest) => {
            let dt = parse_common_era(rest.trim_end())?;
            Some(dt.with_year(1 - dt.year()).unwrap_or(DateTime::<Utc>::MIN_UTC))
        }
        None => parse_common_era(raw),
    }
}

fn parse_common_era(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
