use crate::clock::unix_now_secs;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Consecutive failed checks a never-validated domain is allowed before it
/// stops counting as valid.
pub const NEW_DOMAIN_ATTEMPT_ALLOWANCE: u32 = 4;

/// Consecutive failed checks a previously validated domain is allowed before
/// its cached verdict flips to invalid.
pub const VALID_DOMAIN_ATTEMPT_ALLOWANCE: u32 = 13;

/// Hard timeout for a single website probe.
pub const CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Scheduling slack on top of the probe timeout when sizing TTL windows.
const CHECK_SLACK_SECS: u64 = 5;

/// Recheck cadence for a domain whose last check succeeded.
const HEALTHY_RECHECK_SECS: u64 = 2 * 24 * 60 * 60;

/// Retry backoff cap in minutes (2^10).
const BACKOFF_CAP_MINUTES: u64 = 1024;

/// Attempt-counter sentinel for operator-seeded permanently invalid domains.
const PERMANENTLY_INVALID_ATTEMPTS: u32 = u32::MAX;

/// Floor for any non-permanent TTL handed out in a DNS answer.
pub const MIN_TTL: Duration = Duration::from_secs(60);

/// Fixed TTL for operator-seeded permanent entries.
pub const PERMANENT_TTL: Duration = Duration::from_secs(14 * 24 * 60 * 60);

/// Delay before the next check for a given consecutive-failure count: the
/// healthy recheck cadence after a success, otherwise doubling from one
/// minute up to the 1024-minute cap.
pub const fn backoff_delay_secs(invalid_attempts: u32) -> u64 {
    if invalid_attempts == 0 {
        HEALTHY_RECHECK_SECS
    } else if invalid_attempts > 10 {
        BACKOFF_CAP_MINUTES * 60
    } else {
        (1u64 << (invalid_attempts - 1)) * 60
    }
}

/// Worst-case wall-clock seconds to burn through `allowance` consecutive
/// failed checks, counting each probe at full timeout plus slack.
const fn attempt_window_secs(allowance: u32) -> u64 {
    let mut total = allowance as u64 * (CHECK_TIMEOUT.as_secs() + CHECK_SLACK_SECS);
    let mut attempt = 1;
    while attempt < allowance {
        total += backoff_delay_secs(attempt);
        attempt += 1;
    }
    total
}

/// Grace window granted to a never-seen domain: the time its own checks need
/// to exhaust the new-domain allowance.
pub const NEW_DOMAIN_TTL: Duration =
    Duration::from_secs(attempt_window_secs(NEW_DOMAIN_ATTEMPT_ALLOWANCE));

/// Lifetime of a confirmed-valid verdict: one healthy recheck period plus the
/// time needed to provably exhaust the valid-domain allowance.
pub const VALID_DOMAIN_TTL: Duration = Duration::from_secs(
    attempt_window_secs(VALID_DOMAIN_ATTEMPT_ALLOWANCE) + HEALTHY_RECHECK_SECS,
);

/// Measured health of one domain name.
///
/// A single background monitor task is the only writer; the query path reads
/// relaxed snapshots, so momentarily mixed field values are acceptable.
/// Permanent entries are terminal: no monitor, fixed TTL, state never changes.
#[derive(Debug)]
pub struct DomainHealth {
    name: Arc<str>,
    permanent: bool,
    was_valid: AtomicBool,
    invalid_attempts: AtomicU32,
    ttl_expires_at_secs: AtomicU64,
}

impl DomainHealth {
    /// A never-checked domain, valid for the duration of its grace window
    /// until its own checks have had a chance to fail it.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            permanent: false,
            was_valid: AtomicBool::new(false),
            invalid_attempts: AtomicU32::new(0),
            ttl_expires_at_secs: AtomicU64::new(unix_now_secs() + NEW_DOMAIN_TTL.as_secs()),
        }
    }

    /// An operator-seeded terminal entry.
    pub fn permanent(name: impl Into<Arc<str>>, valid: bool) -> Self {
        Self {
            name: name.into(),
            permanent: true,
            was_valid: AtomicBool::new(valid),
            invalid_attempts: AtomicU32::new(if valid {
                0
            } else {
                PERMANENTLY_INVALID_ATTEMPTS
            }),
            ttl_expires_at_secs: AtomicU64::new(u64::MAX),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_permanent(&self) -> bool {
        self.permanent
    }

    pub fn invalid_attempts(&self) -> u32 {
        self.invalid_attempts.load(Ordering::Relaxed)
    }

    pub fn was_valid(&self) -> bool {
        self.was_valid.load(Ordering::Relaxed)
    }

    /// Whether the domain currently counts as having a website.
    ///
    /// Hysteresis: a domain that has validated at least once gets a much
    /// larger failure allowance than one that never has.
    pub fn is_valid(&self) -> bool {
        let attempts = self.invalid_attempts.load(Ordering::Relaxed);
        if self.was_valid.load(Ordering::Relaxed) {
            attempts < VALID_DOMAIN_ATTEMPT_ALLOWANCE
        } else {
            attempts < NEW_DOMAIN_ATTEMPT_ALLOWANCE
        }
    }

    /// Remaining lifetime of the current verdict, floored at one minute so
    /// downstream resolvers are never told to re-ask immediately.
    pub fn ttl(&self) -> Duration {
        if self.permanent {
            return PERMANENT_TTL;
        }
        let expires = self.ttl_expires_at_secs.load(Ordering::Relaxed);
        let remaining = expires.saturating_sub(unix_now_secs());
        Duration::from_secs(remaining).max(MIN_TTL)
    }

    /// Records a successful check: resets the failure streak and renews the
    /// verdict for the full valid-domain window.
    pub fn record_success(&self) {
        debug_assert!(!self.permanent, "permanent entries are never checked");
        self.was_valid.store(true, Ordering::Relaxed);
        self.invalid_attempts.store(0, Ordering::Relaxed);
        let renewed = unix_now_secs() + VALID_DOMAIN_TTL.as_secs();
        self.ttl_expires_at_secs.fetch_max(renewed, Ordering::Relaxed);
    }

    /// Records a failed check and stretches the expiry just far enough to
    /// cover the next retry plus one full check. The expiry only ever moves
    /// forward; a failure streak must never cut short a verdict already
    /// promised to downstream caches.
    pub fn record_failure(&self) {
        debug_assert!(!self.permanent, "permanent entries are never checked");
        let attempts = self
            .invalid_attempts
            .load(Ordering::Relaxed)
            .saturating_add(1);
        self.invalid_attempts.store(attempts, Ordering::Relaxed);

        let horizon =
            backoff_delay_secs(attempts) + CHECK_TIMEOUT.as_secs() + CHECK_SLACK_SECS;
        self.ttl_expires_at_secs
            .fetch_max(unix_now_secs() + horizon, Ordering::Relaxed);
    }

    /// Delay until this domain's next scheduled check.
    pub fn next_check_delay(&self) -> Duration {
        Duration::from_secs(backoff_delay_secs(
            self.invalid_attempts.load(Ordering::Relaxed),
        ))
    }
}
