//! Write rate limiting for the domain store
//!
//! Store writes share one `governor` quota of `writes-per-minute`. The quota
//! allows a burst of that many writes, then refills evenly across the minute.

use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;

/// Direct (unkeyed) limiter on the real clock
pub type WriteLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Quota admitting `per_minute` writes per minute; zero is raised to one
pub fn write_quota(per_minute: u32) -> Quota {
    Quota::per_minute(NonZeroU32::new(per_minute).unwrap_or(NonZeroU32::MIN))
}

/// Creates the store write limiter
pub fn write_limiter(per_minute: u32) -> WriteLimiter {
    RateLimiter::direct(write_quota(per_minute))
}

#[cfg(test)]
mod tests {
    use super::*;
    use governor::clock::{Clock, FakeRelativeClock};
    use std::time::Duration;

    #[test]
    fn test_burst_up_to_quota() {
        let clock = FakeRelativeClock::default();
        let limiter = RateLimiter::direct_with_clock(write_quota(3), clock.clone());

        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_err());
    }

    #[test]
    fn test_quota_refills_over_the_minute() {
        let clock = FakeRelativeClock::default();
        let limiter = RateLimiter::direct_with_clock(write_quota(3), clock.clone());

        for _ in 0..3 {
            limiter.check().unwrap();
        }

        let wait = match limiter.check() {
            Ok(()) => panic!("quota should be exhausted"),
            Err(not_until) => not_until.wait_time_from(clock.now()),
        };
        assert!(wait > Duration::ZERO);
        assert!(wait <= Duration::from_secs(20));

        // One write replenishes every 20 seconds
        clock.advance(Duration::from_secs(20));
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_err());
    }

    #[test]
    fn test_zero_quota_still_admits_one() {
        let clock = FakeRelativeClock::default();
        let limiter = RateLimiter::direct_with_clock(write_quota(0), clock.clone());

        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_err());
    }

    #[tokio::test]
    async fn test_write_limiter_ready_within_quota() {
        let limiter = write_limiter(100);
        for _ in 0..10 {
            limiter.until_ready().await;
        }
    }
}
