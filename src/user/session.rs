use chrono::{Duration, NaiveDateTime};

/// How far back failed logins count against a user.
pub const FAILURE_WINDOW_SECS: i64 = 3600;

/// Lifetime of a login token.
pub const MAX_LOGIN_TIME_SECS: i64 = 3600;

/// Whether a token issued at `login_time` is still accepted at `now`.
pub fn token_is_fresh(login_time: NaiveDateTime, now: NaiveDateTime) -> bool {
    now.signed_duration_since(login_time).num_seconds() <= MAX_LOGIN_TIME_SECS
}

/// Failed-login bookkeeping for one user name, rebuilt from the login
/// activity table on every attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginContext {
    pub failed_attempts: u32,
    pub max_attempts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted,
    Rejected { attempts_left: u32 },
    Exhausted,
}

impl LoginContext {
    /// `history` holds the success flags of recent attempts, newest first.
    /// Only the failures since the last success are counted.
    pub fn from_history<I>(history: I, max_attempts: u32) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let failed_attempts = history.into_iter().take_while(|success| !success).count() as u32;
        Self {
            failed_attempts,
            max_attempts,
        }
    }

    pub fn window_start(now: NaiveDateTime) -> NaiveDateTime {
        now - Duration::seconds(FAILURE_WINDOW_SECS)
    }

    pub fn attempts_left(&self) -> u32 {
        self.max_attempts.saturating_sub(self.failed_attempts)
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts_left() == 0
    }

    pub fn record(&mut self, success: bool) -> LoginOutcome {
        if success {
            self.failed_attempts = 0;
            return LoginOutcome::Accepted;
        }

        self.failed_attempts += 1;
        match self.attempts_left() {
            0 => LoginOutcome::Exhausted,
            attempts_left => LoginOutcome::Rejected { attempts_left },
        }
    }
}

impl LoginOutcome {
    pub fn message(&self) -> String {
        match self {
            LoginOutcome::Accepted => "".to_string(),
            LoginOutcome::Rejected { attempts_left } => format!(
                "Incorrect username or password. You have {} attempt(s) left.",
                attempts_left
            ),
            LoginOutcome::Exhausted => "Too many failed attempts".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_expire_after_an_hour() {
        let login = chrono::NaiveDate::from_ymd(2025, 3, 5).and_hms(9, 0, 0);
        assert!(token_is_fresh(login, login + Duration::minutes(59)));
        assert!(token_is_fresh(login, login + Duration::seconds(MAX_LOGIN_TIME_SECS)));
        assert!(!token_is_fresh(login, login + Duration::seconds(MAX_LOGIN_TIME_SECS + 1)));
    }

    #[test]
    fn failures_before_the_last_success_are_forgiven() {
        let ctx = LoginContext::from_history(vec![false, false, true, false, false], 4);
        assert_eq!(ctx.failed_attempts, 2);
        assert_eq!(ctx.attempts_left(), 2);
    }

    #[test]
    fn fourth_failure_exhausts_the_default_budget() {
        let mut ctx = LoginContext::from_history(vec![], 4);
        assert_eq!(ctx.record(false), LoginOutcome::Rejected { attempts_left: 3 });
        assert_eq!(ctx.record(false), LoginOutcome::Rejected { attempts_left: 2 });
        assert_eq!(ctx.record(false), LoginOutcome::Rejected { attempts_left: 1 });
        assert_eq!(ctx.record(false), LoginOutcome::Exhausted);
        assert!(ctx.is_exhausted());
        assert_eq!(ctx.record(false).message(), "Too many failed attempts");
    }

    #[test]
    fn success_resets_the_counter() {
        let mut ctx = LoginContext::from_history(vec![false, false], 4);
        assert_eq!(ctx.record(true), LoginOutcome::Accepted);
        assert_eq!(ctx.attempts_left(), 4);
    }

    #[test]
    fn rejection_message_counts_down() {
        let outcome = LoginOutcome::Rejected { attempts_left: 2 };
        assert_eq!(
            outcome.message(),
            "Incorrect username or password. You have 2 attempt(s) left."
        );
    }
}
