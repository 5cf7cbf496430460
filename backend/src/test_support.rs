//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`). Only
//! compiled for tests or with the `test-support` feature.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::{AccountService, ArticleService, CommentService};
use crate::inbound::http::{AppDependencies, HttpState};
use crate::outbound::persistence::{
    InMemoryArticleRepository, InMemoryCommentRepository, InMemoryUserRepository,
};
use crate::outbound::security::{BcryptPasswordHasher, JwtTokenCodec};

/// Clock whose current instant is set by the test.
///
/// # Examples
/// ```
/// use blog_backend::test_support::MutableClock;
/// use chrono::{TimeDelta, Utc};
/// use mockable::Clock;
///
/// let start = Utc::now();
/// let clock = MutableClock::new(start);
/// clock.advance(TimeDelta::minutes(5));
/// assert_eq!(clock.utc(), start + TimeDelta::minutes(5));
/// ```
#[derive(Debug)]
pub struct MutableClock {
    now: Mutex<DateTime<Utc>>,
}

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Secret used by [`InMemoryHarness`].
pub const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";
/// bcrypt cost used by [`InMemoryHarness`]; the minimum keeps tests fast.
pub const TEST_BCRYPT_COST: u32 = 4;

/// Fully wired in-memory backend with handles on its stores and clock.
pub struct InMemoryHarness {
    pub users: Arc<InMemoryUserRepository>,
    pub articles: Arc<InMemoryArticleRepository>,
    pub comments: Arc<InMemoryCommentRepository>,
    /// Clock used when issuing tokens.
    pub clock: Arc<MutableClock>,
    pub tokens: Arc<JwtTokenCodec>,
    ttl: Duration,
}

impl InMemoryHarness {
    /// Harness with the given token lifetime.
    pub fn with_ttl(ttl: Duration) -> Self {
        let clock = Arc::new(MutableClock::new(Utc::now()));
        let tokens = Arc::new(JwtTokenCodec::new(TEST_SECRET, ttl, clock.clone()));
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            articles: Arc::new(InMemoryArticleRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            clock,
            tokens,
            ttl,
        }
    }

    /// Lifetime of tokens issued by this harness.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Application dependencies backed by the harness stores.
    pub fn dependencies(&self) -> AppDependencies {
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(TEST_BCRYPT_COST));
        let accounts = AccountService::new(
            self.users.clone(),
            self.articles.clone(),
            self.comments.clone(),
            hasher,
            self.tokens.clone(),
        );
        let articles = ArticleService::new(
            self.users.clone(),
            self.articles.clone(),
            self.comments.clone(),
        );
        let comments = CommentService::new(
            self.users.clone(),
            self.articles.clone(),
            self.comments.clone(),
        );
        let state = HttpState::new(Arc::new(accounts), Arc::new(articles), Arc::new(comments));
        AppDependencies::new(state, self.tokens.clone())
    }
}

impl Default for InMemoryHarness {
    fn default() -> Self {
        Self::with_ttl(crate::outbound::security::DEFAULT_ACCESS_TOKEN_TTL)
    }
}
