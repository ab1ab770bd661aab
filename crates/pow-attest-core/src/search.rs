//! Proof-of-work search.
//!
//! Counters are tried in strictly ascending order starting at 0, so the
//! returned counter is always the smallest one whose candidate hashes to a
//! digest with the requested prefix. The search is CPU-bound and blocks the
//! calling thread until it finds a match or hits one of its [`SearchLimits`].
//!
//! With the default (unbounded) limits the search never gives up: an
//! unreachable prefix loops forever. Callers that cannot accept that should
//! set `max_attempts` or a `deadline`.

use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::digest::{Digest, HashAlgorithm};
use crate::error::SearchError;
use crate::prefix::Prefix;
use crate::types::{write_candidate, Candidate, Seed};

/// How many attempts pass between deadline checks.
pub const DEADLINE_POLL_INTERVAL: u64 = 4096;

/// Bounds on a search. The default is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    /// Only counters `0..max_attempts` are examined.
    pub max_attempts: Option<u64>,
    /// Wall-clock budget, measured from the start of the search.
    pub deadline: Option<Duration>,
}

impl SearchLimits {
    /// No cap and no deadline.
    pub const UNBOUNDED: Self = Self {
        max_attempts: None,
        deadline: None,
    };

    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_attempts.is_none() && self.deadline.is_none()
    }

    fn allows(&self, counter: u64) -> bool {
        self.max_attempts.map_or(true, |max| counter < max)
    }

    fn expired(&self, start: Instant) -> bool {
        self.deadline.is_some_and(|d| start.elapsed() >= d)
    }
}

/// The outcome of a successful search. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PowResult {
    counter: u64,
    candidate: Candidate,
    digest: Digest,
    elapsed: Duration,
    attempts: u64,
    algorithm: HashAlgorithm,
}

impl PowResult {
    /// The winning counter.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// The exact text that was hashed.
    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// Lowercase hex digest.
    pub fn digest_hex(&self) -> String {
        self.digest.to_hex()
    }

    /// Wall-clock time from the start of the search to the match.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of candidates hashed, across all workers.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Recheck the result: the candidate ends with the counter, hashes to
    /// the recorded digest, and the digest carries `prefix`.
    pub fn verify(&self, prefix: &Prefix) -> bool {
        self.candidate.as_str().ends_with(&self.counter.to_string())
            && self.algorithm.digest(self.candidate.as_bytes()) == self.digest
            && prefix.matches(&self.digest)
    }
}

/// Check a claimed counter without searching.
pub fn verify_pow(seed: &Seed, counter: u64, prefix: &Prefix, algorithm: HashAlgorithm) -> bool {
    let candidate = Candidate::new(seed, counter);
    prefix.matches(&algorithm.digest(candidate.as_bytes()))
}

/// Search with SHA-256 and no limits.
///
/// Validates `seed` and `prefix` before entering the loop.
pub fn search(seed: &str, prefix: &str) -> Result<PowResult, SearchError> {
    let seed = Seed::new(seed)?;
    let prefix = Prefix::new(prefix)?;
    PowSearch::default().search(&seed, &prefix)
}

/// A configured proof-of-work search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowSearch {
    algorithm: HashAlgorithm,
    limits: SearchLimits,
}

impl PowSearch {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            limits: SearchLimits::UNBOUNDED,
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.limits.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.limits.deadline = Some(deadline);
        self
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Find the smallest counter whose candidate hash starts with `prefix`.
    pub fn search(&self, seed: &Seed, prefix: &Prefix) -> Result<PowResult, SearchError> {
        let start = Instant::now();
        let mut buf = String::with_capacity(seed.as_str().len() + 20);
        let mut counter: u64 = 0;

        loop {
            if !self.limits.allows(counter) {
                return Err(SearchError::NotFound { attempts: counter });
            }
            if counter % DEADLINE_POLL_INTERVAL == 0 && self.limits.expired(start) {
                return Err(SearchError::Timeout {
                    elapsed: start.elapsed(),
                    attempts: counter,
                });
            }

            write_candidate(&mut buf, seed, counter);
            let digest = self.algorithm.digest(buf.as_bytes());
            if prefix.matches(&digest) {
                return Ok(PowResult {
                    counter,
                    candidate: Candidate::from_text(buf),
                    digest,
                    elapsed: start.elapsed(),
                    attempts: counter.saturating_add(1),
                    algorithm: self.algorithm,
                });
            }

            counter = match counter.checked_add(1) {
                Some(next) => next,
                None => return Err(SearchError::NotFound { attempts: u64::MAX }),
            };
        }
    }

    /// Split the search across `workers` threads and return the same result
    /// as [`PowSearch::search`].
    ///
    /// Worker `i` tries counters `i, i + workers, i + 2 * workers, ...`.
    /// A shared minimum lets workers stop once every counter they have left
    /// is above a match someone already found; the smallest match wins.
    pub fn search_parallel(
        &self,
        seed: &Seed,
        prefix: &Prefix,
        workers: NonZeroUsize,
    ) -> Result<PowResult, SearchError> {
        let workers = workers.get();
        if workers == 1 {
            return self.search(seed, prefix);
        }

        let start = Instant::now();
        let best = AtomicU64::new(u64::MAX);
        let timed_out = AtomicBool::new(false);

        let outcomes: Vec<StrideOutcome> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers as u64)
                .map(|offset| {
                    let stride = Stride {
                        search: self,
                        seed,
                        prefix,
                        offset,
                        step: workers as u64,
                        start,
                        best: &best,
                        timed_out: &timed_out,
                    };
                    scope.spawn(move || stride.run())
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(outcome) => outcome,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        let attempts = outcomes
            .iter()
            .fold(0u64, |acc, o| acc.saturating_add(o.attempts()));

        let winner = outcomes
            .iter()
            .filter_map(|o| match o {
                StrideOutcome::Found { counter, digest, .. } => Some((*counter, *digest)),
                _ => None,
            })
            .min_by_key(|(counter, _)| *counter);

        // A worker that timed out below the winner may have skipped a
        // smaller match, so the winner only stands if every timed-out
        // worker had already moved past it.
        let covered = |winner: u64| {
            outcomes.iter().all(|o| match o {
                StrideOutcome::TimedOut { next, .. } => *next > winner,
                _ => true,
            })
        };

        match winner {
            Some((counter, digest)) if covered(counter) => Ok(PowResult {
                counter,
                candidate: Candidate::new(seed, counter),
                digest,
                elapsed: start.elapsed(),
                attempts,
                algorithm: self.algorithm,
            }),
            _ if timed_out.load(Ordering::Relaxed) => Err(SearchError::Timeout {
                elapsed: start.elapsed(),
                attempts,
            }),
            _ => Err(SearchError::NotFound { attempts }),
        }
    }
}

/// One worker's share of a parallel search.
struct Stride<'a> {
    search: &'a PowSearch,
    seed: &'a Seed,
    prefix: &'a Prefix,
    offset: u64,
    step: u64,
    start: Instant,
    best: &'a AtomicU64,
    timed_out: &'a AtomicBool,
}

enum StrideOutcome {
    Found {
        counter: u64,
        digest: Digest,
        attempts: u64,
    },
    Exhausted {
        attempts: u64,
    },
    TimedOut {
        attempts: u64,
        next: u64,
    },
}

impl StrideOutcome {
    fn attempts(&self) -> u64 {
        match self {
            StrideOutcome::Found { attempts, .. }
            | StrideOutcome::Exhausted { attempts }
            | StrideOutcome::TimedOut { attempts, .. } => *attempts,
        }
    }
}

impl Stride<'_> {
    fn run(self) -> StrideOutcome {
        let limits = self.search.limits();
        let algorithm = self.search.algorithm();
        let mut buf = String::with_capacity(self.seed.as_str().len() + 20);
        let mut counter = self.offset;
        let mut attempts: u64 = 0;

        loop {
            if counter > self.best.load(Ordering::Relaxed) || !limits.allows(counter) {
                return StrideOutcome::Exhausted { attempts };
            }
            if attempts % DEADLINE_POLL_INTERVAL == 0
                && (self.timed_out.load(Ordering::Relaxed) || limits.expired(self.start))
            {
                self.timed_out.store(true, Ordering::Relaxed);
                return StrideOutcome::TimedOut {
                    attempts,
                    next: counter,
                };
            }

            write_candidate(&mut buf, self.seed, counter);
            let digest = algorithm.digest(buf.as_bytes());
            attempts += 1;
            if self.prefix.matches(&digest) {
                self.best.fetch_min(counter, Ordering::Relaxed);
                return StrideOutcome::Found {
                    counter,
                    digest,
                    attempts,
                };
            }

            counter = match counter.checked_add(self.step) {
                Some(next) => next,
                None => return StrideOutcome::Exhausted { attempts },
            };
        }
    }
}
