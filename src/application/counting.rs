use std::io;
use std::num::NonZeroUsize;

use crate::domain::ParseQuantityError;

/// Supplies physical counts during a reconciliation pass.
///
/// The interactive shell implements this by prompting on the terminal;
/// tests feed canned answers.
pub trait CountSource {
    /// Next raw answer for `item`, or `None` once no more input is available.
    fn next_count(&mut self, item: &str) -> io::Result<Option<String>>;

    /// Called when an answer for `item` could not be parsed. The source is
    /// asked again afterwards unless the retry policy is exhausted.
    fn rejected(&mut self, _item: &str, _error: &ParseQuantityError) -> io::Result<()> {
        Ok(())
    }
}

/// How many invalid answers are tolerated per item before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// Keep asking until a valid number arrives.
    #[default]
    Unbounded,
    /// Give up after this many attempts for a single item.
    Bounded(NonZeroUsize),
}

impl RetryPolicy {
    pub fn from_max_attempts(max_attempts: Option<NonZeroUsize>) -> Self {
        max_attempts.map_or(RetryPolicy::Unbounded, RetryPolicy::Bounded)
    }

    /// Whether another attempt may follow `attempts` failed ones.
    pub fn allows_retry(&self, attempts: usize) -> bool {
        match self {
            RetryPolicy::Unbounded => true,
            RetryPolicy::Bounded(max) => attempts < max.get(),
        }
    }
}
