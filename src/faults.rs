use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use regex::Regex;
use tracing::{debug, trace};

use crate::error::{BoxError, ConditionFailed};

/// Collects named failures produced by a sequence of checks.
///
/// With stacking disabled (the default) only the most recent failure is kept,
/// and the first failure reported through [`Faults::check`] or
/// [`Faults::condition`] locks the accumulator so later checks are skipped
/// until [`Faults::reset`]. With stacking enabled every distinct failure is
/// kept and the accumulator never locks.
#[derive(Debug, Default)]
pub struct Faults {
    failures: BTreeMap<String, BoxError>,
    last_name: String,
    stack: bool,
    locked: bool,
}

impl Faults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable_stack(&mut self) -> &mut Self {
        self.stack = true;
        self
    }

    pub fn disable_stack(&mut self) -> &mut Self {
        self.stack = false;
        self
    }

    /// Drops every recorded failure and reopens the accumulator with stacking off.
    pub fn reset(&mut self) -> &mut Self {
        self.failures.clear();
        self.last_name.clear();
        self.stack = false;
        self.locked = false;
        self
    }

    /// Records `failure` under `name`. Ignores the lock and never sets it.
    pub fn add(&mut self, failure: impl Into<BoxError>, name: impl Into<String>) -> &mut Self {
        self.record(failure.into(), name.into());
        self
    }

    /// Records a [`ConditionFailed`] named after its own message when
    /// `predicate` holds and the accumulator is open.
    pub fn condition(&mut self, predicate: bool, name: impl Into<String>) -> &mut Self {
        if self.locked {
            trace!("condition skipped, accumulator locked");
            return self;
        }
        if predicate {
            let name = name.into();
            self.record_checked(Box::new(ConditionFailed::new(name.clone())), name);
        }
        self
    }

    /// Like [`Faults::condition`], formatting the message only when it is recorded.
    pub fn condition_fmt(&mut self, predicate: bool, args: fmt::Arguments<'_>) -> &mut Self {
        if !predicate || self.locked {
            return self;
        }
        self.condition(true, fmt::format(args))
    }

    /// Runs `block` unless the accumulator is locked, recording its error under `name`.
    pub fn check<F, E>(&mut self, name: impl Into<String>, block: F) -> &mut Self
    where
        F: FnOnce() -> Result<(), E>,
        E: Into<BoxError>,
    {
        let name = name.into();
        if self.locked {
            trace!(name = %name, "check skipped, accumulator locked");
            return self;
        }
        if let Err(failure) = block() {
            self.record_checked(failure.into(), name);
        }
        self
    }

    /// Name of the most recently recorded failure, or `""` if none.
    pub fn last_message(&self) -> &str {
        &self.last_name
    }

    /// `None` while the last name is empty, even if a failure was added under `""`.
    pub fn get_last(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        if self.last_name.is_empty() {
            return None;
        }
        self.failures.get(&self.last_name).map(|failure| &**failure)
    }

    pub fn get_all(&self) -> &BTreeMap<String, BoxError> {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_stacking(&self) -> bool {
        self.stack
    }

    /// Moves the last failure under `new_name` when `test` accepts it.
    ///
    /// The boxed failure itself is kept, so callers can reclassify a generic
    /// failure after inspecting (or downcasting) it. Like [`Faults::add`] this
    /// ignores the lock.
    pub fn review_last_fail<F>(&mut self, new_name: impl Into<String>, test: F) -> &mut Self
    where
        F: FnOnce(&(dyn Error + Send + Sync + 'static)) -> bool,
    {
        let Some(failure) = self.get_last() else {
            return self;
        };
        if !test(failure) {
            return self;
        }
        let old_name = std::mem::take(&mut self.last_name);
        if let Some(failure) = self.failures.remove(&old_name) {
            let new_name = new_name.into();
            debug!(from = %old_name, to = %new_name, "relabelled last failure");
            self.record(failure, new_name);
        }
        self
    }

    /// [`Faults::review_last_fail`] keyed on the failure's message matching `pattern`.
    pub fn review_last_matching(
        &mut self,
        new_name: impl Into<String>,
        pattern: &Regex,
    ) -> &mut Self {
        self.review_last_fail(new_name, |failure| pattern.is_match(&failure.to_string()))
    }

    pub fn into_failures(self) -> BTreeMap<String, BoxError> {
        self.failures
    }

    /// `Ok(())` when nothing was recorded, otherwise the accumulator itself.
    pub fn into_result(self) -> Result<(), Faults> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    fn record(&mut self, failure: BoxError, name: String) {
        if !self.stack {
            self.failures.clear();
        }
        debug!(name = %name, failure = %failure, stacked = self.stack, "recorded failure");
        self.failures.insert(name.clone(), failure);
        self.last_name = name;
    }

    // Shared path for `check` and `condition`: only these may lock, and only
    // while stacking is off.
    fn record_checked(&mut self, failure: BoxError, name: String) {
        self.record(failure, name);
        if !self.stack {
            debug!("accumulator locked");
            self.locked = true;
        }
    }
}

impl fmt::Display for Faults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, failure)) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", name, failure)?;
        }
        Ok(())
    }
}

impl Error for Faults {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.get_last().map(|failure| failure as &(dyn Error + 'static))
    }
}
