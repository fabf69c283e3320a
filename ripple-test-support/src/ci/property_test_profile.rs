//! Property-test run profile read from the environment.
//!
//! Every proptest suite in the workspace sizes itself through this profile,
//! so CI can scale case counts or switch on forking in one place.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable enabling forked proptest execution.
pub const RIPPLE_PBT_FORK_ENV_KEY: &str = "RIPPLE_PBT_FORK";

/// Case count and fork setting for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads the profile, falling back to the given defaults when a variable
    /// is unset or malformed. Malformed values are logged at `warn`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ripple_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: env_override(PROGTEST_CASES_ENV_KEY, parse_cases).unwrap_or(default_cases),
            fork: env_override(RIPPLE_PBT_FORK_ENV_KEY, parse_switch).unwrap_or(default_fork),
        }
    }

    /// Cases to run per property.
    #[must_use]
    #[rustfmt::skip]
    pub fn cases(&self) -> u32 { self.cases }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    #[rustfmt::skip]
    pub fn fork(&self) -> bool { self.fork }
}

/// Reads and parses `key`, returning `None` when it is unset or invalid.
fn env_override<T>(key: &'static str, parse: fn(&str) -> Result<T, &'static str>) -> Option<T> {
    let raw = env::var(key).ok()?;
    parse(raw.trim())
        .inspect_err(|reason| {
            tracing::warn!(
                env = key,
                raw = %raw,
                reason,
                "ignoring invalid property-test profile override",
            );
        })
        .ok()
}

fn parse_cases(raw: &str) -> Result<u32, &'static str> {
    match raw.parse::<u32>() {
        Ok(0) => Err("case count must be positive"),
        Ok(cases) => Ok(cases),
        Err(_) => Err("case count must be an unsigned integer"),
    }
}

fn parse_switch(raw: &str) -> Result<bool, &'static str> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected true/false, 1/0, yes/no, or on/off"),
    }
}
