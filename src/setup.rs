//! The surface every algorithm exposes to the experiment layer.
//!
//! - [`Metaheuristic`]: a structured setup dump and a canonical name
//! - [`Solve`]: the `solve` entry point
//! - [`Describe`]: named components (fitness processes, models)
//! - [`SetupDescription`]: ordered key/value hyperparameter dump
//! - [`name_part`] / [`merge_name`]: file-system-safe identifiers

use crate::process::BlackBoxProcess;
use std::fmt;

/// Counters reported by a finished run.
///
/// The best solution is not part of this: it lives in the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    /// Completed generations (model updates for the EDA family).
    pub generations: u64,

    /// Number of restarts, not counting the initial epoch.
    pub restarts: u64,
}

impl RunStats {
    /// Logs the end of a run and returns the counters.
    pub(crate) fn finished(self) -> Self {
        tracing::debug!(
            generations = self.generations,
            restarts = self.restarts,
            "run terminated"
        );
        self
    }
}

/// A configured search algorithm, as seen by the experiment layer.
pub trait Metaheuristic {
    /// The hyperparameters, for experiment logs.
    fn setup_description(&self) -> SetupDescription;

    /// Canonical name, safe to use as a file or directory name.
    fn name(&self) -> String;
}

/// Runs a [`Metaheuristic`] on points of type `X`.
pub trait Solve<X>: Metaheuristic {
    /// Runs until the process demands termination.
    ///
    /// Every evaluation goes through the process, which also records the
    /// best point found.
    fn solve<P: BlackBoxProcess<Point = X>>(&mut self, process: &mut P) -> RunStats;
}

/// A named algorithm component.
///
/// The [`Display`](fmt::Display) form goes into algorithm names;
/// [`describe`](Describe::describe) may add parameters to the setup dump.
pub trait Describe: fmt::Display {
    /// Adds component-specific parameters to an algorithm's setup dump.
    fn describe(&self, _setup: &mut SetupDescription) {}
}

/// Ordered key/value dump of an algorithm setup.
///
/// Rendered with [`Display`](fmt::Display) as one `key: value` line per
/// entry, in insertion order.
///
/// # Examples
///
/// ```
/// use u_blackbox::setup::SetupDescription;
///
/// let mut setup = SetupDescription::new();
/// setup.entry("base_algorithm", "ea").entry("mu", 4);
/// assert_eq!(setup.get("mu"), Some("4"));
/// assert_eq!(setup.to_string(), "base_algorithm: ea\nmu: 4\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetupDescription {
    entries: Vec<(String, String)>,
}

impl SetupDescription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, or overwrites the value of an existing key.
    pub fn entry(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// The value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for SetupDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.entries {
            writeln!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}

fn is_separator(ch: char) -> bool {
    ch <= ' '
        || ch.is_whitespace()
        || matches!(
            ch,
            '_' | '!' | '"' | '#' | '$' | '%' | '&' | '\'' | '*' | '/' | ':' | ';' | '<' | '>'
                | '?' | '[' | '\\' | ']' | '^' | '`' | '{' | '|' | '}' | '\u{2018}'
        )
}

/// Makes one name component file-system-safe.
///
/// Runs of whitespace, underscores and characters that are unsafe in file
/// names collapse into a single `_`; a `.` becomes `d` (so `0.5` turns into
/// `0d5`); leading and trailing separators are dropped.
///
/// ```
/// use u_blackbox::setup::name_part;
///
/// assert_eq!(name_part("  ea 4+4@0.5 "), "ea_4+4@0d5");
/// assert_eq!(name_part("a//b__c"), "a_b_c");
/// ```
pub fn name_part(part: &str) -> String {
    let mut name = String::with_capacity(part.len());
    let mut separate = false;
    for ch in part.chars() {
        if is_separator(ch) {
            separate = true;
            continue;
        }
        if separate && !name.is_empty() {
            name.push('_');
        }
        separate = false;
        name.push(if ch == '.' { 'd' } else { ch });
    }
    name
}

/// Joins the non-empty sanitized `parts` with `_`.
///
/// ```
/// use u_blackbox::setup::merge_name;
///
/// assert_eq!(merge_name(&["ma", "", "8+8", "1flip"]), "ma_8+8_1flip");
/// ```
pub fn merge_name<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|p| name_part(p.as_ref()))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
