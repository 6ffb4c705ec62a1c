//! Ordered analyzer pipeline
//!
//! Slots are kept in registration order. A slot is either keyed (addressable
//! by a unique name) or anonymous. Any slot can also be addressed by the
//! identity of the `Arc` it was registered with.

use crate::analyzer::Analyzer;
use crate::crawler::Document;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while registering an analyzer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Invalid analyzer key '{0}': keys must contain a non-whitespace character")]
    InvalidKey(String),
}

struct Slot {
    key: Option<String>,
    analyzer: Arc<dyn Analyzer>,
}

impl Slot {
    fn identity(&self) -> *const () {
        Arc::as_ptr(&self.analyzer).cast::<()>()
    }
}

/// Addresses a registered analyzer by key or by `Arc` identity
///
/// Built implicitly from `&str`, `&String` or `&Arc<A>`:
///
/// ```
/// use std::sync::Arc;
/// use sumi_sweep::analyzer::{Analyzer, AnalyzerRegistry, EchoUrlAnalyzer};
///
/// let echo: Arc<dyn Analyzer> = Arc::new(EchoUrlAnalyzer::stdout());
/// let mut registry = AnalyzerRegistry::new();
/// registry.add(echo.clone(), None, false).unwrap();
///
/// assert!(registry.contains(&echo));
/// assert!(!registry.contains("echo"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    target: Target<'a>,
}

#[derive(Debug, Clone, Copy)]
enum Target<'a> {
    Key(&'a str),
    Identity(*const ()),
}

impl<'a> From<&'a str> for Lookup<'a> {
    fn from(key: &'a str) -> Self {
        Self {
            target: Target::Key(key),
        }
    }
}

impl<'a> From<&'a String> for Lookup<'a> {
    fn from(key: &'a String) -> Self {
        Self {
            target: Target::Key(key.as_str()),
        }
    }
}

impl<'a, A: ?Sized> From<&'a Arc<A>> for Lookup<'a> {
    fn from(analyzer: &'a Arc<A>) -> Self {
        Self {
            target: Target::Identity(Arc::as_ptr(analyzer).cast::<()>()),
        }
    }
}

/// One analyzer invocation that returned an error or panicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    /// Slot position in registration order
    pub position: usize,
    pub key: Option<String>,
    pub analyzer: &'static str,
    pub message: String,
}

/// Outcome of running the pipeline against one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Analyzers invoked, including failed ones
    pub invoked: usize,
    pub failures: Vec<HandlerFailure>,
}

impl PipelineReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ordered collection of analyzers executed once per fetched page
#[derive(Default)]
pub struct AnalyzerRegistry {
    slots: Vec<Slot>,
    /// Key to slot position, rebuilt whenever positions shift
    index: HashMap<String, usize>,
}

impl AnalyzerRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an analyzer
    ///
    /// # Arguments
    ///
    /// * `analyzer` - The analyzer to run
    /// * `key` - Optional unique name; `None` registers an anonymous slot
    /// * `allow_overwrite` - Whether an existing slot with the same key is replaced
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The analyzer was appended, or replaced the keyed slot in place
    /// * `Ok(false)` - The key is taken and overwriting was not allowed; nothing changed
    /// * `Err(RegistryError)` - The key is empty or whitespace-only; nothing changed
    pub fn add(
        &mut self,
        analyzer: Arc<dyn Analyzer>,
        key: Option<&str>,
        allow_overwrite: bool,
    ) -> Result<bool, RegistryError> {
        let Some(key) = key else {
            self.slots.push(Slot {
                key: None,
                analyzer,
            });
            return Ok(true);
        };

        if key.trim().is_empty() {
            return Err(RegistryError::InvalidKey(key.to_string()));
        }

        match self.index.get(key) {
            Some(&position) if allow_overwrite => {
                tracing::debug!("Replacing analyzer registered as '{}'", key);
                self.slots[position].analyzer = analyzer;
                Ok(true)
            }
            Some(_) => {
                tracing::debug!("Analyzer key '{}' already registered", key);
                Ok(false)
            }
            None => {
                self.index.insert(key.to_string(), self.slots.len());
                self.slots.push(Slot {
                    key: Some(key.to_string()),
                    analyzer,
                });
                Ok(true)
            }
        }
    }

    /// Returns true if a slot matches the key or analyzer identity
    pub fn contains<'a>(&self, item: impl Into<Lookup<'a>>) -> bool {
        self.position(item.into()).is_some()
    }

    /// Removes the slot matching the key or analyzer identity
    ///
    /// When several slots hold the same `Arc`, the earliest one is removed.
    pub fn remove<'a>(&mut self, item: impl Into<Lookup<'a>>) -> bool {
        let Some(position) = self.position(item.into()) else {
            return false;
        };

        self.slots.remove(position);
        self.reindex();
        true
    }

    /// Returns the analyzer registered under `key`
    pub fn get(&self, key: &str) -> Option<&Arc<dyn Analyzer>> {
        self.index
            .get(key)
            .map(|&position| &self.slots[position].analyzer)
    }

    /// Iterates over keyed slot names in registration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(|slot| slot.key.as_deref())
    }

    /// Iterates over all slots in registration order
    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, &Arc<dyn Analyzer>)> {
        self.slots
            .iter()
            .map(|slot| (slot.key.as_deref(), &slot.analyzer))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Runs every analyzer against one page, in registration order
    ///
    /// A failing analyzer (returned `Err` or panicked) is logged and recorded
    /// in the report; the remaining analyzers still run.
    pub fn execute(&self, url: &str, document: &Document) -> PipelineReport {
        let mut report = PipelineReport::default();

        for (position, slot) in self.slots.iter().enumerate() {
            report.invoked += 1;

            let outcome =
                panic::catch_unwind(AssertUnwindSafe(|| slot.analyzer.process(url, document)));

            let message = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => format!("{:#}", e),
                Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
            };

            tracing::warn!(
                "Analyzer {} (slot {}) failed on {}: {}",
                slot.key.as_deref().unwrap_or(slot.analyzer.name()),
                position,
                url,
                message
            );

            report.failures.push(HandlerFailure {
                position,
                key: slot.key.clone(),
                analyzer: slot.analyzer.name(),
                message,
            });
        }

        report
    }

    fn position(&self, lookup: Lookup<'_>) -> Option<usize> {
        match lookup.target {
            Target::Key(key) => self.index.get(key).copied(),
            Target::Identity(ptr) => self.slots.iter().position(|slot| slot.identity() == ptr),
        }
    }

    fn reindex(&mut self) {
        self.index = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(position, slot)| slot.key.clone().map(|key| (key, position)))
            .collect();
    }
}

impl fmt::Debug for AnalyzerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.slots
                    .iter()
                    .map(|slot| (slot.key.as_deref(), slot.analyzer.name())),
            )
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
