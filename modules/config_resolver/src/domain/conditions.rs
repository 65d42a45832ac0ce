//! Conditional configuration actions
//!
//! Each action pairs a property condition with an effect:
//! - The condition is an exact, case-sensitive match of a resolved value's string form
//! - A condition over a key that was not resolved is simply not met
//! - Effects run at most once, in action order, after resolution completed

use super::resolver::{keys, ResolvedConfig};
use std::fmt;
use std::sync::Arc;

/// Exact-match predicate over a resolved setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyCondition {
    /// Setting key
    pub key: String,
    /// Expected string form of the resolved value
    pub having_value: String,
}

impl PropertyCondition {
    pub fn new(key: impl Into<String>, having_value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            having_value: having_value.into(),
        }
    }

    /// Whether the condition holds for `config`
    ///
    /// Comparison is plain string equality: "health, info,metrics" does not
    /// match "health,info,metrics".
    pub fn matches(&self, config: &ResolvedConfig) -> bool {
        config
            .get(&self.key)
            .is_some_and(|value| value.to_string() == self.having_value)
    }
}

/// Effect run when a condition holds
///
/// Implementations receive the resolved config they were activated for.
pub trait ActionHook: Send + Sync {
    /// Apply the effect
    fn apply(&self, config: &ResolvedConfig) -> anyhow::Result<()>;
}

/// Effect that does nothing
pub struct NoOpHook;

impl ActionHook for NoOpHook {
    fn apply(&self, _config: &ResolvedConfig) -> anyhow::Result<()> {
        // No-op: nothing to configure
        Ok(())
    }
}

/// Named condition and effect pair
#[derive(Clone)]
pub struct ConditionalAction {
    pub name: String,
    pub condition: PropertyCondition,
    hook: Arc<dyn ActionHook>,
}

impl ConditionalAction {
    /// Create an action with a no-op effect
    pub fn new(name: impl Into<String>, condition: PropertyCondition) -> Self {
        Self {
            name: name.into(),
            condition,
            hook: Arc::new(NoOpHook),
        }
    }

    /// Replace the effect
    pub fn with_hook(mut self, hook: Arc<dyn ActionHook>) -> Self {
        self.hook = hook;
        self
    }

    /// Evaluate the condition and run the effect if it holds
    pub fn evaluate(&self, config: &ResolvedConfig) -> ConditionalActionResult {
        let outcome = if !self.condition.matches(config) {
            ActionOutcome::NotActivated
        } else {
            match self.hook.apply(config) {
                Ok(()) => ActionOutcome::Activated,
                Err(e) => ActionOutcome::Failed {
                    message: format!("{:#}", e),
                },
            }
        };

        ConditionalActionResult {
            name: self.name.clone(),
            outcome,
        }
    }
}

impl fmt::Debug for ConditionalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalAction")
            .field("name", &self.name)
            .field("condition", &self.condition)
            .finish_non_exhaustive()
    }
}

/// What happened to one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Condition not met, effect not run
    NotActivated,
    /// Condition met, effect succeeded
    Activated,
    /// Condition met, effect returned an error
    Failed { message: String },
}

/// Result of evaluating one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalActionResult {
    pub name: String,
    pub outcome: ActionOutcome,
}

impl ConditionalActionResult {
    /// Whether the condition was met, regardless of the effect's result
    pub fn is_activated(&self) -> bool {
        !matches!(self.outcome, ActionOutcome::NotActivated)
    }
}

/// Lazily evaluate `actions` against `config`, one result per action in order.
///
/// Each effect runs when its result is pulled from the iterator.
pub fn evaluate_conditions<'a>(
    config: &'a ResolvedConfig,
    actions: &'a [ConditionalAction],
) -> impl Iterator<Item = ConditionalActionResult> + 'a {
    actions.iter().map(move |action| {
        let result = action.evaluate(config);
        match &result.outcome {
            ActionOutcome::Activated => {
                tracing::info!(action = %result.name, "conditional action activated");
            }
            ActionOutcome::Failed { message } => {
                tracing::warn!(
                    action = %result.name,
                    error = %message,
                    "conditional action failed"
                );
            }
            ActionOutcome::NotActivated => {
                tracing::debug!(
                    action = %result.name,
                    key = %action.condition.key,
                    "conditional action skipped"
                );
            }
        }
        result
    })
}

/// Name of the JVM metrics action
pub const CONFIGURE_JVM_METRICS: &str = "configure_jvm_metrics";
/// Name of the actuator endpoints action
pub const CONFIGURE_ACTUATOR_ENDPOINTS: &str = "configure_actuator_endpoints";

/// The sample application's two actions, both with no-op effects
pub fn application_actions() -> Vec<ConditionalAction> {
    vec![
        ConditionalAction::new(
            CONFIGURE_JVM_METRICS,
            PropertyCondition::new(keys::JVM_METRICS_ENABLED, "true"),
        ),
        ConditionalAction::new(
            CONFIGURE_ACTUATOR_ENDPOINTS,
            PropertyCondition::new(keys::WEB_EXPOSURE_INCLUDE, "health,info,metrics"),
        ),
    ]
}
