//! Domain layer - resolution and conditional actions

pub mod conditions;
pub mod resolver;
pub mod source;
pub mod validation;

pub use conditions::{
    application_actions, evaluate_conditions, ActionHook, ActionOutcome, ConditionalAction,
    ConditionalActionResult, NoOpHook, PropertyCondition,
};
pub use resolver::{application_schema, keys, resolve, ResolvedConfig, ResolvedEntry, Resolver};
pub use source::PropertySource;
