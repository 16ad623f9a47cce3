//! adject core library
//!
//! This crate holds everything between "parsed rule list" and "combined
//! output script": the rule data model, the injection-rule selector, the
//! scriptlet registry, the per-rule script resolver, and the output
//! assembler.
//!
//! # Modules
//!
//! - `rules`: shared rule node types produced by the parser
//! - `select`: filters a rule sequence down to injection rules scoped to a
//!   target domain
//! - `scriptlets`: built-in registry of named scriptlet templates and the
//!   `invoke` resolution entry point
//! - `resolve`: turns one qualifying rule into executable script text
//! - `assemble`: wraps resolved scripts in hostname guards and joins them

pub mod assemble;
pub mod resolve;
pub mod rules;
pub mod scriptlets;
pub mod select;

// Re-export commonly used types
pub use assemble::{combine, wrap_script};
pub use resolve::{resolve_script, ResolveError};
pub use rules::{DomainRestriction, RuleBody, RuleKind, RuleNode};
pub use scriptlets::{ScriptletError, ScriptletRequest};
pub use select::{positive_domains, select_injection_rules};
