//! adject filter list parser
//!
//! Parses AdGuard/uBO filter list text into the ordered `RuleNode`
//! sequence the pipeline consumes. Covers the rule families the AdGuard
//! base filter contains: comments, network rules, cosmetic element hiding,
//! scriptlet injection in both AdGuard (`#%#//scriptlet(...)`) and uBO
//! (`##+js(...)`) forms, and direct JS injection (`#%#...`), along with
//! their exception variants.

pub mod parser;

pub use parser::parse_filter_list;
