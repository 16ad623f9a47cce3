//! Rule node types shared between the parser and the pipeline
//!
//! These map to the observable output of AdGuard-style filter list parsers:
//! an ordered sequence of typed rule nodes, each carrying its raw source
//! line, an optional domain restriction list, and a type-specific body.

use std::fmt;

/// Discriminant tag for a parsed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// `!`-prefixed comment or `[Adblock Plus ...]` header line
    Comment,
    /// Network request rule (block/allow patterns, hosts entries)
    Network,
    /// Cosmetic element hiding rule (`##`, `#@#`, `#?#`)
    ElementHiding,
    /// Scriptlet invocation (`#%#//scriptlet(...)` or `##+js(...)`)
    ScriptletInjection,
    /// Scriptlet exception (`#@%#//scriptlet(...)` or `#@#+js(...)`)
    ScriptletException,
    /// Direct JS injection (`#%#<script text>`)
    JsInjection,
    /// JS injection exception (`#@%#<script text>`)
    JsException,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Comment => "Comment",
            Self::Network => "Network",
            Self::ElementHiding => "ElementHiding",
            Self::ScriptletInjection => "ScriptletInjectionRule",
            Self::ScriptletException => "ScriptletExceptionRule",
            Self::JsInjection => "JsInjectionRule",
            Self::JsException => "JsExceptionRule",
        };
        f.write_str(name)
    }
}

impl RuleKind {
    /// True for the two rule kinds whose effect is running JavaScript on
    /// matching pages.
    #[inline]
    pub fn is_injection(self) -> bool {
        matches!(self, Self::ScriptletInjection | Self::JsInjection)
    }
}

/// One entry of a rule's domain restriction list.
///
/// `exception == false` means "applies to this domain";
/// `exception == true` means "excluded from this domain" (`~domain`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRestriction {
    pub value: String,
    pub exception: bool,
}

impl DomainRestriction {
    pub fn applies_to(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            exception: false,
        }
    }

    pub fn excluded_from(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            exception: true,
        }
    }
}

/// Type-specific rule payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleBody {
    /// No payload the pipeline reads (comments, network rules, cosmetics)
    None,
    /// Scriptlet call parameters, in source order, quotes preserved.
    /// The first parameter is the scriptlet name, the rest its arguments.
    Scriptlet { params: Vec<String> },
    /// Literal inline script text
    Js { text: String },
}

/// One parsed rule. Produced by the parser, read-only downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleNode {
    pub kind: RuleKind,
    /// Original source line, trimmed, verbatim
    pub raw: String,
    /// Domain restriction list in source order; empty when the rule has no
    /// domain prefix
    pub domains: Vec<DomainRestriction>,
    pub body: RuleBody,
}

impl RuleNode {
    /// Node with no domain list and no body, for comment/network lines.
    pub fn bare(kind: RuleKind, raw: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
            domains: Vec::new(),
            body: RuleBody::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injection_kinds() {
        assert!(RuleKind::ScriptletInjection.is_injection());
        assert!(RuleKind::JsInjection.is_injection());
        assert!(!RuleKind::ScriptletException.is_injection());
        assert!(!RuleKind::JsException.is_injection());
        assert!(!RuleKind::Network.is_injection());
        assert!(!RuleKind::ElementHiding.is_injection());
    }

    #[test]
    fn kind_display_matches_rule_type_tags() {
        assert_eq!(RuleKind::ScriptletInjection.to_string(), "ScriptletInjectionRule");
        assert_eq!(RuleKind::JsInjection.to_string(), "JsInjectionRule");
    }
}
