//! Per-rule script resolution
//!
//! Converts one qualifying rule into raw JavaScript text: scriptlet
//! invocations go through the registry, direct injections return their
//! inline body verbatim.

use thiserror::Error;

use crate::rules::{RuleBody, RuleKind, RuleNode};
use crate::scriptlets::{self, ScriptletError, ScriptletRequest};

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Unreachable after selection; kept as a defensive check.
    #[error("unsupported rule type {kind}")]
    UnsupportedRuleType { kind: RuleKind },
    #[error("scriptlet rule has an empty parameter list: {raw}")]
    EmptyScriptletBody { raw: String },
    #[error(transparent)]
    Scriptlet(#[from] ScriptletError),
}

/// Resolves a rule into executable JavaScript.
///
/// For scriptlet rules the first body parameter is the scriptlet name and
/// the rest are positional arguments; each has one layer of surrounding
/// quotes stripped before resolution. Direct injection rules pass their
/// body through unmodified. No validation or execution of the resolved
/// code happens here.
pub fn resolve_script(rule: &RuleNode) -> Result<String, ResolveError> {
    match (&rule.kind, &rule.body) {
        (RuleKind::ScriptletInjection, RuleBody::Scriptlet { params }) => {
            let (name, args) = params
                .split_first()
                .ok_or_else(|| ResolveError::EmptyScriptletBody {
                    raw: rule.raw.clone(),
                })?;
            let request = ScriptletRequest::extension(
                unquote(name).to_string(),
                args.iter().map(|arg| unquote(arg).to_string()).collect(),
            );
            Ok(scriptlets::invoke(&request)?)
        }
        (RuleKind::JsInjection, RuleBody::Js { text }) => Ok(text.clone()),
        (kind, _) => Err(ResolveError::UnsupportedRuleType { kind: *kind }),
    }
}

/// Strips exactly one layer of matching surrounding quotes (`'` or `"`).
/// Anything else passes through unchanged.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'\'' || bytes[0] == b'"')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scriptlet_rule(params: &[&str]) -> RuleNode {
        RuleNode {
            kind: RuleKind::ScriptletInjection,
            raw: "youtube.com#%#//scriptlet(...)".to_string(),
            domains: Vec::new(),
            body: RuleBody::Scriptlet {
                params: params.iter().map(|p| p.to_string()).collect(),
            },
        }
    }

    #[test]
    fn unquote_strips_one_matching_layer() {
        assert_eq!(unquote("'abort-on-property-read'"), "abort-on-property-read");
        assert_eq!(unquote("\"value\""), "value");
        assert_eq!(unquote("''quoted''"), "'quoted'");
    }

    #[test]
    fn unquote_leaves_bare_and_mismatched_values() {
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("'open"), "'open");
        assert_eq!(unquote("close'"), "close'");
        assert_eq!(unquote("'mixed\""), "'mixed\"");
        assert_eq!(unquote("'"), "'");
        assert_eq!(unquote(""), "");
    }

    #[test]
    fn resolves_scriptlet_rule_through_registry() {
        let rule = scriptlet_rule(&["'abort-on-property-read'", "'playerAds'"]);
        let code = resolve_script(&rule).expect("scriptlet should resolve");
        assert!(code.contains("playerAds"));
        assert!(code.starts_with("(function() {"));
    }

    #[test]
    fn unquoted_scriptlet_params_pass_through() {
        let rule = scriptlet_rule(&["noeval"]);
        assert!(resolve_script(&rule).is_ok());
    }

    #[test]
    fn js_injection_body_is_verbatim() {
        let rule = RuleNode {
            kind: RuleKind::JsInjection,
            raw: "youtube.com#%#console.log('x')".to_string(),
            domains: Vec::new(),
            body: RuleBody::Js {
                text: "console.log('x')".to_string(),
            },
        };
        assert_eq!(resolve_script(&rule).unwrap(), "console.log('x')");
    }

    #[test]
    fn resolution_is_deterministic() {
        let rule = scriptlet_rule(&["'set-constant'", "'yt.ads'", "'undefined'"]);
        assert_eq!(
            resolve_script(&rule).unwrap(),
            resolve_script(&rule).unwrap()
        );
    }

    #[test]
    fn other_kinds_are_rejected() {
        let rule = RuleNode::bare(RuleKind::Network, "||ads.example.com^");
        let err = resolve_script(&rule).unwrap_err();
        assert!(
            matches!(err, ResolveError::UnsupportedRuleType { kind } if kind == RuleKind::Network)
        );
    }

    #[test]
    fn empty_scriptlet_params_are_rejected() {
        let rule = scriptlet_rule(&[]);
        assert!(matches!(
            resolve_script(&rule).unwrap_err(),
            ResolveError::EmptyScriptletBody { .. }
        ));
    }
}
