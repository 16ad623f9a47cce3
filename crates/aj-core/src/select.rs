//! Injection rule selection
//!
//! Filters a parsed rule sequence down to the ordered subsequence of
//! JavaScript-injection rules scoped to a target domain or one of its
//! subdomains.

use log::debug;

use crate::rules::RuleNode;

/// Returns the rules that inject JavaScript on `target` or any of its
/// subdomains, in original parse order.
///
/// A rule qualifies when its kind is one of the two injection variants and
/// at least one of its positive (non-exception) domain restrictions matches
/// the target. Exception restrictions are ignored entirely at this stage:
/// they neither match nor veto. A rule with no domain restrictions never
/// qualifies.
pub fn select_injection_rules<'a>(rules: &'a [RuleNode], target: &str) -> Vec<&'a RuleNode> {
    let selected: Vec<&RuleNode> = rules
        .iter()
        .filter(|rule| rule.kind.is_injection())
        .filter(|rule| {
            rule.domains
                .iter()
                .filter(|d| !d.exception)
                .any(|d| domain_matches(&d.value, target))
        })
        .collect();

    debug!(
        "selected {} of {} rules for target {}",
        selected.len(),
        rules.len(),
        target
    );

    selected
}

/// Positive (non-exception) domain values of a rule, in restriction order.
pub fn positive_domains(rule: &RuleNode) -> Vec<&str> {
    rule.domains
        .iter()
        .filter(|d| !d.exception)
        .map(|d| d.value.as_str())
        .collect()
}

/// Suffix match on the dot-qualified label: `value` matches when it equals
/// `target` or ends with `.target`. `evilyoutube.com` must not match
/// `youtube.com`.
fn domain_matches(value: &str, target: &str) -> bool {
    if value == target {
        return true;
    }
    value
        .strip_suffix(target)
        .is_some_and(|prefix| prefix.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{DomainRestriction, RuleBody, RuleKind};

    fn js_rule(raw: &str, domains: Vec<DomainRestriction>) -> RuleNode {
        RuleNode {
            kind: RuleKind::JsInjection,
            raw: raw.to_string(),
            domains,
            body: RuleBody::Js {
                text: "void 0".to_string(),
            },
        }
    }

    #[test]
    fn matches_exact_and_subdomain() {
        assert!(domain_matches("youtube.com", "youtube.com"));
        assert!(domain_matches("m.youtube.com", "youtube.com"));
        assert!(domain_matches("music.m.youtube.com", "youtube.com"));
    }

    #[test]
    fn rejects_lookalike_domains() {
        assert!(!domain_matches("notyoutube.com", "youtube.com"));
        assert!(!domain_matches("youtubexyz.com", "youtube.com"));
        assert!(!domain_matches("evilyoutube.com", "youtube.com"));
        assert!(!domain_matches("youtube.com.evil.org", "youtube.com"));
    }

    #[test]
    fn keeps_only_injection_kinds() {
        let rules = vec![
            RuleNode::bare(RuleKind::Network, "||ads.youtube.com^"),
            js_rule("a", vec![DomainRestriction::applies_to("youtube.com")]),
            RuleNode {
                kind: RuleKind::ElementHiding,
                raw: "youtube.com##.ad".to_string(),
                domains: vec![DomainRestriction::applies_to("youtube.com")],
                body: RuleBody::None,
            },
            RuleNode {
                kind: RuleKind::JsException,
                raw: "youtube.com#@%#void 0".to_string(),
                domains: vec![DomainRestriction::applies_to("youtube.com")],
                body: RuleBody::Js {
                    text: "void 0".to_string(),
                },
            },
        ];

        let selected = select_injection_rules(&rules, "youtube.com");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].raw, "a");
    }

    #[test]
    fn preserves_parse_order() {
        let rules = vec![
            js_rule("first", vec![DomainRestriction::applies_to("youtube.com")]),
            js_rule("skipped", vec![DomainRestriction::applies_to("example.com")]),
            js_rule("second", vec![DomainRestriction::applies_to("m.youtube.com")]),
            js_rule("third", vec![DomainRestriction::applies_to("youtube.com")]),
        ];

        let selected = select_injection_rules(&rules, "youtube.com");
        let raws: Vec<&str> = selected.iter().map(|r| r.raw.as_str()).collect();
        assert_eq!(raws, vec!["first", "second", "third"]);
    }

    #[test]
    fn exception_restrictions_never_match() {
        let rules = vec![js_rule(
            "exception-only",
            vec![DomainRestriction::excluded_from("youtube.com")],
        )];
        assert!(select_injection_rules(&rules, "youtube.com").is_empty());
    }

    #[test]
    fn exception_restrictions_do_not_veto() {
        let rules = vec![js_rule(
            "mixed",
            vec![
                DomainRestriction::excluded_from("m.youtube.com"),
                DomainRestriction::applies_to("youtube.com"),
            ],
        )];
        assert_eq!(select_injection_rules(&rules, "youtube.com").len(), 1);
    }

    #[test]
    fn no_restrictions_means_no_match() {
        let rules = vec![js_rule("generic", Vec::new())];
        assert!(select_injection_rules(&rules, "youtube.com").is_empty());
    }

    #[test]
    fn positive_domains_keeps_order_and_drops_exceptions() {
        let rule = js_rule(
            "r",
            vec![
                DomainRestriction::applies_to("youtube.com"),
                DomainRestriction::excluded_from("music.youtube.com"),
                DomainRestriction::applies_to("m.youtube.com"),
            ],
        );
        assert_eq!(positive_domains(&rule), vec!["youtube.com", "m.youtube.com"]);
    }
}
