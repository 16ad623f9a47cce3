//! Output assembly
//!
//! Wraps each resolved script in a runtime hostname guard with a
//! provenance comment, and joins the wrapped blocks into the final
//! document.

/// Wraps one resolved script for one rule.
///
/// The guard only runs the body when the current document's hostname is a
/// member of the rule's positive domain list; `domains` must be in the
/// rule's original restriction order. The leading comment carries the
/// rule's raw source line verbatim.
pub fn wrap_script(raw: &str, domains: &[&str], script: &str) -> String {
    let domain_list = domains
        .iter()
        .map(|d| format!("'{d}'"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "// From rule: {raw}\nif ([{domain_list}].includes(window.location.hostname)) {{\n    {script}\n}}\n"
    )
}

/// Joins wrapped blocks into the final output document. Each block ends
/// with its own newline, so a `"\n"` join leaves one blank line between
/// consecutive blocks.
pub fn combine(wrapped: &[String]) -> String {
    wrapped.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_with_guard_and_provenance() {
        let block = wrap_script(
            "example.com##+js(...)",
            &["youtube.com"],
            "console.log('x')",
        );
        assert_eq!(
            block,
            "// From rule: example.com##+js(...)\n\
             if (['youtube.com'].includes(window.location.hostname)) {\n    \
             console.log('x')\n\
             }\n"
        );
    }

    #[test]
    fn quotes_each_domain_in_restriction_order() {
        let block = wrap_script("r", &["youtube.com", "m.youtube.com"], "void 0");
        assert!(block.contains("if (['youtube.com', 'm.youtube.com'].includes(window.location.hostname))"));
    }

    #[test]
    fn combine_separates_blocks_with_a_blank_line() {
        let blocks = vec![
            wrap_script("a", &["youtube.com"], "one()"),
            wrap_script("b", &["youtube.com"], "two()"),
        ];
        let combined = combine(&blocks);
        assert!(combined.contains("}\n\n// From rule: b"));
    }

    #[test]
    fn combine_of_nothing_is_empty() {
        assert_eq!(combine(&[]), "");
    }
}
