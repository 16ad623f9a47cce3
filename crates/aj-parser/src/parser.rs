use aj_core::rules::{DomainRestriction, RuleBody, RuleKind, RuleNode};
use log::debug;

/// Parses filter list text into an ordered rule node sequence.
///
/// One node per non-blank line, in input order. Lines that are not
/// injection rules still get a node (comment, cosmetic, or network) so the
/// output mirrors the source document; downstream stages filter by kind.
pub fn parse_filter_list(text: &str) -> Vec<RuleNode> {
    let mut rules = Vec::new();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        rules.push(parse_line(line));
    }

    debug!("parsed {} rules", rules.len());
    rules
}

fn parse_line(line: &str) -> RuleNode {
    if is_comment_line(line) {
        return RuleNode::bare(RuleKind::Comment, line);
    }

    // AdGuard JS family: domains#%#body / domains#@%#body, where body is
    // either //scriptlet(...) or literal script text.
    if let Some(pos) = line.find("#@%#") {
        return js_family_node(line, &line[..pos], &line[pos + 4..], true);
    }
    if let Some(pos) = line.find("#%#") {
        return js_family_node(line, &line[..pos], &line[pos + 3..], false);
    }

    // uBO scriptlet form: domains##+js(name, args)
    if let Some(pos) = line.find("#@#+js(") {
        return ubo_scriptlet_node(line, &line[..pos], &line[pos + 7..], true);
    }
    if let Some(pos) = line.find("##+js(") {
        return ubo_scriptlet_node(line, &line[..pos], &line[pos + 6..], false);
    }

    // Remaining cosmetic separators, longest first so `##` cannot shadow
    // the others.
    for sep in ["#@$#", "#@#", "#?#", "#$#", "##"] {
        if let Some(pos) = line.find(sep) {
            return RuleNode {
                kind: RuleKind::ElementHiding,
                raw: line.to_string(),
                domains: parse_domains(&line[..pos]),
                body: RuleBody::None,
            };
        }
    }

    RuleNode::bare(RuleKind::Network, line)
}

fn is_comment_line(line: &str) -> bool {
    line.starts_with('!') || line.starts_with('[')
}

fn js_family_node(raw: &str, prefix: &str, body: &str, exception: bool) -> RuleNode {
    let body = body.trim();
    let domains = parse_domains(prefix);

    if let Some(params_src) = body
        .strip_prefix("//scriptlet(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let kind = if exception {
            RuleKind::ScriptletException
        } else {
            RuleKind::ScriptletInjection
        };
        return RuleNode {
            kind,
            raw: raw.to_string(),
            domains,
            body: RuleBody::Scriptlet {
                params: split_params(params_src),
            },
        };
    }

    let kind = if exception {
        RuleKind::JsException
    } else {
        RuleKind::JsInjection
    };
    RuleNode {
        kind,
        raw: raw.to_string(),
        domains,
        body: RuleBody::Js {
            text: body.to_string(),
        },
    }
}

fn ubo_scriptlet_node(raw: &str, prefix: &str, body: &str, exception: bool) -> RuleNode {
    let params_src = body.trim().strip_suffix(')').unwrap_or(body);
    let kind = if exception {
        RuleKind::ScriptletException
    } else {
        RuleKind::ScriptletInjection
    };
    RuleNode {
        kind,
        raw: raw.to_string(),
        domains: parse_domains(prefix),
        body: RuleBody::Scriptlet {
            params: split_params(params_src),
        },
    }
}

/// Parses the comma-separated domain prefix of a cosmetic/injection rule.
/// `~`-prefixed entries are exceptions ("excluded from").
fn parse_domains(prefix: &str) -> Vec<DomainRestriction> {
    prefix
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.strip_prefix('~') {
            Some(value) => DomainRestriction::excluded_from(value.trim().to_ascii_lowercase()),
            None => DomainRestriction::applies_to(part.to_ascii_lowercase()),
        })
        .collect()
}

/// Splits a scriptlet parameter list on top-level commas. Quoted segments
/// (`'` or `"`, with backslash escapes) keep their commas and their quotes;
/// unquoting happens at resolution time.
fn split_params(src: &str) -> Vec<String> {
    let src = src.trim();
    if src.is_empty() {
        return Vec::new();
    }

    let mut params = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in src.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' if quote.is_some() => {
                current.push(ch);
                escaped = true;
            }
            '\'' | '"' => {
                match quote {
                    None => quote = Some(ch),
                    Some(open) if open == ch => quote = None,
                    Some(_) => {}
                }
                current.push(ch);
            }
            ',' if quote.is_none() => {
                params.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    params.push(current.trim().to_string());

    params
}
