//! Built-in scriptlet registry and resolution
//!
//! Scriptlets are named, parameterized micro-scripts resolved by lookup and
//! template substitution rather than embedded verbatim in filter rules. The
//! registry below carries the scriptlet families this pipeline encounters in
//! the AdGuard base filter, each as a template with `{{n}}` positional
//! placeholders. Resolution fills the placeholders with escaped argument
//! values, blanks any left unfilled, and wraps the body in an IIFE.

use std::collections::HashMap;

use log::trace;
use once_cell::sync::Lazy;
use thiserror::Error;

/// Resolution request for one scriptlet invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptletRequest {
    /// Scriptlet name, unquoted (canonical name or alias)
    pub name: String,
    /// Positional arguments, unquoted
    pub args: Vec<String>,
    /// Consumer engine identifier, e.g. "extension"
    pub engine: String,
    /// Scriptlet format version
    pub version: String,
    /// Emit a resolution trace comment into the generated code
    pub verbose: bool,
}

impl ScriptletRequest {
    /// Request with the engine parameters this pipeline always uses.
    pub fn extension(name: String, args: Vec<String>) -> Self {
        Self {
            name,
            args,
            engine: "extension".to_string(),
            version: "1.0".to_string(),
            verbose: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScriptletError {
    #[error("unknown scriptlet '{0}'")]
    UnknownScriptlet(String),
}

struct Scriptlet {
    name: &'static str,
    aliases: &'static [&'static str],
    template: &'static str,
}

/// Highest placeholder index any template uses.
const MAX_PLACEHOLDERS: usize = 4;

static REGISTRY: &[Scriptlet] = &[
    Scriptlet {
        name: "abort-on-property-read",
        aliases: &["aopr", "abort-on-property-read.js"],
        template: r#"var chain = '{{1}}'.split('.');
var owner = window;
var prop = chain.pop();
for (var i = 0; i < chain.length; i++) {
    owner = owner[chain[i]];
    if (owner === undefined || owner === null) { return; }
}
Object.defineProperty(owner, prop, {
    get: function() { throw new ReferenceError('{{1}}'); },
    set: function() {}
});"#,
    },
    Scriptlet {
        name: "abort-on-property-write",
        aliases: &["aopw", "abort-on-property-write.js"],
        template: r#"var chain = '{{1}}'.split('.');
var owner = window;
var prop = chain.pop();
for (var i = 0; i < chain.length; i++) {
    owner = owner[chain[i]];
    if (owner === undefined || owner === null) { return; }
}
Object.defineProperty(owner, prop, {
    set: function() { throw new ReferenceError('{{1}}'); }
});"#,
    },
    Scriptlet {
        name: "set-constant",
        aliases: &["set", "set-constant.js"],
        template: r#"var value;
switch ('{{2}}') {
    case 'true': value = true; break;
    case 'false': value = false; break;
    case 'null': value = null; break;
    case 'undefined': value = undefined; break;
    case 'noopFunc': value = function() {}; break;
    case 'trueFunc': value = function() { return true; }; break;
    case 'falseFunc': value = function() { return false; }; break;
    case 'emptyArr': value = []; break;
    case 'emptyObj': value = {}; break;
    case '': value = ''; break;
    default: value = Number('{{2}}');
}
var chain = '{{1}}'.split('.');
var owner = window;
var prop = chain.pop();
for (var i = 0; i < chain.length; i++) {
    owner = owner[chain[i]];
    if (owner === undefined || owner === null) { return; }
}
Object.defineProperty(owner, prop, {
    get: function() { return value; },
    set: function() {}
});"#,
    },
    Scriptlet {
        name: "prevent-setTimeout",
        aliases: &["no-setTimeout-if", "setTimeout-defuser.js", "nostif"],
        template: r#"var needle = '{{1}}';
var original = window.setTimeout;
window.setTimeout = function(callback, delay) {
    if (needle === '' || String(callback).indexOf(needle) !== -1) {
        return 0;
    }
    return original.apply(window, arguments);
};"#,
    },
    Scriptlet {
        name: "prevent-setInterval",
        aliases: &["no-setInterval-if", "setInterval-defuser.js", "nosiif"],
        template: r#"var needle = '{{1}}';
var original = window.setInterval;
window.setInterval = function(callback, delay) {
    if (needle === '' || String(callback).indexOf(needle) !== -1) {
        return 0;
    }
    return original.apply(window, arguments);
};"#,
    },
    Scriptlet {
        name: "noeval",
        aliases: &["noeval.js", "prevent-eval"],
        template: r#"window.eval = function(s) {
    console.warn('adject: eval blocked: ' + String(s).slice(0, 80));
};"#,
    },
    Scriptlet {
        name: "log",
        aliases: &[],
        template: r#"console.log('{{1}}', '{{2}}', '{{3}}', '{{4}}');"#,
    },
];

static BY_NAME: Lazy<HashMap<&'static str, &'static Scriptlet>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for scriptlet in REGISTRY {
        map.insert(scriptlet.name, scriptlet);
        for alias in scriptlet.aliases {
            map.insert(*alias, scriptlet);
        }
    }
    map
});

/// Resolves a scriptlet request into executable JavaScript.
///
/// Lookup accepts the canonical name or any alias. Resolution is a pure
/// function of the request: identical requests produce identical code.
pub fn invoke(request: &ScriptletRequest) -> Result<String, ScriptletError> {
    let scriptlet = BY_NAME
        .get(request.name.as_str())
        .ok_or_else(|| ScriptletError::UnknownScriptlet(request.name.clone()))?;

    trace!(
        "resolving scriptlet {} ({} args, engine {} v{})",
        scriptlet.name,
        request.args.len(),
        request.engine,
        request.version
    );

    let mut body = scriptlet.template.to_string();
    for slot in 1..=MAX_PLACEHOLDERS {
        let placeholder = format!("{{{{{slot}}}}}");
        let filled = request
            .args
            .get(slot - 1)
            .map(|arg| escape_js_string(arg))
            .unwrap_or_default();
        body = body.replace(&placeholder, &filled);
    }

    let mut code = String::new();
    if request.verbose {
        code.push_str(&format!(
            "/* scriptlet {} (engine {}, v{}) */\n",
            scriptlet.name, request.engine, request.version
        ));
    }
    code.push_str("(function() {\n");
    code.push_str(&body);
    code.push_str("\n})();");
    Ok(code)
}

/// Escapes a value for interpolation inside a single-quoted JS string
/// literal.
fn escape_js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out
}
