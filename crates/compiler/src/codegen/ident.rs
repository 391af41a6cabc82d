//! Spelling JavaScript names as Rust identifiers.
//!
//! JavaScript identifiers may use `$`, may be Rust keywords, and may collide
//! with the names that generated programs rely on. These are rewritten so that
//! every JavaScript name maps to a distinct valid Rust identifier.

/// Rust's strict and reserved keywords, all of which can be used as raw
/// identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn",
    "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

/// Names that cannot be raw identifiers, or that generated programs already
/// use for their own purposes.
const RESERVED: &[&str] = &[
    "crate",
    "self",
    "Self",
    "super",
    "__global",
    "global",
    "ObjectRecord",
    "ReferenceError",
    "Result",
    "Value",
];

/// Spells the JavaScript `name` as a valid Rust identifier.
///
/// Every `_` is doubled and every `$` becomes `_S`, so underscores in the
/// result always come in escape pairs. Reserved names then take a single
/// trailing `_`, leaving one unpaired, which no escaped name can contain.
///
/// ```
/// use jtr_compiler::codegen::ident::host_ident;
///
/// assert_eq!(host_ident("foo"), "foo");
/// assert_eq!(host_ident("match"), "r#match");
/// assert_eq!(host_ident("$el"), "_Sel");
/// assert_eq!(host_ident("snake_case"), "snake__case");
/// assert_eq!(host_ident("self"), "self_");
/// ```
#[must_use]
pub fn host_ident(name: &str) -> String {
    let mut spelled = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '_' => spelled.push_str("__"),
            '$' => spelled.push_str("_S"),
            c => spelled.push(c),
        }
    }

    if RESERVED.contains(&spelled.as_str()) {
        spelled.push('_');
        spelled
    } else if KEYWORDS.contains(&spelled.as_str()) {
        format!("r#{spelled}")
    } else {
        spelled
    }
}

#[cfg(test)]
mod test {
    use crate::codegen::ident::host_ident;

    #[test]
    fn plain_names_are_unchanged() {
        assert_eq!(host_ident("foo"), "foo");
        assert_eq!(host_ident("camelCase"), "camelCase");
        assert_eq!(host_ident("ünïcode"), "ünïcode");
    }

    #[test]
    fn keywords_become_raw_identifiers() {
        assert_eq!(host_ident("fn"), "r#fn");
        assert_eq!(host_ident("loop"), "r#loop");
        assert_eq!(host_ident("type"), "r#type");
    }

    #[test]
    fn reserved_names_are_suffixed() {
        assert_eq!(host_ident("crate"), "crate_");
        assert_eq!(host_ident("Value"), "Value_");
        assert_eq!(host_ident("_global"), "__global_");
    }

    #[test]
    fn escaped_names_do_not_collide() {
        let names = [
            "a$b", "a_dollar_b", "a_Sb", "a__b", "a_b", "_", "__", "$", "self", "self_", "_global",
            "__global", "console_log", "match", "r", "a",
        ];

        let spelled: std::collections::HashSet<_> = names.iter().map(|n| host_ident(n)).collect();

        assert_eq!(spelled.len(), names.len());
    }

    #[test]
    fn underscores_and_dollars_are_escaped() {
        assert_eq!(host_ident("_"), "__");
        assert_eq!(host_ident("$"), "_S");
        assert_eq!(host_ident("a$b"), "a_Sb");
        assert_eq!(host_ident("a_dollar_b"), "a__dollar__b");
        assert_eq!(host_ident("self_"), "self__");
        assert_eq!(host_ident("console_log"), "console__log");
    }
}
