use serde_json::{Map, Value};

/// Claim names consulted for scopes, in priority order.
pub const WELL_KNOWN_SCOPE_ATTRIBUTE_NAMES: [&str; 2] = ["scope", "scp"];

/// Prefix prepended to every scope to form its granted authority.
pub const SCOPE_AUTHORITY_PREFIX: &str = "SCOPE_";

/// Shape of a scope claim as seen by the extractor.
///
/// Any value that is neither a string nor an all-string array counts as
/// `Absent`, so the next well-known name gets a chance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeClaim<'a> {
    Absent,
    SpaceDelimited(&'a str),
    StringList(Vec<&'a str>),
}

impl<'a> ScopeClaim<'a> {
    pub fn from_value(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::String(text)) => Self::SpaceDelimited(text),
            Some(Value::Array(items)) => items
                .iter()
                .map(Value::as_str)
                .collect::<Option<Vec<_>>>()
                .map_or(Self::Absent, Self::StringList),
            _ => Self::Absent,
        }
    }
}

/// Extract scopes from token claims.
///
/// First well-known name with a usable value wins:
/// - string: split on single spaces (blank string yields nothing)
/// - array of strings: returned as-is
pub fn extract_scopes(claims: &Map<String, Value>) -> Vec<String> {
    for name in WELL_KNOWN_SCOPE_ATTRIBUTE_NAMES {
        match ScopeClaim::from_value(claims.get(name)) {
            ScopeClaim::SpaceDelimited(text) => return split_scopes(text),
            ScopeClaim::StringList(list) => return list.into_iter().map(str::to_owned).collect(),
            ScopeClaim::Absent => {}
        }
    }

    Vec::new()
}

// Leading and interior empty segments survive; trailing ones are dropped.
fn split_scopes(text: &str) -> Vec<String> {
    if text.chars().all(is_blank_char) {
        return Vec::new();
    }

    let mut segments: Vec<&str> = text.split(' ').collect();
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }

    segments.into_iter().map(str::to_owned).collect()
}

// No-break spaces (U+00A0, U+2007, U+202F) and NEL count as text;
// the information separators U+001C..=U+001F count as blank.
fn is_blank_char(c: char) -> bool {
    match c {
        '\u{a0}' | '\u{2007}' | '\u{202f}' | '\u{85}' => false,
        '\u{1c}'..='\u{1f}' => true,
        c => c.is_whitespace(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("claims fixture must be an object"),
        }
    }

    #[test]
    fn splits_space_delimited_scope() {
        let scopes = extract_scopes(&claims(json!({"scope": "a b c"})));
        assert_eq!(scopes, vec!["a", "b", "c"]);
    }

    #[test]
    fn blank_scope_yields_nothing() {
        assert!(extract_scopes(&claims(json!({"scope": ""}))).is_empty());
        assert!(extract_scopes(&claims(json!({"scope": "   "}))).is_empty());
        assert!(extract_scopes(&claims(json!({"scope": "\t\n"}))).is_empty());
    }

    #[test]
    fn blank_scope_does_not_fall_through_to_scp() {
        let scopes = extract_scopes(&claims(json!({"scope": " ", "scp": ["x"]})));
        assert!(scopes.is_empty());
    }

    #[test]
    fn missing_claims_yield_nothing() {
        assert!(extract_scopes(&claims(json!({"sub": "alice"}))).is_empty());
    }

    #[test]
    fn scp_list_is_returned_without_splitting() {
        let scopes = extract_scopes(&claims(json!({"scp": ["x", "y z"]})));
        assert_eq!(scopes, vec!["x", "y z"]);
    }

    #[test]
    fn scope_takes_priority_over_scp() {
        let scopes = extract_scopes(&claims(json!({"scope": "read", "scp": ["write"]})));
        assert_eq!(scopes, vec!["read"]);
    }

    #[test]
    fn unrecognized_shape_falls_through_to_scp() {
        let scopes = extract_scopes(&claims(json!({"scope": 42, "scp": "x y"})));
        assert_eq!(scopes, vec!["x", "y"]);

        let scopes = extract_scopes(&claims(json!({"scope": ["a", 1], "scp": ["b"]})));
        assert_eq!(scopes, vec!["b"]);

        let scopes = extract_scopes(&claims(json!({"scope": null, "scp": true})));
        assert!(scopes.is_empty());
    }

    #[test]
    fn empty_list_is_a_match() {
        let scopes = extract_scopes(&claims(json!({"scope": [], "scp": ["x"]})));
        assert!(scopes.is_empty());
    }

    #[test]
    fn no_break_spaces_are_not_blank() {
        let scopes = extract_scopes(&claims(json!({"scope": "\u{a0}"})));
        assert_eq!(scopes, vec!["\u{a0}"]);

        let scopes = extract_scopes(&claims(json!({"scope": "\u{2007}\u{202f}"})));
        assert_eq!(scopes, vec!["\u{2007}\u{202f}"]);

        let scopes = extract_scopes(&claims(json!({"scope": "\u{85}"})));
        assert_eq!(scopes, vec!["\u{85}"]);
    }

    #[test]
    fn other_unicode_whitespace_is_blank() {
        for blank in ["\u{3000}", "\u{2028}", "\u{1f}\u{1c}", "\u{b}\u{c}\r"] {
            assert!(extract_scopes(&claims(json!({"scope": blank}))).is_empty(), "{blank:?}");
        }
    }

    #[test]
    fn duplicates_are_preserved() {
        let scopes = extract_scopes(&claims(json!({"scope": "a a b"})));
        assert_eq!(scopes, vec!["a", "a", "b"]);

        let scopes = extract_scopes(&claims(json!({"scp": ["x", "x"]})));
        assert_eq!(scopes, vec!["x", "x"]);
    }

    #[test]
    fn empty_segment_policy() {
        // interior and leading empties are kept, trailing ones dropped
        let scopes = extract_scopes(&claims(json!({"scope": "a  b"})));
        assert_eq!(scopes, vec!["a", "", "b"]);

        let scopes = extract_scopes(&claims(json!({"scope": " a"})));
        assert_eq!(scopes, vec!["", "a"]);

        let scopes = extract_scopes(&claims(json!({"scope": "a b  "})));
        assert_eq!(scopes, vec!["a", "b"]);
    }

    #[test]
    fn classifies_claim_shapes() {
        let text = json!("a b");
        let list = json!(["a", "b"]);
        let number = json!(7);

        assert_eq!(ScopeClaim::from_value(None), ScopeClaim::Absent);
        assert_eq!(
            ScopeClaim::from_value(Some(&text)),
            ScopeClaim::SpaceDelimited("a b")
        );
        assert_eq!(
            ScopeClaim::from_value(Some(&list)),
            ScopeClaim::StringList(vec!["a", "b"])
        );
        assert_eq!(ScopeClaim::from_value(Some(&number)), ScopeClaim::Absent);
    }
}
