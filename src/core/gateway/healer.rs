//! Response Healer (C13): a pure, I/O-free repair pass over possibly
//! truncated JSON accumulated from a canceled or upstream-truncated stream
//! (spec §4.13). Grounded in the teacher's `core/streaming` accumulation
//! buffers, which hand this module raw accumulated text instead of owning
//! repair logic themselves.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealingMethod {
    CloseUnclosedString,
    CloseUnclosedBrackets,
    StripTrailingGarbage,
    ParsePartial,
}

#[derive(Debug, Clone)]
pub struct HealResult {
    pub content: String,
    pub healed: bool,
    pub healing_method: Option<HealingMethod>,
    pub original_content: String,
}

/// Attempts to turn `raw` into parseable JSON without performing any I/O.
/// Tries, in order: parse as-is; close an unterminated string; close
/// unbalanced brackets/braces; strip trailing garbage back to the last
/// structurally valid point. Returns the original text unhealed if none
/// succeed.
pub fn heal_json(raw: &str) -> HealResult {
    let original_content = raw.to_string();

    if serde_json::from_str::<serde_json::Value>(raw).is_ok() {
        return HealResult {
            content: original_content.clone(),
            healed: false,
            healing_method: None,
            original_content,
        };
    }

    if let Some(closed) = close_unclosed_string(raw) {
        if serde_json::from_str::<serde_json::Value>(&closed).is_ok() {
            return HealResult {
                content: closed,
                healed: true,
                healing_method: Some(HealingMethod::CloseUnclosedString),
                original_content,
            };
        }
    }

    let bracket_closed = close_unclosed_brackets(raw);
    if serde_json::from_str::<serde_json::Value>(&bracket_closed).is_ok() {
        return HealResult {
            content: bracket_closed,
            healed: true,
            healing_method: Some(HealingMethod::CloseUnclosedBrackets),
            original_content,
        };
    }

    if let Some(healed) = close_unclosed_string(raw).map(|s| close_unclosed_brackets(&s)) {
        if serde_json::from_str::<serde_json::Value>(&healed).is_ok() {
            return HealResult {
                content: healed,
                healed: true,
                healing_method: Some(HealingMethod::CloseUnclosedBrackets),
                original_content,
            };
        }
    }

    if let Some(stripped) = strip_trailing_garbage(raw) {
        return HealResult {
            content: stripped,
            healed: true,
            healing_method: Some(HealingMethod::StripTrailingGarbage),
            original_content,
        };
    }

    HealResult {
        content: original_content.clone(),
        healed: false,
        healing_method: None,
        original_content,
    }
}

/// If `raw` ends mid-string (an odd number of unescaped quotes), appends a
/// closing `"`. Returns `None` if the string count is already even.
fn close_unclosed_string(raw: &str) -> Option<String> {
    let mut in_string = false;
    let mut escaped = false;
    for ch in raw.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            _ => {}
        }
    }
    if in_string {
        let mut healed = raw.to_string();
        healed.push('"');
        Some(healed)
    } else {
        None
    }
}

/// Appends closing `}`/`]` for every unmatched opener, respecting string
/// literals so brackets inside text are not counted.
fn close_unclosed_brackets(raw: &str) -> String {
    let mut stack = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    for ch in raw.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                stack.pop();
            }
            _ => {}
        }
    }
    let mut healed = raw.to_string();
    while let Some(closer) = stack.pop() {
        healed.push(closer);
    }
    healed
}

/// Walks back from the end, trying to parse progressively shorter prefixes
/// trimmed to the last `}`/`]`/`,` boundary, then re-closing brackets.
fn strip_trailing_garbage(raw: &str) -> Option<String> {
    let boundaries: Vec<usize> = raw
        .char_indices()
        .filter(|(_, c)| matches!(c, '}' | ']' | ','))
        .map(|(i, c)| i + c.len_utf8())
        .collect();

    for &end in boundaries.iter().rev() {
        let candidate = &raw[..end];
        let candidate = candidate.trim_end_matches(',');
        let closed = close_unclosed_brackets(candidate);
        if serde_json::from_str::<serde_json::Value>(&closed).is_ok() {
            return Some(closed);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_json_is_not_healed() {
        let result = heal_json(r#"{"a":1}"#);
        assert!(!result.healed);
        assert_eq!(result.content, r#"{"a":1}"#);
    }

    #[test]
    fn closes_unterminated_string() {
        let result = heal_json(r#"{"content":"hello wor"#);
        assert!(result.healed);
        assert_eq!(result.healing_method, Some(HealingMethod::CloseUnclosedBrackets));
        let parsed: serde_json::Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(parsed["content"], "hello wor");
    }

    #[test]
    fn closes_unbalanced_brackets() {
        let result = heal_json(r#"{"a":[1,2,3"#);
        assert!(result.healed);
        let parsed: serde_json::Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(parsed["a"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn strips_trailing_garbage_after_last_complete_element() {
        let result = heal_json(r#"{"a":[1,2,3],"b":tru"#);
        assert!(result.healed);
        let parsed: serde_json::Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(parsed["a"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn unhealable_input_is_returned_as_is() {
        let result = heal_json("not json at all {{{");
        assert!(!result.healed);
        assert_eq!(result.content, result.original_content);
    }
}
