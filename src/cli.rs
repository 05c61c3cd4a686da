//! Command-line argument tokenizer.
//!
//! Splits a flat list of argument strings into positional arguments and
//! `--key value` options. A bare `--` separator forces every later token to be
//! positional, even tokens that themselves start with `--`.

use anyhow::bail;
use std::collections::HashMap;

/// Value(s) attached to one option key.
///
/// Repeated occurrences of the same `--key` accumulate into `Many`,
/// ordered most-recently-seen-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Single(String),
    Many(Vec<String>),
}

/// Result of tokenizing the command line: ordered positional arguments plus
/// an option map.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    pub positionals: Vec<String>,
    pub options: HashMap<String, OptionValue>,
}

/// Tokenizes command-line arguments into positionals and options.
///
/// Classification rules, applied left to right:
/// 1. The first bare `--` sets separator mode and is itself discarded.
/// 2. Before the separator, a `--key` token opens an option key.
/// 3. Before the separator, a non-`--` token becomes the pending key's value
///    if one is open, otherwise a positional. Consecutive values keep
///    attaching to the same key until another `--key` or the separator.
/// 4. After the separator, every token is positional.
///
/// # Errors
/// - If a token cannot be classified under the rules above
pub fn parse_args<I>(tokens: I) -> Result<ParsedArgs, anyhow::Error>
where
    I: IntoIterator<Item = String>,
{
    let mut positionals = Vec::new();
    let mut options: HashMap<String, OptionValue> = HashMap::new();

    let mut separator_seen = false;
    let mut current_key: Option<String> = None;

    for token in tokens {
        if !separator_seen && token == "--" {
            separator_seen = true;
            // The separator ends the pending key's eligibility for values
            current_key = None;
        } else if !separator_seen && token.starts_with("--") {
            current_key = Some(token[2..].to_string());
        } else if !separator_seen && !token.starts_with("--") {
            if let Some(key) = &current_key {
                attach_value(&mut options, key, token);
            } else {
                positionals.push(token);
            }
        } else if separator_seen {
            positionals.push(token);
        } else {
            bail!("Cannot parse argument: {token}");
        }
    }

    Ok(ParsedArgs {
        positionals,
        options,
    })
}

/// Attaches a value to an option key, accumulating repeats most-recent-first.
fn attach_value(options: &mut HashMap<String, OptionValue>, key: &str, value: String) {
    match options.remove(key) {
        None => {
            options.insert(key.to_string(), OptionValue::Single(value));
        }
        Some(OptionValue::Single(previous)) => {
            options.insert(key.to_string(), OptionValue::Many(vec![value, previous]));
        }
        Some(OptionValue::Many(mut values)) => {
            values.insert(0, value);
            options.insert(key.to_string(), OptionValue::Many(values));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> ParsedArgs {
        parse_args(tokens.iter().map(|t| t.to_string())).unwrap()
    }

    #[test]
    fn test_positionals_only() {
        let parsed = args(&["a.wav", "64"]);
        assert_eq!(parsed.positionals, vec!["a.wav", "64"]);
        assert!(parsed.options.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let parsed = args(&[]);
        assert!(parsed.positionals.is_empty());
        assert!(parsed.options.is_empty());
    }

    #[test]
    fn test_option_with_value() {
        let parsed = args(&["--n", "4"]);
        assert!(parsed.positionals.is_empty());
        assert_eq!(
            parsed.options.get("n"),
            Some(&OptionValue::Single("4".to_string()))
        );
    }

    #[test]
    fn test_separator_forces_positional() {
        let parsed = args(&["--n", "4", "--", "--literal"]);
        assert_eq!(parsed.positionals, vec!["--literal"]);
        assert_eq!(
            parsed.options.get("n"),
            Some(&OptionValue::Single("4".to_string()))
        );
    }

    #[test]
    fn test_repeated_key_accumulates_most_recent_first() {
        let parsed = args(&["--tag", "x", "--tag", "y"]);
        assert_eq!(
            parsed.options.get("tag"),
            Some(&OptionValue::Many(vec!["y".to_string(), "x".to_string()]))
        );
    }

    #[test]
    fn test_consecutive_values_attach_to_same_key() {
        let parsed = args(&["--tag", "x", "y", "z"]);
        assert!(parsed.positionals.is_empty());
        assert_eq!(
            parsed.options.get("tag"),
            Some(&OptionValue::Many(vec![
                "z".to_string(),
                "y".to_string(),
                "x".to_string()
            ]))
        );
    }

    #[test]
    fn test_separator_ends_pending_key() {
        let parsed = args(&["--n", "--", "5"]);
        assert_eq!(parsed.positionals, vec!["5"]);
        assert!(parsed.options.is_empty());
    }

    #[test]
    fn test_positionals_and_options_mixed() {
        let parsed = args(&["a.wav", "--depth", "3", "--", "--raw", "b.wav"]);
        assert_eq!(parsed.positionals, vec!["a.wav", "--raw", "b.wav"]);
        assert_eq!(
            parsed.options.get("depth"),
            Some(&OptionValue::Single("3".to_string()))
        );
    }

    #[test]
    fn test_single_dash_token_is_positional() {
        let parsed = args(&["-x"]);
        assert_eq!(parsed.positionals, vec!["-x"]);
    }
}
