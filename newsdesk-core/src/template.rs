use crate::{NewsdeskError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Named values substituted into agent and task templates at kickoff.
pub type Inputs = HashMap<String, String>;

/// Matches template placeholders like {topic}.
/// Matches {+[^{}]*}+ to handle nested braces
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{+[^{}]*\}+").expect("Invalid regex pattern"))
}

/// Must start with letter or underscore, followed by letters, digits, or underscores
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn replace_match(inputs: &Inputs, match_str: &str) -> Result<String> {
    let var_name = match_str.trim_matches(|c| c == '{' || c == '}').trim();

    if !is_identifier(var_name) {
        return Ok(match_str.to_string());
    }

    inputs.get(var_name).cloned().ok_or_else(|| {
        NewsdeskError::Template(format!("Missing required template variable '{}'", var_name))
    })
}

/// Replaces `{name}` placeholders in `template` with values from `inputs`.
///
/// Values are inserted verbatim. Brace groups that do not hold an identifier
/// (for example JSON snippets) are kept as they are.
///
/// # Examples
///
/// ```
/// use newsdesk_core::{Inputs, interpolate_inputs};
///
/// let inputs = Inputs::from([("topic".to_string(), "AI in healthcare".to_string())]);
/// let text =
///     interpolate_inputs("Uncover groundbreaking technologies in {topic}", &inputs).unwrap();
/// assert_eq!(text, "Uncover groundbreaking technologies in AI in healthcare");
/// ```
///
/// # Errors
///
/// Returns [`NewsdeskError::Template`] if a placeholder names a variable that
/// is not present in `inputs`.
pub fn interpolate_inputs(template: &str, inputs: &Inputs) -> Result<String> {
    let regex = get_placeholder_regex();
    let mut result = String::with_capacity(template.len());
    let mut last_end = 0;

    for found in regex.find_iter(template) {
        let range = found.range();
        result.push_str(&template[last_end..range.start]);
        result.push_str(&replace_match(inputs, found.as_str())?);
        last_end = range.end;
    }

    result.push_str(&template[last_end..]);
    Ok(result)
}
