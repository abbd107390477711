//! Turns free-form recognition output into [`FoodItem`]s.
//!
//! Vision models are asked for JSON but do not always comply. The reader
//! tries, in order:
//!
//! 1. the whole reply as JSON (after stripping a Markdown code fence),
//! 2. the span from the first `{` to the last `}`,
//! 3. the same two candidates with trailing commas removed,
//! 4. a line-oriented `Food: ... / Weight: ...` reader.
//!
//! A JSON object is only accepted when it has a `foods` array; otherwise the
//! text reader runs. Parsing never fails, the worst case is an empty list.

use serde_json::{Map, Value};
use tracing::debug;

use crate::models::{FoodItem, DEFAULT_CONFIDENCE, DEFAULT_METHOD, DEFAULT_WEIGHT_GRAMS};

const NAME_MARKERS: &[&str] = &["Food:", "食物:", "食物："];
const WEIGHT_MARKERS: &[&str] = &["Weight:", "重量:", "重量："];
const NAME_KEYS: &[&str] = &["en_name", "name"];
const WEIGHT_KEYS: &[&str] = &["estimated_weight_grams", "weight_grams", "weight"];

pub fn parse(raw: &str) -> Vec<FoodItem> {
    let text = raw.trim();
    if text.is_empty() {
        return Vec::new();
    }

    if let Some(items) = parse_json(text) {
        return items;
    }

    let items = parse_text(text);
    debug!(count = items.len(), "Parsed recognition output as text");
    items
}

fn parse_json(text: &str) -> Option<Vec<FoodItem>> {
    let body = strip_code_fence(text);
    let value = json_candidates(body).find_map(|candidate| {
        serde_json::from_str::<Value>(candidate)
            .or_else(|_| serde_json::from_str::<Value>(&strip_trailing_commas(candidate)))
            .ok()
    })?;

    let foods = value.as_object()?.get("foods")?.as_array()?;
    Some(
        foods
            .iter()
            .filter_map(Value::as_object)
            .map(food_from_object)
            .collect(),
    )
}

fn json_candidates(body: &str) -> impl Iterator<Item = &str> {
    let span = match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if start < end => Some(&body[start..=end]),
        _ => None,
    };
    std::iter::once(body).chain(span)
}

/// Remove a surrounding ```` ```json ... ``` ```` fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening line
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Drop commas that directly precede `}` or `]`, outside of string literals.
fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut pending_comma: Option<usize> = None;

    for ch in text.chars() {
        if in_string {
            out.push(ch);
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
            '}' | ']' => {
                if let Some(pos) = pending_comma.take() {
                    out.remove(pos);
                }
                out.push(ch);
            }
            ',' => {
                pending_comma = Some(out.len());
                out.push(ch);
            }
            c if c.is_whitespace() => out.push(c),
            c => {
                pending_comma = None;
                if c == '"' {
                    in_string = true;
                }
                out.push(c);
            }
        }
    }
    out
}

fn food_from_object(obj: &Map<String, Value>) -> FoodItem {
    let name = NAME_KEYS
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .unwrap_or_default();

    let weight = WEIGHT_KEYS
        .iter()
        .find_map(|key| obj.get(*key))
        .and_then(weight_from_value)
        .unwrap_or(DEFAULT_WEIGHT_GRAMS);

    let confidence = obj
        .get("confidence")
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .unwrap_or(DEFAULT_CONFIDENCE);

    let method = obj
        .get("method")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_METHOD);

    FoodItem::new(name, weight, confidence, method)
}

fn weight_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => weight_from_str(s),
        _ => None,
    }
}

/// "150.5" -> 150.5, "about 0.25 kg" -> 250, falling back to [`digits`].
fn weight_from_str(s: &str) -> Option<f64> {
    let s = s.trim();
    if let Ok(weight) = s.parse::<f64>() {
        return Some(weight);
    }
    leading_number(s).or_else(|| digits(s))
}

/// First decimal number in `s`, converted from kilograms when followed by `kg`.
fn leading_number(s: &str) -> Option<f64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let rest = &s[start..];
    let mut seen_dot = false;
    let end = rest
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' && !seen_dot {
                seen_dot = true;
                false
            } else {
                !c.is_ascii_digit()
            }
        })
        .map_or(rest.len(), |(idx, _)| idx);

    let value: f64 = rest[..end].trim_end_matches('.').parse().ok()?;
    let unit = rest[end..].trim_start().to_ascii_lowercase();
    if unit.starts_with("kg") {
        Some(value * 1000.0)
    } else {
        Some(value)
    }
}

/// The ASCII digits of `s` read as one number ("about 150g" -> 150).
fn digits(s: &str) -> Option<f64> {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn after_last_colon(line: &str) -> &str {
    line.rfind(|c: char| c == ':' || c == '：')
        .map(|idx| {
            let colon_len = line[idx..].chars().next().map_or(1, char::len_utf8);
            &line[idx + colon_len..]
        })
        .unwrap_or(line)
        .trim()
}

fn parse_text(text: &str) -> Vec<FoodItem> {
    let mut foods = Vec::new();
    let mut current: Option<FoodItem> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if NAME_MARKERS.iter().any(|m| line.contains(m)) {
            foods.extend(current.take());
            current = Some(FoodItem::named(after_last_colon(line), DEFAULT_WEIGHT_GRAMS));
        } else if WEIGHT_MARKERS.iter().any(|m| line.contains(m)) {
            let Some(food) = current.as_mut() else {
                continue;
            };
            if let Some(weight) = digits(after_last_colon(line)).filter(|w| *w > 0.0) {
                food.weight_grams = weight;
            }
        }
    }

    foods.extend(current);
    foods
}
