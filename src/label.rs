use std::fmt;

/// How block labels are produced: a template over `{l}`/`{v}`/`{f}` tokens
/// or a caller-supplied function of (label, raw value, formatted value).
#[derive(Clone)]
pub enum LabelFormat {
    Template(String),
    Formatter(fn(&str, f32, Option<&str>) -> String),
}

impl LabelFormat {
    /// Formats one block's display text. A formatted value supplied through
    /// the row is used verbatim; otherwise the grouped form of the raw value
    /// stands in for `{f}`.
    pub fn format(&self, label: &str, value: f32, formatted: Option<&str>) -> String {
        match self {
            LabelFormat::Formatter(custom) => custom(label, value, formatted),
            LabelFormat::Template(expression) => {
                let fallback;
                let formatted = match formatted {
                    Some(text) => text,
                    None => {
                        fallback = group_thousands(value);
                        &fallback
                    }
                };
                apply_template(expression, label, value, formatted)
            }
        }
    }
}

impl Default for LabelFormat {
    fn default() -> Self {
        LabelFormat::Template("{l}: {f}".to_string())
    }
}

impl fmt::Debug for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelFormat::Template(expression) => {
                f.debug_tuple("Template").field(expression).finish()
            }
            LabelFormat::Formatter(_) => f.write_str("Formatter(..)"),
        }
    }
}

// Single pass over the template, so token-like text inside a substituted
// label or value is never expanded again.
fn apply_template(expression: &str, label: &str, value: f32, formatted: &str) -> String {
    let mut out = String::with_capacity(expression.len() + label.len() + formatted.len());
    let mut rest = expression;
    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match tail.get(..3) {
            Some("{l}") => {
                out.push_str(label);
                rest = &tail[3..];
            }
            Some("{v}") => {
                out.push_str(&display_number(value));
                rest = &tail[3..];
            }
            Some("{f}") => {
                out.push_str(formatted);
                rest = &tail[3..];
            }
            _ => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Minimal decimal form of a value, no trailing `.0`.
pub fn display_number(value: f32) -> String {
    format!("{value}")
}

/// Grouped form of a value: thousands separated by commas, fractional part
/// rounded to at most three digits.
pub fn group_thousands(value: f32) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let text = display_number(rounded);
    let (number, fraction) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };

    let mut grouped = String::with_capacity(text.len() + digits.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac_part) = fraction {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_groups_the_value() {
        let format = LabelFormat::default();
        assert_eq!(format.format("A", 1234.0, None), "A: 1,234");
    }

    #[test]
    fn supplied_formatted_value_is_used_verbatim() {
        let format = LabelFormat::default();
        assert_eq!(format.format("Interviews", 2500.0, Some("2.5k")), "Interviews: 2.5k");
    }

    #[test]
    fn tokens_may_repeat() {
        let format = LabelFormat::Template("{v} {l} {v}".to_string());
        assert_eq!(format.format("x", 7.0, None), "7 x 7");
    }

    #[test]
    fn label_containing_a_token_is_not_re_expanded() {
        let format = LabelFormat::Template("{l}: {f}".to_string());
        assert_eq!(format.format("{v} stage", 10.0, None), "{v} stage: 10");
    }

    #[test]
    fn unknown_braces_pass_through() {
        let format = LabelFormat::Template("{x} {l}".to_string());
        assert_eq!(format.format("A", 1.0, None), "{x} A");
    }

    #[test]
    fn custom_formatter_receives_all_arguments() {
        fn custom(label: &str, value: f32, formatted: Option<&str>) -> String {
            format!("{label}/{value}/{}", formatted.unwrap_or("none"))
        }
        let format = LabelFormat::Formatter(custom);
        assert_eq!(format.format("A", 2.0, None), "A/2/none");
        assert_eq!(format.format("A", 2.0, Some("two")), "A/2/two");
    }

    #[test]
    fn grouping_handles_small_large_and_fractional_values() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(1234.5), "1,234.5");
        assert_eq!(group_thousands(-1234567.0), "-1,234,567");
    }

    #[test]
    fn raw_value_display_is_minimal() {
        assert_eq!(display_number(1234.0), "1234");
        assert_eq!(display_number(12.5), "12.5");
    }
}
