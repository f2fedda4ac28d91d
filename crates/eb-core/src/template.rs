//! Minimal `{placeholder}` template rendering.

use std::collections::HashMap;

/// Substitute `{name}` placeholders from `vars`.
///
/// If any placeholder has no value in `vars`, the template is returned
/// unchanged rather than partially filled; an unmatched `{` is treated as
/// literal text.
pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        let name = &rest[open + 1..open + close];
        let Some(value) = vars.get(name) else {
            return template.to_string();
        };
        out.push_str(&rest[..open]);
        out.push_str(value);
        rest = &rest[open + close + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_placeholders() {
        let v = vars(&[("time_of_day", "morning"), ("mood", "quiet")]);
        assert_eq!(
            render("A {mood} square in the {time_of_day} light.", &v),
            "A quiet square in the morning light."
        );
    }

    #[test]
    fn missing_placeholder_returns_template() {
        let v = vars(&[("time_of_day", "morning")]);
        let template = "A {mood} square in the {time_of_day} light.";
        assert_eq!(render(template, &v), template);
    }

    #[test]
    fn no_placeholders_passes_through() {
        assert_eq!(render("Nothing to fill.", &vars(&[])), "Nothing to fill.");
    }

    #[test]
    fn unmatched_brace_is_literal() {
        let v = vars(&[("a", "x")]);
        assert_eq!(render("dangling { brace", &v), "dangling { brace");
    }
}
