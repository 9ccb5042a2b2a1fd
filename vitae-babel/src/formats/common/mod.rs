//! Helpers shared by the output formats

/// Split a link into the target URL and the text shown for it.
///
/// `prefix` completes bare handles (`octocat` → `github.com/octocat`).
pub(crate) fn link_parts(value: &str, prefix: &str) -> (String, String) {
    let shown = value
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    let shown = if shown.starts_with(prefix) {
        shown.to_string()
    } else {
        format!("{prefix}{shown}")
    };
    let url = if value.starts_with("http://") || value.starts_with("https://") {
        value.to_string()
    } else {
        format!("https://{shown}")
    };
    (url, shown)
}


/// Fill `{{name}}` placeholders of a template in one pass.
///
/// Inserted values are never rescanned, so a value that itself contains a placeholder
/// is emitted as written. Unknown placeholders are kept verbatim.
pub(crate) fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after.find("}}").and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, end + 2))
        });
        match value {
            Some((value, consumed)) => {
                output.push_str(value);
                rest = &after[consumed..];
            }
            None => {
                output.push_str("{{");
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}
