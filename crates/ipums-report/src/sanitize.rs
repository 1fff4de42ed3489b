use std::borrow::Cow;

/// Escape label text for tab-delimited bulk loading.
///
/// Backslashes are doubled and literal tabs become `\t`. The escaping is not
/// idempotent: run it exactly once per label.
pub fn sanitize_label(text: &str) -> Cow<'_, str> {
    if !text.contains(['\\', '\t']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
