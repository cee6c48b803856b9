// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Input cleaning applied to every text value before it leaves the client.

/// Remove `<script>…</script>` blocks (case-insensitive) and trim surrounding whitespace.
///
/// An unterminated `<script` opening drops everything after it.
pub fn sanitize_text(value: &str) -> String {
    let lower = value.to_ascii_lowercase();
    let mut out = String::with_capacity(value.len());
    let mut cursor = 0;

    while let Some(rel_start) = lower[cursor..].find("<script") {
        let start = cursor + rel_start;
        out.push_str(&value[cursor..start]);
        match lower[start..].find("</script>") {
            Some(rel_end) => cursor = start + rel_end + "</script>".len(),
            None => {
                cursor = value.len();
                break;
            }
        }
    }
    out.push_str(&value[cursor..]);

    out.trim().to_string()
}

/// Split comma-separated input into trimmed, non-empty items.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_blocks_and_trims() {
        assert_eq!(sanitize_text("  Jane Doe "), "Jane Doe");
        assert_eq!(
            sanitize_text("Acme<script>alert(1)</script> Corp"),
            "Acme Corp"
        );
        assert_eq!(
            sanitize_text("a<SCRIPT type=\"x\">b</Script>c<script>d</script>"),
            "ac"
        );
    }

    #[test]
    fn unterminated_script_drops_tail() {
        assert_eq!(sanitize_text("ok <script>never closed"), "ok");
    }

    #[test]
    fn leaves_other_markup_alone() {
        assert_eq!(sanitize_text("<b>bold</b> & co"), "<b>bold</b> & co");
    }

    #[test]
    fn split_list_drops_blanks() {
        assert_eq!(split_list(" rust, ,sql ,"), vec!["rust", "sql"]);
        assert!(split_list("   ").is_empty());
    }
}
