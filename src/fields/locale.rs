//! Locale identifiers for the language a build was compiled for.

use std::collections::HashMap;

/// Parse a locale identifier shaped `ll`, `lll`, `ll-RR` or `ll-Script-RR`.
///
/// Case is canonicalized: language lowercase, script titlecase, region uppercase.
/// `_` is accepted as a separator and rewritten to `-`.
pub fn parse_locale(text: &str) -> Option<String> {
    let text = text.trim();
    let mut parts = text.split(['-', '_']);
    let language = parts.next()?;
    if !(2..=3).contains(&language.len()) || !language.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let mut out = language.to_ascii_lowercase();
    let rest: Vec<&str> = parts.collect();
    if rest.len() > 2 {
        return None;
    }
    for (i, part) in rest.iter().enumerate() {
        let is_last = i + 1 == rest.len();
        out.push('-');
        match part.len() {
            4 if !is_last && part.bytes().all(|b| b.is_ascii_alphabetic()) => {
                let (head, tail) = part.split_at(1);
                out.push_str(&head.to_ascii_uppercase());
                out.push_str(&tail.to_ascii_lowercase());
            }
            2 if is_last && part.bytes().all(|b| b.is_ascii_alphabetic()) => {
                out.push_str(&part.to_ascii_uppercase());
            }
            3 if is_last && part.bytes().all(|b| b.is_ascii_digit()) => out.push_str(part),
            _ => return None,
        }
    }
    Some(out)
}

/// Resolve through a fixed table of raw strings to locale identifiers.
///
/// Table values go through [`parse_locale`] so a malformed table entry is also absent.
pub fn locale_from_table(table: &HashMap<String, String>, text: &str) -> Option<String> {
    table.get(text).and_then(|id| parse_locale(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_only() {
        assert_eq!(parse_locale("en").as_deref(), Some("en"));
        assert_eq!(parse_locale("RU").as_deref(), Some("ru"));
    }

    #[test]
    fn language_region_and_script() {
        assert_eq!(parse_locale("en_us").as_deref(), Some("en-US"));
        assert_eq!(parse_locale("zh-hant-tw").as_deref(), Some("zh-Hant-TW"));
        assert_eq!(parse_locale("es-419").as_deref(), Some("es-419"));
    }

    #[test]
    fn rejects_unrecognized() {
        assert_eq!(parse_locale(""), None);
        assert_eq!(parse_locale("english"), None);
        assert_eq!(parse_locale("e1"), None);
        assert_eq!(parse_locale("en-"), None);
        assert_eq!(parse_locale("en-USA-x"), None);
    }

    #[test]
    fn table_lookup() {
        let table = HashMap::from([("0".to_string(), "en".to_string())]);
        assert_eq!(locale_from_table(&table, "0").as_deref(), Some("en"));
        assert_eq!(locale_from_table(&table, "1"), None);
    }
}
