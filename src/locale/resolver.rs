use std::sync::OnceLock;

use regex::Regex;

/// A locale tag split into `language[_territory][.codeset][@modifier]`.
/// Each optional part keeps its leading separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleParts<'a> {
    pub language: &'a str,
    pub territory: &'a str,
    pub codeset: &'a str,
    pub modifier: &'a str,
}

fn locale_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<language>[^_.@]*)(?P<territory>_[^.@]*)?(?P<codeset>\.[^@]*)?(?P<modifier>@.*)?$")
            .expect("locale pattern is valid")
    })
}

impl<'a> LocaleParts<'a> {
    pub fn parse(tag: &'a str) -> Self {
        // Every part is optional, so the pattern matches any input.
        match locale_regex().captures(tag) {
            Some(caps) => {
                let part = |name: &str| caps.name(name).map_or("", |m| m.as_str());
                LocaleParts {
                    language: part("language"),
                    territory: part("territory"),
                    codeset: part("codeset"),
                    modifier: part("modifier"),
                }
            }
            None => LocaleParts {
                language: tag,
                territory: "",
                codeset: "",
                modifier: "",
            },
        }
    }
}

/// Canonical spelling of a codeset suffix, following glibc: keep only
/// alphanumerics, lowercased, and prefix all-digit names with `iso`.
///
/// `.UTF-8` becomes `.utf8`; `.ISO-8859-1`, `.8859-1` and `.88591` all
/// become `.iso88591`.
pub fn normalize_codeset(codeset: &str) -> String {
    let body: String = codeset
        .trim_start_matches('.')
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if !body.is_empty() && body.chars().all(|c| c.is_ascii_digit()) {
        format!(".iso{}", body)
    } else {
        format!(".{}", body)
    }
}

/// Progressively less specific variants of `tag`, most specific first.
///
/// Variants carrying the modifier come before those without it; within
/// each group the territory is dropped after the codeset variants are
/// exhausted.
pub fn expand_locale(tag: &str) -> Vec<String> {
    let parts = LocaleParts::parse(tag);

    let normalized = if parts.codeset.is_empty() {
        String::new()
    } else {
        normalize_codeset(parts.codeset)
    };

    // Absent parts are empty strings, so their duplicates fold away below.
    let codesets = [parts.codeset, normalized.as_str(), ""];

    let mut variants: Vec<String> = Vec::new();
    for modifier in [parts.modifier, ""] {
        for territory in [parts.territory, ""] {
            for codeset in codesets {
                let variant = format!("{}{}{}{}", parts.language, territory, codeset, modifier);
                if !variants.contains(&variant) {
                    variants.push(variant);
                }
            }
        }
    }
    variants
}
