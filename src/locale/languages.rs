use std::env;

use super::alias::LocaleAliases;
use super::resolver::{expand_locale, LocaleParts};

/// Environment variables consulted for the message locale, highest
/// priority first. Only `LANGUAGE` may hold a colon-separated list.
pub const LOCALE_ENV_VARS: [&str; 4] = ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"];

/// The user's preferred languages, read through `getenv`.
///
/// Unset and empty variables are skipped. Returns an empty list when none
/// is set.
pub fn user_languages<F>(getenv: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    for name in LOCALE_ENV_VARS {
        let Some(value) = getenv(name).filter(|v| !v.is_empty()) else {
            continue;
        };
        if name == "LANGUAGE" {
            let list: Vec<String> = value
                .split(':')
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect();
            if !list.is_empty() {
                return list;
            }
        } else {
            return vec![value];
        }
    }
    Vec::new()
}

/// [`user_languages`] over the process environment.
pub fn user_languages_from_env() -> Vec<String> {
    user_languages(|name| env::var(name).ok())
}

/// `C` and `POSIX` select untranslated messages.
pub fn is_untranslated_locale(tag: &str) -> bool {
    matches!(LocaleParts::parse(tag).language, "C" | "POSIX")
}

/// Expand each tag into its fallback variants, in order, keeping the first
/// occurrence of duplicates.
///
/// The list stops at the first `C`/`POSIX` entry, since languages after it
/// can never be reached.
pub fn normalize_languages<S: AsRef<str>>(languages: &[S], aliases: &LocaleAliases) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in languages {
        let tag = aliases.resolve(tag.as_ref());
        if is_untranslated_locale(tag) {
            break;
        }
        for variant in expand_locale(tag) {
            if !normalized.contains(&variant) {
                normalized.push(variant);
            }
        }
    }
    normalized
}
