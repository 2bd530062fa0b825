//! Locale tag normalization and the user's language preference list,
//! following glibc's locale matching rules.

pub mod alias;
pub mod languages;
pub mod resolver;

pub use alias::{LocaleAliases, LOCALE_ALIAS_FILE};
pub use languages::{
    is_untranslated_locale, normalize_languages, user_languages, user_languages_from_env,
    LOCALE_ENV_VARS,
};
pub use resolver::{expand_locale, normalize_codeset, LocaleParts};
