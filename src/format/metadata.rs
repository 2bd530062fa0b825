use fnv::FnvHashMap;

use crate::error::Result;
use crate::plural::{self, Expression};

/// Header entry of a catalog: the translation of the empty msgid.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    /// Keys are lowercased; continuation lines are joined with `\n`.
    pub entries: FnvHashMap<String, String>,
    pub charset: Option<String>,
    pub plural_forms: Option<String>,
    pub nplurals: Option<u32>,
    pub plural: Option<Expression>,
}

impl Metadata {
    /// Parse `key: value` lines. A line without a colon continues the
    /// previous key's value.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries: FnvHashMap<String, String> = FnvHashMap::default();
        let mut last_key: Option<String> = None;

        for line in text.lines() {
            let item = line.trim();
            if item.is_empty() {
                continue;
            }
            match item.split_once(':') {
                Some((key, value)) => {
                    let key = key.trim().to_ascii_lowercase();
                    entries.insert(key.clone(), value.trim().to_string());
                    last_key = Some(key);
                }
                None => {
                    if let Some(value) = last_key.as_ref().and_then(|k| entries.get_mut(k)) {
                        value.push('\n');
                        value.push_str(item);
                    }
                }
            }
        }

        let charset = entries.get("content-type").and_then(|v| content_type_charset(v));

        let plural_forms = entries.get("plural-forms").cloned();
        let mut nplurals = None;
        let mut plural = None;
        if let Some(forms) = &plural_forms {
            for part in forms.split(';') {
                let part = part.trim();
                if let Some(count) = part.strip_prefix("nplurals=") {
                    nplurals = count.trim().parse::<u32>().ok();
                } else if let Some(source) = part.strip_prefix("plural=") {
                    plural = Some(plural::compile(source)?);
                }
            }
        }

        Ok(Metadata {
            entries,
            charset,
            plural_forms,
            nplurals,
            plural,
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&key.to_ascii_lowercase()).map(String::as_str)
    }
}

fn content_type_charset(value: &str) -> Option<String> {
    let (_, rest) = value.split_once("charset=")?;
    let charset = rest
        .split(|c: char| c == ';' || c.is_whitespace())
        .next()
        .unwrap_or_default()
        .trim_matches('"');
    (!charset.is_empty()).then(|| charset.to_string())
}
