use std::borrow::Cow;
use std::sync::Arc;

use crate::mo_catalog::{germanic_plural, MoCatalog};

/// Separator between a message context and its msgid in catalog keys.
pub const CONTEXT_SEPARATOR: u8 = 0x04;

fn key_with_context(context: &str, msgid: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(context.len() + 1 + msgid.len());
    key.extend_from_slice(context.as_bytes());
    key.push(CONTEXT_SEPARATOR);
    key.extend_from_slice(msgid.as_bytes());
    key
}

/// Translations for one lookup, layered over several parsed catalogs.
///
/// Catalogs are consulted in order and the first hit wins. Every query is
/// total: a miss returns the msgid, or for plural queries picks between
/// msgid and msgid_plural by the Germanic rule. An empty catalog list
/// translates nothing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    catalogs: Vec<Arc<MoCatalog>>,
}

impl Catalog {
    pub fn new(catalogs: Vec<Arc<MoCatalog>>) -> Self {
        Self { catalogs }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    pub fn catalogs(&self) -> &[Arc<MoCatalog>] {
        &self.catalogs
    }

    /// Raw translation of `key` from the first catalog that has it.
    pub fn find_message(&self, key: &[u8], n: Option<u32>) -> Option<&[u8]> {
        self.catalogs.iter().find_map(|mo| mo.find_message(key, n))
    }

    fn singular<'a>(&'a self, key: &[u8], msgid: &'a str) -> Cow<'a, str> {
        match self.find_message(key, None) {
            Some(msgstr) => String::from_utf8_lossy(msgstr),
            None => Cow::Borrowed(msgid),
        }
    }

    fn plural<'a>(&'a self, key: &[u8], msgid: &'a str, msgid_plural: &'a str, n: u32) -> Cow<'a, str> {
        match self.find_message(key, Some(n)) {
            Some(msgstr) => String::from_utf8_lossy(msgstr),
            None if germanic_plural(n) == 0 => Cow::Borrowed(msgid),
            None => Cow::Borrowed(msgid_plural),
        }
    }

    pub fn gettext<'a>(&'a self, msgid: &'a str) -> Cow<'a, str> {
        self.singular(msgid.as_bytes(), msgid)
    }

    pub fn ngettext<'a>(&'a self, msgid: &'a str, msgid_plural: &'a str, n: u32) -> Cow<'a, str> {
        self.plural(msgid.as_bytes(), msgid, msgid_plural, n)
    }

    pub fn pgettext<'a>(&'a self, context: &str, msgid: &'a str) -> Cow<'a, str> {
        self.singular(&key_with_context(context, msgid), msgid)
    }

    pub fn npgettext<'a>(
        &'a self,
        context: &str,
        msgid: &'a str,
        msgid_plural: &'a str,
        n: u32,
    ) -> Cow<'a, str> {
        self.plural(&key_with_context(context, msgid), msgid, msgid_plural, n)
    }
}
