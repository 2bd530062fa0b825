use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use fnv::FnvHashMap;

/// Conventional location of the system alias table.
pub const LOCALE_ALIAS_FILE: &str = "/usr/share/locale/locale.alias";

/// Locale alias table in the `locale.alias` format: one `alias target`
/// pair per line, `#` starting a comment line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleAliases {
    entries: FnvHashMap<String, String>,
}

impl LocaleAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    /// Like [`LocaleAliases::load`], but a missing file is an empty table.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        match Self::load(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            loaded => loaded,
        }
    }

    /// The table at [`LOCALE_ALIAS_FILE`], empty when the system has none.
    pub fn system() -> io::Result<Self> {
        Self::load_or_empty(LOCALE_ALIAS_FILE)
    }

    /// Lines with fewer than two fields are ignored.
    pub fn parse<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut entries = FnvHashMap::default();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            if let (Some(alias), Some(target)) = (fields.next(), fields.next()) {
                entries.insert(alias.to_string(), target.to_string());
            }
        }
        Ok(Self { entries })
    }

    pub fn insert(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        self.entries.insert(alias.into(), target.into());
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries.get(alias).map(String::as_str)
    }

    /// The alias target for `tag`, or `tag` itself.
    pub fn resolve<'a>(&'a self, tag: &'a str) -> &'a str {
        self.get(tag).unwrap_or(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
