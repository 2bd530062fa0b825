//! Synthetic `.mo` catalogs for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const GERMANIC: &str = "nplurals=2; plural=n != 1;";
pub const NO_PLURALS: &str = "nplurals=1; plural=0;";
pub const POLISH: &str =
    "nplurals=3; plural=n==1 ? 0 : n%10>=2 && n%10<=4 && (n%100<12 || n%100>14) ? 1 : 2;";

/// Builds a catalog the way `msgfmt` lays it out: header, both descriptor
/// tables, an optional hash table, then nul-terminated strings.
#[derive(Debug, Clone, Default)]
pub struct MoBuilder {
    big_endian: bool,
    hash_table: bool,
    entries: Vec<(Vec<u8>, Vec<u8>)>,
}

impl MoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn big_endian(mut self) -> Self {
        self.big_endian = true;
        self
    }

    pub fn with_hash_table(mut self) -> Self {
        self.hash_table = true;
        self
    }

    /// Metadata block with a UTF-8 charset and the given plural rule.
    pub fn plural_forms(self, rule: &str) -> Self {
        let header = format!(
            "Project-Id-Version: test\nContent-Type: text/plain; charset=UTF-8\nPlural-Forms: {}\n",
            rule
        );
        self.header(&header)
    }

    pub fn header(self, text: &str) -> Self {
        self.raw(b"".to_vec(), text.as_bytes().to_vec())
    }

    pub fn message(self, msgid: &str, msgstr: &str) -> Self {
        self.raw(msgid.as_bytes().to_vec(), msgstr.as_bytes().to_vec())
    }

    pub fn plural(self, msgid: &str, msgid_plural: &str, forms: &[&str]) -> Self {
        self.raw(join_nul(&[msgid, msgid_plural]), join_nul(forms))
    }

    pub fn context(self, context: &str, msgid: &str, msgstr: &str) -> Self {
        self.raw(
            format!("{}\x04{}", context, msgid).into_bytes(),
            msgstr.as_bytes().to_vec(),
        )
    }

    pub fn raw(mut self, original: Vec<u8>, translation: Vec<u8>) -> Self {
        self.entries.push((original, translation));
        self
    }

    fn put(&self, out: &mut Vec<u8>, value: u32) {
        if self.big_endian {
            out.extend_from_slice(&value.to_be_bytes());
        } else {
            out.extend_from_slice(&value.to_le_bytes());
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| lookup_key(&a.0).cmp(lookup_key(&b.0)));

        let n = entries.len() as u32;
        let hash_size = if self.hash_table { n * 2 + 3 } else { 0 };
        let orig_offset = 28u32;
        let trans_offset = orig_offset + 8 * n;
        let hash_offset = trans_offset + 8 * n;
        let mut string_offset = hash_offset + 4 * hash_size;

        let mut out = Vec::new();
        self.put(&mut out, 0x950412de);
        self.put(&mut out, 0);
        self.put(&mut out, n);
        self.put(&mut out, orig_offset);
        self.put(&mut out, trans_offset);
        self.put(&mut out, hash_size);
        self.put(&mut out, hash_offset);

        let mut strings = Vec::new();
        let mut originals = Vec::new();
        let mut translations = Vec::new();
        for (original, _) in &entries {
            originals.push((original.len() as u32, string_offset));
            strings.extend_from_slice(original);
            strings.push(0);
            string_offset += original.len() as u32 + 1;
        }
        for (_, translation) in &entries {
            translations.push((translation.len() as u32, string_offset));
            strings.extend_from_slice(translation);
            strings.push(0);
            string_offset += translation.len() as u32 + 1;
        }

        for (len, offset) in originals.into_iter().chain(translations) {
            self.put(&mut out, len);
            self.put(&mut out, offset);
        }
        for slot in 0..hash_size {
            self.put(&mut out, if slot < n { slot + 1 } else { 0 });
        }
        out.extend_from_slice(&strings);
        out
    }

    pub fn write_to(&self, path: &Path) -> PathBuf {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create catalog directory");
        }
        fs::write(path, self.build()).expect("write catalog");
        path.to_path_buf()
    }
}

fn join_nul(parts: &[&str]) -> Vec<u8> {
    parts.join("\0").into_bytes()
}

fn lookup_key(original: &[u8]) -> &[u8] {
    match original.iter().position(|&b| b == 0) {
        Some(zero) => &original[..zero],
        None => original,
    }
}

/// `<root>/<locale>/LC_MESSAGES/<domain>.mo`
pub fn catalog_path(root: &Path, locale: &str, domain: &str) -> PathBuf {
    root.join(locale)
        .join("LC_MESSAGES")
        .join(format!("{}.mo", domain))
}

pub fn install(root: &Path, locale: &str, domain: &str, builder: &MoBuilder) -> PathBuf {
    builder.write_to(&catalog_path(root, locale, domain))
}

pub fn english() -> MoBuilder {
    MoBuilder::new()
        .plural_forms(GERMANIC)
        .message("mymsgid", "en translation")
        .plural("%d apple", "%d apples", &["%d apple (en)", "%d apples (en)"])
}

pub fn japanese() -> MoBuilder {
    MoBuilder::new()
        .plural_forms(NO_PLURALS)
        .message("mymsgid", "ja translation")
        .plural("%d apple", "%d apples", &["りんご%d個"])
}

pub fn polish() -> MoBuilder {
    MoBuilder::new()
        .plural_forms(POLISH)
        .message("mymsgid", "pl translation")
        .plural("%d file", "%d files", &["%d plik", "%d pliki", "%d plików"])
}

pub fn spanish() -> MoBuilder {
    MoBuilder::new()
        .plural_forms(GERMANIC)
        .context("knot", "bow", "lazo")
        .context("weapon", "bow", "arco")
        .context("weapon", "%d bow", "%d arco\0%d arcos")
}
