use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fnv::FnvHashMap;
use log::{debug, trace, warn};

use crate::catalog::Catalog;
use crate::error::MoError;
use crate::locale::{
    normalize_languages, user_languages, user_languages_from_env, LocaleAliases, LOCALE_ALIAS_FILE,
};
use crate::mo_catalog::MoCatalog;

/// Root of the system-supplied language pack catalogs.
pub const DEFAULT_LANGPACK_DIR: &str = "/usr/share/locale-langpack";

/// Maps `(root, locale, domain)` to the catalog file to load.
pub type PathResolver = Arc<dyn Fn(&Path, &str, &str) -> PathBuf + Send + Sync>;

/// `<root>/<locale>/LC_MESSAGES/<domain>.mo`
pub fn default_resolver(root: &Path, locale: &str, domain: &str) -> PathBuf {
    root.join(locale)
        .join("LC_MESSAGES")
        .join(format!("{}.mo", domain))
}

type CatalogCache = FnvHashMap<PathBuf, Option<Arc<MoCatalog>>>;

/// A named set of translations spread over per-locale catalog files.
///
/// Parsed catalogs are cached by file path for the lifetime of the domain.
/// A path that fails to open or parse is cached as absent and never
/// retried.
pub struct TextDomain {
    name: String,
    locale_dir: PathBuf,
    langpack_dir: PathBuf,
    use_langpacks: bool,
    resolver: PathResolver,
    aliases: LocaleAliases,
    cache: Mutex<CatalogCache>,
}

impl fmt::Debug for TextDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextDomain")
            .field("name", &self.name)
            .field("locale_dir", &self.locale_dir)
            .field("langpack_dir", &self.langpack_dir)
            .field("use_langpacks", &self.use_langpacks)
            .field("aliases", &self.aliases.len())
            .finish_non_exhaustive()
    }
}

impl TextDomain {
    pub fn new(name: impl Into<String>, locale_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            locale_dir: locale_dir.into(),
            langpack_dir: PathBuf::from(DEFAULT_LANGPACK_DIR),
            use_langpacks: false,
            resolver: Arc::new(default_resolver),
            aliases: LocaleAliases::default(),
            cache: Mutex::new(CatalogCache::default()),
        }
    }

    pub fn with_path_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&Path, &str, &str) -> PathBuf + Send + Sync + 'static,
    {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Also search the langpack root, after the domain's own catalogs.
    pub fn with_langpacks(mut self, use_langpacks: bool) -> Self {
        self.use_langpacks = use_langpacks;
        self
    }

    pub fn with_langpack_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.langpack_dir = dir.into();
        self
    }

    pub fn with_locale_aliases(mut self, aliases: LocaleAliases) -> Self {
        self.aliases = aliases;
        self
    }

    /// Load aliases from [`LOCALE_ALIAS_FILE`]. A missing table leaves the
    /// alias set empty; an unreadable one is logged and ignored.
    pub fn with_system_locale_aliases(mut self) -> Self {
        match LocaleAliases::system() {
            Ok(aliases) => self.aliases = aliases,
            Err(e) => warn!("cannot read {}: {}", LOCALE_ALIAS_FILE, e),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locale_dir(&self) -> &Path {
        &self.locale_dir
    }

    pub fn langpack_dir(&self) -> &Path {
        &self.langpack_dir
    }

    pub fn use_langpacks(&self) -> bool {
        self.use_langpacks
    }

    fn lock_cache(&self) -> MutexGuard<'_, CatalogCache> {
        // Entries are inserted whole, so a poisoned map is still consistent.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load the catalog at `path`, or return the cached outcome.
    ///
    /// The lock is not held during I/O; two threads racing on the same
    /// path may both parse it, and the first insert wins.
    fn load(&self, path: &Path) -> Option<Arc<MoCatalog>> {
        if let Some(entry) = self.lock_cache().get(path) {
            trace!("catalog cache hit for {}", path.display());
            return entry.clone();
        }

        let loaded = match MoCatalog::open(path) {
            Ok(catalog) => {
                debug!("loaded catalog {}", path.display());
                Some(Arc::new(catalog))
            }
            Err(MoError::Io(e)) => {
                debug!("no catalog at {}: {}", path.display(), e);
                None
            }
            Err(e) => {
                warn!("ignoring malformed catalog {}: {}", path.display(), e);
                None
            }
        };

        self.lock_cache()
            .entry(path.to_path_buf())
            .or_insert(loaded)
            .clone()
    }

    /// Catalogs for one already-normalized locale: the domain's own, then
    /// the langpack's when enabled.
    fn load_locale(&self, locale: &str) -> Vec<Arc<MoCatalog>> {
        let mut roots = vec![self.locale_dir.as_path()];
        if self.use_langpacks {
            roots.push(self.langpack_dir.as_path());
        }

        roots
            .into_iter()
            .filter_map(|root| self.load(&(self.resolver)(root, locale, &self.name)))
            .collect()
    }

    /// Catalog for `languages`, most preferred first. Each tag is expanded
    /// into its fallback variants.
    pub fn locale<S: AsRef<str>>(&self, languages: &[S]) -> Catalog {
        let catalogs = normalize_languages(languages, &self.aliases)
            .iter()
            .flat_map(|locale| self.load_locale(locale))
            .collect();
        Catalog::new(catalogs)
    }

    /// Catalog for the process environment's language preference.
    pub fn user_locale(&self) -> Catalog {
        self.locale(user_languages_from_env().as_slice())
    }

    /// Catalog for the language preference read through `getenv`.
    pub fn user_locale_with<F>(&self, getenv: F) -> Catalog
    where
        F: Fn(&str) -> Option<String>,
    {
        self.locale(user_languages(getenv).as_slice())
    }

    /// Load the catalogs `locale` would use, so later lookups do no I/O.
    pub fn preload<S: AsRef<str>>(&self, languages: &[S]) {
        for locale in normalize_languages(languages, &self.aliases) {
            self.load_locale(&locale);
        }
    }
}
