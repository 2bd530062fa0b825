//! Foreign-language bindings over [`TextDomain`] and [`Catalog`].

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::error::MoError;
use crate::mo_catalog::MoCatalog;
use crate::text_domain::TextDomain;
use crate::types::CatalogInfo;

#[derive(Debug, uniffi::Object)]
pub struct TextDomainHandle {
    domain: TextDomain,
}

#[uniffi::export]
impl TextDomainHandle {
    #[uniffi::constructor]
    pub fn new(
        name: String,
        locale_dir: String,
        use_langpacks: bool,
        langpack_dir: Option<String>,
    ) -> Arc<Self> {
        let mut domain = TextDomain::new(name, locale_dir).with_langpacks(use_langpacks);
        if let Some(dir) = langpack_dir {
            domain = domain.with_langpack_dir(dir);
        }
        Arc::new(Self { domain })
    }

    pub fn name(&self) -> String {
        self.domain.name().to_string()
    }

    pub fn locale(&self, languages: Vec<String>) -> Arc<CatalogHandle> {
        Arc::new(CatalogHandle {
            catalog: self.domain.locale(&languages),
        })
    }

    pub fn user_locale(&self) -> Arc<CatalogHandle> {
        Arc::new(CatalogHandle {
            catalog: self.domain.user_locale(),
        })
    }

    pub fn preload(&self, languages: Vec<String>) {
        self.domain.preload(&languages);
    }
}

#[derive(Debug, uniffi::Object)]
pub struct CatalogHandle {
    catalog: Catalog,
}

#[uniffi::export]
impl CatalogHandle {
    pub fn len(&self) -> u32 {
        u32::try_from(self.catalog.len()).unwrap_or(u32::MAX)
    }

    pub fn gettext(&self, msgid: String) -> String {
        self.catalog.gettext(&msgid).into_owned()
    }

    pub fn ngettext(&self, msgid: String, msgid_plural: String, n: u32) -> String {
        self.catalog.ngettext(&msgid, &msgid_plural, n).into_owned()
    }

    pub fn pgettext(&self, context: String, msgid: String) -> String {
        self.catalog.pgettext(&context, &msgid).into_owned()
    }

    pub fn npgettext(&self, context: String, msgid: String, msgid_plural: String, n: u32) -> String {
        self.catalog
            .npgettext(&context, &msgid, &msgid_plural, n)
            .into_owned()
    }
}

/// Parse the catalog at `path` and summarize it.
#[uniffi::export]
pub fn catalog_info(path: String) -> Result<CatalogInfo, MoError> {
    Ok(MoCatalog::open(path)?.info())
}
