//! Locale fallback chains.

use std::fmt::{Display, Formatter, Result as FmtResult};

use icu_locale_core::LanguageIdentifier;
use icu_locale_core::subtags::Variants;
use serde::Serialize;

use crate::interpreter::LoadError;

/// Locale every chain ends with.
pub const ROOT_LOCALE: &str = "en";

/// Locales consulted for a lookup, most specific first.
///
/// The chain is never empty, holds no duplicates and always ends with
/// [`ROOT_LOCALE`].
///
/// ```
/// use fakegen::LocaleChain;
///
/// let chain = LocaleChain::for_locale("de_AT").unwrap();
/// assert_eq!(chain.locales(), ["de-AT", "de", "en"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocaleChain {
    locales: Vec<String>,
}

impl LocaleChain {
    /// Build the chain for `locale`.
    ///
    /// Accepts `-` or `_` as the subtag separator. The chain drops variants,
    /// then the region, then the script, and finally appends the root locale.
    pub fn for_locale(locale: &str) -> Result<Self, LoadError> {
        let normalized = locale.trim().replace('_', "-");
        let mut id = LanguageIdentifier::try_from_str(&normalized).map_err(|e| {
            LoadError::InvalidLocale {
                locale: locale.to_string(),
                message: e.to_string(),
            }
        })?;

        let mut locales = vec![id.to_string()];
        if !id.variants.is_empty() {
            id.variants = Variants::new();
            locales.push(id.to_string());
        }
        if id.region.take().is_some() {
            locales.push(id.to_string());
        }
        if id.script.take().is_some() {
            locales.push(id.to_string());
        }
        locales.push(ROOT_LOCALE.to_string());

        let mut chain: Vec<String> = Vec::with_capacity(locales.len());
        for locale in locales {
            if !chain.contains(&locale) {
                chain.push(locale);
            }
        }
        Ok(Self { locales: chain })
    }

    /// The root-only chain.
    pub fn root() -> Self {
        Self {
            locales: vec![ROOT_LOCALE.to_string()],
        }
    }

    /// Locales in lookup order.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// The most specific locale, as normalized.
    pub fn primary(&self) -> &str {
        self.locales.first().map_or(ROOT_LOCALE, String::as_str)
    }

    /// Iterate locales in lookup order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(String::as_str)
    }
}

impl Display for LocaleChain {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.locales.join(" -> "))
    }
}
