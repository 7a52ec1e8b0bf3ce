use anyhow::Result;
use fluent_bundle::{FluentBundle, FluentResource};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

/// Languages with a bundled `main.ftl`
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "uk"];

/// Language used when a key or a whole locale is missing
pub const FALLBACK_LANGUAGE: &str = "en";

const EN_RESOURCE: &str = include_str!("../locales/en/main.ftl");
const UK_RESOURCE: &str = include_str!("../locales/uk/main.ftl");

/// Localization manager for the promo bot
///
/// Bundles are only used while resolving [`crate::content::BotContent`] at
/// startup, so the non-`Sync` single-threaded bundle type is fine here.
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a new localization manager with every supported locale loaded
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for lang in SUPPORTED_LANGUAGES {
            let locale: LanguageIdentifier = lang.parse()?;
            let bundle = Self::create_bundle(&locale, Self::resource_for(lang))?;
            bundles.insert(lang.to_string(), bundle);
        }

        Ok(Self { bundles })
    }

    fn resource_for(lang: &str) -> &'static str {
        match lang {
            "uk" => UK_RESOURCE,
            _ => EN_RESOURCE,
        }
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(
        locale: &LanguageIdentifier,
        source: &str,
    ) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new(vec![locale.clone()]);
        // Unicode isolation marks would leak into Telegram captions
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow::anyhow!("invalid {locale} resource: {errors:?}"))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow::anyhow!("duplicate {locale} messages: {errors:?}"))?;

        Ok(bundle)
    }

    /// Get a localized message in a specific language, falling back to English
    pub fn get_message_in_language(&self, key: &str, language: &str) -> String {
        let bundle = match self
            .bundles
            .get(language)
            .filter(|bundle| bundle.has_message(key))
            .or_else(|| self.bundles.get(FALLBACK_LANGUAGE))
        {
            Some(bundle) => bundle,
            None => return format!("Missing translation: {}", key),
        };

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, None, &mut errors);

        if !errors.is_empty() {
            tracing::warn!(key, language, errors = ?errors, "Fluent formatting reported errors");
        }

        value.into_owned()
    }
}

/// Map a Telegram `language_code` (e.g. `uk`, `en-US`) to a supported language
pub fn detect_language(language_code: Option<&str>) -> Option<&'static str> {
    let code = language_code?.split(['-', '_']).next()?.to_ascii_lowercase();
    SUPPORTED_LANGUAGES.iter().copied().find(|lang| *lang == code)
}
