//! The [`Faker`] facade: configuration, data sources, providers and every
//! generation entry point.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use bon::bon;
use tracing::{debug, trace};

use crate::data::{self, BUILTIN_SOURCES, DataNode, DataStore};
use crate::generators;
use crate::interpreter::builtins::BuiltinRegistry;
use crate::interpreter::context::DEFAULT_MAX_DEPTH;
use crate::interpreter::providers::{CategoryProvider, EnglandFootball, Number, ProviderRef};
use crate::interpreter::registry::{ProviderCache, ProviderRegistry};
use crate::interpreter::{EvalContext, EvalError, LoadError, LocaleChain, Provider, eval_str};
use crate::random::RandomService;

/// Locale-aware fake data generator.
///
/// A `Faker` owns its locale chain, data store, provider registry, provider
/// instances and random service. Configuration happens through `&mut self`
/// methods; generation only needs `&self`, so a configured faker can be
/// shared across threads.
///
/// # Example
///
/// ```
/// use fakegen::{Faker, RandomService};
///
/// let faker = Faker::builder()
///     .locale("en-GB")
///     .random(RandomService::seeded(42))
///     .build()
///     .unwrap();
///
/// let team = faker.expression("#{EnglandFootball.team}").unwrap();
/// assert!(!team.is_empty());
/// assert_eq!(faker.locale_chain().locales(), ["en-GB", "en"]);
/// ```
pub struct Faker {
    chain: LocaleChain,
    random: RandomService,
    max_depth: usize,
    store: DataStore,
    builtins: BuiltinRegistry,
    registry: ProviderRegistry,
    cache: ProviderCache,
}

#[bon]
impl Faker {
    /// Configure a new faker.
    ///
    /// - `locale`: most specific locale to generate for (default `en`)
    /// - `random`: randomness source (default entropy-seeded)
    /// - `max_depth`: limit on nested directives (default 64)
    /// - `builtin_data`: load the bundled `en`, `en-GB` and `de` data (default `true`)
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidLocale`] for an unparseable locale.
    #[builder]
    pub fn new(
        #[builder(into, default = "en".to_string())] locale: String,
        #[builder(default)] random: RandomService,
        #[builder(default = DEFAULT_MAX_DEPTH)] max_depth: usize,
        #[builder(default = true)] builtin_data: bool,
    ) -> Result<Self, LoadError> {
        let chain = LocaleChain::for_locale(&locale)?;
        let mut faker = Self {
            chain,
            random,
            max_depth,
            store: DataStore::new(),
            builtins: BuiltinRegistry::new(),
            registry: ProviderRegistry::new(),
            cache: ProviderCache::new(),
        };
        faker.register_provider("EnglandFootball", EnglandFootball::default);
        faker.register_provider("Number", Number::default);
        faker.register_category("Name");
        if builtin_data {
            for (locale, text) in BUILTIN_SOURCES {
                let path = format!("<builtin {locale}>");
                faker.add_data_node(locale, data::parse_yaml(text, Path::new(&path))?);
            }
        }
        debug!(chain = %faker.chain, max_depth, "faker configured");
        Ok(faker)
    }
}

impl Faker {
    // =========================================================================
    // Configuration
    // =========================================================================

    /// Merge the YAML data file at `path` into `locale`.
    ///
    /// Sources merge leaf by leaf; the last registered source wins.
    pub fn add_data_source(
        &mut self,
        locale: &str,
        path: impl AsRef<Path>,
    ) -> Result<(), LoadError> {
        let node = data::load_file(path.as_ref())?;
        self.add_data(locale, node)
    }

    /// Merge a YAML data document held in memory into `locale`.
    pub fn add_data_str(&mut self, locale: &str, yaml: &str) -> Result<(), LoadError> {
        let node = data::parse_yaml(yaml, Path::new("<string>"))?;
        self.add_data(locale, node)
    }

    fn add_data(&mut self, locale: &str, node: DataNode) -> Result<(), LoadError> {
        let locale = LocaleChain::for_locale(locale)?;
        self.add_data_node(locale.primary(), node);
        Ok(())
    }

    fn add_data_node(&mut self, locale: &str, node: DataNode) {
        debug!(locale, "merging data source");
        self.store.merge_source(locale, node);
    }

    /// Register a provider type under `name`.
    ///
    /// The instance is created by `factory` on first use and shared by every
    /// later directive and by [`Faker::provider`].
    pub fn register_provider<P, F>(&mut self, name: &str, factory: F)
    where
        P: Provider + 'static,
        F: Fn() -> P + Send + Sync + 'static,
    {
        self.registry.register(
            name,
            Box::new(move |cache: &ProviderCache| -> Arc<dyn Provider> {
                cache.get_or_create(&factory)
            }),
        );
    }

    /// Register `name` as a provider that resolves `<name>.<method>` keys.
    pub fn register_category(&mut self, name: &str) {
        let provider: Arc<dyn Provider> = Arc::new(CategoryProvider::new(name));
        self.registry
            .register(name, Box::new(move |_: &ProviderCache| Arc::clone(&provider)));
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The locale chain lookups walk.
    pub fn locale_chain(&self) -> &LocaleChain {
        &self.chain
    }

    /// The shared random service.
    pub fn random(&self) -> &RandomService {
        &self.random
    }

    /// The configured depth limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The loaded locale data.
    pub fn data(&self) -> &DataStore {
        &self.store
    }

    /// A fresh evaluation context using this faker's depth limit.
    pub fn new_context(&self) -> EvalContext {
        EvalContext::new(self.max_depth)
    }

    /// True if `key` names a value in some locale of the chain.
    pub fn has_key(&self, key: &str) -> bool {
        self.store.lookup(&self.chain, key).is_some()
    }

    pub(crate) fn builtins(&self) -> &BuiltinRegistry {
        &self.builtins
    }

    pub(crate) fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub(crate) fn cache(&self) -> &ProviderCache {
        &self.cache
    }

    // =========================================================================
    // Providers
    // =========================================================================

    /// The memoized instance of provider `P`, created with `P::default()` on
    /// first access unless a directive created it first.
    pub fn provider<P>(&self) -> ProviderRef<'_, P>
    where
        P: Provider + Default + 'static,
    {
        ProviderRef::new(self, self.cache.get_or_create(P::default))
    }

    /// English football leagues and teams.
    pub fn england_football(&self) -> ProviderRef<'_, EnglandFootball> {
        self.provider()
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// Replace every `#` in `template` with a random digit.
    pub fn numerify(&self, template: &str) -> String {
        self.random
            .with_rng(|rng| generators::numerify(template, rng))
    }

    /// Replace every `?` in `template` with a random letter.
    pub fn letterify(&self, template: &str, upper: Option<bool>) -> String {
        self.random
            .with_rng(|rng| generators::letterify(template, upper, rng))
    }

    /// Replace `#` with digits and `?` with letters.
    pub fn bothify(&self, template: &str, upper: Option<bool>) -> String {
        self.random
            .with_rng(|rng| generators::bothify(template, upper, rng))
    }

    /// Generate a string matched by a regex-subset `pattern`.
    pub fn regexify(&self, pattern: &str) -> Result<String, EvalError> {
        self.random
            .with_rng(|rng| generators::regexify(pattern, rng))
    }

    /// Generate a string shaped like `example`.
    pub fn examplify(&self, example: &str) -> String {
        self.random
            .with_rng(|rng| generators::examplify(example, rng))
    }

    /// Replace each `placeholder` in `template` with a random option.
    pub fn templatify<S: AsRef<str>>(
        &self,
        template: &str,
        placeholder: char,
        options: &[S],
    ) -> Result<String, EvalError> {
        self.random
            .with_rng(|rng| generators::templatify(template, placeholder, options, rng))
    }

    /// Replace each placeholder character with a random option of its own.
    pub fn templatify_map<S: AsRef<str>>(
        &self,
        template: &str,
        options_by_char: &HashMap<char, Vec<S>>,
    ) -> Result<String, EvalError> {
        self.random
            .with_rng(|rng| generators::templatify_map(template, options_by_char, rng))
    }

    /// Evaluate an expression containing `#{...}` directives.
    ///
    /// ```
    /// use fakegen::{Faker, RandomService};
    ///
    /// let faker = Faker::builder().random(RandomService::seeded(1)).build().unwrap();
    /// let code = faker.expression("ID-#{numerify '###'}").unwrap();
    /// assert_eq!(code.len(), 6);
    /// ```
    pub fn expression(&self, expression: &str) -> Result<String, EvalError> {
        eval_str(expression, self, &mut self.new_context())
    }

    /// Pick a value for the dotted `key` and evaluate it.
    pub fn resolve(&self, key: &str) -> Result<String, EvalError> {
        self.resolve_in(key, &mut self.new_context())
    }

    /// [`Faker::resolve`] within an existing evaluation context, so nested
    /// resolutions share its depth limit.
    pub fn resolve_in(&self, key: &str, ctx: &mut EvalContext) -> Result<String, EvalError> {
        let key = key.to_lowercase();
        let values = self
            .store
            .lookup(&self.chain, &key)
            .ok_or_else(|| EvalError::KeyNotFound {
                key: key.clone(),
                chain: self.chain.locales().to_vec(),
            })?;
        let picked = self.random.pick(values)?;
        trace!(key = %key, value = %picked, depth = ctx.depth(), "resolved key");
        ctx.enter_category(&key);
        let resolved = eval_str(picked, self, ctx)?;
        ctx.leave_category();
        Ok(resolved)
    }
}
