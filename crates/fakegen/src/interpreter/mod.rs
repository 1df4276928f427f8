//! Expression interpreter: evaluation of `#{...}` directives, key resolution
//! through the locale chain, providers, and the [`Faker`] facade tying them
//! together.

mod builtins;
mod context;
mod error;
mod evaluator;
mod faker;
mod locale;
mod providers;
mod registry;

pub use builtins::{BuiltinFn, BuiltinRegistry};
pub use context::{DEFAULT_MAX_DEPTH, EvalContext};
pub use error::{EvalError, LoadError, compute_suggestions};
pub use evaluator::{eval_directive, eval_str, eval_template};
pub use faker::Faker;
pub use locale::{LocaleChain, ROOT_LOCALE};
pub use providers::{
    CategoryProvider, EnglandFootball, Number, Provider, ProviderRef, method_key,
};
pub use registry::{ProviderCache, ProviderFactory, ProviderRegistry, normalize_name};
