//! Locale-aware fake data generation.
//!
//! A [`Faker`] turns dotted data keys (`name.first_name`), expressions with
//! `#{...}` directives, and regex-subset patterns into random strings drawn
//! from per-locale YAML data.
//!
//! ```
//! use fakegen::{Faker, RandomService};
//!
//! let faker = Faker::builder()
//!     .locale("de")
//!     .random(RandomService::seeded(7))
//!     .build()
//!     .unwrap();
//!
//! let name = faker.resolve("name.name").unwrap();
//! assert!(name.contains(' '));
//! let plate = faker.regexify("[A-Z]{2}-[0-9]{4}").unwrap();
//! assert_eq!(plate.len(), 7);
//! ```

pub mod data;
pub mod generators;
pub mod interpreter;
pub mod parser;
mod random;

pub use interpreter::{
    CategoryProvider, DEFAULT_MAX_DEPTH, EnglandFootball, EvalContext, EvalError, Faker,
    LoadError, LocaleChain, Number, Provider, ProviderRef, compute_suggestions,
};
pub use parser::ParseError;
pub use random::RandomService;
