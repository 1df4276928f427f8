//! Generators that turn templates and patterns into random strings.
//!
//! These are plain functions over a caller-supplied [`rand::Rng`]; the
//! [`Faker`](crate::Faker) facade wires them to its
//! [`RandomService`](crate::RandomService).

mod pattern;
mod regex;

pub use pattern::{
    DIGIT_PLACEHOLDER, LETTER_PLACEHOLDER, bothify, examplify, letterify, numerify, templatify,
    templatify_map,
};
pub use regex::{generate, regexify};
