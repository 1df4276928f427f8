//! Seedable randomness shared by every generator.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::{Mutex, PoisonError};

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::interpreter::EvalError;

/// A single randomness source with a stateful draw cursor.
///
/// Construct with [`RandomService::new`] for an entropy-seeded source,
/// [`RandomService::seeded`] for a reproducible one, or
/// [`RandomService::from_rng`] to inject any [`RngCore`].
///
/// The source sits behind a mutex, so a service can be shared across threads,
/// but the interleaving of draws between threads is not deterministic.
/// Reproducible output requires a single thread of calls.
///
/// # Example
///
/// ```
/// use fakegen::RandomService;
///
/// let a = RandomService::seeded(7);
/// let b = RandomService::seeded(7);
/// assert_eq!(a.draw(100).unwrap(), b.draw(100).unwrap());
/// ```
pub struct RandomService {
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl RandomService {
    /// Create a service seeded from operating-system entropy.
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_os_rng())
    }

    /// Create a deterministic service from a 64-bit seed.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Wrap an explicitly supplied randomness source.
    pub fn from_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
        }
    }

    /// Run `f` with exclusive access to the underlying source.
    ///
    /// All draws made inside `f` come from one contiguous stretch of the
    /// stream, which keeps multi-character generators deterministic.
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut dyn RngCore) -> T) -> T {
        let mut guard = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut **guard)
    }

    /// Uniform integer in `[0, bound)`.
    pub fn draw(&self, bound: usize) -> Result<usize, EvalError> {
        if bound == 0 {
            return Err(EvalError::invalid_argument("random bound must be positive"));
        }
        Ok(self.with_rng(|rng| rng.random_range(0..bound)))
    }

    /// Uniform integer in `[min, max)`.
    pub fn between(&self, min: i64, max: i64) -> Result<i64, EvalError> {
        if min >= max {
            return Err(EvalError::invalid_argument(format!(
                "empty range {min}..{max}"
            )));
        }
        Ok(self.with_rng(|rng| rng.random_range(min..max)))
    }

    /// Uniformly chosen element of `items`.
    pub fn pick<'a, T>(&self, items: &'a [T]) -> Result<&'a T, EvalError> {
        if items.is_empty() {
            return Err(EvalError::invalid_argument("cannot pick from an empty list"));
        }
        let index = self.draw(items.len())?;
        items
            .get(index)
            .ok_or_else(|| EvalError::invalid_argument("random index out of range"))
    }

    /// `true` with probability `probability`.
    pub fn chance(&self, probability: f64) -> Result<bool, EvalError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(EvalError::invalid_argument(format!(
                "probability {probability} is outside [0, 1]"
            )));
        }
        Ok(self.with_rng(|rng| rng.random_bool(probability)))
    }
}

impl Default for RandomService {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for RandomService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RandomService").finish_non_exhaustive()
    }
}
