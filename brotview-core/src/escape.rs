use crate::complex::Complex;
use crate::error::CoreError;

/// Squared bailout radius. An orbit with `|z|² > 4` has escaped.
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Iterate `z ← z² + c` from `z = 0` and return the number of steps taken.
///
/// The magnitude check happens before each step, so the result is always in
/// `[0, max_iterations]`. A point that never escapes returns `max_iterations`.
#[inline]
pub fn iterate(c: Complex, max_iterations: u32) -> u32 {
    let mut z = Complex::ZERO;
    let mut n = 0;
    while z.norm_sq() <= ESCAPE_RADIUS_SQ && n < max_iterations {
        z = z.square() + c;
        n += 1;
    }
    n
}

/// Binary classification of an iterated point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// Did not escape within the iteration bound; assumed to be in the set.
    Interior,
    /// Escaped before the iteration bound.
    Escaped,
}

impl Membership {
    #[inline]
    pub fn from_count(count: u32, max_iterations: u32) -> Self {
        if count >= max_iterations {
            Self::Interior
        } else {
            Self::Escaped
        }
    }
}

/// Parameters controlling the escape-time loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EscapeParams {
    /// Maximum number of iterations before declaring a point interior.
    pub max_iterations: u32,
}

impl EscapeParams {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 200;

    pub fn new(max_iterations: u32) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        Ok(Self { max_iterations })
    }
}

impl Default for EscapeParams {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// The Mandelbrot set: `z_{n+1} = z_n² + c`, starting from `z₀ = 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mandelbrot {
    params: EscapeParams,
}

impl Mandelbrot {
    pub fn new(params: EscapeParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn iterate(&self, c: Complex) -> u32 {
        iterate(c, self.params.max_iterations)
    }

    #[inline]
    pub fn classify(&self, c: Complex) -> Membership {
        Membership::from_count(self.iterate(c), self.params.max_iterations)
    }

    pub fn params(&self) -> &EscapeParams {
        &self.params
    }
}
