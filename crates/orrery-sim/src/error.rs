//! Construction errors for celestial bodies.

/// Reasons a body, ring, or star description is rejected at startup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BodyError {
    /// Uniform scale must be strictly positive and finite.
    #[error("body `{name}` has non-positive size {size}")]
    NonPositiveSize {
        /// Body name.
        name: String,
        /// Offending size.
        size: f32,
    },

    /// Orbit radius must be finite and not negative.
    #[error("body `{name}` has invalid orbit radius {radius}")]
    InvalidOrbitRadius {
        /// Body name.
        name: String,
        /// Offending radius.
        radius: f32,
    },

    /// A period of zero (or a non-finite one) has no angular speed.
    #[error("body `{name}` has invalid {kind} period {period}")]
    InvalidPeriod {
        /// Body name.
        name: String,
        /// `"orbital"` or `"rotation"`.
        kind: &'static str,
        /// Offending period.
        period: f64,
    },

    /// A field other than size, radius, or period is NaN or infinite.
    #[error("body `{name}` has non-finite {field}")]
    NonFinite {
        /// Body name.
        name: String,
        /// Field name.
        field: &'static str,
    },

    /// Ring radii must satisfy `0 < inner < outer`.
    #[error("ring of `{name}` has invalid radii {inner}..{outer}")]
    InvalidRing {
        /// Owning planet name.
        name: String,
        /// Inner radius fraction.
        inner: f32,
        /// Outer radius fraction.
        outer: f32,
    },
}
