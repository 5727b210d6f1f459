//! Cycling select options for the content form.
//!
//! Both selects start unset; cycling an unset field picks the first option,
//! and once an option is chosen cycling wraps without returning to unset.
//! This mirrors a form select whose placeholder cannot be re-selected, which
//! is what keeps the "required field empty" validation path reachable.

/// Target platform for the generated post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Twitter,
    LinkedIn,
    Instagram,
    Facebook,
}

impl Platform {
    /// Returns all platforms in display order.
    #[must_use]
    pub fn all() -> &'static [Platform] {
        &[
            Platform::Twitter,
            Platform::LinkedIn,
            Platform::Instagram,
            Platform::Facebook,
        ]
    }

    /// Cycles to the next platform, wrapping around.
    #[must_use]
    pub fn next(&self) -> Self {
        match self {
            Self::Twitter => Self::LinkedIn,
            Self::LinkedIn => Self::Instagram,
            Self::Instagram => Self::Facebook,
            Self::Facebook => Self::Twitter,
        }
    }

    /// Returns the wire/display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Twitter => "Twitter",
            Self::LinkedIn => "LinkedIn",
            Self::Instagram => "Instagram",
            Self::Facebook => "Facebook",
        }
    }
}

/// Tone of voice for the generated post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Professional,
    Casual,
    Humorous,
    Inspirational,
}

impl Tone {
    /// Returns all tones in display order.
    #[must_use]
    pub fn all() -> &'static [Tone] {
        &[
            Tone::Professional,
            Tone::Casual,
            Tone::Humorous,
            Tone::Inspirational,
        ]
    }

    /// Cycles to the next tone, wrapping around.
    #[must_use]
    pub fn next(&self) -> Self {
        match self {
            Self::Professional => Self::Casual,
            Self::Casual => Self::Humorous,
            Self::Humorous => Self::Inspirational,
            Self::Inspirational => Self::Professional,
        }
    }

    /// Returns the wire/display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Professional => "Professional",
            Self::Casual => "Casual",
            Self::Humorous => "Humorous",
            Self::Inspirational => "Inspirational",
        }
    }
}

/// Advances an optional select: unset picks the first option, otherwise the
/// cycle wraps without returning to unset.
#[must_use]
pub fn cycle_platform(current: Option<Platform>) -> Option<Platform> {
    Some(current.map_or(Platform::Twitter, |p| p.next()))
}

/// See [`cycle_platform`].
#[must_use]
pub fn cycle_tone(current: Option<Tone>) -> Option<Tone> {
    Some(current.map_or(Tone::Professional, |t| t.next()))
}
