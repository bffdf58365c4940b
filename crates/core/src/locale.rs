use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AppError;

/// Content locales edited side by side in the CMS.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Locale {
    /// English, left-to-right.
    #[default]
    #[serde(rename = "en", alias = "EN")]
    En,
    /// Arabic, right-to-left.
    #[serde(rename = "ar", alias = "AR")]
    Ar,
}

impl Locale {
    /// Every supported locale, English first.
    pub const ALL: [Self; 2] = [Self::En, Self::Ar];

    /// Returns the stable lowercase code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// Returns the other locale of the pair.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::En => Self::Ar,
            Self::Ar => Self::En,
        }
    }
}

impl Display for Locale {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            _ => Err(AppError::Validation(format!("unknown locale '{value}'"))),
        }
    }
}

/// A value held once per locale.
///
/// Bilingual fields, labels and help texts all share this shape; a
/// non-bilingual value is simply the bare `T`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalizedValue<T> {
    /// English value.
    pub en: T,
    /// Arabic value.
    pub ar: T,
}

impl<T> LocalizedValue<T> {
    /// Creates a pair from both locale values.
    pub fn new(en: T, ar: T) -> Self {
        Self { en, ar }
    }

    /// Returns the value for one locale.
    #[must_use]
    pub fn get(&self, locale: Locale) -> &T {
        match locale {
            Locale::En => &self.en,
            Locale::Ar => &self.ar,
        }
    }

    /// Returns a mutable reference to the value for one locale.
    pub fn get_mut(&mut self, locale: Locale) -> &mut T {
        match locale {
            Locale::En => &mut self.en,
            Locale::Ar => &mut self.ar,
        }
    }

    /// Replaces the value for one locale and leaves the other untouched.
    pub fn set(&mut self, locale: Locale, value: T) {
        *self.get_mut(locale) = value;
    }

    /// Maps both values.
    pub fn map<U>(self, mut transform: impl FnMut(T) -> U) -> LocalizedValue<U> {
        LocalizedValue {
            en: transform(self.en),
            ar: transform(self.ar),
        }
    }
}

impl<T: Clone> LocalizedValue<T> {
    /// Creates a pair holding the same value in both locales.
    pub fn uniform(value: T) -> Self {
        Self {
            en: value.clone(),
            ar: value,
        }
    }
}

/// Bilingual display text.
pub type LocalizedText = LocalizedValue<String>;

impl LocalizedText {
    /// Returns whether both locales are blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.en.is_empty() && self.ar.is_empty()
    }
}

impl From<&str> for LocalizedText {
    fn from(value: &str) -> Self {
        Self::uniform(value.to_owned())
    }
}

impl From<String> for LocalizedText {
    fn from(value: String) -> Self {
        Self::uniform(value)
    }
}
