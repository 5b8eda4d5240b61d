//! Language, gender and theme choices made on the home screen

use serde::{Deserialize, Serialize};

/// Languages the API serves questions and translations for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ko,
    #[default]
    En,
    Jp,
    Vn,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::Ko, Language::En, Language::Jp, Language::Vn];

    /// Code sent as the `lang` query parameter
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
            Language::Jp => "jp",
            Language::Vn => "vn",
        }
    }

    /// Name shown in the language selector
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::Ko => "한국어",
            Language::En => "English",
            Language::Jp => "日本語",
            Language::Vn => "Tiếng Việt",
        }
    }

    /// Parse an API code
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ko" => Some(Language::Ko),
            "en" => Some(Language::En),
            "jp" => Some(Language::Jp),
            "vn" => Some(Language::Vn),
            _ => None,
        }
    }

    /// Parse a system locale such as `ko_KR.UTF-8` or `en-US`.
    ///
    /// Only the primary subtag is considered. ISO `ja`/`vi` map onto the
    /// API's `jp`/`vn` codes.
    pub fn from_locale(locale: &str) -> Option<Self> {
        let primary = locale
            .split(|c: char| c == '_' || c == '-' || c == '.')
            .next()?
            .to_ascii_lowercase();
        match primary.as_str() {
            "ja" => Some(Language::Jp),
            "vi" => Some(Language::Vn),
            other => Self::from_code(other),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("unsupported language '{}' (expected ko, en, jp or vn)", s))
    }
}

/// Gender picked on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Translation key of the home-screen button
    pub fn label_key(&self) -> &'static str {
        match self {
            Gender::Male => "home.male_button",
            Gender::Female => "home.female_button",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(format!("unknown gender '{}' (expected male or female)", other)),
        }
    }
}

/// Colour mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Key of the toggle button label, which names the mode it switches to
    pub fn toggle_label_key(&self) -> &'static str {
        match self {
            Theme::Light => "app.dark_mode_button",
            Theme::Dark => "app.light_mode_button",
        }
    }

    /// (background, card, text, heading) colours for exported HTML
    pub fn palette(&self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            Theme::Light => ("#f7fafc", "#ffffff", "#4a5568", "#3182ce"),
            Theme::Dark => ("#1a202c", "#2d3748", "#a0aec0", "#63b3ed"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}' (expected light or dark)", other)),
        }
    }
}
