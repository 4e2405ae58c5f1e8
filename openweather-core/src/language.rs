use serde::{Serialize, Serializer};
use std::{convert::TryFrom, fmt, str::FromStr};

use crate::error::WeatherError;

/// Languages accepted by the `lang` query parameter.
///
/// Variants are named after the upstream code, so `PtBr` is `pt_br`.
/// A few codes are aliases upstream (`sv`/`se`, `sp`/`es`, `ua`/`uk`)
/// and are kept distinct here because the code is sent verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Afrikaans
    Af,
    /// Albanian
    Al,
    /// Arabic
    Ar,
    /// Azerbaijani
    Az,
    /// Bulgarian
    Bg,
    /// Catalan
    Ca,
    /// Czech
    Cz,
    /// Danish
    Da,
    /// German
    De,
    /// Greek
    El,
    /// English
    En,
    /// Basque
    Eu,
    /// Persian (Farsi)
    Fa,
    /// Finnish
    Fi,
    /// French
    Fr,
    /// Galician
    Gl,
    /// Hebrew
    He,
    /// Hindi
    Hi,
    /// Croatian
    Hr,
    /// Hungarian
    Hu,
    /// Indonesian
    Id,
    /// Italian
    It,
    /// Japanese
    Ja,
    /// Korean
    Kr,
    /// Latvian
    La,
    /// Lithuanian
    Lt,
    /// Macedonian
    Mk,
    /// Norwegian
    No,
    /// Dutch
    Nl,
    /// Polish
    Pl,
    /// Portuguese
    Pt,
    /// Português Brasil
    PtBr,
    /// Romanian
    Ro,
    /// Russian
    Ru,
    /// Swedish
    Sv,
    /// Swedish
    Se,
    /// Slovak
    Sk,
    /// Slovenian
    Sl,
    /// Spanish
    Sp,
    /// Spanish
    Es,
    /// Serbian
    Sr,
    /// Thai
    Th,
    /// Turkish
    Tr,
    /// Ukrainian
    Ua,
    /// Ukrainian
    Uk,
    /// Vietnamese
    Vi,
    /// Chinese Simplified
    ZhCn,
    /// Chinese Traditional
    ZhTw,
    /// Zulu
    Zu,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Af => "af",
            Language::Al => "al",
            Language::Ar => "ar",
            Language::Az => "az",
            Language::Bg => "bg",
            Language::Ca => "ca",
            Language::Cz => "cz",
            Language::Da => "da",
            Language::De => "de",
            Language::El => "el",
            Language::En => "en",
            Language::Eu => "eu",
            Language::Fa => "fa",
            Language::Fi => "fi",
            Language::Fr => "fr",
            Language::Gl => "gl",
            Language::He => "he",
            Language::Hi => "hi",
            Language::Hr => "hr",
            Language::Hu => "hu",
            Language::Id => "id",
            Language::It => "it",
            Language::Ja => "ja",
            Language::Kr => "kr",
            Language::La => "la",
            Language::Lt => "lt",
            Language::Mk => "mk",
            Language::No => "no",
            Language::Nl => "nl",
            Language::Pl => "pl",
            Language::Pt => "pt",
            Language::PtBr => "pt_br",
            Language::Ro => "ro",
            Language::Ru => "ru",
            Language::Sv => "sv",
            Language::Se => "se",
            Language::Sk => "sk",
            Language::Sl => "sl",
            Language::Sp => "sp",
            Language::Es => "es",
            Language::Sr => "sr",
            Language::Th => "th",
            Language::Tr => "tr",
            Language::Ua => "ua",
            Language::Uk => "uk",
            Language::Vi => "vi",
            Language::ZhCn => "zh_cn",
            Language::ZhTw => "zh_tw",
            Language::Zu => "zu",
        }
    }

    pub const fn all() -> &'static [Language] {
        &[
            Language::Af,
            Language::Al,
            Language::Ar,
            Language::Az,
            Language::Bg,
            Language::Ca,
            Language::Cz,
            Language::Da,
            Language::De,
            Language::El,
            Language::En,
            Language::Eu,
            Language::Fa,
            Language::Fi,
            Language::Fr,
            Language::Gl,
            Language::He,
            Language::Hi,
            Language::Hr,
            Language::Hu,
            Language::Id,
            Language::It,
            Language::Ja,
            Language::Kr,
            Language::La,
            Language::Lt,
            Language::Mk,
            Language::No,
            Language::Nl,
            Language::Pl,
            Language::Pt,
            Language::PtBr,
            Language::Ro,
            Language::Ru,
            Language::Sv,
            Language::Se,
            Language::Sk,
            Language::Sl,
            Language::Sp,
            Language::Es,
            Language::Sr,
            Language::Th,
            Language::Tr,
            Language::Ua,
            Language::Uk,
            Language::Vi,
            Language::ZhCn,
            Language::ZhTw,
            Language::Zu,
        ]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Language {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        Language::all()
            .iter()
            .copied()
            .find(|lang| lang.as_str() == lower)
            .ok_or_else(|| WeatherError::UnsupportedLanguage(value.to_string()))
    }
}

impl FromStr for Language {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::try_from(s)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supports_forty_nine_languages() {
        assert_eq!(Language::all().len(), 49);
    }

    #[test]
    fn language_as_str_roundtrip() {
        for lang in Language::all() {
            let parsed = Language::try_from(lang.as_str()).expect("roundtrip should succeed");
            assert_eq!(*lang, parsed);
        }
    }

    #[test]
    fn parsing_is_case_insensitive() {
        for lang in Language::all() {
            let upper = lang.as_str().to_uppercase();
            let parsed: Language = upper.parse().expect("uppercase code should parse");
            assert_eq!(parsed.as_str(), lang.as_str());
        }
        assert_eq!(Language::try_from("Pt_BR").unwrap(), Language::PtBr);
    }

    #[test]
    fn unsupported_language_error() {
        for bad in ["", "xx", "english", "pt-br", "zh"] {
            let err = Language::try_from(bad).unwrap_err();
            assert!(matches!(err, WeatherError::UnsupportedLanguage(ref s) if s == bad));
        }
    }
}
