//! Localized placeholder texts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::field::FieldKind;

/// Placeholder language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Tr,
    En,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tr => write!(f, "tr"),
            Self::En => write!(f, "en"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tr" | "tr-tr" | "turkish" => Ok(Self::Tr),
            "en" | "en-us" | "en-gb" | "english" => Ok(Self::En),
            _ => Err(format!("Unknown locale '{}'. Use 'tr' or 'en'.", s)),
        }
    }
}

/// The non-data option texts shown in each field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    pub select_city: &'static str,
    pub select_district: &'static str,
    pub select_neighborhood: &'static str,
    pub district_not_found: &'static str,
    pub neighborhood_not_found: &'static str,
    pub loading: &'static str,
    pub error: &'static str,
}

const TR: Placeholders = Placeholders {
    select_city: "Şehir seçin",
    select_district: "İlçe seçin",
    select_neighborhood: "Mahalle seçin",
    district_not_found: "İlçe bulunamadı",
    neighborhood_not_found: "Mahalle bulunamadı",
    loading: "Yükleniyor...",
    error: "Hata oluştu",
};

const EN: Placeholders = Placeholders {
    select_city: "Select city",
    select_district: "Select district",
    select_neighborhood: "Select neighborhood",
    district_not_found: "No districts found",
    neighborhood_not_found: "No neighborhoods found",
    loading: "Loading...",
    error: "An error occurred",
};

impl Placeholders {
    pub fn for_locale(locale: Locale) -> &'static Placeholders {
        match locale {
            Locale::Tr => &TR,
            Locale::En => &EN,
        }
    }

    pub fn select(&self, kind: FieldKind) -> &'static str {
        match kind {
            FieldKind::Region => self.select_city,
            FieldKind::SubRegion => self.select_district,
            FieldKind::SubSubRegion => self.select_neighborhood,
        }
    }

    pub fn not_found(&self, kind: FieldKind) -> &'static str {
        match kind {
            FieldKind::Region | FieldKind::SubRegion => self.district_not_found,
            FieldKind::SubSubRegion => self.neighborhood_not_found,
        }
    }
}
