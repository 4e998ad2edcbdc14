//! Localized literals used on the generated document.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fr" | "fr-fr" => Ok(Locale::Fr),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{other}' (expected 'fr' or 'en')")),
        }
    }
}

/// Every user-visible literal the layout engine writes.
#[derive(Debug, Clone)]
pub struct Labels {
    pub placeholder_name: String,
    pub contact: String,
    pub skills: String,
    pub languages: String,
    pub certifications: String,
    pub profile: String,
    pub experience: String,
    pub education: String,
    pub interests: String,
    pub present: String,
    pub invalid_date: String,
    pub footer: String,
    pub months: [&'static str; 12],
}

const MONTHS_FR: [&str; 12] = [
    "Janvier", "Février", "Mars", "Avril", "Mai", "Juin", "Juillet", "Août", "Septembre",
    "Octobre", "Novembre", "Décembre",
];

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

impl Labels {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Fr => Labels {
                placeholder_name: "Votre Nom".to_string(),
                contact: "CONTACT".to_string(),
                skills: "COMPÉTENCES".to_string(),
                languages: "LANGUES".to_string(),
                certifications: "CERTIFICATIONS".to_string(),
                profile: "PROFIL".to_string(),
                experience: "EXPÉRIENCE PROFESSIONNELLE".to_string(),
                education: "FORMATION".to_string(),
                interests: "CENTRES D'INTÉRÊT".to_string(),
                present: "Présent".to_string(),
                invalid_date: "Invalid Date".to_string(),
                footer: "CV généré avec Noken".to_string(),
                months: MONTHS_FR,
            },
            Locale::En => Labels {
                placeholder_name: "Your Name".to_string(),
                contact: "CONTACT".to_string(),
                skills: "SKILLS".to_string(),
                languages: "LANGUAGES".to_string(),
                certifications: "CERTIFICATIONS".to_string(),
                profile: "PROFILE".to_string(),
                experience: "PROFESSIONAL EXPERIENCE".to_string(),
                education: "EDUCATION".to_string(),
                interests: "INTERESTS".to_string(),
                present: "Present".to_string(),
                invalid_date: "Invalid Date".to_string(),
                footer: "CV generated with Noken".to_string(),
                months: MONTHS_EN,
            },
        }
    }

    /// Replaces the footer caption, keeping everything else.
    pub fn with_footer(mut self, footer: Option<&str>) -> Self {
        if let Some(text) = footer.map(str::trim).filter(|t| !t.is_empty()) {
            self.footer = text.to_string();
        }
        self
    }
}

impl Default for Labels {
    fn default() -> Self {
        Labels::for_locale(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parsing() {
        assert_eq!("fr".parse::<Locale>(), Ok(Locale::Fr));
        assert_eq!(" EN ".parse::<Locale>(), Ok(Locale::En));
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn test_default_is_french() {
        let labels = Labels::default();
        assert_eq!(labels.placeholder_name, "Votre Nom");
        assert_eq!(labels.present, "Présent");
        assert_eq!(labels.months[0], "Janvier");
    }

    #[test]
    fn test_footer_override_ignores_blank() {
        let labels = Labels::for_locale(Locale::En).with_footer(Some("  "));
        assert_eq!(labels.footer, "CV generated with Noken");
        let labels = labels.with_footer(Some("Made by me"));
        assert_eq!(labels.footer, "Made by me");
    }
}
