use serde::{Deserialize, Serialize};

/// Structured CV as edited on the platform. Every field is optional; lists
/// keep the order the user entered them in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRecord {
    #[serde(rename = "titre")]
    pub title: Option<String>,
    #[serde(rename = "telephone")]
    pub phone: Option<String>,
    #[serde(rename = "ville")]
    pub city: Option<String>,
    #[serde(rename = "pays")]
    pub country: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    #[serde(rename = "siteWeb")]
    pub website: Option<String>,
    /// Free-text profile summary.
    #[serde(rename = "resume")]
    pub summary: Option<String>,

    #[serde(rename = "competences")]
    pub skills: Vec<String>,
    #[serde(rename = "langues")]
    pub languages: Vec<String>,
    pub certifications: Vec<String>,
    #[serde(rename = "centresInteret")]
    pub interests: Vec<String>,

    pub experiences: Vec<Experience>,
    pub formations: Vec<Formation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    #[serde(rename = "poste")]
    pub role: Option<String>,
    #[serde(rename = "entreprise")]
    pub organization: Option<String>,
    #[serde(rename = "ville")]
    pub city: Option<String>,
    #[serde(rename = "dateDebut")]
    pub start_date: Option<String>,
    #[serde(rename = "dateFin")]
    pub end_date: Option<String>,
    #[serde(rename = "enCours")]
    pub ongoing: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Formation {
    #[serde(rename = "diplome")]
    pub diploma: Option<String>,
    #[serde(rename = "etablissement")]
    pub institution: Option<String>,
    #[serde(rename = "ville")]
    pub city: Option<String>,
    #[serde(rename = "dateDebut")]
    pub start_date: Option<String>,
    #[serde(rename = "dateFin")]
    pub end_date: Option<String>,
    #[serde(rename = "enCours")]
    pub ongoing: bool,
    pub description: Option<String>,
}

impl Experience {
    /// End date as displayed: ignored entirely while the position is ongoing.
    pub fn effective_end_date(&self) -> Option<&str> {
        effective_end(self.ongoing, self.end_date.as_deref())
    }
}

impl Formation {
    pub fn effective_end_date(&self) -> Option<&str> {
        effective_end(self.ongoing, self.end_date.as_deref())
    }
}

fn effective_end(ongoing: bool, end_date: Option<&str>) -> Option<&str> {
    if ongoing {
        None
    } else {
        end_date
    }
}

/// Returns the trimmed value when it carries any visible text.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Iterates the non-blank entries of a string list, trimmed, in order.
pub fn non_blank_items(items: &[String]) -> impl Iterator<Item = &str> {
    items.iter().map(|s| s.trim()).filter(|s| !s.is_empty())
}
