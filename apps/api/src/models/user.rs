use serde::{Deserialize, Serialize};

use crate::models::resume::non_blank;

/// The few account fields the CV header needs. Never mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentityRecord {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl IdentityRecord {
    /// "First Last", or `None` when neither part is present.
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [non_blank(&self.first_name), non_blank(&self.last_name)]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// Upper-cased first letter of each name part. Missing parts contribute nothing.
    pub fn initials(&self) -> String {
        [non_blank(&self.first_name), non_blank(&self.last_name)]
            .into_iter()
            .flatten()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(first: Option<&str>, last: Option<&str>) -> IdentityRecord {
        IdentityRecord {
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            email: None,
        }
    }

    #[test]
    fn test_initials_from_both_names() {
        assert_eq!(identity(Some("Amy"), Some("Diallo")).initials(), "AD");
    }

    #[test]
    fn test_initials_degrade_to_empty() {
        assert_eq!(identity(None, None).initials(), "");
        assert_eq!(identity(Some("jean"), None).initials(), "J");
        assert_eq!(identity(Some("  "), Some("ba")).initials(), "B");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(identity(None, None).display_name(), None);
        assert_eq!(
            identity(Some("Jean"), None).display_name().as_deref(),
            Some("Jean")
        );
        assert_eq!(
            identity(Some(" Amy "), Some("Diallo")).display_name().as_deref(),
            Some("Amy Diallo")
        );
    }

    #[test]
    fn test_camel_case_json() {
        let id: IdentityRecord =
            serde_json::from_str(r#"{"firstName":"Amy","lastName":"Diallo"}"#).unwrap();
        assert_eq!(id.first_name.as_deref(), Some("Amy"));
        assert!(id.email.is_none());
    }
}
