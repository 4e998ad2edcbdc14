//! The export pipeline: layout, PDF encoding and filename in one call.
//!
//! `generate` is synchronous and CPU-bound. HTTP handlers call it through
//! `tokio::task::spawn_blocking`.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::layout::{layout_resume, LayoutReport, LayoutSettings};
use crate::models::{IdentityRecord, ResumeRecord};
use crate::render::{render_pdf, RenderError};

/// A finished document, ready to be saved or sent.
#[derive(Debug, Clone)]
pub struct DocumentArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub report: LayoutReport,
}

/// Lays out and encodes one CV. Only the PDF encoding can fail; there is no
/// partial output.
pub fn generate(
    resume: &ResumeRecord,
    identity: &IdentityRecord,
    settings: &LayoutSettings,
    today: NaiveDate,
) -> Result<DocumentArtifact, RenderError> {
    let output = layout_resume(resume, identity, settings);
    let report = output.report;

    if report.side_lines_dropped > 0 {
        warn!(
            dropped = report.side_lines_dropped,
            "Side column overflowed page 1; lines dropped"
        );
    }
    if report.main_lines_clipped > 0 {
        warn!(
            clipped = report.main_lines_clipped,
            "Main column lines clipped at the bottom margin"
        );
    }

    let bytes = render_pdf(&output.document)?;
    let filename = suggested_filename(identity, today);

    info!(
        pages = report.page_count,
        bytes = bytes.len(),
        filename = %filename,
        pagination = ?settings.pagination,
        "CV generated"
    );

    Ok(DocumentArtifact {
        bytes,
        filename,
        report,
    })
}

/// `CV_{first}{last}_{YYYY-MM-DD}.pdf`, with whitespace runs collapsed to `_`.
///
/// Missing names leave their slot empty. Path separators and quotes are
/// replaced so the name is safe in a `Content-Disposition` header and on
/// disk.
pub fn suggested_filename(identity: &IdentityRecord, date: NaiveDate) -> String {
    let first = identity.first_name.as_deref().unwrap_or("").trim();
    let last = identity.last_name.as_deref().unwrap_or("").trim();
    let raw = format!("CV_{first}{last}_{}.pdf", date.format("%Y-%m-%d"));

    let mut filename = String::with_capacity(raw.len());
    let mut in_whitespace = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                filename.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        filename.push(match c {
            '/' | '\\' | ':' | '"' => '_',
            c if c.is_control() => '_',
            c => c,
        });
    }
    filename
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PaginationMode;
    use crate::models::Experience;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn identity(first: Option<&str>, last: Option<&str>) -> IdentityRecord {
        IdentityRecord {
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            email: None,
        }
    }

    #[test]
    fn test_filename_pattern() {
        assert_eq!(
            suggested_filename(&identity(Some("Amy"), Some("Diallo")), date()),
            "CV_AmyDiallo_2026-10-18.pdf"
        );
    }

    #[test]
    fn test_filename_collapses_internal_whitespace() {
        let name = suggested_filename(&identity(Some("Jean  Marc"), Some("De La\tCroix")), date());
        assert_eq!(name, "CV_Jean_MarcDe_La_Croix_2026-10-18.pdf");
        assert!(!name.contains(' '));
    }

    #[test]
    fn test_filename_with_missing_names() {
        assert_eq!(
            suggested_filename(&IdentityRecord::default(), date()),
            "CV__2026-10-18.pdf"
        );
        assert_eq!(
            suggested_filename(&identity(Some("Jean"), None), date()),
            "CV_Jean_2026-10-18.pdf"
        );
    }

    #[test]
    fn test_filename_is_deterministic_and_safe() {
        let id = identity(Some("a/b"), Some("c:\"d\""));
        let first = suggested_filename(&id, date());
        assert_eq!(first, suggested_filename(&id, date()));
        assert_eq!(first, "CV_a_bc__d__2026-10-18.pdf");
    }

    #[test]
    fn test_generate_empty_input_yields_one_page_pdf() {
        let artifact = generate(
            &ResumeRecord::default(),
            &IdentityRecord::default(),
            &LayoutSettings::default(),
            date(),
        )
        .unwrap();

        assert!(artifact.bytes.starts_with(b"%PDF"));
        assert_eq!(artifact.report.page_count, 1);
        let doc = lopdf::Document::load_mem(&artifact.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_generate_page_count_matches_pdf() {
        let resume = ResumeRecord {
            experiences: (0..12)
                .map(|i| Experience {
                    role: Some(format!("Role {i}")),
                    description: Some("Led the migration of billing services. ".repeat(12)),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        let settings = LayoutSettings {
            pagination: PaginationMode::Measured,
            ..LayoutSettings::default()
        };
        let artifact = generate(&resume, &identity(Some("Amy"), None), &settings, date()).unwrap();

        assert!(artifact.report.page_count >= 2);
        let doc = lopdf::Document::load_mem(&artifact.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), artifact.report.page_count);
        assert_eq!(artifact.filename, "CV_Amy_2026-10-18.pdf");
    }
}
