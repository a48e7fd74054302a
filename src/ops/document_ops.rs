use std::path::Path;

use chrono::NaiveDate;

use crate::error::NgoError;
use crate::models::{Document, Project};

use super::new_id;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Best-effort type from the file extension.
pub fn guess_mime_type(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("md") => "text/markdown",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("zip") => "application/zip",
        _ => FALLBACK_MIME,
    }
}

/// Record a document uploaded on `uploaded`; the date is stored as `YYYY-MM-DD`.
pub fn attach_document(
    project: &Project,
    name: &str,
    mime_type: Option<&str>,
    uploaded: NaiveDate,
) -> Result<(Project, Document), NgoError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NgoError::validation("Document name is required"));
    }
    let mime_type = mime_type
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| guess_mime_type(name));

    let doc = Document {
        id: new_id(),
        name: name.to_string(),
        mime_type: mime_type.to_string(),
        upload_date: uploaded.format("%Y-%m-%d").to_string(),
    };
    let mut next = project.clone();
    next.documents.push(doc.clone());
    Ok((next, doc))
}

pub fn delete_document(project: &Project, doc_id: &str) -> Result<(Project, Document), NgoError> {
    let doc = project
        .documents
        .iter()
        .find(|d| d.id == doc_id)
        .cloned()
        .ok_or_else(|| NgoError::document_not_found(doc_id))?;
    let mut next = project.clone();
    next.documents.retain(|d| d.id != doc_id);
    Ok((next, doc))
}
