use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{
    audit_log::AuditAction,
    document::{Document, DocumentType, NewDocument},
    notification::NotificationType,
    user::{Role, User},
};
use crate::services::{audit_service::AuditService, notification_service::NotificationService};
use crate::store::Store;

pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;
const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn Store>,
    notifications: NotificationService,
    audit: AuditService,
    uploads_dir: PathBuf,
}

/// Checks name and leading bytes; returns the normalised extension.
pub fn check_upload(filename: &str, data: &[u8]) -> Result<String> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(Error::BadRequest(format!(
            "Bestandstype .{} is niet toegestaan (pdf, jpg of png)",
            ext
        )));
    }
    if data.is_empty() {
        return Err(Error::BadRequest("Bestand is leeg".into()));
    }
    if data.len() > MAX_DOCUMENT_BYTES {
        return Err(Error::BadRequest("Bestand is groter dan 10 MB".into()));
    }

    let content_matches = match ext.as_str() {
        "pdf" => data.starts_with(b"%PDF"),
        "jpg" | "jpeg" => data.starts_with(&[0xFF, 0xD8]),
        "png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47]),
        _ => false,
    };
    if !content_matches {
        return Err(Error::BadRequest(format!(
            "Inhoud komt niet overeen met bestandstype .{}",
            ext
        )));
    }
    Ok(ext)
}

impl DocumentService {
    pub fn new(
        store: Arc<dyn Store>,
        notifications: NotificationService,
        audit: AuditService,
        uploads_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            notifications,
            audit,
            uploads_dir: uploads_dir.into(),
        }
    }

    pub async fn upload(
        &self,
        user: &User,
        doc_type: DocumentType,
        filename: &str,
        data: &[u8],
    ) -> Result<Document> {
        if user.role != Role::Zorgverlener {
            return Err(Error::Forbidden(
                "Alleen zorgverleners kunnen documenten uploaden".into(),
            ));
        }
        let ext = check_upload(filename, data)?;

        let relative = format!("documents/{}/{}.{}", user.id, Uuid::new_v4(), ext);
        let full_path = self.uploads_dir.join(&relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&full_path, data).await.map_err(|e| {
            tracing::error!(path = %full_path.display(), error = %e, "failed to write document");
            Error::Internal(format!("Failed to save file: {}", e))
        })?;

        let display_name = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(filename)
            .to_string();
        let document = self
            .store
            .insert_document(NewDocument {
                user_id: user.id,
                doc_type,
                name: display_name,
                storage_path: relative,
            })
            .await?;

        tracing::info!(document_id = %document.id, user_id = %user.id, doc_type = %doc_type, "document uploaded");
        Ok(document)
    }

    pub async fn list(&self, user: &User) -> Result<Vec<Document>> {
        self.store.list_documents(user.id).await
    }

    pub async fn delete(&self, user: &User, id: Uuid) -> Result<()> {
        let document = match self.store.get_document(id).await? {
            Some(document) if document.user_id == user.id => document,
            _ => return Err(Error::NotFound("Document niet gevonden".into())),
        };
        if document.verified || !self.store.delete_unverified_document(id).await? {
            return Err(Error::BadRequest(
                "Geverifieerde documenten kunnen niet worden verwijderd".into(),
            ));
        }

        let full_path = self.uploads_dir.join(&document.storage_path);
        if let Err(e) = fs::remove_file(&full_path).await {
            tracing::warn!(path = %full_path.display(), error = %e, "document file already gone");
        }
        Ok(())
    }

    pub async fn verify(&self, admin: &User, id: Uuid, ip: Option<String>) -> Result<Document> {
        if self.store.get_document(id).await?.is_none() {
            return Err(Error::NotFound("Document niet gevonden".into()));
        }
        let document = self.store.mark_document_verified(id).await?;

        self.notifications
            .notify(
                document.user_id,
                NotificationType::DocumentGoedgekeurd,
                "Document goedgekeurd",
                format!("Uw document '{}' is geverifieerd.", document.name),
                Some(serde_json::json!({ "document_id": document.id })),
            )
            .await;
        self.audit
            .log(
                Some(admin.id),
                AuditAction::DocumentGoedgekeurd,
                format!("Document {} ({}) geverifieerd", document.id, document.doc_type),
                ip,
            )
            .await;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_content() {
        assert_eq!(check_upload("vog.PDF", b"%PDF-1.7 ...").unwrap(), "pdf");
        assert_eq!(check_upload("pas.jpeg", &[0xFF, 0xD8, 0xFF, 0xE0]).unwrap(), "jpeg");
        assert_eq!(
            check_upload("kvk.png", &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]).unwrap(),
            "png"
        );
    }

    #[test]
    fn rejects_disallowed_or_spoofed_files() {
        assert!(check_upload("script.exe", b"MZ").is_err());
        assert!(check_upload("noext", b"%PDF").is_err());
        assert!(check_upload("fake.pdf", b"<html>").is_err());
        assert!(check_upload("empty.pdf", b"").is_err());
    }
}
