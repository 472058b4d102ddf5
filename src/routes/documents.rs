use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    dto::profile_dto::DocumentListResponse,
    error::{Error, Result},
    models::{
        document::{Document, DocumentType},
        user::User,
    },
    routes::client_ip,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/documenten",
    responses(
        (status = 201, description = "Document stored", body = Json<Document>),
        (status = 400, description = "Missing field, bad type or rejected file"),
        (status = 403, description = "Caller is not a provider")
    )
)]
#[axum::debug_handler]
pub async fn upload_document(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut doc_type: Option<DocumentType> = None;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadRequest(format!("Ongeldig formulier: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "type" => {
                let raw = field.text().await?;
                let parsed = raw
                    .trim()
                    .to_uppercase()
                    .parse::<DocumentType>()
                    .map_err(|e| Error::BadRequest(e.to_string()))?;
                doc_type = Some(parsed);
            }
            "file" => {
                let filename = field.file_name().unwrap_or("document").to_string();
                let bytes = field.bytes().await?;
                upload = Some((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let doc_type =
        doc_type.ok_or_else(|| Error::BadRequest("Documenttype is verplicht".to_string()))?;
    let (filename, data) =
        upload.ok_or_else(|| Error::BadRequest("Bestand is verplicht".to_string()))?;

    let document = state
        .document_service
        .upload(&user, doc_type, &filename, &data)
        .await?;
    Ok((StatusCode::CREATED, Json(document)))
}

#[utoipa::path(
    get,
    path = "/api/documenten",
    responses(
        (status = 200, description = "Own documents", body = Json<DocumentListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_documents(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse> {
    let items = state.document_service.list(&user).await?;
    Ok(Json(DocumentListResponse { items }))
}

#[utoipa::path(
    delete,
    path = "/api/documenten/{id}",
    params(
        ("id" = Uuid, Path, description = "Document ID")
    ),
    responses(
        (status = 200, description = "Document removed"),
        (status = 400, description = "Verified documents cannot be removed"),
        (status = 404, description = "Document not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_document(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.document_service.delete(&user, id).await?;
    Ok(Json(json!({ "success": true })))
}

#[utoipa::path(
    post,
    path = "/api/beheer/documenten/{id}/verify",
    params(
        ("id" = Uuid, Path, description = "Document ID")
    ),
    responses(
        (status = 200, description = "Document verified", body = Json<Document>),
        (status = 404, description = "Document not found")
    )
)]
#[axum::debug_handler]
pub async fn verify_document(
    State(state): State<AppState>,
    Extension(admin): Extension<User>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let document = state
        .document_service
        .verify(&admin, id, client_ip(&headers))
        .await?;
    Ok(Json(document))
}
