use actix_multipart::Multipart;
use actix_web::http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType};
use actix_web::{HttpRequest, HttpResponse, web};
use futures_util::TryStreamExt;
use uuid::Uuid;

use crate::api::success::Success;
use crate::api::{error, success};
use crate::middlewares::get_claims;
use crate::modules::credits::service::CreditsService;
use crate::modules::file::model::{FileResponse, IncomingFile, UploadFilesResponse};
use crate::modules::file::service::FileService;

/// Drain the multipart stream into memory, keeping the parts named `files`.
async fn collect_files(payload: &mut Multipart) -> Result<Vec<IncomingFile>, error::Error> {
    let mut files = Vec::new();

    while let Some(mut field) = payload.try_next().await.map_err(|_| error::Error::InternalServer)?
    {
        if field.name() != Some("files") {
            continue;
        }

        let content_disposition = field
            .content_disposition()
            .ok_or_else(|| error::Error::bad_request("Missing content disposition"))?;

        let declared_name = content_disposition
            .get_filename()
            .ok_or_else(|| error::Error::bad_request("Missing filename"))?
            .to_string();

        // Trust the part's MIME type, guess from the name when absent
        let content_type = field.content_type().map(|m| m.to_string()).unwrap_or_else(|| {
            mime_guess::from_path(&declared_name).first_or_octet_stream().to_string()
        });

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(|_| error::Error::InternalServer)? {
            bytes.extend_from_slice(&chunk);
        }

        files.push(IncomingFile { declared_name, content_type, bytes });
    }

    if files.is_empty() {
        return Err(error::Error::bad_request("No file found in request"));
    }

    Ok(files)
}

/// Upload handler: stores the batch, then reports the remaining balance.
pub async fn upload_files<F, C>(
    mut payload: Multipart,
    req: HttpRequest,
    file_service: web::Data<FileService<F, C>>,
    credits_service: web::Data<CreditsService<C>>,
) -> Result<success::Success<UploadFilesResponse>, error::Error>
where
    F: crate::modules::file::repository::FileRepository + Send + Sync + 'static,
    C: crate::modules::credits::repository::CreditsRepository + Send + Sync + 'static,
{
    let subject = get_claims(&req)?.sub;
    let files = collect_files(&mut payload).await?;

    let stored = file_service.upload_files(&subject, files).await?;
    let account = credits_service.get_user_credits(&subject).await?;

    Ok(Success::ok(UploadFilesResponse { files: stored, remaining_credits: account.credits }))
}

/// Own-file listing handler
pub async fn get_my_files<F, C>(
    req: HttpRequest,
    file_service: web::Data<FileService<F, C>>,
) -> Result<success::Success<Vec<FileResponse>>, error::Error>
where
    F: crate::modules::file::repository::FileRepository + Send + Sync + 'static,
    C: crate::modules::credits::repository::CreditsRepository + Send + Sync + 'static,
{
    let subject = get_claims(&req)?.sub;
    let files = file_service.get_files(&subject).await?;
    Ok(Success::ok(files))
}

/// Public metadata handler; absent and private files look identical.
pub async fn get_public_file<F, C>(
    file_id: web::Path<Uuid>,
    file_service: web::Data<FileService<F, C>>,
) -> Result<success::Success<FileResponse>, error::Error>
where
    F: crate::modules::file::repository::FileRepository + Send + Sync + 'static,
    C: crate::modules::credits::repository::CreditsRepository + Send + Sync + 'static,
{
    let file = file_service.get_public_file(&file_id.into_inner()).await?;
    Ok(Success::ok(file))
}

/// Download handler: raw bytes as an attachment under the declared name.
pub async fn download_file<F, C>(
    file_id: web::Path<Uuid>,
    file_service: web::Data<FileService<F, C>>,
) -> Result<HttpResponse, error::Error>
where
    F: crate::modules::file::repository::FileRepository + Send + Sync + 'static,
    C: crate::modules::credits::repository::CreditsRepository + Send + Sync + 'static,
{
    let file = file_service.get_downloadable_file(&file_id.into_inner()).await?;
    let content = file_service.load_content(&file).await?;

    Ok(HttpResponse::Ok()
        .insert_header(ContentType::octet_stream())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file.name)],
        })
        .body(content))
}

/// Delete handler; only the owner may remove a file.
pub async fn delete_file<F, C>(
    file_id: web::Path<Uuid>,
    req: HttpRequest,
    file_service: web::Data<FileService<F, C>>,
) -> Result<success::Success<()>, error::Error>
where
    F: crate::modules::file::repository::FileRepository + Send + Sync + 'static,
    C: crate::modules::credits::repository::CreditsRepository + Send + Sync + 'static,
{
    let subject = get_claims(&req)?.sub;
    file_service.delete_file(&file_id.into_inner(), &subject).await?;
    Ok(Success::no_content())
}

/// Visibility toggle handler
pub async fn toggle_public<F, C>(
    file_id: web::Path<Uuid>,
    file_service: web::Data<FileService<F, C>>,
) -> Result<success::Success<FileResponse>, error::Error>
where
    F: crate::modules::file::repository::FileRepository + Send + Sync + 'static,
    C: crate::modules::credits::repository::CreditsRepository + Send + Sync + 'static,
{
    let file = file_service.toggle_public(&file_id.into_inner()).await?;
    Ok(Success::ok(file))
}
