use axum::extract::Multipart;

use super::prelude::*;
use crate::encoder::ImageBytes;
use crate::selector::InputMode;

#[derive(Deserialize)]
pub(crate) struct ModeForm {
    csrf_token: String,
    mode: InputMode,
}

/// A file field from a multipart form.
pub(crate) struct UploadedFile {
    pub(crate) bytes: Vec<u8>,
    pub(crate) filename: Option<String>,
}

/// Fields of the multipart image and analyze forms.
#[derive(Default)]
pub(crate) struct UploadForm {
    pub(crate) csrf_token: Option<String>,
    pub(crate) question: Option<String>,
    pub(crate) image: Option<UploadedFile>,
}

impl UploadForm {
    pub(crate) async fn read(mut multipart: Multipart) -> Result<Self, VisionWebError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let field_name = field.name().unwrap_or_default().to_string();
            match field_name.as_str() {
                "csrf_token" => form.csrf_token = Some(field.text().await?),
                "question" => form.question = Some(field.text().await?),
                "image" => {
                    let filename = field
                        .file_name()
                        .filter(|name| !name.is_empty())
                        .map(str::to_string);
                    let bytes = field.bytes().await?;
                    // browsers send an empty part when no file was picked
                    if !bytes.is_empty() {
                        form.image = Some(UploadedFile {
                            bytes: bytes.to_vec(),
                            filename,
                        });
                    }
                }
                _ => {}
            }
        }
        Ok(form)
    }

    pub(crate) async fn validate(&self, session: &Session) -> Result<(), VisionWebError> {
        let token = self.csrf_token.as_deref().ok_or(VisionWebError::Unauthorized)?;
        validate_csrf(session, token).await
    }
}

/// Stages `file` into the active mode. Returns false (and flashes why) when
/// the file isn't a usable image.
pub(crate) async fn stage_file(
    session: &Session,
    context: &mut SessionContext,
    file: UploadedFile,
) -> Result<bool, VisionWebError> {
    let image = match ImageBytes::new(file.bytes, file.filename.as_deref()) {
        Ok(image) => image,
        Err(err) => {
            info!("Rejected image {:?}: {}", file.filename, err);
            flash::set_flash(session, flash::FLASH_INVALID_IMAGE).await?;
            return Ok(false);
        }
    };
    context
        .selector
        .acquire(image.encode())
        .map_err(|err| VisionWebError::BadRequest(err.to_string()))?;
    Ok(true)
}

/// Switches the session's input mode
#[instrument(skip_all, fields(mode = %form.mode))]
pub(crate) async fn select_mode_handler(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ModeForm>,
) -> Result<Redirect, VisionWebError> {
    validate_csrf(&session, &form.csrf_token).await?;

    let mut context = SessionContext::load(&session, state.strategy).await?;
    context
        .selector
        .select(state.strategy, form.mode)
        .map_err(|err| VisionWebError::BadRequest(err.to_string()))?;
    context.save(&session).await?;
    flash::set_flash(&session, flash::FLASH_MODE_CHANGED).await?;
    Ok(Redirect::to("/"))
}

/// Receives an uploaded or captured image
#[instrument(skip_all)]
pub(crate) async fn stage_image_handler(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<Redirect, VisionWebError> {
    let form = UploadForm::read(multipart).await?;
    form.validate(&session).await?;

    let mut context = SessionContext::load(&session, state.strategy).await?;
    let Some(file) = form.image else {
        flash::set_flash(&session, flash::FLASH_NO_IMAGE).await?;
        return Ok(Redirect::to("/"));
    };
    if stage_file(&session, &mut context, file).await? {
        context.save(&session).await?;
        flash::set_flash(&session, flash::FLASH_IMAGE_STAGED).await?;
    }
    Ok(Redirect::to("/"))
}
