use axum::body::Body;
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};

use super::prelude::*;
use crate::constants::{DOWNLOAD_FILENAME, DOWNLOAD_MIME};
use crate::render::download_png;

#[derive(Deserialize)]
pub(crate) struct GenerateForm {
    csrf_token: String,
    prompt: String,
}

/// Generates an image. Failures are shown on the page and leave the
/// previously generated image in place.
#[instrument(skip_all)]
pub(crate) async fn generate_handler(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<GenerateForm>,
) -> Result<Response, VisionWebError> {
    validate_csrf(&session, &form.csrf_token).await?;

    let mut context = SessionContext::load(&session, state.strategy).await?;
    if !state.strategy.offers_generation(context.selector.active()) {
        return Err(VisionWebError::BadRequest(
            "image generation is not the active mode".to_string(),
        ));
    }
    let outcome = match state.openai.generate_image(&form.prompt).await {
        Ok(generated) => {
            info!("Generated image {}", generated.url);
            context.set_generated(generated.url, generated.revised_prompt);
            context.save(&session).await?;
            Outcome {
                prompt: form.prompt,
                ..Outcome::default()
            }
        }
        Err(err) => {
            warn!("Image generation failed: {}", err);
            Outcome {
                error: Some(format!("Image generation failed: {}", err.message())),
                prompt: form.prompt,
                ..Outcome::default()
            }
        }
    };

    let page = render_page(&state, &session, &context, outcome).await?;
    Ok(page.into_response())
}

/// Serves the generated image re-encoded as a PNG attachment.
#[instrument(skip_all)]
pub(crate) async fn download_handler(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, VisionWebError> {
    let context = SessionContext::load(&session, state.strategy).await?;
    let Some(url) = context.generated_url.as_deref() else {
        return Err(VisionWebError::NotFound("generated image".to_string()));
    };

    match download_png(&state.openai, url).await {
        Ok(png) => Response::builder()
            .header(CONTENT_TYPE, DOWNLOAD_MIME)
            .header(
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            )
            .body(Body::from(png))
            .map_err(VisionWebError::from),
        Err(err) => {
            warn!("Download of {} failed: {}", url, err);
            let page = render_page(
                &state,
                &session,
                &context,
                Outcome {
                    error: Some(format!("Error in downloading the image: {err}")),
                    ..Outcome::default()
                },
            )
            .await?;
            Ok((StatusCode::BAD_GATEWAY, page).into_response())
        }
    }
}
