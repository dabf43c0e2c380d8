use axum::extract::Multipart;

use super::input::{UploadForm, stage_file};
use super::prelude::*;
use crate::openai::ImageSource;
use crate::render::pretty_json;

#[derive(Deserialize)]
pub(crate) struct AnalyzeGeneratedForm {
    csrf_token: String,
    question: Option<String>,
}

/// Asks a question about the staged image, optionally staging a new one in
/// the same request.
#[instrument(skip_all)]
pub(crate) async fn analyze_handler(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<Response, VisionWebError> {
    let form = UploadForm::read(multipart).await?;
    form.validate(&session).await?;

    let mut context = SessionContext::load(&session, state.strategy).await?;
    if let Some(file) = form.image
        && !stage_file(&session, &mut context, file).await?
    {
        return Ok(Redirect::to("/").into_response());
    }

    let question = form.question.as_deref().unwrap_or_default();
    if question.trim().is_empty() {
        context.save(&session).await?;
        flash::set_flash(&session, flash::FLASH_NO_QUESTION).await?;
        return Ok(Redirect::to("/").into_response());
    }
    let Some(image) = context.selector.current().cloned() else {
        flash::set_flash(&session, flash::FLASH_NO_IMAGE).await?;
        return Ok(Redirect::to("/").into_response());
    };

    context.remember_question(question);
    context.save(&session).await?;

    let response = state
        .openai
        .ask_vision(question, &ImageSource::Inline(image))
        .await?;
    let page = render_page(
        &state,
        &session,
        &context,
        Outcome {
            response_json: Some(pretty_json(&response)),
            ..Outcome::default()
        },
    )
    .await?;
    Ok(page.into_response())
}

/// Asks about the last generated image, by URL.
#[instrument(skip_all)]
pub(crate) async fn analyze_generated_handler(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AnalyzeGeneratedForm>,
) -> Result<Response, VisionWebError> {
    validate_csrf(&session, &form.csrf_token).await?;

    let mut context = SessionContext::load(&session, state.strategy).await?;
    let Some(url) = context.generated_url.clone() else {
        flash::set_flash(&session, flash::FLASH_NO_GENERATED_IMAGE).await?;
        return Ok(Redirect::to("/").into_response());
    };
    let Some(question) = context.resolve_question(form.question.as_deref()) else {
        flash::set_flash(&session, flash::FLASH_NO_QUESTION).await?;
        return Ok(Redirect::to("/").into_response());
    };

    context.remember_question(&question);
    context.save(&session).await?;

    let response = state
        .openai
        .ask_vision(&question, &ImageSource::Remote(url))
        .await?;
    let page = render_page(
        &state,
        &session,
        &context,
        Outcome {
            response_json: Some(pretty_json(&response)),
            ..Outcome::default()
        },
    )
    .await?;
    Ok(page.into_response())
}
