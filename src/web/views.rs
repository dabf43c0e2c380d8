use askama::Template;
use askama_web::WebTemplate;

use super::csrf::csrf_token;
use super::flash::FlashMessage;
use super::prelude::*;
use crate::constants::PAGE_TITLE;
use crate::selector::{InputMode, InputStrategy};

#[derive(Clone, Debug)]
pub(crate) struct ModeOption {
    pub(crate) value: &'static str,
    pub(crate) label: &'static str,
    pub(crate) active: bool,
}

/// What the last action produced, shown under the forms.
#[derive(Debug, Default)]
pub(crate) struct Outcome {
    pub(crate) response_json: Option<String>,
    pub(crate) error: Option<String>,
    pub(crate) prompt: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub(crate) struct IndexTemplate {
    title: &'static str,
    csrf_token: String,
    flash: Option<FlashMessage>,
    error: Option<String>,
    show_mode_selector: bool,
    modes: Vec<ModeOption>,
    show_analysis_section: bool,
    acquire_label: &'static str,
    capture: bool,
    staged_image: Option<String>,
    staged_caption: &'static str,
    analyze_label: &'static str,
    question: String,
    show_generation_section: bool,
    prompt: String,
    generated_url: Option<String>,
    revised_prompt: Option<String>,
    response_json: Option<String>,
}

/// Builds the page for the session's current state plus `outcome`.
pub(crate) async fn render_page(
    state: &AppState,
    session: &Session,
    context: &SessionContext,
    outcome: Outcome,
) -> Result<IndexTemplate, VisionWebError> {
    let strategy = state.strategy;
    let active = context.selector.active();
    let upload_only = strategy == InputStrategy::UploadOnly;

    let modes = strategy
        .modes()
        .iter()
        .map(|mode| ModeOption {
            value: mode.as_str(),
            label: mode.label(),
            active: *mode == active,
        })
        .collect::<Vec<_>>();

    let csrf_token = csrf_token(session).await?;
    let flash = flash::take_flash_message(session).await?;

    Ok(IndexTemplate {
        title: PAGE_TITLE,
        csrf_token,
        flash,
        error: outcome.error,
        show_mode_selector: modes.len() > 1,
        modes,
        show_analysis_section: active.takes_image_bytes(),
        acquire_label: match active {
            InputMode::Capture => "Take a picture",
            _ => "Upload an image",
        },
        capture: active == InputMode::Capture,
        staged_image: context.selector.current().map(|image| image.data_uri()),
        staged_caption: match active {
            InputMode::Capture => "Captured Image",
            _ => "Uploaded Image",
        },
        analyze_label: if upload_only {
            "Analyze Uploaded Image"
        } else {
            "Analyze Image"
        },
        question: context.question.clone().unwrap_or_default(),
        show_generation_section: strategy.offers_generation(active),
        prompt: outcome.prompt,
        generated_url: context.generated_url.clone(),
        revised_prompt: context.revised_prompt.clone(),
        response_json: outcome.response_json,
    })
}

/// handles the / GET
#[instrument(skip_all)]
pub(crate) async fn index_handler(
    State(state): State<AppState>,
    session: Session,
) -> Result<IndexTemplate, VisionWebError> {
    let context = SessionContext::load(&session, state.strategy).await?;
    render_page(&state, &session, &context, Outcome::default()).await
}
