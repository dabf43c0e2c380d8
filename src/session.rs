//! Per-browser-session state, kept in the tower-sessions store.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::VisionWebError;
use crate::selector::{InputSelector, InputStrategy};

const SESSION_CONTEXT_KEY: &str = "vision_context";

/// Everything that carries over between interactions in one session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Active mode and its staged image
    pub selector: InputSelector,
    /// Last question the visitor asked
    pub question: Option<String>,
    /// Last successfully generated image URL
    pub generated_url: Option<String>,
    /// The service's rewrite of the last generation prompt
    pub revised_prompt: Option<String>,
}

impl SessionContext {
    /// A fresh context for `strategy`
    pub fn new(strategy: InputStrategy) -> Self {
        Self {
            selector: InputSelector::new(strategy),
            question: None,
            generated_url: None,
            revised_prompt: None,
        }
    }

    /// Loads the session's context, or starts a new one.
    pub async fn load(session: &Session, strategy: InputStrategy) -> Result<Self, VisionWebError> {
        let mut context = session
            .get::<Self>(SESSION_CONTEXT_KEY)
            .await?
            .unwrap_or_else(|| Self::new(strategy));
        context.selector.conform(strategy);
        Ok(context)
    }

    /// Writes the context back into the session.
    pub async fn save(&self, session: &Session) -> Result<(), VisionWebError> {
        session.insert(SESSION_CONTEXT_KEY, self).await?;
        Ok(())
    }

    /// Records a non-empty question for later re-use.
    pub fn remember_question(&mut self, question: &str) {
        if !question.trim().is_empty() {
            self.question = Some(question.to_string());
        }
    }

    /// The submitted question if there is one, else the last one asked.
    pub fn resolve_question(&self, submitted: Option<&str>) -> Option<String> {
        submitted
            .filter(|question| !question.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.question.clone())
    }

    /// Stores a newly generated image, overwriting the previous one.
    pub fn set_generated(&mut self, url: String, revised_prompt: Option<String>) {
        self.generated_url = Some(url);
        self.revised_prompt = revised_prompt;
    }
}
