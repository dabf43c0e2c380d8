use tower_sessions::Session;

use crate::error::VisionWebError;

const FLASH_FLAG_KEY: &str = "flash_flag";

pub(crate) const FLASH_IMAGE_STAGED: u16 = 1;
pub(crate) const FLASH_INVALID_IMAGE: u16 = 2;
pub(crate) const FLASH_MODE_CHANGED: u16 = 3;
pub(crate) const FLASH_NO_IMAGE: u16 = 4;
pub(crate) const FLASH_NO_QUESTION: u16 = 5;
pub(crate) const FLASH_NO_GENERATED_IMAGE: u16 = 6;

#[derive(Clone, Debug)]
pub(crate) struct FlashMessage {
    pub(crate) text: &'static str,
    pub(crate) class: &'static str,
}

pub(crate) async fn set_flash(session: &Session, flag: u16) -> Result<(), VisionWebError> {
    session.insert(FLASH_FLAG_KEY, flag).await?;
    Ok(())
}

pub(crate) async fn take_flash_message(
    session: &Session,
) -> Result<Option<FlashMessage>, VisionWebError> {
    let flag = session
        .get::<u16>(FLASH_FLAG_KEY)
        .await?
        .filter(|flag| *flag != 0);
    if flag.is_some() {
        session.insert(FLASH_FLAG_KEY, 0u16).await?;
    }
    Ok(flag.and_then(message_for))
}

fn message_for(flag: u16) -> Option<FlashMessage> {
    match flag {
        FLASH_IMAGE_STAGED => Some(FlashMessage {
            text: "Image ready. Ask a question about it below.",
            class: "success",
        }),
        FLASH_INVALID_IMAGE => Some(FlashMessage {
            text: "That file isn't a usable image. Please choose a JPG or PNG.",
            class: "warning",
        }),
        FLASH_MODE_CHANGED => Some(FlashMessage {
            text: "Input mode changed.",
            class: "success",
        }),
        FLASH_NO_IMAGE => Some(FlashMessage {
            text: "Provide an image before asking about it.",
            class: "warning",
        }),
        FLASH_NO_QUESTION => Some(FlashMessage {
            text: "Ask a question about the image first.",
            class: "warning",
        }),
        FLASH_NO_GENERATED_IMAGE => Some(FlashMessage {
            text: "Generate an image before analyzing it.",
            class: "warning",
        }),
        _ => None,
    }
}
