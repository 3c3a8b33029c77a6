use async_trait::async_trait;

use crate::application::errors::CommandError;
use crate::application::messaging::Context;
use crate::domain::entities::{CommandHandler, Reply};
use super::{STICKER_FAILED, STICKER_USAGE};

/// `/sticker`: sends the attached or quoted image back as a sticker
pub struct StickerHandler;

#[async_trait]
impl CommandHandler for StickerHandler {
    async fn handle(&self, ctx: &Context<'_>) -> Result<Reply, CommandError> {
        let Some(image) = ctx.message.image() else {
            return Ok(Reply::text(STICKER_USAGE));
        };

        match ctx.media.download_media(image).await {
            Ok(bytes) => {
                tracing::info!(
                    "Converting {} bytes of {} from {} into a sticker",
                    bytes.len(),
                    image.mimetype,
                    ctx.sender()
                );
                Ok(Reply::sticker(bytes))
            }
            Err(e) => {
                tracing::warn!("Media download failed: {}", e);
                Ok(Reply::text(STICKER_FAILED))
            }
        }
    }
}
