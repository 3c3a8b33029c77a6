use async_trait::async_trait;
use tokio::io::{AsyncBufRead, Lines};

use crate::application::errors::BotError;

/// Line-oriented operator input, shared by the pairing prompt and the console session
#[async_trait]
pub trait LineSource: Send {
    /// Next line without its terminator, `None` at end of input
    async fn next_line(&mut self) -> Result<Option<String>, BotError>;
}

#[async_trait]
impl<R> LineSource for Lines<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_line(&mut self) -> Result<Option<String>, BotError> {
        Ok(Lines::next_line(self).await?)
    }
}
