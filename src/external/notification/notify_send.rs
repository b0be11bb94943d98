use super::Notifier;
use crate::external::command::CommandStrings;
use anyhow::Result;
use async_trait::async_trait;

/// A [Notifier] showing desktop notifications by running `notify-send` (or
/// any other program taking the message as its last argument).
#[derive(Debug, Clone)]
pub struct CommandNotifier {
    command: Option<CommandStrings>,
}

impl CommandNotifier {
    pub fn new(command: CommandStrings) -> CommandNotifier {
        CommandNotifier {
            command: Some(command),
        }
    }

    /// A notifier which only logs the messages
    pub fn disabled() -> CommandNotifier {
        CommandNotifier { command: None }
    }
}

#[async_trait]
impl Notifier for CommandNotifier {
    async fn notify(&self, message: &str) -> Result<()> {
        log::info!("{}", message);
        if let Some(command) = &self.command {
            command.run(&[message]).await?;
        }
        Ok(())
    }
}
