//! Connection supervisor - owns connect, pairing and reconnect

use crate::application::errors::BotError;
use crate::domain::entities::{ConnectionState, DisconnectReason};
use crate::domain::traits::{CredentialStore, LineSource, Session, SessionProvider};
use crate::infrastructure::config::PairingConfig;
use super::message_service::MessageService;
use super::pairing;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Closed for a recoverable reason
    Reconnect,
    /// Credentials were invalidated, re-pairing required
    LoggedOut,
    /// The event stream finished without a close event
    Ended,
}

/// Only a logged-out close is terminal; a close without a cause reconnects
pub fn should_reconnect(reason: Option<&DisconnectReason>) -> bool {
    !reason.is_some_and(DisconnectReason::is_logged_out)
}

pub struct Supervisor<P, C> {
    provider: P,
    store: C,
    messages: MessageService,
    pairing: PairingConfig,
}

impl<P, C> Supervisor<P, C>
where
    P: SessionProvider,
    C: CredentialStore,
{
    pub fn new(provider: P, store: C, messages: MessageService, pairing: PairingConfig) -> Self {
        Self {
            provider,
            store,
            messages,
            pairing,
        }
    }

    /// Connect and keep reconnecting until logged out or the stream ends
    pub async fn run<L: LineSource>(&self, input: &mut L) -> Result<SessionOutcome, BotError> {
        let mut connects: u32 = 0;
        loop {
            connects += 1;
            if connects > 1 {
                tracing::info!("Reconnecting (connection #{})", connects);
            }
            match self.connect_once(input).await? {
                SessionOutcome::Reconnect => continue,
                outcome => return Ok(outcome),
            }
        }
    }

    async fn connect_once<L: LineSource>(&self, input: &mut L) -> Result<SessionOutcome, BotError> {
        let credentials = self.store.load().await?;
        let (version, is_latest) = self.provider.latest_version().await?;
        tracing::info!("using WA v{}, isLatest: {}", version, is_latest);

        let registered = credentials.is_registered();
        let mut session = self.provider.connect(version, credentials).await?;

        if !registered {
            pairing::bootstrap(&session, &self.pairing, input).await?;
        }

        self.drive(&mut session).await
    }

    /// Process event batches one at a time until the connection closes
    pub async fn drive<S: Session>(&self, session: &mut S) -> Result<SessionOutcome, BotError> {
        let mut state = ConnectionState::Connecting;

        while let Some(batch) = session.next_batch().await {
            let mut outcome = None;

            if let Some(update) = &batch.connection {
                state = update.state;
                match update.state {
                    ConnectionState::Connecting => tracing::debug!("connecting"),
                    ConnectionState::Open => tracing::info!("opened connection"),
                    ConnectionState::Close => {
                        let reason = update.last_disconnect.as_ref();
                        let reconnect = should_reconnect(reason);
                        tracing::warn!(
                            "connection closed due to {}, reconnecting {}",
                            reason.map(|r| r.to_string()).unwrap_or_else(|| "unknown cause".to_string()),
                            reconnect
                        );
                        outcome = Some(if reconnect {
                            SessionOutcome::Reconnect
                        } else {
                            SessionOutcome::LoggedOut
                        });
                    }
                }
            }

            if let Some(credentials) = &batch.credentials {
                if let Err(e) = self.store.save(credentials).await {
                    tracing::error!("Failed to save credentials: {}", e);
                }
            }

            if let Some(upsert) = &batch.upsert {
                self.messages.process_upsert(&*session, upsert).await;
            }

            if let Some(outcome) = outcome {
                return Ok(outcome);
            }
        }

        tracing::info!("event stream ended (last state {:?})", state);
        Ok(SessionOutcome::Ended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::messaging::MessageDispatcher;
    use crate::application::services::CommandService;
    use crate::domain::entities::event::status;
    use crate::domain::entities::{ConnectionUpdate, Credentials, EventBatch, Jid, Message};
    use crate::domain::traits::FixedChooser;
    use crate::infrastructure::adapters::memory::{MemoryCredentialStore, ScriptedProvider};
    use crate::infrastructure::config::Config;
    use tokio::io::{AsyncBufReadExt, Lines};

    fn no_input() -> Lines<&'static [u8]> {
        (&b""[..]).lines()
    }

    fn messages() -> MessageService {
        let config = Config::default();
        let mut commands = CommandService::new("/");
        commands.register_defaults(&config);
        MessageService::new(
            MessageDispatcher::new(config.bot, config.greetings, commands, Box::new(FixedChooser(0))),
            true,
        )
    }

    fn registered() -> Credentials {
        Credentials {
            me: Some(Jid::from_phone("6285700000000")),
            keys: serde_json::json!({ "noise": "abc" }),
        }
    }

    fn closed(code: u16) -> EventBatch {
        EventBatch::connection(ConnectionUpdate::closed(Some(DisconnectReason::new(code, "closed"))))
    }

    #[test]
    fn test_should_reconnect() {
        assert!(should_reconnect(None));
        assert!(should_reconnect(Some(&DisconnectReason::new(status::RESTART_REQUIRED, "restart"))));
        assert!(should_reconnect(Some(&DisconnectReason {
            status_code: None,
            message: "socket error".to_string(),
        })));
        assert!(!should_reconnect(Some(&DisconnectReason::new(status::LOGGED_OUT, "logged out"))));
    }

    #[tokio::test]
    async fn test_logged_out_is_terminal() {
        let provider = ScriptedProvider::new(vec![
            vec![EventBatch::connection(ConnectionUpdate::open()), closed(status::LOGGED_OUT)],
            vec![EventBatch::connection(ConnectionUpdate::open())],
        ]);
        let supervisor = Supervisor::new(
            provider.clone(),
            MemoryCredentialStore::new(registered()),
            messages(),
            PairingConfig::default(),
        );

        let outcome = supervisor.run(&mut no_input()).await.unwrap();
        assert_eq!(outcome, SessionOutcome::LoggedOut);
        assert_eq!(provider.connects(), 1);
    }

    #[tokio::test]
    async fn test_other_close_reconnects_exactly_once() {
        let provider = ScriptedProvider::new(vec![
            vec![EventBatch::connection(ConnectionUpdate::open()), closed(status::CONNECTION_LOST)],
            vec![EventBatch::connection(ConnectionUpdate::open())],
        ]);
        let supervisor = Supervisor::new(
            provider.clone(),
            MemoryCredentialStore::new(registered()),
            messages(),
            PairingConfig::default(),
        );

        let outcome = supervisor.run(&mut no_input()).await.unwrap();
        assert_eq!(outcome, SessionOutcome::Ended);
        assert_eq!(provider.connects(), 2);
        assert_eq!(provider.connected_with(), vec![registered(), registered()]);
    }

    #[tokio::test]
    async fn test_credentials_update_is_persisted_and_used_on_reconnect() {
        let updated = Credentials {
            me: Some(Jid::from_phone("6285711112222")),
            keys: serde_json::json!({ "noise": "rotated" }),
        };
        let provider = ScriptedProvider::new(vec![
            vec![
                EventBatch::credentials(updated.clone()),
                closed(status::RESTART_REQUIRED),
            ],
            vec![],
        ]);
        let store = MemoryCredentialStore::new(Credentials::default());
        let supervisor = Supervisor::new(
            provider.clone(),
            store.clone(),
            messages(),
            PairingConfig {
                phone_number: Some("6285711112222".to_string()),
                custom_code: None,
            },
        );

        supervisor.run(&mut no_input()).await.unwrap();
        assert_eq!(store.saves(), 1);
        assert_eq!(store.current(), updated);
        // paired once on the first, unregistered connection only
        assert_eq!(provider.log().pairing_requests().len(), 1);
        assert_eq!(provider.connected_with(), vec![Credentials::default(), updated]);
    }

    #[tokio::test]
    async fn test_messages_in_closing_batch_are_still_handled() {
        let mut batch = closed(status::LOGGED_OUT);
        batch.upsert = EventBatch::notify(vec![Message::from_text("628@s.whatsapp.net", "/ping")]).upsert;
        let provider = ScriptedProvider::new(vec![vec![batch]]);
        let supervisor = Supervisor::new(
            provider.clone(),
            MemoryCredentialStore::new(registered()),
            messages(),
            PairingConfig::default(),
        );

        supervisor.run(&mut no_input()).await.unwrap();
        let sent = provider.log().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1.as_text(), Some("Pong! ⚡"));
    }

    #[tokio::test]
    async fn test_batches_are_processed_in_order() {
        let provider = ScriptedProvider::new(vec![vec![
            EventBatch::connection(ConnectionUpdate::open()),
            EventBatch::notify(vec![
                Message::from_text("628@s.whatsapp.net", "/ping"),
                Message::from_text("628@s.whatsapp.net", "/xyz"),
            ]),
            EventBatch::notify(vec![Message::from_text("628@s.whatsapp.net", "halo")]),
        ]]);
        let supervisor = Supervisor::new(
            provider.clone(),
            MemoryCredentialStore::new(registered()),
            messages(),
            PairingConfig::default(),
        );

        assert_eq!(supervisor.run(&mut no_input()).await.unwrap(), SessionOutcome::Ended);
        let texts: Vec<String> = provider
            .log()
            .sent()
            .iter()
            .filter_map(|(_, r)| r.as_text().map(str::to_string))
            .collect();
        assert_eq!(texts, vec!["Pong! ⚡", "Command tidak dikenali. 😅", "Hai! 👋"]);
    }

    #[tokio::test]
    async fn test_missing_phone_number_fails_startup() {
        let provider = ScriptedProvider::new(vec![vec![]]);
        let supervisor = Supervisor::new(
            provider.clone(),
            MemoryCredentialStore::new(Credentials::default()),
            messages(),
            PairingConfig::default(),
        );

        assert!(supervisor.run(&mut no_input()).await.is_err());
    }
}
