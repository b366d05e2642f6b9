//! # Command Router
//!
//! Routes incoming messages to the appropriate command handler (in `interface/commands`).
//! It parses the command string (e.g., `!votekick`) and dispatches it with the necessary context.

use anyhow::Result;
use std::sync::Arc;

use crate::application::election::VotekickEngine;
use crate::application::parsing::split_command;
use crate::domain::config::AppConfig;
use crate::domain::traits::{ChatProvider, GroupDirectory};
use crate::domain::types::Invocation;
use crate::interface::commands;

pub struct CommandRouter {
    config: AppConfig,
    chat: Arc<dyn ChatProvider>,
    directory: Arc<dyn GroupDirectory>,
    votekick: VotekickEngine,
}

impl CommandRouter {
    pub fn new(
        config: AppConfig,
        chat: Arc<dyn ChatProvider>,
        directory: Arc<dyn GroupDirectory>,
        votekick: VotekickEngine,
    ) -> Self {
        Self {
            config,
            chat,
            directory,
            votekick,
        }
    }

    pub async fn route(&self, invocation: &Invocation, message: &str) -> Result<()> {
        let Some((cmd, args)) = split_command(message, &self.config.bot.prefix) else {
            return Ok(());
        };
        tracing::info!(
            "Router dispatching cmd='{}' args='{}' sender='{}'",
            cmd,
            args,
            invocation.author_id
        );

        let chat = self.chat.as_ref();
        let directory = self.directory.as_ref();

        match cmd {
            "hello" => commands::hello::handle_hello(chat, directory, invocation).await?,
            "quote" => {
                commands::quote::handle_quote(chat, directory, invocation, &self.config.bot.quotes).await?
            }
            "thinking" => commands::thinking::handle_thinking(chat, invocation).await?,
            "votekick" => {
                commands::votekick::handle_votekick(&self.votekick, chat, directory, invocation, message.trim())
                    .await?
            }
            "help" => commands::help::handle_help(chat, invocation, &self.config.bot.prefix).await?,
            _ => {
                tracing::debug!("Ignoring unknown command '{}'", cmd);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::election::ElectionStore;
    use crate::application::testing::{FakePlatform, config, invocation, invocation_mentioning, member};
    use crate::domain::types::Presence;
    use std::io::Write;

    fn router(platform: &Arc<FakePlatform>, config: AppConfig) -> CommandRouter {
        let engine = VotekickEngine::new(&config, Arc::new(ElectionStore::new()), platform.clone(), platform.clone());
        CommandRouter::new(config, platform.clone(), platform.clone(), engine)
    }

    fn texts(platform: &FakePlatform) -> Vec<String> {
        platform.sent().into_iter().map(|(_, text)| text).collect()
    }

    #[tokio::test]
    async fn test_hello_replies_to_author() {
        let platform = Arc::new(FakePlatform::default());
        router(&platform, config()).route(&invocation("g", "a"), "!hello").await.unwrap();
        assert_eq!(platform.sent(), vec![("g-general".to_string(), "<@a>: Hello!".to_string())]);
    }

    #[tokio::test]
    async fn test_ignores_plain_text_and_unknown_commands() {
        let platform = Arc::new(FakePlatform::default());
        let router = router(&platform, config());
        router.route(&invocation("g", "a"), "hello everyone").await.unwrap();
        router.route(&invocation("g", "a"), "!dance").await.unwrap();
        assert!(platform.sent().is_empty());
    }

    #[tokio::test]
    async fn test_thinking_pyramid() {
        let platform = Arc::new(FakePlatform::default());
        router(&platform, config()).route(&invocation("g", "a"), "!thinking").await.unwrap();
        assert_eq!(
            texts(&platform),
            vec![
                ":thinking:",
                ":thinking: :thinking:",
                ":thinking: :thinking: :thinking:",
                ":thinking: :thinking:",
                ":thinking:",
            ]
        );
    }

    #[tokio::test]
    async fn test_quote_from_seed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"author": "Ada", "quote": "Hello, world"}}]"#).unwrap();
        let mut config = config();
        config.bot.quotes = file.path().to_string_lossy().to_string();

        let platform = Arc::new(FakePlatform::default());
        router(&platform, config).route(&invocation("g", "a"), "!quote").await.unwrap();
        assert_eq!(texts(&platform), vec!["\"Hello, world\" - Ada"]);
    }

    #[tokio::test]
    async fn test_quote_without_seed() {
        let mut config = config();
        config.bot.quotes = "/no/such/quotes.json".to_string();
        let platform = Arc::new(FakePlatform::default());
        router(&platform, config).route(&invocation("g", "a"), "!quote").await.unwrap();
        assert_eq!(texts(&platform), vec!["<@a>: I don't know any quotes yet."]);
    }

    #[tokio::test]
    async fn test_votekick_resolves_mention() {
        let platform = Arc::new(FakePlatform::with_online_voters(&["a", "b", "c"]));
        platform.add_member(member("42", false, Presence::Offline, true));
        let router = router(&platform, config());

        router.route(&invocation("g", "a"), "!votekick <@!42>").await.unwrap();
        router.route(&invocation("g", "b"), "!votekick <@42>").await.unwrap();

        assert_eq!(
            texts(&platform),
            vec![
                "Votekick initiated for <@42>. 1 more vote(s) within 1 minute required to pass.",
                "Votekick for <@42> has passed. Kicking <@42>.",
            ]
        );
        assert_eq!(platform.removed(), vec![("g".to_string(), "42".to_string())]);
    }

    #[tokio::test]
    async fn test_votekick_uses_structured_mention_over_display_name() {
        let platform = Arc::new(FakePlatform::with_online_voters(&["a", "b", "c"]));
        platform.add_member(member("42", false, Presence::Offline, true));
        let router = router(&platform, config());

        router
            .route(&invocation_mentioning("g", "a", &["42"]), "!votekick Alice Smith")
            .await
            .unwrap();
        router
            .route(&invocation_mentioning("g", "b", &["42"]), "!votekick Alice")
            .await
            .unwrap();

        assert_eq!(
            texts(&platform),
            vec![
                "Votekick initiated for <@42>. 1 more vote(s) within 1 minute required to pass.",
                "Votekick for <@42> has passed. Kicking <@42>.",
            ]
        );
        assert_eq!(platform.removed(), vec![("g".to_string(), "42".to_string())]);
    }

    #[tokio::test]
    async fn test_votekick_ambiguous_mentions_fall_back_to_text() {
        let platform = Arc::new(FakePlatform::with_online_voters(&["a", "b", "c"]));
        platform.add_member(member("42", false, Presence::Offline, true));

        router(&platform, config())
            .route(&invocation_mentioning("g", "a", &["42", "b"]), "!votekick <@42>")
            .await
            .unwrap();

        assert_eq!(
            texts(&platform),
            vec!["Votekick initiated for <@42>. 1 more vote(s) within 1 minute required to pass."]
        );
    }

    #[tokio::test]
    async fn test_help_lists_commands() {
        let platform = Arc::new(FakePlatform::default());
        router(&platform, config()).route(&invocation("g", "a"), "!help").await.unwrap();
        assert_eq!(platform.sent(), vec![("g-general".to_string(), crate::strings::help::main("!"))]);
    }

    #[tokio::test]
    async fn test_votekick_bad_mention() {
        let platform = Arc::new(FakePlatform::with_online_voters(&["a", "b", "c"]));
        router(&platform, config())
            .route(&invocation("g", "a"), "!votekick someone")
            .await
            .unwrap();
        assert_eq!(
            texts(&platform),
            vec!["Invalid format. Messages should be written in the following format:```!votekick <@bot>```"]
        );
    }

    #[tokio::test]
    async fn test_custom_prefix() {
        let mut config = config();
        config.bot.prefix = "?".to_string();
        let platform = Arc::new(FakePlatform::default());
        let router = router(&platform, config);
        router.route(&invocation("g", "a"), "!hello").await.unwrap();
        router.route(&invocation("g", "a"), "?hello").await.unwrap();
        assert_eq!(platform.sent().len(), 1);
    }
}
