use crate::{handler::BotHandler, session_store::SessionStore};
use chrono::FixedOffset;
use serenity::{Client, all::GatewayIntents};
use splitlater_application::MessageProcessor;
use splitlater_domain::MembershipPolicy;
use splitlater_infrastructure::SplitLaterCommandParser;
use splitlater_presentation::{
    LogPresenter, ReplyPresenter,
    log_presenter::{DEFAULT_UTC_OFFSET_HOURS, utc_offset_from_hours},
};
use std::env;
use tracing_subscriber::EnvFilter;

const TOKEN_VAR: &str = "DISCORD_TOKEN";
const STRICT_MEMBERS_VAR: &str = "SPLITLATER_STRICT_MEMBERS";
const LOG_UTC_OFFSET_VAR: &str = "SPLITLATER_LOG_UTC_OFFSET";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("DISCORD_TOKEN is not set")]
    MissingToken,
    #[error("{name} must be `true` or `false`, got '{value}'")]
    InvalidFlag { name: &'static str, value: String },
    #[error("{name} must be a whole number of hours between -23 and 23, got '{value}'")]
    InvalidOffset { name: &'static str, value: String },
}

/// Application configuration and dependency injection container
#[derive(Debug)]
pub struct AppConfig {
    pub token: String,
    pub intents: GatewayIntents,
    pub membership: MembershipPolicy,
    pub log_offset: FixedOffset,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup(TOKEN_VAR)
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let membership = match lookup(STRICT_MEMBERS_VAR) {
            None => MembershipPolicy::default(),
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => MembershipPolicy::Strict,
                "false" | "0" | "" => MembershipPolicy::AutoRegister,
                _ => {
                    return Err(ConfigError::InvalidFlag {
                        name: STRICT_MEMBERS_VAR,
                        value,
                    });
                }
            },
        };

        let hours = match lookup(LOG_UTC_OFFSET_VAR) {
            None => DEFAULT_UTC_OFFSET_HOURS,
            Some(value) => value.trim().parse::<i32>().map_err(|_| ConfigError::InvalidOffset {
                name: LOG_UTC_OFFSET_VAR,
                value: value.clone(),
            })?,
        };
        let log_offset = utc_offset_from_hours(hours).ok_or_else(|| ConfigError::InvalidOffset {
            name: LOG_UTC_OFFSET_VAR,
            value: hours.to_string(),
        })?;

        let intents = GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        Ok(Self {
            token,
            intents,
            membership,
            log_offset,
        })
    }
}

/// Builds and configures the Discord client with all dependencies
pub struct AppBuilder;

impl AppBuilder {
    pub async fn build(config: AppConfig) -> Result<Client, serenity::Error> {
        let processor = MessageProcessor::new(&SplitLaterCommandParser);
        let presenter = ReplyPresenter::new(LogPresenter::new(config.log_offset));
        let sessions = SessionStore::new(config.membership);

        let handler = BotHandler::new(processor, presenter, sessions);

        Client::builder(&config.token, config.intents)
            .event_handler(handler)
            .await
    }
}

/// Initialize logging and tracing. `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Run the application with proper error handling
pub async fn run() {
    init_logging();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Starting with {:?} membership, logs shown at UTC{}",
        config.membership,
        config.log_offset
    );

    let mut client = match AppBuilder::build(config).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create client: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(why) = client.start().await {
        tracing::error!("Client error: {:?}", why);
        std::process::exit(1);
    }
}
