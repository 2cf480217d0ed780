use crate::session_store::SessionStore;
use chrono::{DateTime, Utc};
use serenity::{
    async_trait,
    constants::MESSAGE_CODE_LIMIT,
    model::{
        channel::{GuildChannel, Message},
        event::MessageUpdateEvent,
        gateway::Ready,
        id::ChannelId,
    },
    prelude::*,
};
use splitlater_application::{MessageProcessor, ProcessingOutcome, command_syntax};
use splitlater_presentation::{ReplyPresenter, messages};

pub struct BotHandler<'a> {
    processor: MessageProcessor<'a>,
    presenter: ReplyPresenter,
    sessions: SessionStore,
}

impl<'a> BotHandler<'a> {
    pub fn new(
        processor: MessageProcessor<'a>,
        presenter: ReplyPresenter,
        sessions: SessionStore,
    ) -> Self {
        Self {
            processor,
            presenter,
            sessions,
        }
    }

    /// Processes one message against its channel's session and renders the reply.
    fn handle_content(
        &self,
        channel_id: ChannelId,
        content: &str,
        sent_at: DateTime<Utc>,
    ) -> Option<String> {
        let outcome = self.sessions.with_session(channel_id, |session| {
            self.processor.process(session, content, sent_at)
        });

        match &outcome {
            ProcessingOutcome::NotCommand => {}
            ProcessingOutcome::Started => tracing::info!("Session reset in channel {channel_id}"),
            ProcessingOutcome::Failed(failure) => {
                tracing::debug!("Command failed in channel {channel_id}: {failure}")
            }
            _ => tracing::debug!("Processed command in channel {channel_id}"),
        }

        self.presenter.render(&outcome)
    }
}

fn message_sent_at(msg: &Message) -> DateTime<Utc> {
    DateTime::from_timestamp(msg.timestamp.unix_timestamp(), 0).unwrap_or_else(Utc::now)
}

/// Splits a reply into chunks Discord accepts, breaking between lines.
fn split_reply(reply: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in reply.lines() {
        let mut line = line;
        while line.chars().count() > limit {
            let split_at = line
                .char_indices()
                .nth(limit)
                .map_or(line.len(), |(idx, _)| idx);
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            chunks.push(line[..split_at].to_string());
            line = &line[split_at..];
        }

        let needed = if current.is_empty() {
            line.chars().count()
        } else {
            current.chars().count() + 1 + line.chars().count()
        };
        if needed > limit {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[async_trait]
impl EventHandler for BotHandler<'_> {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let Some(reply) = self.handle_content(msg.channel_id, &msg.content, message_sent_at(&msg))
        else {
            return;
        };

        for chunk in split_reply(&reply, MESSAGE_CODE_LIMIT) {
            if let Err(e) = msg.reply(&ctx.http, chunk).await {
                tracing::warn!("Failed to send reply in {}: {:?}", msg.channel_id, e);
                break;
            }
        }
    }

    async fn message_update(
        &self,
        ctx: Context,
        _old_if_available: Option<Message>,
        new: Option<Message>,
        event: MessageUpdateEvent,
    ) {
        let from_bot = new
            .as_ref()
            .map(|message| message.author.bot)
            .or_else(|| event.author.as_ref().map(|author| author.bot));
        if from_bot.unwrap_or(false) {
            return;
        }

        // Embed-only updates carry no content.
        let Some(content) = event.content.as_deref() else {
            return;
        };
        if !command_syntax::is_command_message(content) {
            return;
        }

        if let Err(e) = event
            .channel_id
            .say(&ctx.http, messages::EDITED_COMMAND)
            .await
        {
            tracing::warn!("Failed to send edit notice in {}: {:?}", event.channel_id, e);
        }
    }

    async fn channel_delete(
        &self,
        _ctx: Context,
        channel: GuildChannel,
        _messages: Option<Vec<Message>>,
    ) {
        if self.sessions.remove(channel.id) {
            tracing::info!("Dropped session for deleted channel {}", channel.id);
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!("Connected as {}", ready.user.name);
    }
}
