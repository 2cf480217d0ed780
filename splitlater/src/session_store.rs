use dashmap::DashMap;
use serenity::model::id::ChannelId;
use splitlater_application::Session;
use splitlater_domain::MembershipPolicy;
use std::sync::Arc;

/// One session per channel, created on first use.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<DashMap<ChannelId, Session>>,
    policy: MembershipPolicy,
}

impl SessionStore {
    pub fn new(policy: MembershipPolicy) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            policy,
        }
    }

    /// Runs `f` while holding the channel's session exclusively.
    ///
    /// The shard lock is held for the duration of `f`, so `f` must not await.
    pub fn with_session<R>(&self, channel_id: ChannelId, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = self
            .inner
            .entry(channel_id)
            .or_insert_with(|| Session::new(self.policy));
        f(&mut session)
    }

    pub fn remove(&self, channel_id: ChannelId) -> bool {
        self.inner.remove(&channel_id).is_some()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.len()
    }
}
