use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::modules::content::domain::entities::{
    Achievement, Category, Collection, ContentSnapshot, PortfolioContent, Project, Settings, Skill,
};

/// Current value of one collection after a durable change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentChange {
    Projects(Vec<Project>),
    Skills(Vec<Skill>),
    Achievements(Vec<Achievement>),
    Categories(Vec<Category>),
    Settings(Settings),
}

impl ContentChange {
    pub fn collection(&self) -> Collection {
        match self {
            ContentChange::Projects(_) => Collection::Projects,
            ContentChange::Skills(_) => Collection::Skills,
            ContentChange::Achievements(_) => Collection::Achievements,
            ContentChange::Categories(_) => Collection::Categories,
            ContentChange::Settings(_) => Collection::Settings,
        }
    }

    /// Copies one collection out of the readable content.
    pub fn capture(content: &PortfolioContent, collection: Collection) -> Self {
        match collection {
            Collection::Projects => ContentChange::Projects(content.projects.clone()),
            Collection::Skills => ContentChange::Skills(content.skills.clone()),
            Collection::Achievements => ContentChange::Achievements(content.achievements.clone()),
            Collection::Categories => ContentChange::Categories(content.categories.clone()),
            Collection::Settings => ContentChange::Settings(content.settings.clone()),
        }
    }

    /// Copies one collection out of a durable snapshot. `None` for settings never stored.
    pub fn from_snapshot(snapshot: &ContentSnapshot, collection: Collection) -> Option<Self> {
        let change = match collection {
            Collection::Projects => ContentChange::Projects(snapshot.projects.clone()),
            Collection::Skills => ContentChange::Skills(snapshot.skills.clone()),
            Collection::Achievements => ContentChange::Achievements(snapshot.achievements.clone()),
            Collection::Categories => ContentChange::Categories(snapshot.categories.clone()),
            Collection::Settings => ContentChange::Settings(snapshot.settings.clone()?),
        };
        Some(change)
    }

    /// Replaces the matching collection. Returns whether anything changed.
    pub fn apply_to(self, content: &mut PortfolioContent) -> bool {
        fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
            if *slot == value {
                return false;
            }
            *slot = value;
            true
        }

        match self {
            ContentChange::Projects(v) => replace(&mut content.projects, v),
            ContentChange::Skills(v) => replace(&mut content.skills, v),
            ContentChange::Achievements(v) => replace(&mut content.achievements, v),
            ContentChange::Categories(v) => replace(&mut content.categories, v),
            ContentChange::Settings(v) => replace(&mut content.settings, v),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Subscription
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
struct FeedEvent {
    origin: Option<Uuid>,
    change: ContentChange,
}

/// Listener handle for the changes of one collection.
///
/// Dropping the handle (or calling [`ChangeSubscription::unsubscribe`]) removes
/// the listener from the feed.
#[derive(Debug)]
pub struct ChangeSubscription {
    collection: Collection,
    skip_origin: Option<Uuid>,
    receiver: Option<broadcast::Receiver<FeedEvent>>,
}

impl ChangeSubscription {
    /// A subscription that never yields, for adapters with no other writers.
    pub fn detached(collection: Collection) -> Self {
        Self {
            collection,
            skip_origin: None,
            receiver: None,
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn is_detached(&self) -> bool {
        self.receiver.is_none()
    }

    /// Waits for the next change of this collection. `None` once the feed is closed.
    ///
    /// A lagging listener skips the missed changes: every change carries the
    /// whole collection, so the next one brings it up to date.
    pub async fn next(&mut self) -> Option<ContentChange> {
        let collection = self.collection;
        let skip_origin = self.skip_origin;
        let receiver = self.receiver.as_mut()?;

        let outcome = loop {
            match receiver.recv().await {
                Ok(event) if event.change.collection() != collection => continue,
                Ok(event) if skip_origin.is_some() && event.origin == skip_origin => continue,
                Ok(event) => break Some(event.change),
                Err(RecvError::Lagged(missed)) => {
                    warn!(collection = %collection, missed, "Change feed listener lagged behind");
                }
                Err(RecvError::Closed) => {
                    debug!(collection = %collection, "Change feed closed");
                    break None;
                }
            }
        };

        if outcome.is_none() {
            self.receiver = None;
        }
        outcome
    }

    /// Discards every change already queued. Returns how many were dropped.
    pub fn drain(&mut self) -> usize {
        let Some(receiver) = self.receiver.as_mut() else {
            return 0;
        };

        let mut drained = 0;
        let closed = loop {
            match receiver.try_recv() {
                Ok(_) => drained += 1,
                Err(TryRecvError::Lagged(missed)) => drained += missed as usize,
                Err(TryRecvError::Empty) => break false,
                Err(TryRecvError::Closed) => break true,
            }
        };

        if closed {
            self.receiver = None;
        }
        drained
    }

    pub fn unsubscribe(self) {
        debug!(collection = %self.collection, "Change feed listener removed");
    }
}

//
// ──────────────────────────────────────────────────────────
// Fan-out
// ──────────────────────────────────────────────────────────
//

/// Broadcast fan-out shared by the networked adapters.
///
/// Writers may tag a change with their origin so their own subscriptions skip
/// the echo of a change they already applied.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<FeedEvent>,
}

impl ChangeFeed {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Delivers a change to every live subscription. Returns the listener count.
    pub fn publish(&self, change: ContentChange) -> usize {
        self.send(None, change)
    }

    pub fn publish_from(&self, origin: Uuid, change: ContentChange) -> usize {
        self.send(Some(origin), change)
    }

    fn send(&self, origin: Option<Uuid>, change: ContentChange) -> usize {
        self.sender.send(FeedEvent { origin, change }).unwrap_or(0)
    }

    pub fn subscribe(&self, collection: Collection) -> ChangeSubscription {
        ChangeSubscription {
            collection,
            skip_origin: None,
            receiver: Some(self.sender.subscribe()),
        }
    }

    /// Like [`ChangeFeed::subscribe`], but skips changes published by `origin`.
    pub fn subscribe_excluding(&self, collection: Collection, origin: Uuid) -> ChangeSubscription {
        ChangeSubscription {
            collection,
            skip_origin: Some(origin),
            receiver: Some(self.sender.subscribe()),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
