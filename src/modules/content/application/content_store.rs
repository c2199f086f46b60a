use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use serde::Serialize;
use tokio::sync::{watch, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::modules::content::application::ports::incoming::{AchievementDraft, ProjectDraft};
use crate::modules::content::application::ports::outgoing::{
    ChangeSubscription, ContentChange, ContentPersistence, PersistenceError,
};
use crate::modules::content::domain::defaults;
use crate::modules::content::domain::entities::{
    Achievement, Category, Collection, ContentSnapshot, EntityRecord, PortfolioContent, Project,
    ReadOrder, Settings, SettingsPatch, Skill,
};
use crate::modules::content::domain::ids::IdGenerator;
use crate::modules::content::domain::policies::{accent_hex, normalize_video_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorePhase {
    Uninitialized,
    Loading,
    Populated,
}

/// Result of a mutation that is allowed to be a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationOutcome {
    Applied,
    Unchanged,
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitOutcome {
    /// Collections that received the bundled defaults during this initialization.
    pub seeded: Vec<Collection>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentStoreError {
    #[error("Content store is not initialized")]
    NotInitialized,

    /// The durable write did not complete; readable state was restored.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// In-memory aggregate of the portfolio content and the only mutator of it.
///
/// Reads are served from a `watch` channel so consumer views can both read the
/// current value and wait for the next one. Local mutations are applied
/// optimistically, written through to the persistence adapter, and rolled back
/// for their collection if the write fails. A change reported by the adapter's
/// feed (another client) makes the store re-read that collection and replace
/// it wholesale.
pub struct ContentStore {
    persistence: Arc<dyn ContentPersistence>,
    state: Arc<watch::Sender<PortfolioContent>>,
    phase: watch::Sender<StorePhase>,
    write_lock: Arc<Mutex<()>>,
    ids: IdGenerator,
    listeners: Mutex<Vec<JoinHandle<()>>>,
}

impl ContentStore {
    pub fn new(persistence: Arc<dyn ContentPersistence>) -> Self {
        let (state, _) = watch::channel(defaults::content());
        let (phase, _) = watch::channel(StorePhase::Uninitialized);

        Self {
            persistence,
            state: Arc::new(state),
            phase,
            write_lock: Arc::new(Mutex::new(())),
            ids: IdGenerator::new(),
            listeners: Mutex::new(Vec::new()),
        }
    }

    //
    // ──────────────────────────────────────────────────────
    // Lifecycle
    // ──────────────────────────────────────────────────────
    //

    /// Loads the durable content, seeding empty collections once.
    ///
    /// A collection is seeded only when it is empty *and* carries no seed
    /// marker, so a collection the editor emptied stays empty. On a failed load
    /// the bundled defaults are served from memory, the store returns to
    /// `Uninitialized`, and the call can be retried.
    pub async fn initialize(&self) -> Result<InitOutcome, ContentStoreError> {
        let _guard = self.write_lock.lock().await;
        if *self.phase.borrow() == StorePhase::Populated {
            return Ok(InitOutcome::default());
        }
        self.phase.send_replace(StorePhase::Loading);

        // Subscribe before reading so no change between the two is lost.
        let mut subscriptions: Vec<ChangeSubscription> = Collection::ALL
            .into_iter()
            .map(|collection| self.persistence.subscribe(collection))
            .filter(|subscription| !subscription.is_detached())
            .collect();

        let snapshot = match self.persistence.load_all().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "Loading content failed; serving bundled defaults");
                self.state.send_replace(defaults::content());
                self.phase.send_replace(StorePhase::Uninitialized);
                return Err(err.into());
            }
        };

        let mut content = content_from(&snapshot);
        let mut outcome = InitOutcome::default();
        let mut first_error: Option<PersistenceError> = None;

        for collection in Collection::ALL {
            let empty = snapshot.is_collection_empty(collection);
            let marked = snapshot.seeded.contains(&collection);
            // Settings is a singleton; it must exist even if a marker says otherwise.
            let needs_seed = empty && (!marked || collection == Collection::Settings);

            if needs_seed {
                ContentChange::capture(&defaults::content(), collection).apply_to(&mut content);
                match self.seed(collection).await {
                    Ok(()) => {
                        info!(collection = %collection, "Seeded empty collection with defaults");
                        outcome.seeded.push(collection);
                    }
                    Err(err) => {
                        warn!(collection = %collection, error = %err, "Seeding failed; defaults kept in memory only");
                        first_error.get_or_insert(err);
                    }
                }
            } else if !marked {
                // Content stored before seed markers existed.
                if let Err(err) = self.persistence.mark_seeded(collection).await {
                    warn!(collection = %collection, error = %err, "Recording seed marker failed");
                    first_error.get_or_insert(err);
                }
            }
        }

        if !outcome.seeded.is_empty() && !subscriptions.is_empty() {
            // Our own seed writes are queued on the feed one record at a time;
            // replace them with a fresh read instead of replaying partial states.
            for subscription in subscriptions.iter_mut() {
                subscription.drain();
            }
            match self.persistence.load_all().await {
                Ok(fresh) => content = content_from(&fresh),
                Err(err) => warn!(error = %err, "Re-reading seeded content failed"),
            }
        }

        {
            let mut listeners = self.listeners.lock().await;
            for handle in listeners.drain(..) {
                handle.abort();
            }
            listeners.extend(
                subscriptions
                    .into_iter()
                    .map(|subscription| self.spawn_listener(subscription)),
            );
        }

        self.state.send_replace(content);
        self.phase.send_replace(StorePhase::Populated);
        info!(seeded = outcome.seeded.len(), "Content store populated");

        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(outcome),
        }
    }

    /// Runs [`ContentStore::initialize`] until the store is populated, doubling
    /// the pause between failed attempts up to `max_delay`.
    pub async fn initialize_with_retry(&self, first_delay: Duration, max_delay: Duration) {
        let mut delay = first_delay;
        let mut attempt: u32 = 1;

        loop {
            match self.initialize().await {
                Ok(outcome) => {
                    info!(attempt, seeded = ?outcome.seeded, "Content loaded");
                    return;
                }
                Err(err) if self.phase() == StorePhase::Populated => {
                    warn!(attempt, error = %err, "Content loaded with seeding errors");
                    return;
                }
                Err(err) => {
                    warn!(
                        attempt,
                        error = %err,
                        retry_in_ms = delay.as_millis() as u64,
                        "Content load failed; serving defaults until the next attempt"
                    );
                }
            }

            tokio::time::sleep(delay).await;
            delay = (delay * 2).min(max_delay);
            attempt += 1;
        }
    }

    /// Detaches every change listener. The readable state stays as it is.
    pub async fn shutdown(&self) {
        let mut listeners = self.listeners.lock().await;
        let count = listeners.len();
        for handle in listeners.drain(..) {
            handle.abort();
        }
        info!(listeners = count, "Content store listeners detached");
    }

    pub async fn active_listeners(&self) -> usize {
        self.listeners
            .lock()
            .await
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    async fn seed(&self, collection: Collection) -> Result<(), PersistenceError> {
        if collection == Collection::Settings {
            self.persistence
                .write_settings(defaults::settings().into())
                .await?;
        } else {
            let mut records = defaults::records(collection);
            // Prepending collections must receive the last record first.
            if collection.read_order() == ReadOrder::NewestFirst {
                records.reverse();
            }
            for record in records {
                self.persistence.write_entity(record).await?;
            }
        }
        self.persistence.mark_seeded(collection).await
    }

    /// Follows one collection's feed. Each event is only a trigger: the
    /// collection is re-read under the write lock, so a queued foreign snapshot
    /// taken before one of our own writes can never overwrite that write.
    fn spawn_listener(&self, mut subscription: ChangeSubscription) -> JoinHandle<()> {
        let persistence = Arc::clone(&self.persistence);
        let state = Arc::clone(&self.state);
        let write_lock = Arc::clone(&self.write_lock);

        tokio::spawn(async move {
            let collection = subscription.collection();
            debug!(collection = %collection, "Change listener attached");

            while let Some(change) = subscription.next().await {
                let coalesced = subscription.drain();
                let _guard = write_lock.lock().await;

                let current = match persistence.load_all().await {
                    Ok(snapshot) => {
                        ContentChange::from_snapshot(&snapshot, collection).unwrap_or(change)
                    }
                    Err(err) => {
                        warn!(collection = %collection, error = %err, "Re-reading changed collection failed");
                        continue;
                    }
                };

                if state.send_if_modified(|content| current.apply_to(content)) {
                    debug!(collection = %collection, coalesced, "Applied external content change");
                }
            }

            debug!(collection = %collection, "Change listener finished");
        })
    }

    //
    // ──────────────────────────────────────────────────────
    // Reads
    // ──────────────────────────────────────────────────────
    //

    pub fn phase(&self) -> StorePhase {
        *self.phase.borrow()
    }

    pub fn snapshot(&self) -> PortfolioContent {
        self.state.borrow().clone()
    }

    /// Receiver that observes every change of the readable content.
    pub fn watch(&self) -> watch::Receiver<PortfolioContent> {
        self.state.subscribe()
    }

    pub fn projects(&self) -> Vec<Project> {
        self.state.borrow().projects.clone()
    }

    pub fn skills(&self) -> Vec<Skill> {
        self.state.borrow().skills.clone()
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        self.state.borrow().achievements.clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state.borrow().categories.clone()
    }

    pub fn settings(&self) -> Settings {
        self.state.borrow().settings.clone()
    }

    pub fn accent_hex(&self) -> &'static str {
        accent_hex(&self.state.borrow().settings.accent_color)
    }

    //
    // ──────────────────────────────────────────────────────
    // Projects
    // ──────────────────────────────────────────────────────
    //

    /// Assigns a fresh id and prepends the project.
    pub async fn add_project(&self, draft: ProjectDraft) -> Result<Project, ContentStoreError> {
        let _guard = self.begin_write().await?;

        let id = {
            let content = self.state.borrow();
            self.ids.next_unused(|id| content.has_project(id))
        };
        let project = draft.into_project(id);
        let inserted = project.clone();

        self.commit(
            Collection::Projects,
            move |content| {
                content.projects.insert(0, inserted);
                true
            },
            self.persistence
                .write_entity(EntityRecord::Project(project.clone())),
        )
        .await?;

        info!(project_id = %project.id, "Project added");
        Ok(project)
    }

    /// Replaces the project with the same id. Unknown ids are a no-op.
    pub async fn update_project(
        &self,
        project: Project,
    ) -> Result<MutationOutcome, ContentStoreError> {
        let _guard = self.begin_write().await?;
        let record = EntityRecord::Project(project.clone());

        self.commit(
            Collection::Projects,
            move |content| match content.projects.iter_mut().find(|p| p.id == project.id) {
                Some(slot) => {
                    *slot = project;
                    true
                }
                None => false,
            },
            self.persistence.write_entity(record),
        )
        .await
    }

    pub async fn delete_project(&self, id: &str) -> Result<MutationOutcome, ContentStoreError> {
        let _guard = self.begin_write().await?;

        self.commit(
            Collection::Projects,
            |content| remove_where(&mut content.projects, |p| p.id == id),
            self.persistence.delete_entity(Collection::Projects, id),
        )
        .await
    }

    //
    // ──────────────────────────────────────────────────────
    // Skills & categories
    // ──────────────────────────────────────────────────────
    //

    /// Appends a skill. Blank or already known names are a no-op.
    pub async fn add_skill(&self, skill: Skill) -> Result<MutationOutcome, ContentStoreError> {
        let _guard = self.begin_write().await?;
        if skill.name.trim().is_empty() {
            return Ok(MutationOutcome::Unchanged);
        }
        let record = EntityRecord::Skill(skill.clone());

        self.commit(
            Collection::Skills,
            move |content| {
                if content.has_skill(&skill.name) {
                    return false;
                }
                content.skills.push(skill);
                true
            },
            self.persistence.write_entity(record),
        )
        .await
    }

    pub async fn delete_skill(&self, name: &str) -> Result<MutationOutcome, ContentStoreError> {
        let _guard = self.begin_write().await?;

        self.commit(
            Collection::Skills,
            |content| remove_where(&mut content.skills, |s| s.name == name),
            self.persistence.delete_entity(Collection::Skills, name),
        )
        .await
    }

    /// Appends a skill category. Blank or already known keys are a no-op.
    pub async fn add_category(
        &self,
        category: Category,
    ) -> Result<MutationOutcome, ContentStoreError> {
        let _guard = self.begin_write().await?;
        if category.key.trim().is_empty() || category.label.trim().is_empty() {
            return Ok(MutationOutcome::Unchanged);
        }
        let record = EntityRecord::Category(category.clone());

        self.commit(
            Collection::Categories,
            move |content| {
                if content.has_category(&category.key) {
                    return false;
                }
                content.categories.push(category);
                true
            },
            self.persistence.write_entity(record),
        )
        .await
    }

    //
    // ──────────────────────────────────────────────────────
    // Achievements
    // ──────────────────────────────────────────────────────
    //

    pub async fn add_achievement(
        &self,
        draft: AchievementDraft,
    ) -> Result<Achievement, ContentStoreError> {
        let _guard = self.begin_write().await?;

        let id = {
            let content = self.state.borrow();
            self.ids.next_unused(|id| content.has_achievement(id))
        };
        let achievement = draft.into_achievement(id);
        let inserted = achievement.clone();

        self.commit(
            Collection::Achievements,
            move |content| {
                content.achievements.insert(0, inserted);
                true
            },
            self.persistence
                .write_entity(EntityRecord::Achievement(achievement.clone())),
        )
        .await?;

        info!(achievement_id = %achievement.id, "Achievement added");
        Ok(achievement)
    }

    pub async fn update_achievement(
        &self,
        achievement: Achievement,
    ) -> Result<MutationOutcome, ContentStoreError> {
        let _guard = self.begin_write().await?;
        let record = EntityRecord::Achievement(achievement.clone());

        self.commit(
            Collection::Achievements,
            move |content| match content
                .achievements
                .iter_mut()
                .find(|a| a.id == achievement.id)
            {
                Some(slot) => {
                    *slot = achievement;
                    true
                }
                None => false,
            },
            self.persistence.write_entity(record),
        )
        .await
    }

    pub async fn delete_achievement(&self, id: &str) -> Result<MutationOutcome, ContentStoreError> {
        let _guard = self.begin_write().await?;

        self.commit(
            Collection::Achievements,
            |content| remove_where(&mut content.achievements, |a| a.id == id),
            self.persistence.delete_entity(Collection::Achievements, id),
        )
        .await
    }

    //
    // ──────────────────────────────────────────────────────
    // Settings
    // ──────────────────────────────────────────────────────
    //

    /// Stores the embeddable form of a shared video link.
    pub async fn update_video_url(&self, url: &str) -> Result<Settings, ContentStoreError> {
        self.patch_settings(SettingsPatch {
            video_url: Some(normalize_video_url(url)),
            ..Default::default()
        })
        .await
    }

    pub async fn update_resume_links(
        &self,
        view_url: &str,
        download_url: &str,
    ) -> Result<Settings, ContentStoreError> {
        self.patch_settings(SettingsPatch {
            resume_url: Some(view_url.trim().to_string()),
            resume_download_url: Some(download_url.trim().to_string()),
            ..Default::default()
        })
        .await
    }

    pub async fn set_show_video(&self, show: bool) -> Result<Settings, ContentStoreError> {
        self.patch_settings(SettingsPatch {
            show_video: Some(show),
            ..Default::default()
        })
        .await
    }

    pub async fn set_accent_color(&self, token: &str) -> Result<Settings, ContentStoreError> {
        self.patch_settings(SettingsPatch {
            accent_color: Some(token.trim().to_string()),
            ..Default::default()
        })
        .await
    }

    async fn patch_settings(&self, patch: SettingsPatch) -> Result<Settings, ContentStoreError> {
        let _guard = self.begin_write().await?;
        let applied = patch.clone();

        self.commit(
            Collection::Settings,
            move |content| {
                let before = content.settings.clone();
                applied.apply_to(&mut content.settings);
                content.settings != before
            },
            self.persistence.write_settings(patch),
        )
        .await?;

        Ok(self.settings())
    }

    //
    // ──────────────────────────────────────────────────────
    // Write path
    // ──────────────────────────────────────────────────────
    //

    async fn begin_write(&self) -> Result<MutexGuard<'_, ()>, ContentStoreError> {
        let guard = self.write_lock.lock().await;
        if *self.phase.borrow() != StorePhase::Populated {
            return Err(ContentStoreError::NotInitialized);
        }
        Ok(guard)
    }

    /// Applies `mutate` to the readable state, then awaits `persist`.
    ///
    /// `persist` is only polled when `mutate` reported a change. Callers hold
    /// the write lock.
    async fn commit(
        &self,
        collection: Collection,
        mutate: impl FnOnce(&mut PortfolioContent) -> bool,
        persist: BoxFuture<'_, Result<(), PersistenceError>>,
    ) -> Result<MutationOutcome, ContentStoreError> {
        let previous = ContentChange::capture(&self.state.borrow(), collection);

        if !self.state.send_if_modified(mutate) {
            return Ok(MutationOutcome::Unchanged);
        }

        if let Err(err) = persist.await {
            warn!(collection = %collection, error = %err, "Write-through failed; restoring last durable value");
            self.state
                .send_if_modified(|content| previous.apply_to(content));
            return Err(err.into());
        }

        debug!(collection = %collection, "Content change persisted");
        Ok(MutationOutcome::Applied)
    }
}

impl Drop for ContentStore {
    fn drop(&mut self) {
        for handle in self.listeners.get_mut().drain(..) {
            handle.abort();
        }
    }
}

fn content_from(snapshot: &ContentSnapshot) -> PortfolioContent {
    PortfolioContent {
        projects: snapshot.projects.clone(),
        skills: snapshot.skills.clone(),
        achievements: snapshot.achievements.clone(),
        categories: snapshot.categories.clone(),
        settings: snapshot.settings.clone().unwrap_or_else(defaults::settings),
    }
}

fn remove_where<T>(items: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    let before = items.len();
    items.retain(|item| !matches(item));
    items.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::time::Duration;

    use async_trait::async_trait;
    use mockall::mock;

    use crate::modules::content::adapter::outgoing::SharedDocumentService;
    use crate::modules::content::application::ports::incoming::{
        AchievementForm, ProjectForm,
    };
    use crate::modules::content::domain::entities::AchievementCategory;

    mock! {
        pub PersistenceMock {}
        #[async_trait]
        impl ContentPersistence for PersistenceMock {
            async fn load_all(&self) -> Result<ContentSnapshot, PersistenceError>;
            async fn write_entity(&self, record: EntityRecord) -> Result<(), PersistenceError>;
            async fn delete_entity(&self, collection: Collection, key: &str) -> Result<(), PersistenceError>;
            async fn write_settings(&self, patch: SettingsPatch) -> Result<(), PersistenceError>;
            async fn mark_seeded(&self, collection: Collection) -> Result<(), PersistenceError>;
            fn subscribe(&self, collection: Collection) -> ChangeSubscription;
        }
    }

    // ──────────────────────────────────────────────────────────
    // Helpers
    // ──────────────────────────────────────────────────────────

    fn project_draft(title: &str) -> ProjectDraft {
        ProjectDraft::from(ProjectForm {
            title: title.to_string(),
            description: "desc".to_string(),
            technologies: "Rust, Tokio".to_string(),
            ..Default::default()
        })
    }

    fn achievement_draft(title: &str) -> AchievementDraft {
        AchievementDraft::from(AchievementForm {
            title: title.to_string(),
            issuer: "Devpost".to_string(),
            date: "2026".to_string(),
            description: String::new(),
            image: String::new(),
            link: String::new(),
            category: AchievementCategory::Hackathon,
        })
    }

    fn skill(name: &str, category: &str) -> Skill {
        Skill {
            name: name.to_string(),
            category: category.to_string(),
        }
    }

    fn seeded_snapshot() -> ContentSnapshot {
        ContentSnapshot {
            projects: defaults::projects(),
            skills: defaults::skills(),
            achievements: defaults::achievements(),
            categories: defaults::categories(),
            settings: Some(defaults::settings()),
            seeded: Collection::ALL.into_iter().collect(),
        }
    }

    /// Persistence that loads a fully seeded snapshot and has no change feed.
    fn mock_with_snapshot() -> MockPersistenceMock {
        let mut mock = MockPersistenceMock::new();
        mock.expect_subscribe()
            .returning(ChangeSubscription::detached);
        mock.expect_load_all()
            .returning(|| Ok(seeded_snapshot()));
        mock
    }

    async fn populated_store(service: &SharedDocumentService) -> ContentStore {
        let store = ContentStore::new(Arc::new(service.connect()));
        store.initialize().await.unwrap();
        store
    }

    async fn wait_until(
        store: &ContentStore,
        predicate: impl Fn(&PortfolioContent) -> bool,
    ) -> bool {
        let mut rx = store.watch();
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                if predicate(&rx.borrow_and_update()) {
                    return;
                }
                if rx.changed().await.is_err() {
                    return;
                }
            }
        })
        .await
        .is_ok()
            && predicate(&store.snapshot())
    }

    // ──────────────────────────────────────────────────────────
    // Initialization
    // ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn empty_store_is_seeded_with_bundled_defaults() {
        let service = SharedDocumentService::new();
        let store = ContentStore::new(Arc::new(service.connect()));
        assert_eq!(store.phase(), StorePhase::Uninitialized);

        let outcome = store.initialize().await.unwrap();

        assert_eq!(store.phase(), StorePhase::Populated);
        assert_eq!(outcome.seeded.len(), Collection::ALL.len());
        assert_eq!(store.projects(), defaults::projects());
        assert_eq!(store.projects().len(), 3);
        assert_eq!(store.skills(), defaults::skills());

        let durable = service.connect().load_all().await.unwrap();
        assert_eq!(durable.projects, defaults::projects());
        assert_eq!(durable.skills, defaults::skills());
        assert_eq!(durable.categories, defaults::categories());
        assert_eq!(durable.settings, Some(defaults::settings()));
        assert_eq!(
            durable.seeded,
            Collection::ALL.into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[tokio::test]
    async fn emptied_collection_is_not_reseeded() {
        let service = SharedDocumentService::new();
        let first = populated_store(&service).await;
        for project in first.projects() {
            first.delete_project(&project.id).await.unwrap();
        }
        assert!(first.projects().is_empty());

        let second = ContentStore::new(Arc::new(service.connect()));
        let outcome = second.initialize().await.unwrap();

        assert!(outcome.seeded.is_empty());
        assert!(second.projects().is_empty());
        assert_eq!(second.skills(), defaults::skills());
    }

    #[tokio::test]
    async fn legacy_content_without_marker_gets_marked_not_seeded() {
        let mut mock = MockPersistenceMock::new();
        mock.expect_subscribe()
            .returning(ChangeSubscription::detached);
        mock.expect_load_all().returning(|| {
            let mut snapshot = seeded_snapshot();
            snapshot.seeded.clear();
            Ok(snapshot)
        });
        mock.expect_mark_seeded()
            .times(Collection::ALL.len())
            .returning(|_| Ok(()));
        mock.expect_write_entity().never();

        let store = ContentStore::new(Arc::new(mock));
        let outcome = store.initialize().await.unwrap();

        assert!(outcome.seeded.is_empty());
        assert_eq!(store.projects(), defaults::projects());
    }

    #[tokio::test]
    async fn failed_load_serves_defaults_and_can_be_retried() {
        let service = SharedDocumentService::new();
        let store = ContentStore::new(Arc::new(service.connect()));

        service.set_offline(true);
        let result = store.initialize().await;
        assert!(matches!(
            result,
            Err(ContentStoreError::Persistence(PersistenceError::Unavailable(_)))
        ));
        assert_eq!(store.phase(), StorePhase::Uninitialized);
        assert_eq!(store.projects(), defaults::projects());

        service.set_offline(false);
        store.initialize().await.unwrap();
        assert_eq!(store.phase(), StorePhase::Populated);
    }

    #[tokio::test]
    async fn retrying_initialization_populates_once_persistence_recovers() {
        let service = SharedDocumentService::new();
        service.set_offline(true);
        let store = Arc::new(ContentStore::new(Arc::new(service.connect())));

        let retry = tokio::spawn({
            let store = Arc::clone(&store);
            async move {
                store
                    .initialize_with_retry(Duration::from_millis(5), Duration::from_millis(20))
                    .await
            }
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(store.phase(), StorePhase::Uninitialized);
        assert!(!retry.is_finished());

        service.set_offline(false);
        tokio::time::timeout(Duration::from_secs(2), retry)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(store.phase(), StorePhase::Populated);
        assert_eq!(store.active_listeners().await, Collection::ALL.len());

        let other = populated_store(&service).await;
        other.add_skill(skill("Elixir", "programming")).await.unwrap();
        assert!(wait_until(&store, |content| content.has_skill("Elixir")).await);
    }

    #[tokio::test]
    async fn initialize_twice_is_harmless() {
        let service = SharedDocumentService::new();
        let store = populated_store(&service).await;

        let again = store.initialize().await.unwrap();

        assert!(again.seeded.is_empty());
        assert_eq!(store.projects().len(), 3);
    }

    #[tokio::test]
    async fn mutations_before_initialize_are_rejected() {
        let store = ContentStore::new(Arc::new(SharedDocumentService::new().connect()));

        let result = store.add_skill(skill("Rust", "programming")).await;

        assert_eq!(result, Err(ContentStoreError::NotInitialized));
    }

    // ──────────────────────────────────────────────────────────
    // Projects & achievements
    // ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn new_project_gets_unique_id_and_comes_first() {
        let service = SharedDocumentService::new();
        let store = populated_store(&service).await;
        let existing: Vec<String> = store.projects().into_iter().map(|p| p.id).collect();

        let first = store.add_project(project_draft("First")).await.unwrap();
        let second = store.add_project(project_draft("Second")).await.unwrap();

        assert!(!existing.contains(&first.id));
        assert_ne!(first.id, second.id);
        let projects = store.projects();
        assert_eq!(projects[0].id, second.id);
        assert_eq!(projects[1].id, first.id);
        assert_eq!(projects[0].technologies, vec!["Rust", "Tokio"]);

        let durable = service.connect().load_all().await.unwrap();
        assert_eq!(durable.projects[0].id, second.id);
    }

    #[tokio::test]
    async fn update_with_unknown_id_changes_nothing() {
        let service = SharedDocumentService::new();
        let store = populated_store(&service).await;
        let before = store.projects();

        let mut ghost = before[0].clone();
        ghost.id = "missing".to_string();
        ghost.title = "Ghost".to_string();
        let outcome = store.update_project(ghost).await.unwrap();

        assert_eq!(outcome, MutationOutcome::Unchanged);
        assert_eq!(store.projects(), before);
        assert_eq!(service.connect().load_all().await.unwrap().projects, before);
    }

    #[tokio::test]
    async fn update_replaces_record_in_place() {
        let service = SharedDocumentService::new();
        let store = populated_store(&service).await;

        let mut edited = store.projects()[1].clone();
        edited.title = "Renamed".to_string();
        let outcome = store.update_project(edited.clone()).await.unwrap();

        assert!(outcome.is_applied());
        assert_eq!(store.projects()[1], edited);
        assert_eq!(store.projects().len(), 3);
    }

    #[tokio::test]
    async fn deleting_unknown_project_is_a_no_op() {
        let service = SharedDocumentService::new();
        let store = populated_store(&service).await;
        let before = store.projects();

        let outcome = store.delete_project("nonexistent-id").await.unwrap();

        assert_eq!(outcome, MutationOutcome::Unchanged);
        assert_eq!(store.projects(), before);
    }

    #[tokio::test]
    async fn achievements_follow_prepend_and_keyed_updates() {
        let service = SharedDocumentService::new();
        let store = populated_store(&service).await;

        let added = store.add_achievement(achievement_draft("Winner")).await.unwrap();
        assert_eq!(store.achievements()[0], added);

        let mut edited = added.clone();
        edited.category = AchievementCategory::Award;
        assert!(store.update_achievement(edited).await.unwrap().is_applied());
        assert_eq!(store.achievements()[0].category, AchievementCategory::Award);

        assert!(store.delete_achievement(&added.id).await.unwrap().is_applied());
        assert_eq!(store.achievements(), defaults::achievements());
    }

    // ──────────────────────────────────────────────────────────
    // Skills & categories
    // ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn adding_the_same_skill_twice_keeps_one() {
        let service = SharedDocumentService::new();
        let store = populated_store(&service).await;

        let first = store.add_skill(skill("Rust", "programming")).await.unwrap();
        let second = store.add_skill(skill("Rust", "systems")).await.unwrap();

        assert_eq!(first, MutationOutcome::Applied);
        assert_eq!(second, MutationOutcome::Unchanged);
        let rust: Vec<_> = store.skills().into_iter().filter(|s| s.name == "Rust").collect();
        assert_eq!(rust, vec![skill("Rust", "programming")]);
    }

    #[tokio::test]
    async fn blank_skill_and_duplicate_category_are_ignored() {
        let service = SharedDocumentService::new();
        let store = populated_store(&service).await;
        let skills = store.skills();
        let categories = store.categories();

        assert_eq!(
            store.add_skill(skill("   ", "programming")).await.unwrap(),
            MutationOutcome::Unchanged
        );
        let duplicate = Category {
            key: "backend".to_string(),
            label: "Server side".to_string(),
        };
        assert_eq!(
            store.add_category(duplicate).await.unwrap(),
            MutationOutcome::Unchanged
        );

        assert_eq!(store.skills(), skills);
        assert_eq!(store.categories(), categories);
    }

    #[tokio::test]
    async fn skill_with_unknown_category_is_accepted() {
        let service = SharedDocumentService::new();
        let store = populated_store(&service).await;

        store.add_skill(skill("Zig", "systems")).await.unwrap();

        assert_eq!(store.skills().last(), Some(&skill("Zig", "systems")));
    }

    #[tokio::test]
    async fn new_category_is_appended_and_skill_can_be_deleted() {
        let service = SharedDocumentService::new();
        let store = populated_store(&service).await;

        let category = Category {
            key: "systems".to_string(),
            label: "Systems".to_string(),
        };
        assert!(store.add_category(category.clone()).await.unwrap().is_applied());
        assert_eq!(store.categories().last(), Some(&category));

        assert!(store.delete_skill("Docker").await.unwrap().is_applied());
        assert!(!store.snapshot().has_skill("Docker"));
        assert_eq!(
            store.delete_skill("Docker").await.unwrap(),
            MutationOutcome::Unchanged
        );
    }

    // ──────────────────────────────────────────────────────────
    // Settings
    // ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn video_links_are_stored_in_embeddable_form() {
        let service = SharedDocumentService::new();
        let store = populated_store(&service).await;

        let short = store.update_video_url("https://youtu.be/abc123").await.unwrap();
        let watch = store
            .update_video_url("https://www.youtube.com/watch?v=abc123")
            .await
            .unwrap();
        let again = store
            .update_video_url("https://www.youtube.com/embed/abc123")
            .await
            .unwrap();

        assert_eq!(short.video_url, "https://www.youtube.com/embed/abc123");
        assert_eq!(watch.video_url, short.video_url);
        assert_eq!(again.video_url, short.video_url);
        let durable = service.connect().load_all().await.unwrap();
        assert_eq!(
            durable.settings.unwrap().video_url,
            "https://www.youtube.com/embed/abc123"
        );
    }

    #[tokio::test]
    async fn settings_mutations_are_merged() {
        let service = SharedDocumentService::new();
        let store = populated_store(&service).await;

        store
            .update_resume_links("https://cv.example.com/view", "https://cv.example.com/dl")
            .await
            .unwrap();
        store.set_show_video(false).await.unwrap();
        store.set_accent_color("199 89% 48%").await.unwrap();

        let settings = store.settings();
        assert_eq!(settings.resume_url, "https://cv.example.com/view");
        assert_eq!(settings.resume_download_url, "https://cv.example.com/dl");
        assert!(!settings.show_video);
        assert_eq!(store.accent_hex(), "0ea5e9");

        let durable = service.connect().load_all().await.unwrap().settings.unwrap();
        assert_eq!(durable, settings);
    }

    // ──────────────────────────────────────────────────────────
    // Failure handling
    // ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn failed_write_restores_previous_state() {
        let mut mock = mock_with_snapshot();
        mock.expect_write_entity()
            .returning(|_| Err(PersistenceError::Unavailable("network down".to_string())));

        let store = ContentStore::new(Arc::new(mock));
        store.initialize().await.unwrap();
        let before = store.skills();

        let result = store.add_skill(skill("Rust", "programming")).await;

        assert!(matches!(
            result,
            Err(ContentStoreError::Persistence(PersistenceError::Unavailable(_)))
        ));
        assert_eq!(store.skills(), before);
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_record() {
        let mut mock = mock_with_snapshot();
        mock.expect_delete_entity()
            .returning(|_, _| Err(PersistenceError::PermissionDenied("read-only".to_string())));

        let store = ContentStore::new(Arc::new(mock));
        store.initialize().await.unwrap();

        let result = store.delete_project("resume-matching").await;

        assert!(result.is_err());
        assert_eq!(store.projects(), defaults::projects());
    }

    #[tokio::test]
    async fn no_op_mutations_do_not_touch_persistence() {
        let mut mock = mock_with_snapshot();
        mock.expect_write_entity().never();
        mock.expect_delete_entity().never();

        let store = ContentStore::new(Arc::new(mock));
        store.initialize().await.unwrap();

        store.add_skill(skill("Python", "programming")).await.unwrap();
        store.delete_achievement("missing").await.unwrap();
    }

    #[tokio::test]
    async fn failed_seed_keeps_defaults_in_memory() {
        let mut mock = MockPersistenceMock::new();
        mock.expect_subscribe()
            .returning(ChangeSubscription::detached);
        mock.expect_load_all()
            .returning(|| Ok(ContentSnapshot::default()));
        mock.expect_write_entity()
            .returning(|_| Err(PersistenceError::Storage("quota exceeded".to_string())));
        mock.expect_write_settings()
            .returning(|_| Err(PersistenceError::Storage("quota exceeded".to_string())));

        let store = ContentStore::new(Arc::new(mock));
        let result = store.initialize().await;

        assert!(result.is_err());
        assert_eq!(store.phase(), StorePhase::Populated);
        assert_eq!(store.snapshot(), defaults::content());
    }

    // ──────────────────────────────────────────────────────────
    // Propagation
    // ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn achievement_added_by_one_client_reaches_the_other() {
        let service = SharedDocumentService::new();
        let client_a = populated_store(&service).await;
        let client_b = populated_store(&service).await;

        let added = client_a
            .add_achievement(achievement_draft("Cross-tab"))
            .await
            .unwrap();

        let id = added.id.clone();
        assert!(wait_until(&client_b, move |content| content.has_achievement(&id)).await);
        assert_eq!(client_b.achievements()[0], added);
    }

    #[tokio::test]
    async fn settings_and_deletes_propagate_between_clients() {
        let service = SharedDocumentService::new();
        let client_a = populated_store(&service).await;
        let client_b = populated_store(&service).await;

        client_a.set_show_video(false).await.unwrap();
        client_a.delete_skill("Git").await.unwrap();

        assert!(wait_until(&client_b, |content| !content.settings.show_video).await);
        assert!(wait_until(&client_b, |content| !content.has_skill("Git")).await);
    }

    #[tokio::test]
    async fn interleaved_writes_from_two_clients_both_survive() {
        let service = SharedDocumentService::new();
        let client_a = populated_store(&service).await;
        let client_b = populated_store(&service).await;

        client_a.add_skill(skill("FromA", "tools")).await.unwrap();
        client_b.add_skill(skill("FromB", "tools")).await.unwrap();

        let both =
            |content: &PortfolioContent| content.has_skill("FromA") && content.has_skill("FromB");
        assert!(wait_until(&client_a, both).await);
        assert!(wait_until(&client_b, both).await);

        // late queued events must not roll either client back
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(both(&client_a.snapshot()));
        assert!(both(&client_b.snapshot()));
    }

    #[tokio::test]
    async fn burst_of_alternating_writes_converges() {
        let service = SharedDocumentService::new();
        let client_a = populated_store(&service).await;
        let client_b = populated_store(&service).await;

        let names: Vec<String> = (0..20).map(|i| format!("Skill{i}")).collect();
        for (i, name) in names.iter().enumerate() {
            let writer = if i % 2 == 0 { &client_a } else { &client_b };
            writer.add_skill(skill(name, "tools")).await.unwrap();
        }

        let all = |content: &PortfolioContent| names.iter().all(|name| content.has_skill(name));
        assert!(wait_until(&client_a, all).await);
        assert!(wait_until(&client_b, all).await);
        let names_of = |store: &ContentStore| -> BTreeSet<String> {
            store.skills().into_iter().map(|skill| skill.name).collect()
        };
        assert_eq!(names_of(&client_a), names_of(&client_b));
    }

    #[tokio::test]
    async fn watchers_observe_local_mutations() {
        let service = SharedDocumentService::new();
        let store = populated_store(&service).await;
        let mut rx = store.watch();
        rx.borrow_and_update();

        store.add_skill(skill("Rust", "programming")).await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().has_skill("Rust"));
    }

    #[tokio::test]
    async fn shutdown_releases_feed_listeners() {
        let service = SharedDocumentService::new();
        let store = populated_store(&service).await;
        assert_eq!(store.active_listeners().await, Collection::ALL.len());
        assert_eq!(service.listener_count(), Collection::ALL.len());

        store.shutdown().await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(store.active_listeners().await, 0);
        assert_eq!(service.listener_count(), 0);
    }
}
