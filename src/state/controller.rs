// Portfolio controller.
// Drives load -> filter -> classify -> render -> count and owns the card containers.

use tracing::{debug, info, warn};

use crate::cache::SharedStore;
use crate::error::{Result, ValidationError};
use crate::github::Repository;
use crate::portfolio::{Card, CardSlot, Category, classify, render_card, skeletons};

use super::status::StatusMessage;

/// Store key for the persisted GitHub username.
pub const USERNAME_KEY: &str = "githubUsername";
/// Skeleton cards shown per category while loading.
pub const SKELETONS_PER_CATEGORY: usize = 3;

/// Lifecycle of one load pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Rendered,
    Empty,
    Failed,
}

/// A pending readme image lookup for one rendered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageJob {
    pub generation: u64,
    pub category: Category,
    pub index: usize,
    pub owner: String,
    pub repo: String,
    pub branch: Option<String>,
}

/// Called after every successful render pass.
pub type RenderHook = Box<dyn FnMut() + Send>;

pub struct Controller {
    store: SharedStore,
    phase: LoadPhase,
    username: Option<String>,
    containers: [Vec<CardSlot>; 4],
    counts: [usize; 4],
    status: Option<StatusMessage>,
    generation: u64,
    search: String,
    render_hook: Option<RenderHook>,
}

impl Controller {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            phase: LoadPhase::Idle,
            username: None,
            containers: Default::default(),
            counts: [0; 4],
            status: None,
            generation: 0,
            search: String::new(),
            render_hook: None,
        }
    }

    /// Register the hook run after each render.
    pub fn set_render_hook(&mut self, hook: RenderHook) {
        self.render_hook = Some(hook);
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn search_query(&self) -> &str {
        &self.search
    }

    pub fn container(&self, category: Category) -> &[CardSlot] {
        &self.containers[category.index()]
    }

    /// Visible cards in `category`.
    pub fn count(&self, category: Category) -> usize {
        self.counts[category.index()]
    }

    /// Username to auto-load at startup: the override, else the stored value.
    pub fn init(&self, override_username: Option<&str>) -> Option<String> {
        if let Some(username) = override_username.map(str::trim).filter(|u| !u.is_empty()) {
            return Some(username.to_string());
        }
        self.stored_username()
    }

    pub fn stored_username(&self) -> Option<String> {
        let store = self.store.lock().ok()?;
        match store.get(USERNAME_KEY) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(error = %e, "failed to read stored username");
                None
            }
        }
    }

    /// Validate and persist a username. The caller then starts a load.
    pub fn save_username(&mut self, raw: &str) -> std::result::Result<String, ValidationError> {
        let username = raw.trim();
        if username.is_empty() {
            let err = ValidationError::EmptyUsername;
            self.status = Some(StatusMessage::error(err.to_string()));
            return Err(err);
        }

        self.persist_username(Some(username));
        Ok(username.to_string())
    }

    /// Forget the stored username and empty every container.
    pub fn clear_username(&mut self) {
        self.persist_username(None);
        self.username = None;
        self.generation += 1;
        self.phase = LoadPhase::Idle;
        self.clear_containers();
        self.status = Some(StatusMessage::info("GitHub username cleared."));
    }

    fn persist_username(&self, username: Option<&str>) {
        let result = match self.store.lock() {
            Ok(mut store) => match username {
                Some(u) => store.set(USERNAME_KEY, u),
                None => store.remove(USERNAME_KEY),
            },
            Err(e) => {
                warn!(error = %e, "store lock poisoned");
                return;
            }
        };
        if let Err(e) = result {
            warn!(error = %e, "failed to persist username");
        }
    }

    /// Enter `Loading`: skeletons in every container. Returns the new generation.
    pub fn begin_load(&mut self, username: &str) -> u64 {
        self.generation += 1;
        self.username = Some(username.to_string());
        self.phase = LoadPhase::Loading;
        self.status = Some(StatusMessage::info("Loading projects from GitHub..."));

        self.clear_containers();
        for container in &mut self.containers {
            container.extend(skeletons(SKELETONS_PER_CATEGORY));
        }

        self.generation
    }

    /// Apply a fetch result. Stale generations are ignored.
    ///
    /// Returns one image job per rendered card.
    pub fn finish_load(
        &mut self,
        generation: u64,
        result: Result<Vec<Repository>>,
    ) -> Vec<ImageJob> {
        if generation != self.generation {
            info!(
                generation,
                current = self.generation,
                "dropping stale repository result"
            );
            return Vec::new();
        }

        let repos = match result {
            Ok(repos) => repos,
            Err(e) => {
                warn!(error = %e, "repository load failed");
                self.phase = LoadPhase::Failed;
                self.clear_containers();
                self.status = Some(StatusMessage::error(e.user_message()));
                return Vec::new();
            }
        };

        let repos: Vec<Repository> = repos.into_iter().filter(|r| r.is_displayable()).collect();
        if repos.is_empty() {
            self.phase = LoadPhase::Empty;
            self.clear_containers();
            self.status = Some(StatusMessage::error(
                "No public repositories found for this user.",
            ));
            return Vec::new();
        }

        self.clear_containers();
        let mut jobs = Vec::with_capacity(repos.len());
        for repo in &repos {
            let category = classify(repo);
            debug!(repo = %repo.name, category = category.id(), "classified repository");
            let container = &mut self.containers[category.index()];
            jobs.push(ImageJob {
                generation,
                category,
                index: container.len(),
                owner: repo.owner.login.clone(),
                repo: repo.name.clone(),
                branch: repo.default_branch.clone(),
            });
            container.push(CardSlot::Card(render_card(repo, category)));
        }

        self.phase = LoadPhase::Rendered;
        self.apply_search();
        let username = self.username.as_deref().unwrap_or_default();
        self.status = Some(StatusMessage::info(format!(
            "Loaded {} public repos for {}.",
            repos.len(),
            username
        )));
        info!(username, count = repos.len(), "rendered portfolio");

        if let Some(hook) = self.render_hook.as_mut() {
            hook();
        }

        jobs
    }

    /// Fetch and render in one step. The app splits this across a spawned task.
    #[cfg(test)]
    pub async fn load(
        &mut self,
        fetcher: &crate::portfolio::RepoFetcher,
        username: &str,
    ) -> Vec<ImageJob> {
        let generation = self.begin_load(username);
        let result = fetcher.fetch(username).await;
        self.finish_load(generation, result)
    }

    /// Swap in a readme image if the job still targets the current render.
    pub fn apply_readme_image(&mut self, job: &ImageJob, url: &str) -> bool {
        if job.generation != self.generation {
            return false;
        }

        let card = self.containers[job.category.index()]
            .get_mut(job.index)
            .and_then(CardSlot::card_mut)
            .filter(|card| card.repo_name == job.repo && card.owner == job.owner);

        match card {
            Some(card) => {
                card.thumbnail = url.to_string();
                true
            }
            None => false,
        }
    }

    /// Filter rendered cards by a case-insensitive substring and recount.
    pub fn set_search(&mut self, query: &str) {
        self.search = query.to_string();
        self.apply_search();
    }

    fn apply_search(&mut self) {
        let query = self.search.trim().to_lowercase();
        for category in Category::ALL {
            let mut visible = 0;
            for card in self.containers[category.index()]
                .iter_mut()
                .filter_map(CardSlot::card_mut)
            {
                card.visible = card.matches(&query);
                if card.visible {
                    visible += 1;
                }
            }
            self.counts[category.index()] = visible;
        }
    }

    /// Visible cards in `category`, in render order.
    pub fn visible_cards(&self, category: Category) -> impl Iterator<Item = &Card> {
        self.container(category)
            .iter()
            .filter_map(CardSlot::card)
            .filter(|card| card.visible)
    }

    fn clear_containers(&mut self) {
        for container in &mut self.containers {
            container.clear();
        }
        self.counts = [0; 4];
    }
}
