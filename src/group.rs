//! Team group management built on the list modal.
//!
//! [`GroupListModal`] lists the groups linked to a team, searches them and
//! lets the user unlink one. All data access goes through a [`GroupService`];
//! this module only marshals arguments between the modal and that service.
//!
//! ```rust,no_run
//! use bubbletea_list_modal::group::{GroupListModal, GroupService, Team};
//! use std::sync::Arc;
//!
//! fn open(service: Arc<dyn GroupService>) {
//!     let team = Team::new("team-1", "Engineering");
//!     let mut modal = GroupListModal::new(team, service).build();
//!     let _cmd = modal.init();
//! }
//! ```

use crate::error::{LoadError, Result};
use crate::key;
use crate::modal::{
    self, format_number, DefaultRowStyles, FetchResult, Item, Loader, Model, PageChange, Refresh,
    RowContext, RowDelegate, TitleAction, DEFAULT_PAGE_SIZE,
};
use async_trait::async_trait;
use bubbletea_rs::{Cmd, KeyMsg};
use crossterm::event::KeyCode;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Placeholder avatar drawn in front of each group.
pub const GROUP_AVATAR: &str = "◉";

/// Text of the per-row remove button.
pub const REMOVE_BUTTON_TEXT: &str = "Remove Group";

/// Text of the optional title button.
pub const ADD_GROUPS_TEXT: &str = "Add Groups";

/// The team whose groups are managed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    /// Team id.
    pub id: String,
    /// Name shown in the title.
    pub display_name: String,
}

impl Team {
    /// Creates a team.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// A group linked to the team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Group id.
    pub id: String,
    /// Name shown in the row.
    pub display_name: String,
    /// Number of members.
    pub member_count: usize,
}

impl Group {
    /// Creates a group.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, member_count: usize) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            member_count,
        }
    }
}

impl Item for Group {
    fn key(&self) -> String {
        self.id.clone()
    }
}

/// One page of groups as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupPage {
    /// Groups on the page.
    pub groups: Vec<Group>,
    /// Groups matching the search across all pages.
    pub total_group_count: usize,
}

impl From<GroupPage> for FetchResult<Group> {
    fn from(page: GroupPage) -> Self {
        FetchResult::new(page.groups, page.total_group_count)
    }
}

/// Kind of object a group is synced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncableType {
    /// A team.
    Team,
    /// A channel.
    Channel,
}

/// Modals the host application can be asked to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalIdentifier {
    /// The team groups dialog.
    ManageTeamGroups,
}

/// Errors reported by a [`GroupService`].
#[derive(Error, Debug)]
pub enum GroupServiceError {
    /// The request did not complete.
    #[error("group request failed: {0}")]
    Request(String),

    /// The group does not exist or is not linked.
    #[error("group {0} not found")]
    NotFound(String),
}

impl From<GroupServiceError> for LoadError {
    fn from(err: GroupServiceError) -> Self {
        LoadError::service(err)
    }
}

/// Group data access used by the modal.
#[async_trait]
pub trait GroupService: Send + Sync {
    /// Page `page` of the groups linked to `team_id` that match `search_term`.
    async fn get_groups_associated_to_team(
        &self,
        team_id: &str,
        search_term: &str,
        page: usize,
        per_page: usize,
    ) -> std::result::Result<GroupPage, GroupServiceError>;

    /// Removes the link between a group and a team or channel.
    async fn unlink_group_syncable(
        &self,
        group_id: &str,
        syncable_id: &str,
        syncable_type: SyncableType,
    ) -> std::result::Result<(), GroupServiceError>;

    /// Tells the host application the modal is gone.
    fn close_modal(&self, modal: ModalIdentifier);
}

/// Loads a team's groups a page at a time.
pub struct GroupLoader {
    team_id: String,
    per_page: usize,
    service: Arc<dyn GroupService>,
}

impl GroupLoader {
    /// Creates a loader fetching [`DEFAULT_PAGE_SIZE`] groups per page.
    pub fn new(team_id: impl Into<String>, service: Arc<dyn GroupService>) -> Self {
        Self {
            team_id: team_id.into(),
            per_page: DEFAULT_PAGE_SIZE,
            service,
        }
    }

    /// Sets how many groups are requested per page.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    async fn fetch(&self, page: usize, search_term: &str) -> Result<FetchResult<Group>> {
        let page = self
            .service
            .get_groups_associated_to_team(&self.team_id, search_term, page, self.per_page)
            .await?;
        Ok(page.into())
    }
}

#[async_trait]
impl Loader<Group> for GroupLoader {
    async fn initial_load(&self) -> Result<FetchResult<Group>> {
        self.fetch(0, "").await
    }

    async fn on_page_change(&self, page: usize, search_term: &str) -> Result<PageChange<Group>> {
        Ok(PageChange::Full(self.fetch(page, search_term).await?))
    }

    async fn on_search_input(&self, term: &str) -> Result<FetchResult<Group>> {
        self.fetch(0, term).await
    }
}

/// Styles for group rows.
#[derive(Debug, Clone)]
pub struct GroupRowStyles {
    /// Row container, selected and not.
    pub row: DefaultRowStyles,
    /// Avatar glyph.
    pub avatar: Style,
    /// `N members` text.
    pub members: Style,
    /// Remove button.
    pub button: Style,
}

impl Default for GroupRowStyles {
    fn default() -> Self {
        Self {
            row: DefaultRowStyles::default(),
            avatar: Style::new().foreground(Color::from("#166de0")),
            members: Style::new().foreground(AdaptiveColor {
                Light: "#9B9B9B",
                Dark: "#777777",
            }),
            button: Style::new().foreground(AdaptiveColor {
                Light: "#d24b4e",
                Dark: "#f0686b",
            }),
        }
    }
}

/// Draws one group per row and unlinks the selected group on `x`/`delete`.
pub struct GroupRowDelegate {
    team_id: String,
    service: Arc<dyn GroupService>,
    /// Row styles.
    pub styles: GroupRowStyles,
    /// Key that removes the selected group.
    pub remove: key::Binding,
}

impl GroupRowDelegate {
    /// Creates a delegate unlinking groups from `team_id`.
    pub fn new(team_id: impl Into<String>, service: Arc<dyn GroupService>) -> Self {
        Self {
            team_id: team_id.into(),
            service,
            styles: GroupRowStyles::default(),
            remove: key::Binding::new(vec![KeyCode::Char('x'), KeyCode::Delete])
                .with_help("x", "remove group"),
        }
    }
}

/// `1 member`, `12 members`, `1,024 members`.
pub fn member_label(count: usize) -> String {
    let noun = if count == 1 { "member" } else { "members" };
    format!("{} {}", format_number(count), noun)
}

impl RowDelegate<Group> for GroupRowDelegate {
    fn render(&self, group: &Group, ctx: &RowContext<'_>) -> String {
        let button = format!("[{}]", REMOVE_BUTTON_TEXT);
        let members = format!(" - {}", member_label(group.member_count));
        // Avatar, its trailing space, the gap before the button and the row's
        // left padding.
        let fixed = lipgloss::width_visible(GROUP_AVATAR)
            + 1
            + lipgloss::width_visible(&members)
            + 2
            + lipgloss::width_visible(&button)
            + 2;
        let name = if ctx.width == 0 {
            group.display_name.clone()
        } else {
            modal::delegate::truncate(&group.display_name, ctx.width.saturating_sub(fixed).max(1))
        };

        let line = format!(
            "{} {}{}  {}",
            self.styles.avatar.render(GROUP_AVATAR),
            name,
            self.styles.members.render(&members),
            self.styles.button.render(&button)
        );
        if ctx.selected {
            self.styles.row.selected.render(&line)
        } else {
            self.styles.row.normal.render(&line)
        }
    }

    fn update(&self, msg: &KeyMsg, group: &Group, refresh: Refresh) -> Option<Cmd> {
        if !self.remove.matches(msg) {
            return None;
        }
        debug!(group = %group.id, team = %self.team_id, "unlinking group");
        let service = Arc::clone(&self.service);
        let group_id = group.id.clone();
        let team_id = self.team_id.clone();
        Some(refresh.after(async move {
            service
                .unlink_group_syncable(&group_id, &team_id, SyncableType::Team)
                .await
        }))
    }

    fn short_help(&self) -> Vec<key::Binding> {
        vec![self.remove.clone()]
    }
}

/// Builder for the team groups dialog.
pub struct GroupListModal {
    team: Team,
    service: Arc<dyn GroupService>,
    add_groups: Option<TitleAction>,
    page_size: usize,
}

impl GroupListModal {
    /// Starts a dialog for `team`.
    pub fn new(team: Team, service: Arc<dyn GroupService>) -> Self {
        Self {
            team,
            service,
            add_groups: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the page size used by both the loader and the modal.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Adds the "Add Groups" title button.
    pub fn with_add_groups<F>(mut self, action: F) -> Self
    where
        F: Fn() -> Option<Cmd> + Send + Sync + 'static,
    {
        self.add_groups = Some(Box::new(action));
        self
    }

    /// Builds the configured modal.
    ///
    /// Closing it asks the service to close [`ModalIdentifier::ManageTeamGroups`].
    /// The page size is shared with the loader, so change it through
    /// [`GroupListModal::with_page_size`] rather than on the returned modal.
    pub fn build(self) -> Model<Group> {
        let loader = GroupLoader::new(self.team.id.clone(), Arc::clone(&self.service))
            .with_per_page(self.page_size);
        let delegate = GroupRowDelegate::new(self.team.id.clone(), Arc::clone(&self.service));
        let service = self.service;

        let modal = Model::new(loader, delegate)
            .with_title(format!("{} Groups", self.team.display_name))
            .with_search_placeholder("Search groups")
            .with_page_size(self.page_size)
            .with_on_close(move || service.close_modal(ModalIdentifier::ManageTeamGroups));

        match self.add_groups {
            Some(action) => modal.with_title_button(ADD_GROUPS_TEXT, action),
            None => modal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubbletea_rs::Msg;
    use crossterm::event::KeyModifiers;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct MockService {
        groups: Mutex<Vec<Group>>,
        calls: Mutex<Vec<String>>,
        closed: AtomicUsize,
        fail_unlink: bool,
    }

    impl MockService {
        fn with_groups(groups: Vec<Group>) -> Self {
            Self {
                groups: Mutex::new(groups),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GroupService for MockService {
        async fn get_groups_associated_to_team(
            &self,
            team_id: &str,
            search_term: &str,
            page: usize,
            per_page: usize,
        ) -> std::result::Result<GroupPage, GroupServiceError> {
            self.calls.lock().unwrap().push(format!(
                "get {} {:?} {} {}",
                team_id, search_term, page, per_page
            ));
            let groups = self.groups.lock().unwrap();
            let matching: Vec<Group> = groups
                .iter()
                .filter(|g| g.display_name.contains(search_term))
                .cloned()
                .collect();
            Ok(GroupPage {
                groups: matching
                    .iter()
                    .skip(page * per_page)
                    .take(per_page)
                    .cloned()
                    .collect(),
                total_group_count: matching.len(),
            })
        }

        async fn unlink_group_syncable(
            &self,
            group_id: &str,
            syncable_id: &str,
            syncable_type: SyncableType,
        ) -> std::result::Result<(), GroupServiceError> {
            self.calls.lock().unwrap().push(format!(
                "unlink {} {} {:?}",
                group_id, syncable_id, syncable_type
            ));
            if self.fail_unlink {
                return Err(GroupServiceError::Request("forbidden".to_string()));
            }
            let mut groups = self.groups.lock().unwrap();
            let before = groups.len();
            groups.retain(|g| g.id != group_id);
            if groups.len() == before {
                return Err(GroupServiceError::NotFound(group_id.to_string()));
            }
            Ok(())
        }

        fn close_modal(&self, modal: ModalIdentifier) {
            assert_eq!(modal, ModalIdentifier::ManageTeamGroups);
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn team() -> Team {
        Team::new("team1", "Engineering")
    }

    fn sample_groups() -> Vec<Group> {
        vec![
            Group::new("g1", "backend", 12),
            Group::new("g2", "frontend", 1),
            Group::new("g3", "design", 0),
        ]
    }

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    async fn run(modal: &mut Model<Group>, cmd: Option<Cmd>) {
        let mut next = cmd;
        while let Some(cmd) = next.take() {
            match cmd.await {
                Some(msg) => next = modal.update(msg),
                None => break,
            }
        }
    }

    async fn mounted(service: Arc<MockService>) -> Model<Group> {
        let mut modal = GroupListModal::new(team(), service).build();
        let cmd = modal.initial_load_cmd();
        run(&mut modal, Some(cmd)).await;
        modal
    }

    #[test]
    fn test_member_label() {
        assert_eq!(member_label(0), "0 members");
        assert_eq!(member_label(1), "1 member");
        assert_eq!(member_label(1024), "1,024 members");
    }

    #[test]
    fn test_service_error_is_a_load_error() {
        let err: LoadError = GroupServiceError::Request("timeout".to_string()).into();
        assert_eq!(err.to_string(), "loader rejected: group request failed: timeout");
    }

    #[tokio::test]
    async fn test_loader_marshals_arguments() {
        let service = Arc::new(MockService::with_groups(sample_groups()));
        let loader = GroupLoader::new("team1", service.clone());

        let first = loader.initial_load().await.unwrap();
        assert_eq!(first.total_count, 3);
        loader.on_search_input("end").await.unwrap();
        let page = loader.on_page_change(2, "end").await.unwrap();
        assert!(matches!(page, PageChange::Full(ref r) if r.items.is_empty() && r.total_count == 2));

        assert_eq!(
            service.calls(),
            vec![
                "get team1 \"\" 0 50",
                "get team1 \"end\" 0 50",
                "get team1 \"end\" 2 50",
            ]
        );
    }

    #[test]
    fn test_row_render() {
        let service = Arc::new(MockService::default());
        let delegate = GroupRowDelegate::new("team1", service);
        let ctx = RowContext {
            index: 0,
            selected: false,
            width: 0,
            search_term: "",
        };

        let row = lipgloss::strip_ansi(&delegate.render(&Group::new("g1", "backend", 12), &ctx));
        assert_eq!(row.trim(), "◉ backend - 12 members  [Remove Group]");

        let row = lipgloss::strip_ansi(&delegate.render(&Group::new("g2", "frontend", 1), &ctx));
        assert!(row.contains("frontend - 1 member  "));
    }

    #[test]
    fn test_row_render_truncates_long_names() {
        let service = Arc::new(MockService::default());
        let delegate = GroupRowDelegate::new("team1", service);
        let ctx = RowContext {
            index: 0,
            selected: false,
            width: 44,
            search_term: "",
        };
        let group = Group::new("g1", "platform-infrastructure-reliability", 3);
        let row = lipgloss::strip_ansi(&delegate.render(&group, &ctx));
        assert!(row.contains('…'));
        assert!(row.contains("[Remove Group]"));
    }

    #[tokio::test]
    async fn test_modal_configuration() {
        let service = Arc::new(MockService::with_groups(sample_groups()));
        let modal = mounted(service).await;

        assert_eq!(modal.title(), "Engineering Groups");
        assert_eq!(modal.items().len(), 3);
        let view = lipgloss::strip_ansi(&modal.view());
        assert!(view.contains("Engineering Groups"));
        assert!(view.contains("backend - 12 members"));
        assert!(view.contains("1 - 3 of 3 total"));
        assert!(view.contains("x remove group"));
        assert!(!view.contains(ADD_GROUPS_TEXT));
    }

    #[tokio::test]
    async fn test_page_size_reaches_loader_and_modal() {
        let service = Arc::new(MockService::with_groups(sample_groups()));
        let mut modal = GroupListModal::new(team(), service.clone())
            .with_page_size(2)
            .build();
        let cmd = modal.initial_load_cmd();
        run(&mut modal, Some(cmd)).await;
        assert_eq!(modal.page_size(), 2);
        assert_eq!(modal.items().len(), 2);
        assert!(modal.has_next_page());

        let cmd = modal.next_page();
        run(&mut modal, cmd).await;
        assert_eq!(modal.items(), &[Group::new("g3", "design", 0)]);
        assert_eq!(modal.range_label(), "3 - 3 of 3 total");
        assert_eq!(
            service.calls(),
            vec!["get team1 \"\" 0 2", "get team1 \"\" 1 2"]
        );
    }

    #[tokio::test]
    async fn test_search_placeholder() {
        let service = Arc::new(MockService::default());
        let modal = GroupListModal::new(team(), service).build();
        assert!(lipgloss::strip_ansi(&modal.view()).contains("Search groups"));
    }

    #[tokio::test]
    async fn test_remove_unlinks_then_refreshes() {
        let service = Arc::new(MockService::with_groups(sample_groups()));
        let mut modal = mounted(service.clone()).await;

        let cmd = modal.update(key(KeyCode::Char('x')));
        assert!(cmd.is_some());
        run(&mut modal, cmd).await;

        let calls = service.calls();
        assert_eq!(calls[1], "unlink g1 team1 Team");
        assert_eq!(calls[2], "get team1 \"\" 0 50");
        assert_eq!(modal.items().len(), 2);
        assert_eq!(modal.total_count(), 2);
        assert!(modal.items().iter().all(|g| g.id != "g1"));
    }

    #[tokio::test]
    async fn test_remove_keeps_search_term() {
        let service = Arc::new(MockService::with_groups(sample_groups()));
        let mut modal = mounted(service.clone())
            .await
            .with_search_debounce(Duration::ZERO);
        let cmd = modal.search("end");
        run(&mut modal, cmd).await;
        assert_eq!(modal.items().len(), 2);

        let cmd = modal.update(key(KeyCode::Delete));
        run(&mut modal, cmd).await;
        assert_eq!(service.calls().last().map(String::as_str), Some("get team1 \"end\" 0 50"));
        assert_eq!(modal.items(), &[Group::new("g2", "frontend", 1)]);
    }

    #[tokio::test]
    async fn test_failed_unlink_does_not_refresh() {
        let service = Arc::new(MockService {
            groups: Mutex::new(sample_groups()),
            fail_unlink: true,
            ..MockService::default()
        });
        let mut modal = mounted(service.clone()).await;

        let cmd = modal.update(key(KeyCode::Char('x')));
        run(&mut modal, cmd).await;

        assert_eq!(service.calls().len(), 2);
        assert_eq!(modal.items().len(), 3);
        assert!(!modal.is_loading());
    }

    #[tokio::test]
    async fn test_close_calls_close_modal_once() {
        let service = Arc::new(MockService::with_groups(sample_groups()));
        let mut modal = mounted(service.clone()).await;

        let cmd = modal.update(key(KeyCode::Esc));
        run(&mut modal, cmd).await;

        assert!(modal.is_closed());
        assert_eq!(service.closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_add_groups_button() {
        let service = Arc::new(MockService::with_groups(sample_groups()));
        let pressed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&pressed);
        let mut modal = GroupListModal::new(team(), service)
            .with_add_groups(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                None
            })
            .build();
        let cmd = modal.initial_load_cmd();
        run(&mut modal, Some(cmd)).await;

        assert!(lipgloss::strip_ansi(&modal.view()).contains(ADD_GROUPS_TEXT));
        modal.update(key(KeyCode::Char('a')));
        assert_eq!(pressed.load(Ordering::SeqCst), 1);
    }
}
