//! Team groups dialog over an in-memory service.
//!
//! Run with `cargo run` from this directory. Set `RUST_LOG=debug` to see the
//! modal's fetch log on stderr, e.g. `RUST_LOG=debug cargo run 2>groups.log`.

use async_trait::async_trait;
use bubbletea_list_modal::group::{
    Group, GroupListModal, GroupPage, GroupService, GroupServiceError, ModalIdentifier,
    SyncableType, Team,
};
use bubbletea_list_modal::modal::{ClosedMsg, Model as ListModal};
use bubbletea_rs::{Cmd, KeyMsg, Model, Msg, Program};
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

const NAMES: &[&str] = &[
    "backend", "frontend", "design", "platform", "security", "support", "marketing", "sales",
    "finance", "legal", "mobile", "data",
];

/// Groups kept in memory, served with a small artificial latency.
struct MemoryGroups {
    groups: Mutex<Vec<Group>>,
    latency: Duration,
}

impl MemoryGroups {
    fn new(count: usize) -> Self {
        let groups = (0..count)
            .map(|i| {
                let name = format!("{}-{}", NAMES[i % NAMES.len()], i / NAMES.len() + 1);
                Group::new(format!("g{}", i), name, (i * 7) % 40)
            })
            .collect();
        Self {
            groups: Mutex::new(groups),
            latency: Duration::from_millis(300),
        }
    }
}

#[async_trait]
impl GroupService for MemoryGroups {
    async fn get_groups_associated_to_team(
        &self,
        _team_id: &str,
        search_term: &str,
        page: usize,
        per_page: usize,
    ) -> Result<GroupPage, GroupServiceError> {
        tokio::time::sleep(self.latency).await;
        let groups = self
            .groups
            .lock()
            .map_err(|e| GroupServiceError::Request(e.to_string()))?;
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
    ) -> Result<(), GroupServiceError> {
        tokio::time::sleep(self.latency).await;
        info!(group_id, syncable_id, ?syncable_type, "unlink");
        let mut groups = self
            .groups
            .lock()
            .map_err(|e| GroupServiceError::Request(e.to_string()))?;
        let before = groups.len();
        groups.retain(|g| g.id != group_id);
        if groups.len() == before {
            return Err(GroupServiceError::NotFound(group_id.to_string()));
        }
        Ok(())
    }

    fn close_modal(&self, modal: ModalIdentifier) {
        info!(?modal, "close requested");
    }
}

struct App {
    modal: ListModal<Group>,
}

impl Model for App {
    fn init() -> (Self, Option<Cmd>) {
        let service = Arc::new(MemoryGroups::new(134));
        let team = Team::new("team-1", "Engineering");
        let mut modal = GroupListModal::new(team, service)
            .with_add_groups(|| {
                info!("add groups pressed");
                None
            })
            .build()
            .with_size(72, 24);
        let cmd = modal.init();
        (Self { modal }, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if msg.downcast_ref::<ClosedMsg>().is_some() {
            return Some(bubbletea_rs::quit());
        }
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            if key.key == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Some(bubbletea_rs::quit());
            }
        }
        self.modal.update(msg)
    }

    fn view(&self) -> String {
        self.modal.view()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The alternate screen owns stdout, so logs only go to stderr on request.
    if std::env::var_os("RUST_LOG").is_some() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_ansi(false)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    let program = Program::<App>::builder().alt_screen(true).build()?;
    program.run().await?;
    Ok(())
}
