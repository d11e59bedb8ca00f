//! Dashboard controller: owns the view state and the form draft, and turns user
//! actions into team API calls.
//!
//! Every mutation is followed by exactly one call to the registered render callback.
//! After a successful create, update or delete the whole list is fetched again; the
//! controller never patches its cached copy in place.

use crate::client::TeamApi;
use crate::error::{Result, TeamAdminError};
use crate::types::{Team, TeamDraft, TeamId};

pub const FETCH_FAILED: &str = "Failed to fetch teams";
pub const SAVE_FAILED: &str = "Failed to save team";
pub const DELETE_FAILED: &str = "Failed to delete team";
pub const REQUIRED_FIELDS: &str = "Name and region are required";

/// Mutually exclusive rendering modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    /// Terminal for the list: the table is not shown.
    Error(String),
    Ready(Ready),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ready {
    pub teams: Vec<Team>,
    pub form_visible: bool,
    pub edit_target: Option<TeamId>,
    /// Save/delete failure shown next to the table.
    pub notice: Option<String>,
}

pub type RenderFn = Box<dyn FnMut(&ViewState, &TeamDraft)>;

pub struct Dashboard<A> {
    api: A,
    view: ViewState,
    draft: TeamDraft,
    on_change: Option<RenderFn>,
}

impl<A: TeamApi> Dashboard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            view: ViewState::Loading,
            draft: TeamDraft::default(),
            on_change: None,
        }
    }

    /// Register the callback invoked after every state change.
    pub fn on_change(&mut self, render: impl FnMut(&ViewState, &TeamDraft) + 'static) {
        self.on_change = Some(Box::new(render));
    }

    pub fn ready(&self) -> Option<&Ready> {
        match &self.view {
            ViewState::Ready(ready) => Some(ready),
            _ => None,
        }
    }

    /// Team shown at a 1-based table row.
    pub fn team_at(&self, row: usize) -> Result<Team> {
        self.ready()
            .and_then(|ready| row.checked_sub(1).and_then(|i| ready.teams.get(i)))
            .cloned()
            .ok_or(TeamAdminError::UnknownRow(row))
    }

    fn notify(&mut self) {
        if let Some(render) = self.on_change.as_mut() {
            render(&self.view, &self.draft);
        }
    }

    fn set_notice(&mut self, message: &str) {
        let ViewState::Ready(ready) = &mut self.view else {
            return;
        };
        ready.notice = Some(message.to_string());
        self.notify();
    }

    pub async fn load(&mut self) {
        if !matches!(self.view, ViewState::Ready(_)) {
            self.view = ViewState::Loading;
            self.notify();
        }

        match self.api.list().await {
            Ok(teams) => {
                tracing::debug!("Loaded {} teams", teams.len());
                let previous = match std::mem::replace(&mut self.view, ViewState::Loading) {
                    ViewState::Ready(ready) => ready,
                    _ => Ready::default(),
                };
                self.view = ViewState::Ready(Ready {
                    teams,
                    notice: None,
                    ..previous
                });
            }
            Err(e) => {
                tracing::warn!(transport = e.is_transport(), "{FETCH_FAILED}: {e}");
                self.view = ViewState::Error(FETCH_FAILED.to_string());
            }
        }

        self.notify();
    }

    /// Create the draft, or update the edit target with it, then reload.
    pub async fn submit(&mut self) {
        let Some(ready) = self.ready() else {
            tracing::debug!("Ignoring submit outside of ready state");
            return;
        };
        let target = ready.edit_target.clone();

        if let Some(field) = self.draft.missing_field() {
            tracing::debug!("Rejecting submit, {field} is blank");
            self.set_notice(REQUIRED_FIELDS);
            return;
        }

        let result = match &target {
            Some(id) => self.api.update(id, &self.draft).await,
            None => self.api.create(&self.draft).await,
        };

        match result {
            Ok(()) => {
                tracing::debug!("Saved team (edit target: {:?})", target);
                self.draft.clear();
                if let ViewState::Ready(ready) = &mut self.view {
                    ready.edit_target = None;
                    ready.form_visible = false;
                }
                self.notify();
                self.load().await;
            }
            Err(e) => {
                tracing::warn!(transport = e.is_transport(), "{SAVE_FAILED}: {e}");
                self.set_notice(SAVE_FAILED);
            }
        }
    }

    pub async fn delete(&mut self, id: &TeamId) {
        if self.ready().is_none() {
            tracing::debug!("Ignoring delete outside of ready state");
            return;
        }

        match self.api.delete(id).await {
            Ok(()) => {
                tracing::debug!("Deleted team {id}");
                self.load().await;
            }
            Err(e) => {
                tracing::warn!(transport = e.is_transport(), "{DELETE_FAILED}: {e}");
                self.set_notice(DELETE_FAILED);
            }
        }
    }

    pub fn begin_edit(&mut self, team: &Team) {
        let ViewState::Ready(ready) = &mut self.view else {
            return;
        };
        ready.edit_target = Some(team.id.clone());
        ready.form_visible = true;
        self.draft = TeamDraft::from(team);
        self.notify();
    }

    pub fn begin_create(&mut self) {
        let ViewState::Ready(ready) = &mut self.view else {
            return;
        };
        ready.edit_target = None;
        ready.form_visible = true;
        self.draft.clear();
        self.notify();
    }

    /// Hide the form. The draft and edit target are kept as they are.
    pub fn cancel_form(&mut self) {
        let ViewState::Ready(ready) = &mut self.view else {
            return;
        };
        ready.form_visible = false;
        self.notify();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.notify();
    }

    pub fn set_region(&mut self, region: impl Into<String>) {
        self.draft.region = region.into();
        self.notify();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
        self.notify();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::client::MockTeamApi;

    fn team(id: &str, name: &str, region: &str) -> Team {
        Team {
            id: TeamId::new(id),
            name: name.to_string(),
            region: region.to_string(),
            description: format!("{name} description"),
        }
    }

    fn roster() -> Vec<Team> {
        vec![team("3", "Falcons", "EU"), team("5", "Otters", "NA")]
    }

    fn api_error() -> TeamAdminError {
        TeamAdminError::Api {
            status: 500,
            message: "Internal Server Error".to_string(),
        }
    }

    /// Mock whose list() always returns the roster, and counts calls.
    fn listing_mock(calls: Arc<AtomicUsize>) -> MockTeamApi {
        let mut mock = MockTeamApi::new();
        mock.expect_list().returning(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async { Ok(roster()) })
        });
        mock
    }

    async fn loaded(mock: MockTeamApi) -> Dashboard<MockTeamApi> {
        let mut dashboard = Dashboard::new(mock);
        dashboard.load().await;
        dashboard
    }

    #[tokio::test]
    async fn load_success_is_ready_in_received_order() {
        let dashboard = loaded(listing_mock(Arc::default())).await;

        let ready = dashboard.ready().unwrap();
        let names: Vec<&str> = ready.teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Falcons", "Otters"]);
        assert!(!ready.form_visible);
        assert!(ready.edit_target.is_none());
    }

    #[tokio::test]
    async fn load_http_failure_is_error_state() {
        let mut mock = MockTeamApi::new();
        mock.expect_list()
            .returning(|| Box::pin(async { Err(api_error()) }));

        let dashboard = loaded(mock).await;

        assert_eq!(&dashboard.view, &ViewState::Error(FETCH_FAILED.to_string()));
        assert!(dashboard.ready().is_none());
    }

    #[tokio::test]
    async fn load_transport_failure_is_error_state() {
        let mut mock = MockTeamApi::new();
        mock.expect_list().returning(|| {
            Box::pin(async {
                let parse_error = serde_json::from_str::<Vec<Team>>("<html>").unwrap_err();
                Err(TeamAdminError::Decode(parse_error))
            })
        });

        let dashboard = loaded(mock).await;

        assert_eq!(&dashboard.view, &ViewState::Error(FETCH_FAILED.to_string()));
    }

    #[tokio::test]
    async fn initial_load_passes_through_loading() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dashboard = Dashboard::new(listing_mock(Arc::default()));
        let sink = Rc::clone(&seen);
        dashboard.on_change(move |view, _| sink.borrow_mut().push(view.clone()));

        dashboard.load().await;

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], ViewState::Loading);
        assert!(matches!(seen[1], ViewState::Ready(_)));
    }

    #[tokio::test]
    async fn create_submit_clears_form_and_reloads() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut mock = listing_mock(Arc::clone(&calls));
        mock.expect_create()
            .withf(|draft| draft.name == "Herons" && draft.region == "APAC")
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));
        mock.expect_update().never();

        let mut dashboard = loaded(mock).await;
        dashboard.begin_create();
        dashboard.set_name("Herons");
        dashboard.set_region("APAC");
        dashboard.submit().await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let ready = dashboard.ready().unwrap();
        assert!(!ready.form_visible);
        assert!(ready.edit_target.is_none());
        assert_eq!(&dashboard.draft, &TeamDraft::default());
    }

    #[tokio::test]
    async fn edit_submit_puts_current_draft_to_target() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut mock = listing_mock(Arc::clone(&calls));
        mock.expect_update()
            .withf(|id, draft| {
                id.as_str() == "5"
                    && draft.name == "Otters II"
                    && draft.region == "NA"
                    && draft.description == "Otters description"
            })
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(()) }));
        mock.expect_create().never();

        let mut dashboard = loaded(mock).await;
        let otters = dashboard.team_at(2).unwrap();
        dashboard.begin_edit(&otters);
        dashboard.set_name("Otters II");
        dashboard.submit().await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(dashboard.ready().unwrap().edit_target.is_none());
        assert_eq!(&dashboard.draft, &TeamDraft::default());
    }

    #[tokio::test]
    async fn failed_submit_keeps_form_for_retry() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut mock = listing_mock(Arc::clone(&calls));
        mock.expect_create()
            .returning(|_| Box::pin(async { Err(api_error()) }));

        let mut dashboard = loaded(mock).await;
        dashboard.begin_create();
        dashboard.set_name("Herons");
        dashboard.set_region("APAC");
        dashboard.submit().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let ready = dashboard.ready().unwrap();
        assert!(ready.form_visible);
        assert_eq!(ready.notice.as_deref(), Some(SAVE_FAILED));
        assert_eq!(ready.teams.len(), 2);
        assert_eq!(dashboard.draft.name, "Herons");
    }

    #[tokio::test]
    async fn blank_required_field_sends_nothing() {
        let mut mock = listing_mock(Arc::default());
        mock.expect_create().never();

        let mut dashboard = loaded(mock).await;
        dashboard.begin_create();
        dashboard.set_name("Herons");
        dashboard.submit().await;

        let ready = dashboard.ready().unwrap();
        assert_eq!(ready.notice.as_deref(), Some(REQUIRED_FIELDS));
        assert!(ready.form_visible);
    }

    #[tokio::test]
    async fn delete_sends_id_and_reloads() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut mock = listing_mock(Arc::clone(&calls));
        mock.expect_delete()
            .withf(|id| id.as_str() == "3")
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let mut dashboard = loaded(mock).await;
        dashboard.delete(&TeamId::new("3")).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(dashboard.ready().unwrap().notice.is_none());
    }

    #[tokio::test]
    async fn failed_delete_is_notice_not_error_state() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut mock = listing_mock(Arc::clone(&calls));
        mock.expect_delete()
            .returning(|_| Box::pin(async { Err(api_error()) }));

        let mut dashboard = loaded(mock).await;
        dashboard.delete(&TeamId::new("3")).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let ready = dashboard.ready().unwrap();
        assert_eq!(ready.notice.as_deref(), Some(DELETE_FAILED));
        assert_eq!(ready.teams.len(), 2);
    }

    #[tokio::test]
    async fn successful_reload_clears_notice() {
        let mut mock = listing_mock(Arc::default());
        mock.expect_delete()
            .returning(|_| Box::pin(async { Err(api_error()) }));

        let mut dashboard = loaded(mock).await;
        dashboard.delete(&TeamId::new("3")).await;
        dashboard.load().await;

        assert!(dashboard.ready().unwrap().notice.is_none());
    }

    #[tokio::test]
    async fn begin_edit_copies_team_fields() {
        let mut dashboard = loaded(listing_mock(Arc::default())).await;
        let falcons = dashboard.team_at(1).unwrap();

        dashboard.begin_edit(&falcons);

        let ready = dashboard.ready().unwrap();
        assert!(ready.form_visible);
        assert_eq!(ready.edit_target, Some(TeamId::new("3")));
        assert_eq!(&dashboard.draft, &TeamDraft::from(&falcons));
    }

    #[tokio::test]
    async fn cancel_after_edit_does_not_reset_draft() {
        let mut dashboard = loaded(listing_mock(Arc::default())).await;
        let falcons = dashboard.team_at(1).unwrap();

        dashboard.begin_edit(&falcons);
        dashboard.cancel_form();

        let ready = dashboard.ready().unwrap();
        assert!(!ready.form_visible);
        assert_eq!(&dashboard.draft, &TeamDraft::from(&falcons));
        assert_eq!(ready.edit_target, Some(TeamId::new("3")));
    }

    #[tokio::test]
    async fn begin_create_clears_previous_edit() {
        let mut dashboard = loaded(listing_mock(Arc::default())).await;
        let falcons = dashboard.team_at(1).unwrap();

        dashboard.begin_edit(&falcons);
        dashboard.begin_create();

        let ready = dashboard.ready().unwrap();
        assert!(ready.form_visible);
        assert!(ready.edit_target.is_none());
        assert_eq!(&dashboard.draft, &TeamDraft::default());
    }

    #[tokio::test]
    async fn form_actions_ignored_while_in_error() {
        let mut mock = MockTeamApi::new();
        mock.expect_list()
            .returning(|| Box::pin(async { Err(api_error()) }));
        mock.expect_create().never();

        let mut dashboard = loaded(mock).await;
        dashboard.begin_create();
        dashboard.submit().await;

        assert_eq!(&dashboard.view, &ViewState::Error(FETCH_FAILED.to_string()));
    }

    #[tokio::test]
    async fn every_mutation_renders_once() {
        let renders = Rc::new(RefCell::new(0));
        let mut dashboard = loaded(listing_mock(Arc::default())).await;
        let counter = Rc::clone(&renders);
        dashboard.on_change(move |_, _| *counter.borrow_mut() += 1);

        dashboard.begin_create();
        dashboard.set_name("H");
        dashboard.set_name("He");
        dashboard.set_region("APAC");
        dashboard.set_description("New roster");
        dashboard.cancel_form();

        assert_eq!(*renders.borrow(), 6);
    }

    #[tokio::test]
    async fn team_at_rejects_out_of_range_rows() {
        let dashboard = loaded(listing_mock(Arc::default())).await;

        assert!(matches!(dashboard.team_at(0), Err(TeamAdminError::UnknownRow(0))));
        assert!(matches!(dashboard.team_at(3), Err(TeamAdminError::UnknownRow(3))));
    }
}
