use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use eframe::App as EApp;
use egui::TextureHandle;
use log::debug;

use crate::api::{ApiClient, FetchError};
use crate::types::{FilterState, HealthReport, Repository, UserProfile};

/// Application route; mirrors the pages the service's web frontend exposes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Features,
    Dashboard,
    RepoDetail(String),
}

/// Authenticated identity for this visit, or the lack of one.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(UserProfile),
}

impl Session {
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(profile) => Some(profile),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }
}

/// Lifecycle of one fetched resource.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(FetchError),
}

impl<T> Loadable<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Loadable::Idle)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Open/closed state of the shell's menus.
///
/// The sort and language dropdowns are mutually exclusive; opening one
/// closes the other. Outside clicks and option selection close everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub sort_open: bool,
    pub language_open: bool,
    pub user_open: bool,
    pub sidebar_open: bool,
}

impl MenuState {
    pub fn toggle_sort(&mut self) {
        self.sort_open = !self.sort_open;
        self.language_open = false;
    }

    pub fn toggle_language(&mut self) {
        self.language_open = !self.language_open;
        self.sort_open = false;
    }

    pub fn toggle_user(&mut self) {
        self.user_open = !self.user_open;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn close_all(&mut self) {
        *self = Self::default();
    }

    pub fn any_open(&self) -> bool {
        self.sort_open || self.language_open || self.user_open || self.sidebar_open
    }
}

/// State of the repository detail page.
///
/// The generation number ties in-flight work (report fetch, chart render)
/// to the navigation that started it; results for a superseded generation
/// are dropped on arrival.
#[derive(Clone)]
pub struct DetailView {
    pub repo_name: String,
    pub generation: u64,
    pub report: Loadable<HealthReport>,
    pub plot_png: Option<Vec<u8>>,
    pub plot_dark: Option<bool>,
    pub plot_texture: Option<TextureHandle>,
    pub plot_rendering: bool,
}

impl DetailView {
    fn new(repo_name: String, generation: u64) -> Self {
        Self {
            repo_name,
            generation,
            report: Loadable::Loading,
            plot_png: None,
            plot_dark: None,
            plot_texture: None,
            plot_rendering: false,
        }
    }

    /// Whether the chart needs a (re-)render for the given theme.
    pub fn needs_plot(&self, dark: bool) -> bool {
        matches!(self.report, Loadable::Ready(_))
            && !self.plot_rendering
            && self.plot_dark != Some(dark)
    }
}

/// Main application state.
#[derive(Clone)]
pub struct App {
    pub route: Route,
    pub session: Session,
    pub session_checked: bool,
    pub repos: Loadable<Vec<Repository>>,
    pub repos_generation: u64,
    pub filter: FilterState,
    pub favorites: HashSet<u64>,
    pub menus: MenuState,
    pub detail: Option<DetailView>,
    detail_generation: u64,
    pub client: ApiClient,
}

impl App {
    pub fn new(client: ApiClient) -> Self {
        Self {
            route: Route::Home,
            session: Session::Anonymous,
            session_checked: false,
            repos: Loadable::Idle,
            repos_generation: 0,
            filter: FilterState::default(),
            favorites: HashSet::new(),
            menus: MenuState::default(),
            detail: None,
            detail_generation: 0,
            client,
        }
    }

    /// Switch to a non-detail route. Leaving the dashboard keeps the
    /// collection and filter so coming back is instant.
    pub fn navigate(&mut self, route: Route) {
        self.menus.close_all();
        if !matches!(route, Route::RepoDetail(_)) {
            self.detail = None;
        }
        self.route = route;
    }

    /// Enter the detail route for `name` and start a new fetch generation.
    ///
    /// Returns the generation the caller must hand back together with the
    /// fetch result.
    pub fn open_repo(&mut self, name: String) -> u64 {
        self.menus.close_all();
        self.detail_generation += 1;
        self.detail = Some(DetailView::new(name.clone(), self.detail_generation));
        self.route = Route::RepoDetail(name);
        self.detail_generation
    }

    /// Begin (or retry) the collection fetch.
    pub fn begin_repos_fetch(&mut self) -> u64 {
        self.repos_generation += 1;
        self.repos = Loadable::Loading;
        self.repos_generation
    }

    pub fn apply_repos_result(
        &mut self,
        generation: u64,
        result: Result<Vec<Repository>, FetchError>,
    ) {
        if generation != self.repos_generation {
            debug!("dropping stale repository response (generation {generation})");
            return;
        }
        self.repos = match result {
            Ok(repos) => Loadable::Ready(repos),
            Err(err) => Loadable::Failed(err),
        };
    }

    pub fn apply_detail_result(
        &mut self,
        generation: u64,
        result: Result<HealthReport, FetchError>,
    ) {
        let Some(detail) = self.detail.as_mut() else {
            debug!("dropping health response for a closed detail view");
            return;
        };
        if detail.generation != generation {
            debug!("dropping stale health response (generation {generation})");
            return;
        }
        detail.report = match result {
            Ok(report) => Loadable::Ready(report),
            Err(err) => Loadable::Failed(err),
        };
    }

    /// Outcome of a chart render started for `generation` with `dark` theme.
    pub fn apply_detail_plot(&mut self, generation: u64, dark: bool, png: Option<Vec<u8>>) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        if detail.generation != generation {
            debug!("dropping stale chart render (generation {generation})");
            return;
        }
        detail.plot_rendering = false;
        detail.plot_dark = Some(dark);
        detail.plot_texture = None;
        detail.plot_png = png;
    }

    /// Apply the identity-check outcome. A failed or empty response leaves
    /// the session anonymous and is never surfaced to the user.
    pub fn apply_identity(&mut self, result: Result<UserProfile, FetchError>) {
        match result {
            Ok(profile) if !profile.login.is_empty() => {
                self.session = Session::Authenticated(profile);
            }
            Ok(_) => debug!("identity response carried no login, staying anonymous"),
            Err(err) => debug!("identity check failed, staying anonymous: {err}"),
        }
    }

    /// Local half of logout: drop the session and every piece of visit
    /// state, the in-process equivalent of the browser's forced refresh.
    pub fn reset_after_logout(&mut self) {
        *self = App::new(self.client.clone());
    }

    pub fn toggle_favorite(&mut self, id: u64) {
        if !self.favorites.insert(id) {
            self.favorites.remove(&id);
        }
    }
}

/// Thread-safe wrapper around App for use with eframe.
pub struct AppWrapper {
    pub app: Arc<Mutex<App>>,
}

impl EApp for AppWrapper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Ok(mut app) = self.app.lock() {
            super::ui::draw_ui(&mut app, ctx, Arc::clone(&self.app));
        } else {
            log::error!("failed to acquire app lock in update");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ErrorKind;
    use crate::config::Config;
    use crate::types::{CommitHistory, HealthScores};
    use pretty_assertions::assert_eq;

    fn app() -> App {
        App::new(ApiClient::new(&Config::default()).unwrap())
    }

    fn profile(login: &str) -> UserProfile {
        UserProfile {
            login: login.to_string(),
            avatar_url: String::new(),
            html_url: format!("https://github.com/{login}"),
        }
    }

    fn transport_error() -> FetchError {
        FetchError {
            kind: ErrorKind::Transport,
            message: "connection failed: connection refused".to_string(),
        }
    }

    fn report(repo: &str) -> HealthReport {
        HealthReport {
            health: HealthScores {
                repo: repo.to_string(),
                total_score: 80,
                activity_score: 30,
                issue_score: 25,
                docs_score: 25,
                commit_count_last_30_days: 12,
                open_issues: 1,
            },
            history: CommitHistory(vec![("2024-03-01".to_string(), 4)]),
        }
    }

    #[test]
    fn identity_success_authenticates() {
        let mut app = app();
        app.apply_identity(Ok(profile("octocat")));

        assert!(app.session.is_authenticated());
        assert_eq!(app.session.user().unwrap().login, "octocat");
    }

    #[test]
    fn identity_failure_stays_anonymous_silently() {
        let mut app = app();
        app.apply_identity(Err(transport_error()));

        assert_eq!(app.session, Session::Anonymous);
        // Collection state is untouched; no error surfaces anywhere.
        assert!(app.repos.is_idle());
    }

    #[test]
    fn identity_without_login_stays_anonymous() {
        let mut app = app();
        app.apply_identity(Ok(profile("")));
        assert_eq!(app.session, Session::Anonymous);
    }

    #[test]
    fn stale_repos_response_is_discarded() {
        let mut app = app();
        let first = app.begin_repos_fetch();
        let second = app.begin_repos_fetch();
        assert_ne!(first, second);

        app.apply_repos_result(first, Ok(vec![]));
        assert_eq!(app.repos, Loadable::Loading);

        app.apply_repos_result(second, Ok(vec![]));
        assert_eq!(app.repos, Loadable::Ready(vec![]));
    }

    #[test]
    fn repos_failure_is_local_error_state() {
        let mut app = app();
        let generation = app.begin_repos_fetch();
        app.apply_repos_result(generation, Err(transport_error()));

        match &app.repos {
            Loadable::Failed(err) => assert_eq!(err.kind, ErrorKind::Transport),
            other => panic!("expected failure state, got {other:?}"),
        }
    }

    #[test]
    fn detail_result_for_superseded_view_is_dropped() {
        let mut app = app();
        let first = app.open_repo("alpha".to_string());
        let second = app.open_repo("beta".to_string());

        app.apply_detail_result(first, Ok(report("alpha")));
        let detail = app.detail.as_ref().unwrap();
        assert_eq!(detail.repo_name, "beta");
        assert_eq!(detail.report, Loadable::Loading);

        app.apply_detail_result(second, Ok(report("beta")));
        let detail = app.detail.as_ref().unwrap();
        assert_eq!(detail.report.ready().unwrap().health.repo, "beta");
    }

    #[test]
    fn detail_result_after_navigating_away_is_dropped() {
        let mut app = app();
        let generation = app.open_repo("alpha".to_string());
        app.navigate(Route::Dashboard);

        app.apply_detail_result(generation, Ok(report("alpha")));
        assert!(app.detail.is_none());
    }

    #[test]
    fn content_type_failure_reaches_detail_state() {
        let mut app = app();
        let generation = app.open_repo("alpha".to_string());
        app.apply_detail_result(
            generation,
            Err(FetchError {
                kind: ErrorKind::ContentType,
                message: "unexpected response content type: text/html".to_string(),
            }),
        );

        match &app.detail.as_ref().unwrap().report {
            Loadable::Failed(err) => {
                assert_eq!(err.kind, ErrorKind::ContentType);
                assert!(err.message.contains("text/html"));
            }
            other => panic!("expected failure state, got {other:?}"),
        }
    }

    #[test]
    fn favorite_toggle_is_an_involution() {
        let mut app = app();
        assert!(app.favorites.is_empty());

        app.toggle_favorite(42);
        assert!(app.favorites.contains(&42));

        app.toggle_favorite(42);
        assert!(app.favorites.is_empty());
    }

    #[test]
    fn sort_and_language_menus_are_mutually_exclusive() {
        let mut menus = MenuState::default();

        menus.toggle_sort();
        assert!(menus.sort_open);

        menus.toggle_language();
        assert!(menus.language_open);
        assert!(!menus.sort_open);

        menus.toggle_sort();
        assert!(menus.sort_open);
        assert!(!menus.language_open);

        menus.close_all();
        assert!(!menus.any_open());
    }

    #[test]
    fn navigation_closes_open_menus() {
        let mut app = app();
        app.menus.toggle_sort();
        app.menus.toggle_user();

        app.navigate(Route::Features);
        assert!(!app.menus.any_open());
        assert_eq!(app.route, Route::Features);
    }

    #[test]
    fn logout_resets_the_whole_visit() {
        let mut app = app();
        app.apply_identity(Ok(profile("octocat")));
        let generation = app.begin_repos_fetch();
        app.apply_repos_result(generation, Ok(vec![]));
        app.toggle_favorite(7);
        app.filter.search = "alp".to_string();
        app.navigate(Route::Dashboard);

        app.reset_after_logout();

        assert_eq!(app.session, Session::Anonymous);
        assert_eq!(app.route, Route::Home);
        assert!(app.repos.is_idle());
        assert!(app.favorites.is_empty());
        assert!(!app.filter.is_active());
        assert!(!app.session_checked);
    }

    #[test]
    fn plot_render_for_current_generation_lands() {
        let mut app = app();
        let generation = app.open_repo("alpha".to_string());
        app.apply_detail_result(generation, Ok(report("alpha")));

        assert!(app.detail.as_ref().unwrap().needs_plot(true));

        app.apply_detail_plot(generation, true, Some(vec![1, 2, 3]));
        let detail = app.detail.as_ref().unwrap();
        assert_eq!(detail.plot_png, Some(vec![1, 2, 3]));
        assert!(!detail.needs_plot(true));
        // Switching theme invalidates the render.
        assert!(detail.needs_plot(false));
    }
}
