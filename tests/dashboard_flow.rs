//! End-to-end state flow: fetched collection through filters to the
//! derived view, plus the session lifecycle around it.

use chrono::{TimeZone, Utc};
use repohealth::api::{ApiClient, ErrorKind, FetchError};
use repohealth::app::{App, Loadable, Route, Session};
use repohealth::config::Config;
use repohealth::types::{FilterState, Repository, SortKey, UserProfile};
use repohealth::utils::{collection_stats, derive_view, language_options};

fn new_app() -> App {
    App::new(ApiClient::new(&Config::default()).unwrap())
}

fn repo(id: u64, name: &str, stars: u64, language: Option<&str>, day: u32) -> Repository {
    Repository {
        id,
        name: name.to_string(),
        description: Some(format!("the {name} project")),
        language: language.map(str::to_string),
        stargazers_count: stars,
        forks_count: stars / 3,
        updated_at: Utc.with_ymd_and_hms(2024, 2, day, 12, 0, 0).single(),
        private: false,
        html_url: format!("https://github.com/me/{name}"),
    }
}

fn sample_collection() -> Vec<Repository> {
    vec![
        repo(1, "alpha", 5, Some("Go"), 10),
        repo(2, "beta", 10, Some("Rust"), 20),
        repo(3, "gamma", 10, Some("Rust"), 5),
        repo(4, "delta", 0, None, 15),
    ]
}

#[test]
fn full_dashboard_flow() {
    let mut app = new_app();

    // Sign-in lands first.
    app.apply_identity(Ok(UserProfile {
        login: "octocat".to_string(),
        avatar_url: String::new(),
        html_url: "https://github.com/octocat".to_string(),
    }));
    assert!(app.session.is_authenticated());

    // Collection arrives.
    app.navigate(Route::Dashboard);
    let generation = app.begin_repos_fetch();
    app.apply_repos_result(generation, Ok(sample_collection()));
    let repos = app.repos.ready().unwrap().clone();
    assert_eq!(repos.len(), 4);

    // Default derived view: everything, most recently updated first.
    let view = derive_view(&repos, &app.filter);
    let names: Vec<&str> = view.iter().map(|repo| repo.name.as_str()).collect();
    assert_eq!(names, vec!["beta", "delta", "alpha", "gamma"]);

    // Narrow by language, then by search.
    app.filter.language = Some("Rust".to_string());
    let view = derive_view(&repos, &app.filter);
    assert_eq!(view.len(), 2);
    assert!(view.iter().all(|repo| repo.language.as_deref() == Some("Rust")));

    app.filter.search = "gam".to_string();
    let view = derive_view(&repos, &app.filter);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].name, "gamma");

    // Stats always reflect the full collection, not the narrowed view.
    let stats = collection_stats(&repos);
    assert_eq!(stats.total, 4);
    assert_eq!(stats.stars, 25);

    // Favorites are local and toggle-only.
    app.toggle_favorite(2);
    app.toggle_favorite(3);
    app.toggle_favorite(2);
    assert_eq!(app.favorites.len(), 1);
    assert!(app.favorites.contains(&3));

    // Resetting filters restores the full view.
    app.filter.reset();
    assert_eq!(derive_view(&repos, &app.filter).len(), 4);
}

#[test]
fn stars_sort_is_stable_for_ties() {
    let repos = sample_collection();
    let filter = FilterState {
        sort: SortKey::Stars,
        ..FilterState::default()
    };

    // beta and gamma tie on stars; collection order must hold.
    let view = derive_view(&repos, &filter);
    let names: Vec<&str> = view.iter().map(|repo| repo.name.as_str()).collect();
    assert_eq!(names, vec!["beta", "gamma", "alpha", "delta"]);
}

#[test]
fn language_options_come_from_the_collection() {
    let repos = sample_collection();
    assert_eq!(language_options(&repos), vec!["Go", "Rust"]);
}

#[test]
fn retry_after_failure_refetches_under_a_new_generation() {
    let mut app = new_app();

    let first = app.begin_repos_fetch();
    app.apply_repos_result(
        first,
        Err(FetchError {
            kind: ErrorKind::Transport,
            message: "connection failed: connection refused".to_string(),
        }),
    );
    assert!(matches!(app.repos, Loadable::Failed(_)));

    // The retry affordance re-invokes the same fetch; a late response from
    // the failed attempt must not clobber it.
    let second = app.begin_repos_fetch();
    app.apply_repos_result(first, Ok(sample_collection()));
    assert_eq!(app.repos, Loadable::Loading);

    app.apply_repos_result(second, Ok(sample_collection()));
    assert_eq!(app.repos.ready().unwrap().len(), 4);
}

#[test]
fn detail_navigation_discards_superseded_responses() {
    let mut app = new_app();

    let alpha_generation = app.open_repo("alpha".to_string());
    assert_eq!(app.route, Route::RepoDetail("alpha".to_string()));

    // User clicks through to another repository while alpha is in flight.
    let beta_generation = app.open_repo("beta".to_string());

    app.apply_detail_result(
        alpha_generation,
        Err(FetchError {
            kind: ErrorKind::Status,
            message: "server responded with status 500".to_string(),
        }),
    );
    let detail = app.detail.as_ref().unwrap();
    assert_eq!(detail.repo_name, "beta");
    assert_eq!(detail.report, Loadable::Loading);

    app.apply_detail_result(
        beta_generation,
        Err(FetchError {
            kind: ErrorKind::ContentType,
            message: "unexpected response content type: text/html".to_string(),
        }),
    );
    match &app.detail.as_ref().unwrap().report {
        Loadable::Failed(err) => assert_eq!(err.kind, ErrorKind::ContentType),
        other => panic!("expected content-type failure, got {other:?}"),
    }
}

#[test]
fn identity_failure_is_silent_and_logout_resets() {
    let mut app = new_app();

    app.apply_identity(Err(FetchError {
        kind: ErrorKind::Transport,
        message: "connection failed: dns error".to_string(),
    }));
    assert_eq!(app.session, Session::Anonymous);

    app.apply_identity(Ok(UserProfile {
        login: "octocat".to_string(),
        avatar_url: String::new(),
        html_url: String::new(),
    }));
    let generation = app.begin_repos_fetch();
    app.apply_repos_result(generation, Ok(sample_collection()));
    app.toggle_favorite(1);

    app.reset_after_logout();
    assert_eq!(app.session, Session::Anonymous);
    assert_eq!(app.route, Route::Home);
    assert!(app.repos.is_idle());
    assert!(app.favorites.is_empty());
}
