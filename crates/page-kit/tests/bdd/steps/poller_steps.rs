//! BDD step definitions for the reload poller feature

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use cucumber::{given, then, when};
use leptos::prelude::*;
use tokio::time::Instant;

use page_kit::io::{HttpClient, HttpResponse};
use page_kit::page::Page;
use page_kit::poller::{PollSession, PollStatus};
use page_kit::{PageKitError, PollOutcome, PollerConfig};

use crate::world::PageKitWorld;

/// What the fake server does for one probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedProbe {
    Status(u16),
    Refused,
}

fn parse_script(s: &str) -> Vec<ScriptedProbe> {
    s.split(',')
        .map(str::trim)
        .map(|item| match item {
            "refused" => ScriptedProbe::Refused,
            status => ScriptedProbe::Status(
                status
                    .parse()
                    .unwrap_or_else(|_| panic!("Unknown probe result: {}", status)),
            ),
        })
        .collect()
}

/// A server that answers probes from a fixed script
struct ScriptedHttpClient {
    script: RefCell<VecDeque<ScriptedProbe>>,
    probes: Cell<u32>,
}

impl ScriptedHttpClient {
    fn new(script: Vec<ScriptedProbe>) -> Self {
        Self {
            script: RefCell::new(script.into()),
            probes: Cell::new(0),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for ScriptedHttpClient {
    async fn get(&self, url: &str) -> page_kit::Result<HttpResponse> {
        self.probes.set(self.probes.get() + 1);
        let next = self.script.borrow_mut().pop_front();
        match next {
            Some(ScriptedProbe::Status(status)) => Ok(HttpResponse { status }),
            Some(ScriptedProbe::Refused) => Err(PageKitError::Http(format!(
                "GET {} failed: connection refused",
                url
            ))),
            None => panic!("server probed more often than scripted"),
        }
    }
}

/// A page that records what the poller does to it
struct RecordingPage {
    url: String,
    started: Instant,
    announcements: Cell<u32>,
    navigations: RefCell<Vec<(String, Duration)>>,
}

impl RecordingPage {
    fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            started: Instant::now(),
            announcements: Cell::new(0),
            navigations: RefCell::new(Vec::new()),
        }
    }
}

impl Page for RecordingPage {
    fn show_status(&self, _status: RwSignal<PollStatus>) -> page_kit::Result<()> {
        self.announcements.set(self.announcements.get() + 1);
        Ok(())
    }

    fn navigate(&self, url: &str) -> page_kit::Result<()> {
        self.navigations
            .borrow_mut()
            .push((url.to_string(), self.started.elapsed()));
        Ok(())
    }

    fn current_url(&self) -> page_kit::Result<String> {
        Ok(self.url.clone())
    }
}

async fn run_session<F>(world: &mut PageKitWorld, page_url: &str, build: F)
where
    F: FnOnce(&PollerConfig, Rc<dyn HttpClient>, Rc<dyn Page>) -> page_kit::Result<PollSession>,
{
    let config = PollerConfig {
        max_attempts: world.max_attempts,
        ..Default::default()
    };
    let http = Rc::new(ScriptedHttpClient::new(world.script.clone()));
    let page = Rc::new(RecordingPage::new(page_url));

    let http_client: Rc<dyn HttpClient> = http.clone();
    let host_page: Rc<dyn Page> = page.clone();

    let outcome = match build(&config, http_client, host_page) {
        Ok(mut session) => {
            let outcome = session.run().await;
            world.status = Some(session.status().get_untracked());
            outcome
        }
        Err(e) => Err(e),
    };

    world.outcome = Some(outcome);
    world.probes = http.probes.get();
    world.announcements = page.announcements.get();
    world.navigations = page.navigations.borrow().clone();
}

#[given(expr = "a server that answers {string}")]
fn server_answers(world: &mut PageKitWorld, script: String) {
    world.script = parse_script(&script);
}

#[given(expr = "the current page is {string}")]
fn current_page(world: &mut PageKitWorld, url: String) {
    world.current_url = Some(url);
}

#[given(expr = "the poller gives up after {int} attempts")]
fn gives_up_after(world: &mut PageKitWorld, attempts: u32) {
    world.max_attempts = Some(attempts);
}

#[when(expr = "the page starts reloading {string}")]
async fn start_reloading(world: &mut PageKitWorld, url: String) {
    let page_url = world
        .current_url
        .clone()
        .unwrap_or_else(|| "http://localhost:8080/restart".to_string());
    run_session(world, &page_url, |config, http, page| {
        Ok(PollSession::reload(url, config, http, page))
    })
    .await;
}

#[when("the page starts quitting")]
async fn start_quitting(world: &mut PageKitWorld) {
    let page_url = world.current_url.clone().expect("current page not set");
    run_session(world, &page_url, |config, http, page| {
        PollSession::quit(config, http, page)
    })
    .await;
}

#[when(expr = "{int} seconds pass")]
async fn seconds_pass(_world: &mut PageKitWorld, seconds: u64) {
    tokio::time::sleep(Duration::from_secs(seconds)).await;
}

#[then(expr = "the page should navigate to {string} exactly once")]
fn navigates_once(world: &mut PageKitWorld, url: String) {
    assert_eq!(
        world.navigations.len(),
        1,
        "Expected one navigation, got {:?}",
        world.navigations
    );
    assert_eq!(world.navigations[0].0, url);
}

#[then(expr = "the navigation should happen after {int} ms")]
fn navigation_after(world: &mut PageKitWorld, millis: u64) {
    let (_, at) = world.navigations.first().expect("no navigation happened");
    assert_eq!(*at, Duration::from_millis(millis));
}

#[then("the page should not navigate")]
fn no_navigation(world: &mut PageKitWorld) {
    assert!(
        world.navigations.is_empty(),
        "Expected no navigation, got {:?}",
        world.navigations
    );
}

#[then(expr = "the server should have been probed {int} time(s)")]
fn probed_times(world: &mut PageKitWorld, expected: u32) {
    assert_eq!(world.probes, expected);
}

#[then("the status view should have replaced the page")]
fn status_view_shown(world: &mut PageKitWorld) {
    assert_eq!(world.announcements, 1);
}

#[then(expr = "the status should read {string}")]
fn status_reads(world: &mut PageKitWorld, expected: String) {
    let status = world.status.as_ref().expect("no status recorded");
    assert_eq!(status.text, expected);
}

#[then(expr = "the progress should be {int}")]
fn progress_is(world: &mut PageKitWorld, expected: u8) {
    let status = world.status.as_ref().expect("no status recorded");
    assert_eq!(status.progress, Some(expected));
}

#[then("the progress should be indeterminate")]
fn progress_indeterminate(world: &mut PageKitWorld) {
    let status = world.status.as_ref().expect("no status recorded");
    assert_eq!(status.progress, None);
}

#[then(expr = "the session should be satisfied after {int} probe(s)")]
fn session_satisfied(world: &mut PageKitWorld, attempts: u32) {
    match world.outcome.as_ref().expect("session did not run") {
        Ok(outcome) => assert_eq!(*outcome, PollOutcome::Satisfied { attempts }),
        Err(e) => panic!("session failed: {}", e),
    }
}

#[then(expr = "the session should end exhausted after {int} probe(s)")]
fn session_exhausted(world: &mut PageKitWorld, attempts: u32) {
    match world.outcome.as_ref().expect("session did not run") {
        Ok(outcome) => assert_eq!(*outcome, PollOutcome::Exhausted { attempts }),
        Err(e) => panic!("session failed: {}", e),
    }
}
