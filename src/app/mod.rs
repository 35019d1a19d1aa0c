//! The activity board controller.
//!
//! A sequential request/render cycle: fetch the roster, render it, submit
//! mutations, re-synchronize. The controller takes its collaborators as
//! explicit handles — a `RequestApi` transport and a `BoardView` sink — so
//! the browser wires in `WasmClient`/`DomView` while tests wire in fakes.

use std::time::Duration;

use crate::error::Result;
use crate::model::{ApiOutcome, Roster};
use crate::view::{self, Severity};

#[cfg(feature = "wasm")]
pub mod gloo;

/// Banner lifetime after a sign-up outcome.
pub const SIGNUP_HIDE_DELAY: Duration = Duration::from_secs(5);
/// Banner lifetime after a removal outcome.
pub const REMOVAL_HIDE_DELAY: Duration = Duration::from_secs(4);

pub const LOAD_FAILED: &str = "Failed to load activities. Please try again later.";
pub const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
pub const UNREGISTER_FAILED: &str = "Failed to unregister. Please try again.";

/// Everything the controller needs from the rendered page.
///
/// `render_roster` receives pre-built card markup plus the raw activity
/// names for the selector; the card list and selector options are replaced
/// wholesale on every call.
pub trait BoardView {
    fn render_roster(&mut self, cards: &[String], names: &[String]);
    fn render_roster_error(&mut self, message: &str);
    fn show_message(&mut self, text: &str, severity: Severity, hide_after: Duration);
    fn reset_signup_form(&mut self);
}

pub struct BoardController<C, V> {
    client: C,
    view: V,
    /// Sequence number of the most recently dispatched refresh. A response
    /// is applied only if it carries this number; anything older lost the
    /// race and is discarded.
    dispatched: u64,
}

impl<C, V> BoardController<C, V>
where
    C: crate::request::RequestApi,
    V: BoardView,
{
    pub fn new(client: C, view: V) -> Self {
        Self {
            client,
            view,
            dispatched: 0,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Claim a sequence number for a refresh about to be dispatched.
    pub fn begin_refresh(&mut self) -> u64 {
        self.dispatched += 1;
        self.dispatched
    }

    /// Apply the result of a dispatched refresh. Stale responses are
    /// dropped; the latest dispatched refresh determines the rendered state.
    pub fn apply_roster(&mut self, seq: u64, result: Result<Roster>) {
        if seq != self.dispatched {
            log::debug!(
                "discarding stale roster response (seq {seq}, latest {})",
                self.dispatched
            );
            return;
        }

        match result {
            Ok(roster) => {
                let cards: Vec<String> = roster
                    .entries
                    .iter()
                    .map(|(name, activity)| view::activity_card(name, activity))
                    .collect();
                let names: Vec<String> =
                    roster.entries.iter().map(|(name, _)| name.clone()).collect();
                self.view.render_roster(&cards, &names);
            }
            Err(e) => {
                log::error!("failed to fetch activities: {e}");
                self.view.render_roster_error(LOAD_FAILED);
            }
        }
    }

    /// Apply a sign-up result. Returns true when the roster should be
    /// refreshed (accepted sign-ups only).
    pub fn apply_signup(&mut self, result: Result<ApiOutcome>) -> bool {
        match result {
            Ok(ApiOutcome::Accepted(message)) => {
                self.view
                    .show_message(&message, Severity::Success, SIGNUP_HIDE_DELAY);
                self.view.reset_signup_form();
                true
            }
            Ok(ApiOutcome::Rejected(detail)) => {
                self.view
                    .show_message(&detail, Severity::Error, SIGNUP_HIDE_DELAY);
                false
            }
            Err(e) => {
                log::error!("sign-up request failed: {e}");
                self.view
                    .show_message(SIGNUP_FAILED, Severity::Error, SIGNUP_HIDE_DELAY);
                false
            }
        }
    }

    /// Apply a removal result. Returns true when the roster should be
    /// refreshed — which is every reply the server actually sent, rejected
    /// ones included, since the server may have partially applied the
    /// removal. Only a transport failure skips the refresh.
    pub fn apply_removal(&mut self, result: Result<ApiOutcome>) -> bool {
        match result {
            Ok(ApiOutcome::Accepted(message)) => {
                self.view
                    .show_message(&message, Severity::Success, REMOVAL_HIDE_DELAY);
                true
            }
            Ok(ApiOutcome::Rejected(detail)) => {
                self.view
                    .show_message(&detail, Severity::Error, REMOVAL_HIDE_DELAY);
                true
            }
            Err(e) => {
                log::error!("unregister request failed: {e}");
                self.view
                    .show_message(UNREGISTER_FAILED, Severity::Error, REMOVAL_HIDE_DELAY);
                false
            }
        }
    }

    /// Fetch the roster and re-render.
    pub async fn refresh_roster(&mut self) {
        let seq = self.begin_refresh();
        let result = self.client.fetch_activities().await;
        self.apply_roster(seq, result);
    }

    /// Submit a sign-up, then refresh the roster once if it was accepted.
    pub async fn submit_signup(&mut self, email: &str, activity: &str) {
        let result = self
            .client
            .sign_up(crate::request::ParticipantParams { activity, email })
            .await;
        if self.apply_signup(result) {
            self.refresh_roster().await;
        }
    }

    /// Submit a removal, then refresh the roster regardless of whether the
    /// server reported success or an application error.
    pub async fn remove_participant(&mut self, activity: &str, email: &str) {
        let result = self
            .client
            .unregister(crate::request::ParticipantParams { activity, email })
            .await;
        if self.apply_removal(result) {
            self.refresh_roster().await;
        }
    }
}

/// Print the roster to the terminal, one block per activity.
pub fn print_roster(roster: &Roster) {
    println!("==================activities==================");
    for (name, activity) in &roster.entries {
        println!("{name}");
        println!("  {}", activity.description);
        println!("  Schedule: {}", activity.schedule);
        println!(
            "  Availability: {} spots left ({} signed up)",
            activity.spots_left(),
            activity.participants.len()
        );
        for email in &activity.participants {
            println!("    - {email}");
        }
    }
    println!("==============================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::Activity;
    use crate::request::{ParticipantParams, RequestApi};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Scripted transport: `None` means the request fails at the network
    /// tier.
    #[derive(Default)]
    struct FakeClient {
        fetches: Cell<usize>,
        roster: Option<Roster>,
        signup: Option<ApiOutcome>,
        removal: Option<ApiOutcome>,
    }

    impl RequestApi for FakeClient {
        async fn fetch_activities(&self) -> Result<Roster> {
            self.fetches.set(self.fetches.get() + 1);
            self.roster
                .clone()
                .ok_or_else(|| ErrorKind::ParseError("network down".to_string()).into())
        }

        async fn sign_up(&self, _params: ParticipantParams<'_>) -> Result<ApiOutcome> {
            self.signup
                .clone()
                .ok_or_else(|| ErrorKind::ParseError("network down".to_string()).into())
        }

        async fn unregister(&self, _params: ParticipantParams<'_>) -> Result<ApiOutcome> {
            self.removal
                .clone()
                .ok_or_else(|| ErrorKind::ParseError("network down".to_string()).into())
        }
    }

    #[derive(Default)]
    struct ViewLog {
        rendered: Vec<(Vec<String>, Vec<String>)>,
        roster_errors: Vec<String>,
        messages: Vec<(String, Severity, Duration)>,
        form_resets: usize,
    }

    #[derive(Default, Clone)]
    struct FakeView(Rc<RefCell<ViewLog>>);

    impl BoardView for FakeView {
        fn render_roster(&mut self, cards: &[String], names: &[String]) {
            self.0
                .borrow_mut()
                .rendered
                .push((cards.to_vec(), names.to_vec()));
        }

        fn render_roster_error(&mut self, message: &str) {
            self.0.borrow_mut().roster_errors.push(message.to_string());
        }

        fn show_message(&mut self, text: &str, severity: Severity, hide_after: Duration) {
            self.0
                .borrow_mut()
                .messages
                .push((text.to_string(), severity, hide_after));
        }

        fn reset_signup_form(&mut self) {
            self.0.borrow_mut().form_resets += 1;
        }
    }

    fn roster(names: &[&str]) -> Roster {
        Roster {
            entries: names
                .iter()
                .map(|name| {
                    (
                        name.to_string(),
                        Activity {
                            description: "d".to_string(),
                            schedule: "s".to_string(),
                            max_participants: 10,
                            participants: vec!["a@x.com".to_string()],
                        },
                    )
                })
                .collect(),
        }
    }

    fn board(client: FakeClient) -> (BoardController<FakeClient, FakeView>, FakeView) {
        let view = FakeView::default();
        (BoardController::new(client, view.clone()), view)
    }

    #[tokio::test]
    async fn refresh_renders_cards_and_options_in_server_order() {
        let client = FakeClient {
            roster: Some(roster(&["Chess Club", "Art Studio"])),
            ..FakeClient::default()
        };
        let (mut board, view) = board(client);

        board.refresh_roster().await;

        let log = view.0.borrow();
        assert_eq!(log.rendered.len(), 1);
        let (cards, names) = &log.rendered[0];
        assert_eq!(names, &["Chess Club", "Art Studio"]);
        assert_eq!(cards.len(), 2);
        assert!(cards[0].contains("9 spots left"));
    }

    #[tokio::test]
    async fn refresh_failure_renders_error_message_only() {
        let (mut board, view) = board(FakeClient::default());

        board.refresh_roster().await;

        let log = view.0.borrow();
        assert!(log.rendered.is_empty());
        assert_eq!(log.roster_errors, [LOAD_FAILED]);
    }

    #[tokio::test]
    async fn accepted_signup_resets_form_and_refreshes_once() {
        let client = FakeClient {
            roster: Some(roster(&["Chess Club"])),
            signup: Some(ApiOutcome::Accepted("Signed up jane".to_string())),
            ..FakeClient::default()
        };
        let (mut board, view) = board(client);

        board.submit_signup("jane@x.com", "Chess Club").await;

        let log = view.0.borrow();
        assert_eq!(
            log.messages,
            [(
                "Signed up jane".to_string(),
                Severity::Success,
                SIGNUP_HIDE_DELAY
            )]
        );
        assert_eq!(log.form_resets, 1);
        assert_eq!(board.client().fetches.get(), 1);
    }

    #[tokio::test]
    async fn rejected_signup_keeps_form_and_skips_refresh() {
        let client = FakeClient {
            roster: Some(roster(&["Chess Club"])),
            signup: Some(ApiOutcome::Rejected("Already signed up".to_string())),
            ..FakeClient::default()
        };
        let (mut board, view) = board(client);

        board.submit_signup("jane@x.com", "Chess Club").await;

        let log = view.0.borrow();
        assert_eq!(
            log.messages,
            [(
                "Already signed up".to_string(),
                Severity::Error,
                SIGNUP_HIDE_DELAY
            )]
        );
        assert_eq!(log.form_resets, 0);
        assert_eq!(board.client().fetches.get(), 0);
    }

    #[tokio::test]
    async fn signup_transport_failure_shows_generic_message() {
        let (mut board, view) = board(FakeClient::default());

        board.submit_signup("jane@x.com", "Chess Club").await;

        let log = view.0.borrow();
        assert_eq!(
            log.messages,
            [(SIGNUP_FAILED.to_string(), Severity::Error, SIGNUP_HIDE_DELAY)]
        );
        assert_eq!(board.client().fetches.get(), 0);
    }

    #[tokio::test]
    async fn removal_refreshes_once_even_when_rejected() {
        let client = FakeClient {
            roster: Some(roster(&["Chess Club"])),
            removal: Some(ApiOutcome::Rejected("No such participant".to_string())),
            ..FakeClient::default()
        };
        let (mut board, view) = board(client);

        board.remove_participant("Chess Club", "jane@x.com").await;

        let log = view.0.borrow();
        assert_eq!(
            log.messages,
            [(
                "No such participant".to_string(),
                Severity::Error,
                REMOVAL_HIDE_DELAY
            )]
        );
        assert_eq!(board.client().fetches.get(), 1);
    }

    #[tokio::test]
    async fn accepted_removal_refreshes_once() {
        let client = FakeClient {
            roster: Some(roster(&["Chess Club"])),
            removal: Some(ApiOutcome::Accepted("Removed jane".to_string())),
            ..FakeClient::default()
        };
        let (mut board, view) = board(client);

        board.remove_participant("Chess Club", "jane@x.com").await;

        let log = view.0.borrow();
        assert_eq!(
            log.messages,
            [(
                "Removed jane".to_string(),
                Severity::Success,
                REMOVAL_HIDE_DELAY
            )]
        );
        assert_eq!(board.client().fetches.get(), 1);
    }

    #[tokio::test]
    async fn removal_transport_failure_skips_refresh() {
        let (mut board, view) = board(FakeClient::default());

        board.remove_participant("Chess Club", "jane@x.com").await;

        let log = view.0.borrow();
        assert_eq!(
            log.messages,
            [(
                UNREGISTER_FAILED.to_string(),
                Severity::Error,
                REMOVAL_HIDE_DELAY
            )]
        );
        assert_eq!(board.client().fetches.get(), 0);
    }

    #[tokio::test]
    async fn stale_refresh_response_is_discarded() {
        let (mut board, view) = board(FakeClient::default());

        let older = board.begin_refresh();
        let newer = board.begin_refresh();

        board.apply_roster(newer, Ok(roster(&["Chess Club", "Art Studio"])));
        board.apply_roster(older, Ok(roster(&["Chess Club"])));

        let log = view.0.borrow();
        assert_eq!(log.rendered.len(), 1);
        assert_eq!(log.rendered[0].1, ["Chess Club", "Art Studio"]);
    }
}
