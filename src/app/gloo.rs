//! Browser wiring for the activity board.
//!
//! `DomView` writes the markup produced by `view` into the page and manages
//! the banner hide timer; `start` attaches the event handlers and kicks off
//! the initial refresh. The controller lives in an `Rc<RefCell<…>>` and is
//! only borrowed between awaits, never across them, so overlapping handler
//! futures cannot deadlock each other.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlFormElement, HtmlInputElement, HtmlSelectElement};

use super::{BoardController, BoardView};
use crate::request::{ParticipantParams, RequestApi, WasmClient};
use crate::view::{escape_html, Severity};

type Board = BoardController<WasmClient, DomView>;

/// View over the static elements of the page shell.
pub struct DomView {
    document: Document,
    list: Element,
    select: HtmlSelectElement,
    form: HtmlFormElement,
    banner: Element,
    /// Dropping the previous timeout cancels it, so an old timer can never
    /// hide a newer message early.
    hide_timer: Option<Timeout>,
}

impl DomView {
    pub fn attach(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            document: document.clone(),
            list: require(document, "activities-list")?,
            select: require(document, "activity")?.dyn_into()?,
            form: require(document, "signup-form")?.dyn_into()?,
            banner: require(document, "message")?,
            hide_timer: None,
        })
    }
}

fn require(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id} in page shell")))
}

impl BoardView for DomView {
    fn render_roster(&mut self, cards: &[String], names: &[String]) {
        self.list.set_inner_html(&cards.concat());

        // Rebuild the selector from scratch so refreshes never duplicate
        // options. Option text goes through set_text_content, not markup.
        self.select
            .set_inner_html(r#"<option value="">-- Select an activity --</option>"#);
        for name in names {
            if let Ok(option) = self.document.create_element("option") {
                let _ = option.set_attribute("value", name);
                option.set_text_content(Some(name));
                let _ = self.select.append_child(&option);
            }
        }
    }

    fn render_roster_error(&mut self, message: &str) {
        self.list
            .set_inner_html(&format!("<p>{}</p>", escape_html(message)));
    }

    fn show_message(&mut self, text: &str, severity: Severity, hide_after: Duration) {
        self.banner.set_text_content(Some(text));
        self.banner.set_class_name(match severity {
            Severity::Success => "message success",
            Severity::Error => "message error",
        });

        let banner = self.banner.clone();
        self.hide_timer = Some(Timeout::new(hide_after.as_millis() as u32, move || {
            let _ = banner.class_list().add_1("hidden");
        }));
    }

    fn reset_signup_form(&mut self) {
        self.form.reset();
    }
}

/// Entry point: wire the page and load the initial roster.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let view = DomView::attach(&document)?;
    let board = Rc::new(RefCell::new(BoardController::new(
        WasmClient::default(),
        view,
    )));

    wire_signup_form(&document, &board)?;
    wire_participant_delete(&document, &board)?;

    let board = Rc::clone(&board);
    spawn_local(async move {
        run_refresh(&board).await;
    });
    Ok(())
}

fn wire_signup_form(document: &Document, board: &Rc<RefCell<Board>>) -> Result<(), JsValue> {
    let form: HtmlFormElement = require(document, "signup-form")?.dyn_into()?;
    let document = document.clone();
    let board = Rc::clone(board);

    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();

        let email = input_value(&document, "email");
        let activity = select_value(&document, "activity");
        // The form fields are `required`; this only guards direct submits.
        if email.is_empty() || activity.is_empty() {
            return;
        }

        let board = Rc::clone(&board);
        spawn_local(async move {
            run_signup(&board, email, activity).await;
        });
    });
    form.add_event_listener_with_callback("submit", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

/// One listener on the stable list container handles every delete button;
/// the items themselves are destroyed and recreated on each refresh.
fn wire_participant_delete(document: &Document, board: &Rc<RefCell<Board>>) -> Result<(), JsValue> {
    let list = require(document, "activities-list")?;
    let board = Rc::clone(board);

    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Ok(Some(_button)) = target.closest(".participant-delete") else {
            return;
        };
        let Ok(Some(item)) = target.closest(".participant-item") else {
            return;
        };
        let (Some(activity), Some(email)) = (
            item.get_attribute("data-activity"),
            item.get_attribute("data-email"),
        ) else {
            return;
        };

        let board = Rc::clone(&board);
        spawn_local(async move {
            run_removal(&board, activity, email).await;
        });
    });
    list.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

fn input_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

fn select_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlSelectElement>().ok())
        .map(|select| select.value())
        .unwrap_or_default()
}

async fn run_refresh(board: &Rc<RefCell<Board>>) {
    let (client, seq) = {
        let mut board = board.borrow_mut();
        let client = board.client().clone();
        let seq = board.begin_refresh();
        (client, seq)
    };
    let result = client.fetch_activities().await;
    board.borrow_mut().apply_roster(seq, result);
}

async fn run_signup(board: &Rc<RefCell<Board>>, email: String, activity: String) {
    let client = board.borrow().client().clone();
    let result = client
        .sign_up(ParticipantParams {
            activity: &activity,
            email: &email,
        })
        .await;
    if board.borrow_mut().apply_signup(result) {
        run_refresh(board).await;
    }
}

async fn run_removal(board: &Rc<RefCell<Board>>, activity: String, email: String) {
    let client = board.borrow().client().clone();
    let result = client
        .unregister(ParticipantParams {
            activity: &activity,
            email: &email,
        })
        .await;
    if board.borrow_mut().apply_removal(result) {
        run_refresh(board).await;
    }
}
