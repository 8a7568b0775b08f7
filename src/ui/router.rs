use std::rc::Rc;

use crate::models::{SelectedFile, Session};
use crate::store::Store;
use crate::ui::controllers::bills::{BillRow, BillsController, Modal};
use crate::ui::controllers::new_bill::{FileChange, NewBillController, NewBillForm};
use crate::ui::route::{NavIcon, Navigator, Route};
use crate::ui::views::{self, ViewState};

/// What is currently on screen.
#[derive(Debug, Clone, Default)]
pub(crate) struct Page {
    /// `None` until the first navigation.
    pub(crate) route: Option<Route>,
    pub(crate) markup: String,
    pub(crate) active_icon: Option<NavIcon>,
    /// Alerts raised since the page was last read, oldest first.
    pub(crate) alerts: Vec<String>,
}

/// The active controller together with the state it rendered from.
pub(crate) enum View {
    Login,
    Bills {
        controller: BillsController,
        rows: Vec<BillRow>,
        modal: Option<Modal>,
    },
    NewBill(NewBillController),
    Dashboard {
        rows: Vec<BillRow>,
    },
    Error {
        message: String,
    },
}

impl View {
    fn name(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Bills { .. } => "bills",
            Self::NewBill(_) => "new_bill",
            Self::Dashboard { .. } => "dashboard",
            Self::Error { .. } => "error",
        }
    }
}

/// Something the user did on the page.
#[derive(Debug, Clone)]
pub(crate) enum UiEvent {
    Navigate(String),
    ClickIconEye { bill_url: String },
    CloseModal,
    ClickNewBill,
    ChangeFile(SelectedFile),
    Submit(NewBillForm),
}

impl UiEvent {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Navigate(_) => "navigate",
            Self::ClickIconEye { .. } => "click_icon_eye",
            Self::CloseModal => "close_modal",
            Self::ClickNewBill => "click_new_bill",
            Self::ChangeFile(_) => "change_file",
            Self::Submit(_) => "submit",
        }
    }
}

/// Owns the page: maps paths to controllers, dispatches events to the active
/// one and re-renders after every change.
pub(crate) struct Router {
    session: Option<Session>,
    store: Option<Rc<dyn Store>>,
    navigator: Navigator,
    modal_width: u32,
    view: View,
    page: Page,
}

impl Router {
    pub(crate) fn new(
        session: Option<Session>,
        store: Option<Rc<dyn Store>>,
        modal_width: u32,
    ) -> Self {
        Self {
            session,
            store,
            navigator: Navigator::default(),
            modal_width,
            view: View::Login,
            page: Page::default(),
        }
    }

    /// A handle that queues navigations for this router.
    pub(crate) fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }

    /// First page load. A signed-in user landing on the login page (or on no
    /// page at all) is sent to their home route instead.
    pub(crate) fn start(&mut self, hash: &str) {
        let at_login = hash.trim().is_empty() || Route::lookup(hash) == Some(Route::Login);
        let path = match &self.session {
            Some(session) if at_login => Route::home(session.user_type).path(),
            _ => hash,
        };
        self.navigate_to(path);
    }

    /// Swap the page for `path`, then follow any navigation the new
    /// controller requested while loading.
    pub(crate) fn navigate_to(&mut self, path: &str) {
        self.load(path);
        self.settle();
    }

    pub(crate) fn dispatch(&mut self, event: UiEvent) {
        tracing::debug!(event = event.name(), view = self.view.name(), "dispatching event");
        match event {
            UiEvent::Navigate(path) => self.navigator.navigate(path),
            UiEvent::ClickIconEye { bill_url } => match &mut self.view {
                View::Bills {
                    controller, modal, ..
                } => *modal = Some(controller.handle_click_icon_eye(&bill_url, self.modal_width)),
                other => ignored("click_icon_eye", other),
            },
            UiEvent::CloseModal => match &mut self.view {
                View::Bills { modal, .. } => *modal = None,
                other => ignored("close_modal", other),
            },
            UiEvent::ClickNewBill => match &self.view {
                View::Bills { controller, .. } => controller.handle_click_new_bill(),
                other => ignored("click_new_bill", other),
            },
            UiEvent::ChangeFile(file) => match &mut self.view {
                View::NewBill(controller) => {
                    if let FileChange::Rejected { alert } = controller.handle_change_file(file) {
                        self.page.alerts.push(alert);
                    }
                }
                other => ignored("change_file", other),
            },
            UiEvent::Submit(form) => match &mut self.view {
                View::NewBill(controller) => {
                    let outcome = controller.handle_submit(form);
                    tracing::debug!(?outcome, "bill submitted");
                }
                other => ignored("submit", other),
            },
        }
        self.render();
        self.settle();
    }

    /// Follow queued navigations until none are left.
    pub(crate) fn settle(&mut self) {
        while let Some(path) = self.navigator.take_next() {
            self.load(&path);
        }
    }

    /// Rebuild the page markup from the current view.
    pub(crate) fn render(&mut self) {
        let route = self.page.route.unwrap_or(Route::Login);
        let (rows, modal, error) = match &self.view {
            View::Bills { rows, modal, .. } => (rows.as_slice(), modal.as_ref(), None),
            View::Dashboard { rows } => (rows.as_slice(), None, None),
            View::Error { message } => (&[][..], None, Some(message.as_str())),
            View::Login | View::NewBill(_) => (&[][..], None, None),
        };
        let state = ViewState {
            session: self.session.as_ref(),
            active_icon: self.page.active_icon,
            rows,
            modal,
            loading: false,
            error,
        };
        self.page.markup = views::render_route(route.path(), &state).into_string();
    }

    fn load(&mut self, path: &str) {
        let route = Route::from_path(path);
        tracing::info!(path, %route, "navigating");

        self.view = View::Login;
        self.page.route = Some(route);
        self.page.active_icon = route.nav_icon();
        let loading = ViewState {
            session: self.session.as_ref(),
            active_icon: self.page.active_icon,
            loading: true,
            ..ViewState::default()
        };
        self.page.markup = views::render_route(route.path(), &loading).into_string();

        self.view = self.build_view(route);
        self.render();
    }

    fn build_view(&self, route: Route) -> View {
        match route {
            Route::Login => View::Login,
            Route::Bills => {
                let controller = self.bills_controller();
                match controller.get_bills() {
                    Ok(rows) => View::Bills {
                        controller,
                        rows,
                        modal: None,
                    },
                    Err(e) => fetch_failed(route, e.to_string()),
                }
            }
            Route::NewBill => View::NewBill(NewBillController::new(
                self.session.clone(),
                self.store.clone(),
                self.navigator.clone(),
            )),
            Route::Dashboard => match self.bills_controller().get_bills() {
                Ok(rows) => View::Dashboard { rows },
                Err(e) => fetch_failed(route, e.to_string()),
            },
        }
    }

    fn bills_controller(&self) -> BillsController {
        BillsController::new(
            self.session.clone(),
            self.store.clone(),
            self.navigator.clone(),
        )
    }

    pub(crate) fn page(&self) -> &Page {
        &self.page
    }

    pub(crate) fn view(&self) -> &View {
        &self.view
    }

    pub(crate) fn route(&self) -> Option<Route> {
        self.page.route
    }

    /// Rows shown by the current view, in fetch order.
    pub(crate) fn rows(&self) -> &[BillRow] {
        match &self.view {
            View::Bills { rows, .. } | View::Dashboard { rows } => rows.as_slice(),
            _ => &[],
        }
    }

    pub(crate) fn modal(&self) -> Option<&Modal> {
        match &self.view {
            View::Bills { modal, .. } => modal.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn error(&self) -> Option<&str> {
        match &self.view {
            View::Error { message } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Hand over the alerts raised so far.
    pub(crate) fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.page.alerts)
    }
}

fn fetch_failed(route: Route, message: String) -> View {
    tracing::error!(%route, error = %message, "failed to load page data");
    View::Error { message }
}

fn ignored(event: &str, view: &View) {
    tracing::warn!(event, view = view.name(), "event has no handler on this page");
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
