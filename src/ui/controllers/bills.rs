use std::rc::Rc;

use crate::error::StoreError;
use crate::format::{format_date, format_status};
use crate::models::{Bill, Session};
use crate::store::Store;
use crate::ui::route::{Navigator, Route};

/// Share of the modal's width given to an image preview.
const PREVIEW_SCALE: f64 = 0.5;

/// A bill as listed on the page: the raw record plus its display strings.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BillRow {
    pub(crate) bill: Bill,
    pub(crate) date: String,
    pub(crate) status: &'static str,
}

impl BillRow {
    /// Format a fetched bill for display. A date that does not parse is shown
    /// as it came from the store.
    pub(crate) fn from_bill(bill: Bill) -> Self {
        let date = match format_date(&bill.date) {
            Ok(formatted) => formatted,
            Err(e) => {
                tracing::warn!(date = %bill.date, error = %e, "unformattable bill date, showing raw value");
                bill.date.clone()
            }
        };
        let status = format_status(bill.status);
        Self { bill, date, status }
    }
}

/// The attachment preview opened from a row's eye icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Modal {
    pub(crate) bill_url: String,
    pub(crate) width: u32,
}

impl Modal {
    /// PDFs are embedded; everything else is shown as an image.
    pub(crate) fn is_document(&self) -> bool {
        let path = self.bill_url.split(['?', '#']).next().unwrap_or_default();
        path.to_ascii_lowercase().ends_with(".pdf")
    }
}

pub(crate) struct BillsController {
    session: Option<Session>,
    store: Option<Rc<dyn Store>>,
    navigator: Navigator,
}

impl BillsController {
    pub(crate) fn new(
        session: Option<Session>,
        store: Option<Rc<dyn Store>>,
        navigator: Navigator,
    ) -> Self {
        Self {
            session,
            store,
            navigator,
        }
    }

    /// Fetch the bills the store scopes to the signed-in user and format them
    /// for display. Without a store there is nothing to list.
    pub(crate) fn get_bills(&self) -> Result<Vec<BillRow>, StoreError> {
        let Some(store) = &self.store else {
            return Ok(Vec::new());
        };
        let bills = store.bills().list()?;
        tracing::debug!(
            user = self.session.as_ref().map(|s| s.email.as_str()).unwrap_or_default(),
            count = bills.len(),
            "fetched bills"
        );
        Ok(bills.into_iter().map(BillRow::from_bill).collect())
    }

    pub(crate) fn handle_click_icon_eye(&self, bill_url: &str, modal_width: u32) -> Modal {
        let width = (f64::from(modal_width) * PREVIEW_SCALE).floor() as u32;
        Modal {
            bill_url: bill_url.to_string(),
            width,
        }
    }

    pub(crate) fn handle_click_new_bill(&self) {
        self.navigator.navigate(Route::NewBill.path());
    }
}
