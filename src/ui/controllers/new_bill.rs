use regex::Regex;
use std::rc::Rc;
use std::sync::OnceLock;

use crate::error::StoreError;
use crate::models::{Bill, BillStatus, ExpenseType, SelectedFile, Session};
use crate::store::{Store, UploadRequest};
use crate::ui::route::{Navigator, Route};

pub(crate) const INVALID_FILE_ALERT: &str = "Veuillez choisir un fichier jpg, jpeg ou png";

/// Percentage applied when the form leaves `pct` empty.
const DEFAULT_PCT: i64 = 20;

const ATTACHMENT_PATTERN: &str = r"(?i)\.(jpe?g|png)$";

fn attachment_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| match Regex::new(ATTACHMENT_PATTERN) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!(error = %e, "attachment pattern failed to compile, rejecting all files");
                None
            }
        })
        .as_ref()
}

/// Only jpg, jpeg and png attachments are accepted (any letter case).
pub(crate) fn is_allowed_attachment(file_name: &str) -> bool {
    attachment_pattern().is_some_and(|re| re.is_match(file_name))
}

/// Last path segment of an uploaded file's URL, without query string.
pub(crate) fn file_name_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    path.rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Raw values of the new-bill form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct NewBillForm {
    pub(crate) expense_type: String,
    pub(crate) name: String,
    pub(crate) date: String,
    pub(crate) amount: String,
    pub(crate) vat: String,
    pub(crate) pct: String,
    pub(crate) commentary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FileChange {
    Accepted,
    Rejected { alert: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubmitOutcome {
    /// The store accepted the bill, or there is no store to send it to.
    Sent,
    /// The store rejected the bill; the form stays on screen.
    Failed,
}

/// Composes and submits one new bill.
///
/// The attachment is uploaded as soon as it is picked; the upload's
/// `fileUrl` and bill key are then reused when the form is submitted.
pub(crate) struct NewBillController {
    session: Option<Session>,
    store: Option<Rc<dyn Store>>,
    navigator: Navigator,
    file: Option<SelectedFile>,
    file_url: Option<String>,
    file_name: Option<String>,
    bill_id: Option<String>,
}

impl NewBillController {
    pub(crate) fn new(
        session: Option<Session>,
        store: Option<Rc<dyn Store>>,
        navigator: Navigator,
    ) -> Self {
        Self {
            session,
            store,
            navigator,
            file: None,
            file_url: None,
            file_name: None,
            bill_id: None,
        }
    }

    /// The file input's current selection.
    pub(crate) fn selected_file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub(crate) fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    pub(crate) fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub(crate) fn bill_id(&self) -> Option<&str> {
        self.bill_id.as_deref()
    }

    fn email(&self) -> &str {
        self.session
            .as_ref()
            .map(|s| s.email.as_str())
            .unwrap_or_default()
    }

    pub(crate) fn handle_change_file(&mut self, file: SelectedFile) -> FileChange {
        if !is_allowed_attachment(&file.name) {
            tracing::info!(file = %file.name, "rejected attachment extension");
            self.file = None;
            return FileChange::Rejected {
                alert: INVALID_FILE_ALERT.to_string(),
            };
        }

        self.file_url = None;
        self.file_name = None;
        self.bill_id = None;
        let file = &*self.file.insert(file);

        let Some(store) = &self.store else {
            tracing::debug!(file = %file.name, "no store configured, upload skipped");
            return FileChange::Accepted;
        };

        let email = self
            .session
            .as_ref()
            .map(|s| s.email.as_str())
            .unwrap_or_default();
        match store.bills().create(UploadRequest { file, email }) {
            Ok(receipt) => {
                tracing::info!(file_url = %receipt.file_url, key = %receipt.key, "attachment uploaded");
                self.file_name =
                    Some(file_name_from_url(&receipt.file_url).unwrap_or_else(|| file.name.clone()));
                self.bill_id = Some(receipt.key).filter(|key| !key.trim().is_empty());
                if self.bill_id.is_none() {
                    tracing::warn!(file_url = %receipt.file_url, "upload answered without a bill key");
                }
                self.file_url = Some(receipt.file_url);
            }
            Err(e) => {
                tracing::error!(file = %file.name, error = %e, "attachment upload failed");
            }
        }
        FileChange::Accepted
    }

    /// Build the bill from the form and the upload, send it, and head back to
    /// the bill list unless the store rejected it.
    pub(crate) fn handle_submit(&mut self, form: NewBillForm) -> SubmitOutcome {
        let bill = self.bill_from_form(form);
        match self.update_bill(&bill) {
            Ok(_) => {
                self.navigator.navigate(Route::Bills.path());
                SubmitOutcome::Sent
            }
            Err(_) => SubmitOutcome::Failed,
        }
    }

    fn bill_from_form(&self, form: NewBillForm) -> Bill {
        Bill {
            id: None,
            email: self.email().to_string(),
            expense_type: ExpenseType::parse(&form.expense_type),
            name: form.name,
            amount: form.amount.trim().parse().unwrap_or(0),
            date: form.date,
            vat: form.vat,
            pct: form
                .pct
                .trim()
                .parse()
                .ok()
                .filter(|pct| *pct != 0)
                .unwrap_or(DEFAULT_PCT),
            commentary: form.commentary,
            file_url: self.file_url.clone(),
            file_name: self.file_name.clone(),
            status: BillStatus::Pending,
        }
    }

    /// Send the bill to the store under the key obtained at upload time.
    /// Without a store this does nothing and returns `Ok(None)`.
    pub(crate) fn update_bill(&self, bill: &Bill) -> Result<Option<Bill>, StoreError> {
        let Some(store) = &self.store else {
            return Ok(None);
        };
        match store.bills().update(self.bill_id.as_deref(), bill) {
            Ok(updated) => Ok(Some(updated)),
            Err(e) => {
                tracing::error!(bill_id = ?self.bill_id, error = %e, "bill update failed");
                Err(e)
            }
        }
    }
}
