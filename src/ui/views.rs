//! Markup for every page. All functions are pure: same data, same markup.

use maud::{html, Markup, DOCTYPE};

use crate::format::{format_status, parse_iso_date};
use crate::models::{BillStatus, ExpenseType, Session};
use crate::ui::controllers::bills::{BillRow, Modal};
use crate::ui::route::{NavIcon, Route};

pub(crate) const ACTIVE_ICON_CLASS: &str = "active-icon";

/// Everything a page may be rendered from.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ViewState<'a> {
    pub(crate) session: Option<&'a Session>,
    pub(crate) active_icon: Option<NavIcon>,
    pub(crate) rows: &'a [BillRow],
    pub(crate) modal: Option<&'a Modal>,
    pub(crate) loading: bool,
    pub(crate) error: Option<&'a str>,
}

/// Markup for a path, the way the router would show it.
pub(crate) fn render_route(path: &str, state: &ViewState<'_>) -> Markup {
    let route = Route::from_path(path);
    if route != Route::Login {
        if state.loading {
            return loading_page(state);
        }
        if let Some(error) = state.error {
            return error_page(state, error);
        }
    }
    match route {
        Route::Login => login_page(),
        Route::Bills => bills_page(state),
        Route::NewBill => new_bill_page(state),
        Route::Dashboard => dashboard_page(state),
    }
}

/// Wrap a page in a standalone HTML document.
pub(crate) fn document(title: &str, body: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="fr" {
            head {
                meta charset="utf-8";
                title { "Billed - " (title) }
            }
            body {
                div #root { (body) }
            }
        }
    }
}

pub(crate) fn vertical_layout(height: u32, state: &ViewState<'_>) -> Markup {
    let show_employee_icons = state.session.is_some_and(Session::is_employee);
    html! {
        div.vertical-navbar style=(format!("height: {height}vh;")) {
            div.layout-title { " Billed " }
            @if show_employee_icons {
                @for icon in NavIcon::all() {
                    div id=(icon.element_id())
                        data-testid=(icon.test_id())
                        class=[(state.active_icon == Some(*icon)).then_some(ACTIVE_ICON_CLASS)]
                    {
                        span.icon-label { (icon.label()) }
                    }
                }
            }
            div #layout-disconnect data-testid="layout-disconnect" { "Se déconnecter" }
        }
    }
}

pub(crate) fn loading_page(state: &ViewState<'_>) -> Markup {
    html! {
        div.layout {
            (vertical_layout(120, state))
            div.content {
                div #loading { "Loading..." }
            }
        }
    }
}

pub(crate) fn error_page(state: &ViewState<'_>, error: &str) -> Markup {
    html! {
        div.layout {
            (vertical_layout(120, state))
            div.content {
                div #error-message data-testid="error-message" { (error) }
            }
        }
    }
}

/// Rows in display order: latest date first, fetch order kept on ties,
/// undated rows last.
pub(crate) fn sorted_rows(rows: &[BillRow]) -> Vec<&BillRow> {
    let mut sorted: Vec<&BillRow> = rows.iter().collect();
    sorted.sort_by_cached_key(|row| std::cmp::Reverse(parse_iso_date(&row.bill.date).ok()));
    sorted
}

fn bill_row(row: &BillRow) -> Markup {
    let bill_url = row.bill.file_url.as_deref().unwrap_or_default();
    html! {
        tr {
            td { (row.bill.expense_type) }
            td { (row.bill.name) }
            td data-testid="bill-date" { (row.date) }
            td { (row.bill.amount) " €" }
            td { (row.status) }
            td {
                div.icon-actions {
                    div.icon-eye data-testid="icon-eye" data-bill-url=(bill_url) { "Voir" }
                }
            }
        }
    }
}

fn modal_body(modal: &Modal) -> Markup {
    html! {
        @if modal.is_document() {
            embed src=(modal.bill_url) type="application/pdf" width=(modal.width) height=(modal.width);
        } @else {
            div.bill-proof-container style="text-align: center;" {
                img width=(modal.width) src=(modal.bill_url) alt="Bill";
            }
        }
    }
}

fn file_modal(modal: Option<&Modal>) -> Markup {
    html! {
        div.modal.fade.show[modal.is_some()] #modaleFile
            data-testid="modalFileEmployee"
            tabindex="-1"
            role="dialog"
            aria-hidden=(if modal.is_some() { "false" } else { "true" })
        {
            div.modal-dialog.modal-dialog-centered.modal-lg role="document" {
                div.modal-content {
                    div.modal-header {
                        h5.modal-title { "Justificatif" }
                        button.close type="button" data-dismiss="modal" aria-label="Close" {
                            span aria-hidden="true" { "×" }
                        }
                    }
                    div.modal-body {
                        @if let Some(modal) = modal {
                            (modal_body(modal))
                        }
                    }
                }
            }
        }
    }
}

pub(crate) fn bills_page(state: &ViewState<'_>) -> Markup {
    html! {
        div.layout {
            (vertical_layout(120, state))
            div.content {
                div.content-header {
                    div.content-title { " Mes notes de frais " }
                    button.btn.btn-primary type="button" data-testid="btn-new-bill" {
                        "Nouvelle note de frais"
                    }
                }
                div #data-table {
                    table #example .table.table-striped style="width:100%" {
                        thead {
                            tr {
                                th { "Type" }
                                th { "Nom" }
                                th { "Date" }
                                th { "Montant" }
                                th { "Statut" }
                                th { "Actions" }
                            }
                        }
                        tbody data-testid="tbody" {
                            @for row in sorted_rows(state.rows) {
                                (bill_row(row))
                            }
                        }
                    }
                }
            }
            (file_modal(state.modal))
        }
    }
}

pub(crate) fn new_bill_page(state: &ViewState<'_>) -> Markup {
    html! {
        div.layout {
            (vertical_layout(150, state))
            div.content {
                div.content-header {
                    div.content-title { " Envoyer une note de frais " }
                }
                div.form-newbill-container.content-inner {
                    form data-testid="form-new-bill" {
                        div.row {
                            div.col-md-6 {
                                div.col-half {
                                    label.bold-label for="expense-type" { "Type de dépense" }
                                    select #expense-type .form-control.blue-border required data-testid="expense-type" {
                                        @for expense_type in ExpenseType::all() {
                                            option { (expense_type) }
                                        }
                                    }
                                }
                                div.col-half {
                                    label.bold-label for="expense-name" { "Nom de la dépense" }
                                    input #expense-name .form-control.blue-border type="text" data-testid="expense-name" placeholder="Vol Paris Londres";
                                }
                                div.col-half {
                                    label.bold-label for="datepicker" { "Date" }
                                    input #datepicker .form-control.blue-border required type="date" data-testid="datepicker";
                                }
                                div.col-half {
                                    label.bold-label for="amount" { "Montant TTC " }
                                    input #amount .form-control.blue-border.input-icon.input-icon-right required type="number" data-testid="amount" placeholder="348";
                                }
                                div.col-half-row {
                                    div.flex-col {
                                        label.bold-label for="vat" { "TVA" }
                                        input #vat .form-control.blue-border type="number" data-testid="vat" placeholder="70";
                                    }
                                    div.flex-col {
                                        label.white-text for="pct" { "%" }
                                        input #pct .form-control.blue-border required type="number" data-testid="pct" placeholder="20";
                                    }
                                }
                            }
                            div.col-md-6 {
                                div.col-half {
                                    label.bold-label for="commentary" { "Commentaire" }
                                    textarea #commentary .form-control.blue-border data-testid="commentary" rows="3" {}
                                }
                                div.col-half {
                                    label.bold-label for="file" { "Justificatif" }
                                    input #file .form-control.blue-border required type="file" accept=".jpg,.jpeg,.png" data-testid="file";
                                }
                            }
                        }
                        div.row {
                            div.col-md-6 {
                                div.col-half {
                                    button #btn-send-bill .btn.btn-primary type="submit" { "Envoyer" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub(crate) fn login_page() -> Markup {
    html! {
        div.login-container {
            div.login-card {
                h2 { "Employé" }
                form.form-employee data-testid="form-employee" {
                    label for="employee-email" { "Votre email" }
                    input #employee-email type="email" required data-testid="employee-email-input" placeholder="johndoe@email.com";
                    button.btn.btn-primary type="submit" { "Se connecter" }
                }
            }
            div.login-card {
                h2 { "Administration" }
                form.form-admin data-testid="form-admin" {
                    label for="admin-email" { "Votre email" }
                    input #admin-email type="email" required data-testid="admin-email-input" placeholder="johndoe@email.com";
                    button.btn.btn-primary type="submit" { "Se connecter" }
                }
            }
        }
    }
}

/// Admin overview: every bill the store returns, grouped by status.
pub(crate) fn dashboard_page(state: &ViewState<'_>) -> Markup {
    let rows = sorted_rows(state.rows);
    html! {
        div.layout {
            (vertical_layout(120, state))
            div.content {
                div.content-header {
                    div.content-title { " Validations " }
                }
                @for status in BillStatus::all() {
                    @let group = rows.iter().filter(|r| r.bill.status == *status).collect::<Vec<_>>();
                    section.status-bills data-testid=(format!("status-bills-{}", status.as_str())) {
                        h3 {
                            (format_status(*status))
                            " (" (group.len()) ")"
                        }
                        ul.status-bills-container {
                            @for row in group {
                                li.bill-card data-bill-id=[row.bill.id.as_deref()] {
                                    span.bill-card-name { (row.bill.email) " - " (row.bill.name) }
                                    span.bill-card-date { (row.date) }
                                    span.bill-card-amount { (row.bill.amount) " €" }
                                    span.bill-card-type { (row.bill.expense_type) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "views_tests.rs"]
mod tests;
