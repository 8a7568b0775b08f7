use anyhow::{Context, Result};
use maud::PreEscaped;
use std::path::Path;
use std::rc::Rc;

use crate::config::Config;
use crate::models::{SelectedFile, Session, UserType};
use crate::storage::{LocalStorage, JWT_KEY};
use crate::store::http::HttpStore;
use crate::store::Store;
use crate::ui::controllers::new_bill::NewBillForm;
use crate::ui::route::Route;
use crate::ui::router::{Router, UiEvent};
use crate::ui::views;

pub(crate) fn as_cli(args: &[String], config: &Config, storage: &LocalStorage) -> Result<()> {
    let Some(command) = args.get(1) else {
        print_usage();
        return Ok(());
    };
    match command.as_str() {
        "login" => cli_login(&args[2..], storage),
        "logout" => cli_logout(storage),
        "bills" | "b" => cli_bills(&args[2..], config, storage),
        "new-bill" | "n" => cli_new_bill(&args[2..], config, storage),
        "show" => cli_show(&args[2..], config, storage),
        "preview" => cli_preview(&args[2..], config, storage),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("billed {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Billed - expense reports from the command line");
    println!();
    println!("Usage: billed <command>");
    println!();
    println!("Commands:");
    println!("  login --email <email>         Store the signed-in user");
    println!("    --admin                     Sign in as an administrator");
    println!("    --jwt <token>               Bearer token for the API");
    println!("  logout                        Forget the stored user and token");
    println!("  bills                         List your expense reports");
    println!("    --html <path>               Also write the page to an HTML file");
    println!("  new-bill --file <receipt>     Send a new expense report");
    println!("    --type <label>              Expense type (default: Transports)");
    println!("    --name <text>               Expense name");
    println!("    --date <YYYY-MM-DD>         Expense date (default: today)");
    println!("    --amount <n>                Amount including tax");
    println!("    --vat <n>                   VAT amount");
    println!("    --pct <n>                   VAT percentage (default: 20)");
    println!("    --commentary <text>         Free-form comment");
    println!("  show [path]                   Print the page rendered for a route");
    println!("    --html <path>               Write it to an HTML file instead");
    println!("  preview <url>                 Open an attachment preview");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Routes:");
    for route in Route::all() {
        println!("  {:<24} {route}", route.path());
    }
}

/// Value following `name` in `args`.
pub(crate) fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn has_switch(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

fn build_router(config: &Config, storage: &LocalStorage) -> Result<Router> {
    let session = storage.session()?;
    let store: Rc<dyn Store> = Rc::new(HttpStore::new(&config.api_url, storage.jwt()?)?);
    Ok(Router::new(session, Some(store), config.modal_width))
}

fn write_html(path: &str, title: &str, markup: &str) -> Result<()> {
    let path = shellexpand(path);
    let page = views::document(title, &PreEscaped(markup.to_string()));
    std::fs::write(&path, page.into_string())
        .with_context(|| format!("Failed to write HTML: {path}"))?;
    println!("Wrote {path}");
    Ok(())
}

pub(crate) fn cli_login(args: &[String], storage: &LocalStorage) -> Result<()> {
    let email = flag(args, "--email")
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!("Usage: billed login --email <email> [--admin] [--jwt <token>]")
        })?;
    let user_type = if has_switch(args, "--admin") {
        UserType::Admin
    } else {
        UserType::Employee
    };

    storage.save_session(&Session::new(user_type, email.trim()))?;
    match flag(args, "--jwt") {
        Some(token) => storage.set_item(JWT_KEY, token)?,
        None => storage.remove_item(JWT_KEY)?,
    }
    tracing::info!(email, user_type = %user_type, "session stored");
    println!("Signed in as {} ({user_type})", email.trim());
    Ok(())
}

pub(crate) fn cli_logout(storage: &LocalStorage) -> Result<()> {
    storage.clear()?;
    println!("Signed out");
    Ok(())
}

fn cli_bills(args: &[String], config: &Config, storage: &LocalStorage) -> Result<()> {
    let mut router = build_router(config, storage)?;
    router.navigate_to(Route::Bills.path());
    if let Some(error) = router.error() {
        anyhow::bail!("Could not load bills: {error}");
    }

    let rows = views::sorted_rows(router.rows());
    if rows.is_empty() {
        println!("No bills");
    } else {
        println!(
            "{:<10} {:<24} {:<24} {:>8} {:<11} File",
            "Date", "Type", "Name", "Amount", "Status"
        );
        println!("{}", "─".repeat(90));
        for row in &rows {
            println!(
                "{:<10} {:<24} {:<24} {:>6} € {:<11} {}",
                row.date,
                row.bill.expense_type,
                row.bill.name,
                row.bill.amount,
                row.status,
                row.bill.file_name.as_deref().unwrap_or("-"),
            );
        }
    }

    if let Some(path) = flag(args, "--html") {
        write_html(path, "Mes notes de frais", &router.page().markup)?;
    }
    Ok(())
}

/// Form values taken from `new-bill` flags. `today` fills a missing date.
pub(crate) fn form_from_flags(args: &[String], today: &str) -> NewBillForm {
    let value = |name: &str| flag(args, name).unwrap_or_default().to_string();
    NewBillForm {
        expense_type: flag(args, "--type").unwrap_or("Transports").to_string(),
        name: value("--name"),
        date: flag(args, "--date").unwrap_or(today).to_string(),
        amount: value("--amount"),
        vat: value("--vat"),
        pct: value("--pct"),
        commentary: value("--commentary"),
    }
}

fn cli_new_bill(args: &[String], config: &Config, storage: &LocalStorage) -> Result<()> {
    if storage.session()?.is_none() {
        anyhow::bail!("Not signed in. Run: billed login --email <email>");
    }
    let file_path = flag(args, "--file")
        .ok_or_else(|| anyhow::anyhow!("Usage: billed new-bill --file <receipt> [fields]"))?;
    let file = SelectedFile::from_path(Path::new(&shellexpand(file_path)))?;
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let form = form_from_flags(args, &today);

    let mut router = build_router(config, storage)?;
    router.navigate_to(Route::NewBill.path());

    router.dispatch(UiEvent::ChangeFile(file));
    let alerts = router.take_alerts();
    if !alerts.is_empty() {
        anyhow::bail!("{}", alerts.join("\n"));
    }

    router.dispatch(UiEvent::Submit(form));
    match router.route() {
        Some(Route::Bills) => {
            println!("Bill sent");
            if let Some(error) = router.error() {
                eprintln!("Warning: could not reload bills: {error}");
            }
            Ok(())
        }
        other => anyhow::bail!(
            "The bill was not accepted; still on {}",
            other.unwrap_or(Route::NewBill)
        ),
    }
}

fn cli_show(args: &[String], config: &Config, storage: &LocalStorage) -> Result<()> {
    let path = args
        .first()
        .filter(|a| !a.starts_with("--"))
        .map(String::as_str)
        .unwrap_or_default();

    let mut router = build_router(config, storage)?;
    router.start(path);
    let route = router.route().unwrap_or(Route::Login);

    match flag(args, "--html") {
        Some(out) => write_html(out, &route.to_string(), &router.page().markup),
        None => {
            println!("{}", router.page().markup);
            Ok(())
        }
    }
}

fn cli_preview(args: &[String], config: &Config, storage: &LocalStorage) -> Result<()> {
    let url = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("Usage: billed preview <url>"))?;

    let mut router = build_router(config, storage)?;
    router.navigate_to(Route::Bills.path());
    if let Some(error) = router.error() {
        anyhow::bail!("Could not load bills: {error}");
    }
    router.dispatch(UiEvent::ClickIconEye {
        bill_url: url.clone(),
    });

    let modal = router
        .modal()
        .ok_or_else(|| anyhow::anyhow!("Preview did not open"))?;
    let kind = if modal.is_document() { "pdf" } else { "image" };
    println!("{} ({kind}, {}px)", modal.bill_url, modal.width);
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
