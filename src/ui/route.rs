use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::models::UserType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    Login,
    Bills,
    NewBill,
    Dashboard,
}

impl Route {
    pub(crate) fn all() -> &'static [Route] {
        &[Self::Login, Self::Bills, Self::NewBill, Self::Dashboard]
    }

    pub(crate) fn path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Bills => "#employee/bills",
            Self::NewBill => "#employee/bill/new",
            Self::Dashboard => "#admin/dashboard",
        }
    }

    /// Exact match against the path table.
    pub(crate) fn lookup(path: &str) -> Option<Route> {
        let path = path.trim();
        Self::all().iter().copied().find(|r| r.path() == path)
    }

    /// Like [`Route::lookup`], but unknown paths land on the login page.
    pub(crate) fn from_path(path: &str) -> Route {
        Self::lookup(path).unwrap_or(Self::Login)
    }

    /// Where a signed-in user starts.
    pub(crate) fn home(user_type: UserType) -> Route {
        match user_type {
            UserType::Employee => Self::Bills,
            UserType::Admin => Self::Dashboard,
        }
    }

    pub(crate) fn nav_icon(&self) -> Option<NavIcon> {
        match self {
            Self::Bills => Some(NavIcon::Window),
            Self::NewBill => Some(NavIcon::Mail),
            Self::Login | Self::Dashboard => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login => write!(f, "Login"),
            Self::Bills => write!(f, "Bills"),
            Self::NewBill => write!(f, "NewBill"),
            Self::Dashboard => write!(f, "Dashboard"),
        }
    }
}

/// Icons of the vertical navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NavIcon {
    Window,
    Mail,
}

impl NavIcon {
    pub(crate) fn all() -> &'static [NavIcon] {
        &[Self::Window, Self::Mail]
    }

    pub(crate) fn test_id(&self) -> &'static str {
        match self {
            Self::Window => "icon-window",
            Self::Mail => "icon-mail",
        }
    }

    pub(crate) fn element_id(&self) -> &'static str {
        match self {
            Self::Window => "layout-icon1",
            Self::Mail => "layout-icon2",
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Window => "Mes notes de frais",
            Self::Mail => "Nouvelle note de frais",
        }
    }
}

/// Handle for requesting navigation from anywhere on the page.
///
/// Clones share one queue; the router drains it after every event it
/// dispatches, so callers never need the router itself.
#[derive(Debug, Clone, Default)]
pub(crate) struct Navigator {
    pending: Rc<RefCell<VecDeque<String>>>,
}

impl Navigator {
    pub(crate) fn navigate(&self, path: impl Into<String>) {
        self.pending.borrow_mut().push_back(path.into());
    }

    pub(crate) fn take_next(&self) -> Option<String> {
        self.pending.borrow_mut().pop_front()
    }
}
