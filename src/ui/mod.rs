pub(crate) mod controllers;
pub(crate) mod route;
pub(crate) mod router;
pub(crate) mod views;

#[cfg(test)]
pub(crate) mod fixtures;
