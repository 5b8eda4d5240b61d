//! Page switch: home → survey → result

use crate::core::share;
use crate::types::{Gender, TypeResult};

/// The page being shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// Survey screen; entering without a gender shows the missing-gender error
    Survey { gender: Option<Gender> },
    /// Result screen; `None` renders the not-found view
    Result(Option<TypeResult>),
}

impl Route {
    /// Resolve a location such as `https://host/app/#/result?data=...`,
    /// `#/survey` or `/`.
    ///
    /// Unknown paths land on home. A result route decodes its payload
    /// immediately; a bad payload yields `Result(None)`.
    pub fn from_location(location: &str) -> Self {
        let fragment = location.split_once('#').map(|(_, f)| f).unwrap_or("");
        let path = fragment.split_once('?').map(|(p, _)| p).unwrap_or(fragment);

        match path.trim_end_matches('/') {
            "/survey" => Route::Survey { gender: None },
            "/result" => Route::Result(share::result_from_link(location)),
            _ => Route::Home,
        }
    }

    /// Hash path of this route
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "#/",
            Route::Survey { .. } => "#/survey",
            Route::Result(_) => "#/result",
        }
    }
}
