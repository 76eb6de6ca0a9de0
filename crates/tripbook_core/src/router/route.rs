//! Route values and the fragment grammar `/`, `/trip/{id}`, `/print/{id}`.

use std::fmt::{Display, Formatter};

const FRAGMENT_SEPARATOR: char = '#';

/// View state selected by the current fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// Trip list / landing view.
    #[default]
    List,
    /// Editor for one trip.
    Edit(String),
    /// Print sheet for one trip.
    Print(String),
}

impl Route {
    /// Fragment string that [`parse_fragment`] maps back to `self`.
    pub fn to_fragment(&self) -> String {
        match self {
            Self::List => "/".to_string(),
            Self::Edit(id) => format!("/trip/{id}"),
            Self::Print(id) => format!("/print/{id}"),
        }
    }

    /// Trip id carried by the route, if any.
    pub fn trip_id(&self) -> Option<&str> {
        match self {
            Self::List => None,
            Self::Edit(id) | Self::Print(id) => Some(id.as_str()),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_fragment())
    }
}

/// Maps a navigation fragment to a route.
///
/// One leading `#` is stripped, then the path is split on `/` with empty
/// segments dropped. Segments past the id are ignored.
pub fn parse_fragment(fragment: &str) -> Route {
    let path = fragment
        .strip_prefix(FRAGMENT_SEPARATOR)
        .unwrap_or(fragment);
    let mut segments = path.split('/').filter(|segment| !segment.is_empty());

    match (segments.next(), segments.next()) {
        (Some("trip"), Some(id)) => Route::Edit(id.to_string()),
        (Some("print"), Some(id)) => Route::Print(id.to_string()),
        _ => Route::List,
    }
}
