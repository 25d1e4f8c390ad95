//! Page path routing.
//!
//! Page URLs have exactly the shape `/<action>/<id>`. [`Route::parse`] is the
//! only place that turns a raw request path into a [`PageId`], so nothing
//! containing `/` or `.` can ever reach the page store.

use wiki_storage::PageId;

/// What to do with a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Show the rendered page.
    View,
    /// Show the edit form.
    Edit,
    /// Persist submitted form fields.
    Save,
}

impl Action {
    /// Path prefix keyword for this action.
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Save => "save",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "view" => Some(Self::View),
            "edit" => Some(Self::Edit),
            "save" => Some(Self::Save),
            _ => None,
        }
    }

    /// URL path of this action for a page.
    pub(crate) fn url(self, id: &PageId) -> String {
        format!("/{}/{id}", self.keyword())
    }
}

/// A request path that addresses a page.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Route {
    pub(crate) action: Action,
    pub(crate) id: PageId,
}

impl Route {
    /// Match `path` against `/(view|edit|save)/<id>`.
    ///
    /// Returns `None` for a wrong prefix, a missing or invalid identifier,
    /// a trailing slash or any extra segment. The path is matched as it
    /// appears on the wire, without percent-decoding.
    pub(crate) fn parse(path: &str) -> Option<Self> {
        let rest = path.strip_prefix('/')?;
        let (keyword, id) = rest.split_once('/')?;
        let action = Action::from_keyword(keyword)?;
        let id = PageId::parse(id)?;
        Some(Self { action, id })
    }
}
