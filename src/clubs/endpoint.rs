//! Path and query builders for the clubhub service.
//!
//! Both builders validate their input and fail with `XblError::Validation`
//! before any request is made.

use crate::error::{Result, XblError};

/// Maximum number of ids clubhub accepts in one `Ids(...)` segment.
pub const MAX_IDS: usize = 10;

const SEPARATOR: &str = ",";

/// Decorations requested by [`get_clubs`](super::get_clubs) when the caller
/// passes none.
pub const DEFAULT_DECORATIONS: [&str; 4] = [
    "detail",
    "clubPresence",
    "roster(member moderator requestedToJoin banned recommended)",
    "settings",
];

/// What the ids in a clubhub path refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSelector {
    /// Club ids: `/clubs/Ids(...)`.
    Ids,
    /// A user: `/clubs/Xuid(...)`, every club the user is associated with.
    Xuid,
}

impl IdSelector {
    fn segment(self) -> &'static str {
        match self {
            IdSelector::Ids => "Ids",
            IdSelector::Xuid => "Xuid",
        }
    }
}

/// Builds `/clubs/<Selector>(<id>,<id>...)[/decoration/<d>,<d>...]`.
///
/// # Errors
///
/// `XblError::Validation` when `ids` is empty, holds more than
/// [`MAX_IDS`] entries, or a decoration is an empty string.
pub fn id_path<S: AsRef<str>, D: AsRef<str>>(
    ids: &[S],
    selector: IdSelector,
    decorations: &[D],
) -> Result<String> {
    if ids.is_empty() {
        return Err(XblError::validation("at least one id is required"));
    }
    if ids.len() > MAX_IDS {
        return Err(XblError::validation(format!(
            "endpoint has {} ids, more than the supported maximum ({MAX_IDS})",
            ids.len()
        )));
    }
    if decorations.iter().any(|d| d.as_ref().is_empty()) {
        return Err(XblError::validation("decorations must not be empty"));
    }

    let ids: Vec<&str> = ids.iter().map(AsRef::as_ref).collect();
    let mut path = format!("/clubs/{}({})", selector.segment(), ids.join(SEPARATOR));
    if !decorations.is_empty() {
        let decorations: Vec<&str> = decorations.iter().map(AsRef::as_ref).collect();
        path.push_str("/decoration/");
        path.push_str(&decorations.join(SEPARATOR));
    }
    Ok(path)
}

/// Club search criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClubSearch {
    pub query: String,
    /// Restrict to clubs associated with these title ids.
    pub titles: Option<Vec<String>>,
    /// Restrict to clubs carrying these tags (see
    /// [`CLUB_TAGS`](super::consts::CLUB_TAGS)).
    pub tags: Option<Vec<String>>,
    pub count: Option<u32>,
}

impl ClubSearch {
    pub fn new(query: impl Into<String>) -> Self {
        ClubSearch {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.titles = Some(titles.into_iter().map(Into::into).collect());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }
}

/// Query parameters for `GET /clubs/search`: `q` first, then the filters
/// that are set, lists comma-joined.
pub fn search_params(search: &ClubSearch) -> Result<Vec<(String, String)>> {
    if search.query.is_empty() {
        return Err(XblError::validation("query must not be empty"));
    }

    let mut params = vec![("q".to_string(), search.query.clone())];
    if let Some(titles) = &search.titles {
        params.push(("titles".to_string(), titles.join(SEPARATOR)));
    }
    if let Some(tags) = &search.tags {
        params.push(("tags".to_string(), tags.join(SEPARATOR)));
    }
    if let Some(count) = search.count {
        params.push(("count".to_string(), count.to_string()));
    }
    Ok(params)
}
