use crate::{
    spotify::ApiError,
    types::{Album, Artist, SearchOutcome, Track},
    utils,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
    #[default]
    Idle,
    Searching,
    Found(Artist),
    NotFound,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Idle,
    Loading,
    Loaded(Vec<T>),
    Failed(String),
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Section::Idle
    }
}

impl<T> Section<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Section::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Section::Loading)
    }
}

/// Proof that a search was started; only the latest one is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    pub query: String,
}

/// Proof that an albums or top-tracks fetch was started for `artist_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    seq: u64,
    pub artist_id: String,
}

/// State of the artist page.
///
/// Albums and top tracks share one sequence counter: starting either fetch
/// clears the other section and invalidates its outstanding ticket, so at most
/// one of the two lists is ever non-empty.
#[derive(Debug, Clone, Default)]
pub struct ArtistView {
    search: SearchState,
    albums: Section<Album>,
    tracks: Section<Track>,
    search_seq: u64,
    detail_seq: u64,
}

impl ArtistView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    pub fn artist(&self) -> Option<&Artist> {
        match &self.search {
            SearchState::Found(artist) => Some(artist),
            _ => None,
        }
    }

    pub fn album_section(&self) -> &Section<Album> {
        &self.albums
    }

    pub fn track_section(&self) -> &Section<Track> {
        &self.tracks
    }

    pub fn albums(&self) -> &[Album] {
        self.albums.items()
    }

    pub fn top_tracks(&self) -> &[Track] {
        self.tracks.items()
    }

    /// Starts a search. A blank query leaves the view untouched and yields `None`.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        let query = utils::normalize_query(query);
        if query.is_empty() {
            return None;
        }

        self.search_seq += 1;
        self.detail_seq += 1;
        self.search = SearchState::Searching;
        self.albums = Section::Idle;
        self.tracks = Section::Idle;

        Some(SearchTicket {
            seq: self.search_seq,
            query,
        })
    }

    /// Applies a search result. Returns `false` when a newer search superseded it.
    pub fn finish_search(
        &mut self,
        ticket: &SearchTicket,
        result: Result<SearchOutcome, ApiError>,
    ) -> bool {
        if ticket.seq != self.search_seq {
            return false;
        }

        self.search = match result {
            Ok(SearchOutcome::Found(artist)) => SearchState::Found(artist),
            Ok(SearchOutcome::NotFound) => SearchState::NotFound,
            Err(e) => SearchState::Failed(e.to_string()),
        };
        true
    }

    /// Starts loading albums for the current artist and clears the top tracks.
    pub fn begin_albums(&mut self) -> Option<DetailTicket> {
        let ticket = self.begin_detail()?;
        self.tracks = Section::Idle;
        self.albums = Section::Loading;
        Some(ticket)
    }

    /// Starts loading top tracks for the current artist and clears the albums.
    pub fn begin_top_tracks(&mut self) -> Option<DetailTicket> {
        let ticket = self.begin_detail()?;
        self.albums = Section::Idle;
        self.tracks = Section::Loading;
        Some(ticket)
    }

    pub fn finish_albums(
        &mut self,
        ticket: &DetailTicket,
        result: Result<Vec<Album>, ApiError>,
    ) -> bool {
        if ticket.seq != self.detail_seq {
            return false;
        }

        self.albums = match result {
            Ok(albums) => Section::Loaded(albums),
            Err(e) => Section::Failed(e.to_string()),
        };
        true
    }

    pub fn finish_top_tracks(
        &mut self,
        ticket: &DetailTicket,
        result: Result<Vec<Track>, ApiError>,
    ) -> bool {
        if ticket.seq != self.detail_seq {
            return false;
        }

        self.tracks = match result {
            Ok(tracks) => Section::Loaded(tracks),
            Err(e) => Section::Failed(e.to_string()),
        };
        true
    }

    fn begin_detail(&mut self) -> Option<DetailTicket> {
        let artist_id = self.artist()?.id.clone();
        self.detail_seq += 1;
        Some(DetailTicket {
            seq: self.detail_seq,
            artist_id,
        })
    }
}
