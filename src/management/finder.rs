use tokio::sync::Mutex;

use crate::management::{
    auth::{Clock, SystemClock},
    catalog::Catalog,
    store::KeyValueStore,
    view::ArtistView,
};

/// Drives an [`ArtistView`] with requests made through a [`Catalog`].
///
/// The view lock is never held across a request, so several actions may be
/// in flight at once; the view's tickets decide which result is kept.
pub struct ArtistFinder<S, C = SystemClock> {
    catalog: Catalog<S, C>,
    view: Mutex<ArtistView>,
}

impl<S: KeyValueStore, C: Clock> ArtistFinder<S, C> {
    pub fn new(catalog: Catalog<S, C>) -> Self {
        Self {
            catalog,
            view: Mutex::new(ArtistView::new()),
        }
    }

    pub fn catalog(&self) -> &Catalog<S, C> {
        &self.catalog
    }

    /// Looks up the best match for `query`. Returns `false` without any
    /// request when the query is blank.
    pub async fn search(&self, query: &str) -> bool {
        let Some(ticket) = self.view.lock().await.begin_search(query) else {
            return false;
        };

        let result = self.catalog.search_artist(&ticket.query).await;
        self.view.lock().await.finish_search(&ticket, result);
        true
    }

    /// Loads albums for the artist on display. Returns `false` when there is none.
    pub async fn show_albums(&self) -> bool {
        let Some(ticket) = self.view.lock().await.begin_albums() else {
            return false;
        };

        let result = self.catalog.list_albums(&ticket.artist_id).await;
        self.view.lock().await.finish_albums(&ticket, result);
        true
    }

    /// Loads top tracks for the artist on display. Returns `false` when there is none.
    pub async fn show_top_tracks(&self) -> bool {
        let Some(ticket) = self.view.lock().await.begin_top_tracks() else {
            return false;
        };

        let result = self.catalog.list_top_tracks(&ticket.artist_id).await;
        self.view.lock().await.finish_top_tracks(&ticket, result);
        true
    }

    pub async fn snapshot(&self) -> ArtistView {
        self.view.lock().await.clone()
    }
}
