use tabled::Table;

use crate::{
    config, error, info,
    management::{ArtistFinder, ArtistView, Catalog, FileStore, SearchState, Section, SystemClock},
    utils, warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    Albums,
    TopTracks,
}

pub async fn search(query: String, detail: Option<Detail>, open: bool) {
    let settings = match config::SpotifySettings::from_env() {
        Ok(s) => s,
        Err(e) => error!("Cannot read Spotify credentials. Err: {}", e),
    };

    let finder = ArtistFinder::new(Catalog::new(settings, FileStore::default(), SystemClock));

    let pb = utils::spinner(format!("Searching for {}...", utils::normalize_query(&query)));
    let started = finder.search(&query).await;
    pb.finish_and_clear();

    if !started {
        warning!("Please enter an artist name.");
        return;
    }

    let view = finder.snapshot().await;
    let artist = match view.search_state() {
        SearchState::Found(artist) => artist.clone(),
        SearchState::NotFound => {
            warning!("No artist found.");
            return;
        }
        SearchState::Failed(message) => error!("{}", message),
        SearchState::Idle | SearchState::Searching => return,
    };

    println!("{}", Table::new(vec![utils::artist_row(&artist)]));
    if let Some(image) = utils::first_image(&artist.images) {
        info!("Image: {}", image);
    }

    if open {
        match artist.external_urls.spotify.as_deref() {
            Some(url) => {
                if webbrowser::open(url).is_err() {
                    warning!(
                        "Failed to open browser. Please navigate to the following URL manually:\n{}",
                        url
                    )
                }
            }
            None => warning!("{} has no profile link.", artist.name),
        }
    }

    match detail {
        Some(Detail::Albums) => {
            let pb = utils::spinner(format!("Fetching albums for {}...", artist.name));
            finder.show_albums().await;
            pb.finish_and_clear();
            print_albums(&finder.snapshot().await);
        }
        Some(Detail::TopTracks) => {
            let pb = utils::spinner(format!("Fetching top tracks for {}...", artist.name));
            finder.show_top_tracks().await;
            pb.finish_and_clear();
            print_top_tracks(&finder.snapshot().await);
        }
        None => {}
    }
}

fn print_albums(view: &ArtistView) {
    match view.album_section() {
        Section::Loaded(albums) if albums.is_empty() => warning!("No albums found."),
        Section::Loaded(albums) => {
            println!("Albums & EPs\n{}", Table::new(utils::album_rows(albums)))
        }
        Section::Failed(message) => warning!("{}", message),
        Section::Idle | Section::Loading => {}
    }
}

fn print_top_tracks(view: &ArtistView) {
    match view.track_section() {
        Section::Loaded(tracks) if tracks.is_empty() => warning!("No top tracks found."),
        Section::Loaded(tracks) => {
            println!("Top Tracks\n{}", Table::new(utils::track_rows(tracks)))
        }
        Section::Failed(message) => warning!("{}", message),
        Section::Idle | Section::Loading => {}
    }
}
