use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use indicatif::{ProgressBar, ProgressStyle};

use crate::types::{Album, AlbumTableRow, Artist, ArtistTableRow, Image, Track, TrackTableRow};

pub const MAX_QUERY_LEN: usize = 50;

/// Trims the query and caps it at [`MAX_QUERY_LEN`] characters.
pub fn normalize_query(query: &str) -> String {
    query.trim().chars().take(MAX_QUERY_LEN).collect()
}

/// `m:ss`, seconds zero-padded.
pub fn format_duration(duration_ms: u64) -> String {
    let minutes = duration_ms / 60_000;
    let seconds = (duration_ms % 60_000) / 1_000;
    format!("{}:{:02}", minutes, seconds)
}

/// Groups digits in threes, e.g. `1234567` becomes `1,234,567`.
pub fn format_followers(total: u64) -> String {
    let digits = total.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_genres(genres: &[String]) -> String {
    if genres.is_empty() {
        return "No genre info".to_string();
    }
    genres.join(", ")
}

pub fn first_image(images: &[Image]) -> Option<&str> {
    images.first().map(|i| i.url.as_str())
}

pub fn format_epoch_ms(epoch_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => epoch_ms.to_string(),
    }
}

pub fn artist_row(artist: &Artist) -> ArtistTableRow {
    ArtistTableRow {
        name: artist.name.clone(),
        genres: format_genres(&artist.genres),
        followers: format_followers(artist.followers.as_ref().map_or(0, |f| f.total)),
        link: artist.external_urls.spotify.clone().unwrap_or_default(),
    }
}

pub fn album_rows(albums: &[Album]) -> Vec<AlbumTableRow> {
    albums
        .iter()
        .map(|a| AlbumTableRow {
            released: a.release_date.clone(),
            name: a.name.clone(),
            kind: a.album_type.clone(),
            link: a.external_urls.spotify.clone().unwrap_or_default(),
            cover: first_image(&a.images).unwrap_or_default().to_string(),
        })
        .collect()
}

pub fn track_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            position: i + 1,
            name: t.name.clone(),
            album: t.album.name.clone(),
            duration: format_duration(t.duration_ms),
            popularity: t.popularity,
        })
        .collect()
}

pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
