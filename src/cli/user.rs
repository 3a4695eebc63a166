use clap::ValueEnum;
use tabled::Table;

use super::{connect, describe, spinner};
use crate::{
    error, info, success,
    types::{ListenTableRow, UserProfile},
    wavy::UserUri,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UserView {
    /// Public profile
    Profile,
    /// Listen and artist totals
    Stats,
    /// What the user is listening to right now
    Current,
    /// Most recent listens
    Recent,
}

/// Prints profile or listening history of a single user.
pub async fn user(view: UserView, uri: UserUri) {
    let users = connect().users();
    let pb = spinner(format!("Fetching {} for {}...", view_name(view), uri));

    match view {
        UserView::Profile => {
            let result = users.profile(&uri).await;
            pb.finish_and_clear();
            match result {
                Ok(profile) => print_profile(&profile),
                Err(e) => error!("Failed to fetch profile. Err: {}", describe(&e, Some(&uri))),
            }
        }
        UserView::Stats => {
            let result = users.history(uri.clone()).stats().await;
            pb.finish_and_clear();
            match result {
                Ok(stats) => info!(
                    "{} listens across {} artists",
                    stats.total_listens, stats.total_artists
                ),
                Err(e) => error!("Failed to fetch stats. Err: {}", describe(&e, Some(&uri))),
            }
        }
        UserView::Current => {
            let result = users.history(uri.clone()).current().await;
            pb.finish_and_clear();
            match result {
                Ok(current) => success!(
                    "Now playing: {} by {} ({})",
                    current.item.song.name,
                    current.item.artist_names(),
                    current.item.album.name
                ),
                Err(e) => error!(
                    "Failed to fetch current listen. Err: {}",
                    describe(&e, Some(&uri))
                ),
            }
        }
        UserView::Recent => {
            let result = users.history(uri.clone()).recent().await;
            pb.finish_and_clear();
            match result {
                Ok(recent) if recent.items.is_empty() => info!("No recent listens."),
                Ok(recent) => {
                    let rows: Vec<ListenTableRow> = recent
                        .items
                        .into_iter()
                        .map(|r| ListenTableRow {
                            date: r.date.format("%Y-%m-%d %H:%M").to_string(),
                            artists: r.item.artist_names(),
                            song: r.item.song.name,
                            album: r.item.album.name,
                        })
                        .collect();
                    println!("{}", Table::new(rows));
                }
                Err(e) => error!(
                    "Failed to fetch recent listens. Err: {}",
                    describe(&e, Some(&uri))
                ),
            }
        }
    }
}

fn view_name(view: UserView) -> &'static str {
    match view {
        UserView::Profile => "profile",
        UserView::Stats => "stats",
        UserView::Current => "current listen",
        UserView::Recent => "recent listens",
    }
}

fn print_profile(profile: &UserProfile) {
    info!("{} ({})", profile.username, profile.uri);
    info!("Joined {}", profile.join_time.format("%Y-%m-%d"));

    let p = &profile.profile;
    for (label, value) in [
        ("Country", &p.country),
        ("Biography", &p.biography),
        ("Twitter", &p.twitter),
        ("Instagram", &p.instagram),
        ("Spotify", &p.spotify.display_name),
        ("Discord", &p.discord.display_name),
    ] {
        if !value.is_empty() {
            info!("{}: {}", label, value);
        }
    }
}
