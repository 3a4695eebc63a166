use clap::ValueEnum;
use tabled::Table;

use super::{connect, describe, spinner};
use crate::{error, info, types::LeaderboardTableRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricsView {
    /// Total listens recorded on wavy.fm
    Listens,
    /// Total registered users
    Users,
    /// Top 10 users by listen count
    Leaderboard,
}

/// Prints one of the global wavy.fm metrics.
pub async fn metrics(view: MetricsView) {
    let service = connect().metrics();

    match view {
        MetricsView::Listens => {
            let pb = spinner("Fetching total listens...");
            let result = service.total_listens().await;
            pb.finish_and_clear();
            match result {
                Ok(total) => info!("{} listens recorded on wavy.fm", total),
                Err(e) => error!("Failed to fetch total listens. Err: {}", describe(&e, None)),
            }
        }
        MetricsView::Users => {
            let pb = spinner("Fetching total users...");
            let result = service.total_users().await;
            pb.finish_and_clear();
            match result {
                Ok(total) => info!("{} users registered on wavy.fm", total),
                Err(e) => error!("Failed to fetch total users. Err: {}", describe(&e, None)),
            }
        }
        MetricsView::Leaderboard => {
            let pb = spinner("Fetching leaderboard...");
            let result = service.user_listens_leaderboard().await;
            pb.finish_and_clear();
            match result {
                Ok(board) => {
                    let rows: Vec<LeaderboardTableRow> = board
                        .into_iter()
                        .enumerate()
                        .map(|(i, entry)| LeaderboardTableRow {
                            rank: i + 1,
                            username: entry.username,
                            listens: entry.count,
                        })
                        .collect();
                    println!("{}", Table::new(rows));
                }
                Err(e) => error!("Failed to fetch leaderboard. Err: {}", describe(&e, None)),
            }
        }
    }
}
