use super::Context;
use crate::output::Output;
use crate::WatchlistCommands;
use color_eyre::Result;
use serde_json::json;

pub async fn run_watchlist(cmd: WatchlistCommands, ctx: &Context, output: &Output) -> Result<()> {
    let profile = ctx.open_profile()?;
    let store = profile.watchlist();

    match cmd {
        WatchlistCommands::List => {
            let ids = store.get_watchlist();
            output.json(&json!({ "watchlist": ids }));
            if !output.is_human() {
                return Ok(());
            }
            if ids.is_empty() {
                output.info("Watchlist is empty");
            } else {
                for id in &ids {
                    output.info(id.to_string());
                }
            }
        }
        WatchlistCommands::Add { id } => {
            if store.is_in_watchlist(id) {
                output.info(format!("Movie {} is already on the watchlist", id));
            } else {
                store.add_to_watchlist(id);
                output.success(format!("Added movie {} to the watchlist", id));
            }
        }
        WatchlistCommands::Remove { id } => {
            let was_present = store.is_in_watchlist(id);
            store.remove_from_watchlist(id);
            if was_present {
                output.success(format!("Removed movie {} from the watchlist", id));
            } else {
                output.info(format!("Movie {} was not on the watchlist", id));
            }
        }
        WatchlistCommands::Contains { id } => {
            let present = store.is_in_watchlist(id);
            output.json(&json!({ "movieId": id, "inWatchlist": present }));
            if !output.is_human() {
                return Ok(());
            }
            if present {
                output.info(format!("Movie {} is on the watchlist", id));
            } else {
                output.info(format!("Movie {} is not on the watchlist", id));
            }
        }
        WatchlistCommands::Toggle { id } => {
            if store.toggle_watchlist(id) {
                output.success(format!("Added movie {} to the watchlist", id));
            } else {
                output.success(format!("Removed movie {} from the watchlist", id));
            }
        }
    }

    Ok(())
}
