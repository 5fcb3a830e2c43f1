use super::Context;
use crate::output::{percent, styled_table, Output};
use crate::HistoryCommands;
use color_eyre::Result;
use deyeturn_models::NewWatch;
use serde_json::json;

pub async fn run_history(cmd: HistoryCommands, ctx: &Context, output: &Output) -> Result<()> {
    let profile = ctx.open_profile()?;
    let store = profile.history();

    match cmd {
        HistoryCommands::List => {
            let entries = store.get_history();
            output.json(&json!({ "history": entries }));

            if !output.is_human() {
                return Ok(());
            }
            if entries.is_empty() {
                output.info("No watch history yet");
                return Ok(());
            }

            let mut table = styled_table(["#", "Movie", "Title", "Watched", "Progress"]);
            for (rank, entry) in entries.iter().enumerate() {
                table.add_row(vec![
                    (rank + 1).to_string(),
                    entry.movie_id.to_string(),
                    entry.title.clone(),
                    entry.watched_at.format("%Y-%m-%d %H:%M").to_string(),
                    percent(entry.progress),
                ]);
            }
            output.table(&table);
        }
        HistoryCommands::Record { movie_id, title, thumbnail, progress } => {
            let entry = store.record_watch(NewWatch { movie_id, title, thumbnail, progress });
            output.json(&serde_json::to_value(&entry)?);
            output.success(format!(
                "Recorded {} ({}) at {}",
                entry.title,
                entry.movie_id,
                percent(entry.progress)
            ));
        }
    }

    Ok(())
}
