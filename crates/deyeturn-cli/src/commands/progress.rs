use super::Context;
use crate::output::{percent, styled_table, Output};
use crate::ProgressCommands;
use color_eyre::Result;
use deyeturn_models::clamp_fraction;
use serde_json::json;

pub async fn run_progress(cmd: ProgressCommands, ctx: &Context, output: &Output) -> Result<()> {
    let profile = ctx.open_profile()?;
    let store = profile.progress();

    match cmd {
        ProgressCommands::Get { id } => {
            let progress = store.get_progress(id);
            output.json(&json!({ "movieId": id, "progress": progress }));
            if output.is_human() {
                output.info(format!("Movie {}: {}", id, percent(progress)));
            }
        }
        ProgressCommands::Set { id, progress } => {
            if clamp_fraction(progress) != progress {
                output.warn(format!("Progress {} is outside 0..1, storing {}", progress, clamp_fraction(progress)));
            }
            store.update_progress(id, progress);
            output.success(format!("Saved progress for movie {}: {}", id, percent(store.get_progress(id))));
        }
        ProgressCommands::List => {
            let entries = store.get_continue_watching();
            output.json(&json!({ "continueWatching": entries }));

            if !output.is_human() {
                return Ok(());
            }
            if entries.is_empty() {
                output.info("Nothing to continue watching");
                return Ok(());
            }

            let mut table = styled_table(["Movie", "Progress", "Updated"]);
            for entry in &entries {
                table.add_row(vec![
                    entry.movie_id.to_string(),
                    percent(entry.progress),
                    entry.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                ]);
            }
            output.table(&table);
        }
    }

    Ok(())
}
