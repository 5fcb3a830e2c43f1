use super::Context;
use crate::output::{check_mark, styled_table, Output};
use crate::PrefsCommands;
use color_eyre::Result;
use deyeturn_models::{Preferences, Quality};

pub async fn run_prefs(cmd: PrefsCommands, ctx: &Context, output: &Output) -> Result<()> {
    let profile = ctx.open_profile()?;
    let store = profile.preferences();

    match cmd {
        PrefsCommands::Show => {
            let preferences = store.get_preferences();
            print_preferences(&preferences, output)
        }
        PrefsCommands::Set { dark_mode, auto_play, quality, notifications } => {
            let current = store.get_preferences();
            let updated = apply_changes(&current, dark_mode, auto_play, quality, notifications);

            if updated == current {
                output.info("Preferences unchanged");
            } else {
                store.save_preferences(&updated);
                output.success("Preferences saved");
            }
            print_preferences(&updated, output)
        }
    }
}

fn apply_changes(
    current: &Preferences,
    dark_mode: Option<bool>,
    auto_play: Option<bool>,
    quality: Option<Quality>,
    notifications: Option<bool>,
) -> Preferences {
    Preferences {
        dark_mode: dark_mode.unwrap_or(current.dark_mode),
        auto_play: auto_play.unwrap_or(current.auto_play),
        preferred_quality: quality.unwrap_or(current.preferred_quality),
        notifications: notifications.unwrap_or(current.notifications),
    }
}

fn print_preferences(preferences: &Preferences, output: &Output) -> Result<()> {
    output.json(&serde_json::to_value(preferences)?);

    let mut table = styled_table(["Preference", "Value"]);
    table.add_row(vec!["Dark mode".to_string(), check_mark(preferences.dark_mode)]);
    table.add_row(vec!["Auto-play".to_string(), check_mark(preferences.auto_play)]);
    table.add_row(vec!["Preferred quality".to_string(), preferences.preferred_quality.to_string()]);
    table.add_row(vec!["Notifications".to_string(), check_mark(preferences.notifications)]);
    output.table(&table);
    Ok(())
}
