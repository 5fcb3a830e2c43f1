use super::Context;
use crate::output::Output;
use color_eyre::Result;
use deyeturn_core::Record;

pub async fn run_clear(
    all: bool,
    preferences: bool,
    history: bool,
    watchlist: bool,
    progress: bool,
    ctx: &Context,
    output: &Output,
) -> Result<()> {
    let records = selected_records(all, preferences, history, watchlist, progress);
    if records.is_empty() {
        output.warn("No clear option specified. Use --preferences, --history, --watchlist, --progress, or --all");
        output.info("\nExample: deyeturn clear --history");
        return Ok(());
    }

    let profile = ctx.open_profile()?;
    for record in records {
        profile.clear(record);
        output.success(format!("Cleared {}", describe(record)));
    }

    Ok(())
}

fn selected_records(all: bool, preferences: bool, history: bool, watchlist: bool, progress: bool) -> Vec<Record> {
    if all {
        return Record::ALL.to_vec();
    }
    [
        (preferences, Record::Preferences),
        (history, Record::WatchHistory),
        (watchlist, Record::Watchlist),
        (progress, Record::ContinueWatching),
    ]
    .into_iter()
    .filter_map(|(selected, record)| selected.then_some(record))
    .collect()
}

fn describe(record: Record) -> &'static str {
    match record {
        Record::Preferences => "preferences",
        Record::WatchHistory => "watch history",
        Record::Watchlist => "watchlist",
        Record::ContinueWatching => "continue-watching progress",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_selects_every_record() {
        assert_eq!(selected_records(true, false, false, false, false), Record::ALL.to_vec());
    }

    #[test]
    fn test_individual_flags() {
        assert_eq!(
            selected_records(false, false, true, false, true),
            vec![Record::WatchHistory, Record::ContinueWatching]
        );
        assert!(selected_records(false, false, false, false, false).is_empty());
    }
}
