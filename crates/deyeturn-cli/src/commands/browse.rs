use super::Context;
use crate::output::{check_mark, percent, styled_table, Output};
use crate::BrowseCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use deyeturn_catalog::{
    image_url, DiscoverQuery, MovieCatalog, TmdbClient, BACKDROP_SIZE, POSTER_SIZE, PROFILE_SIZE,
};
use deyeturn_models::{Credits, Genre, Movie, MovieDetails, MovieId, Page, Review, GENRES};
use serde_json::json;
use tracing::info;

const MAIN_CAST: usize = 10;
const SHOWN_REVIEWS: usize = 3;
const REVIEW_EXCERPT: usize = 300;

pub async fn run_browse(cmd: BrowseCommands, ctx: &Context, output: &Output) -> Result<()> {
    let catalog = ctx.catalog()?;
    if !catalog.has_token() {
        output.warn("No metadata API token configured. Set DEYETURN_TMDB_TOKEN or run 'deyeturn config token <TOKEN>'");
    }

    match cmd {
        BrowseCommands::List { kind, page } => {
            let movies = catalog.list(kind, page).await?;
            print_movies(&kind.to_string(), &movies, output)
        }
        BrowseCommands::Search { query, page } => {
            let movies = catalog.search(&query, page).await?;
            print_movies(&format!("Results for \"{}\"", query.trim()), &movies, output)
        }
        BrowseCommands::Discover {
            page,
            genre,
            year,
            sort_by,
            min_rating,
            max_rating,
            from_year,
            to_year,
        } => {
            let query = DiscoverQuery {
                page,
                genres: resolve_genres(&genre)?,
                year,
                sort_by,
                vote_average_gte: min_rating,
                vote_average_lte: max_rating,
                release_year_gte: from_year,
                release_year_lte: to_year,
            };
            let movies = catalog.discover(&query).await?;
            print_movies("Discover", &movies, output)
        }
        BrowseCommands::Movie { id, related } => show_movie(&catalog, id, related, ctx, output).await,
    }
}

/// Genre filters given as ids or names, e.g. `action,878`.
fn resolve_genres(values: &[String]) -> Result<Vec<u32>> {
    values
        .iter()
        .filter(|v| !v.trim().is_empty())
        .map(|v| {
            Genre::lookup(v).map(|g| g.id).ok_or_else(|| {
                let known = GENRES.iter().map(|(_, name)| *name).collect::<Vec<_>>().join(", ");
                eyre!("Unknown genre: {}. Known genres: {}", v, known)
            })
        })
        .collect()
}

fn genre_names(ids: &[u32]) -> String {
    ids.iter()
        .filter_map(|id| Genre::lookup(&id.to_string()))
        .map(|g| g.name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_movies(heading: &str, movies: &Page<Movie>, output: &Output) -> Result<()> {
    output.json(&serde_json::to_value(movies)?);

    if !output.is_human() {
        return Ok(());
    }
    if movies.results.is_empty() {
        output.info(format!("{}: no movies found", heading));
        return Ok(());
    }

    output.info(format!(
        "{} (page {} of {}, {} movies)",
        heading,
        movies.page,
        movies.total_pages.max(movies.page),
        movies.total_results
    ));
    let mut table = styled_table(["Id", "Title", "Year", "Rating", "Genres"]);
    for movie in &movies.results {
        table.add_row(vec![
            movie.id.to_string(),
            movie.title.clone(),
            movie.year().map(|y| y.to_string()).unwrap_or_default(),
            format!("{:.1}", movie.vote_average),
            genre_names(&movie.genre_ids),
        ]);
    }
    output.table(&table);
    if movies.has_next() {
        output.info(format!("More results with --page {}", movies.page + 1));
    }
    Ok(())
}

async fn show_movie(catalog: &TmdbClient, id: MovieId, related: bool, ctx: &Context, output: &Output) -> Result<()> {
    let (details, trailer, credits, reviews) = futures::try_join!(
        catalog.details(id),
        catalog.trailer(id),
        catalog.credits(id),
        catalog.reviews(id, 1)
    )?;
    let (similar, recommendations) = if related {
        let (similar, recommendations) =
            futures::try_join!(catalog.similar(id), catalog.recommendations(id))?;
        (Some(similar), Some(recommendations))
    } else {
        (None, None)
    };
    info!("Fetched details for {} from {}", id, catalog.catalog_name());

    let profile = ctx.open_profile()?;
    let in_watchlist = profile.watchlist().is_in_watchlist(id);
    let progress = profile.progress().get_progress(id);

    let image_base = &ctx.config.catalog.image_base_url;
    let poster = image_url(image_base, details.poster_path.as_deref(), POSTER_SIZE);
    let backdrop = image_url(image_base, details.backdrop_path.as_deref(), BACKDROP_SIZE);
    let trailer_url = trailer.as_ref().map(|t| format!("https://www.youtube.com/watch?v={}", t.key));
    let cast: Vec<_> = credits
        .main_cast(MAIN_CAST)
        .into_iter()
        .map(|member| {
            json!({
                "name": member.name,
                "character": member.character,
                "profileUrl": image_url(image_base, member.profile_path.as_deref(), PROFILE_SIZE),
            })
        })
        .collect();
    let directors: Vec<&str> = credits.directors().map(|d| d.name.as_str()).collect();

    output.json(&json!({
        "movie": details,
        "posterUrl": poster,
        "backdropUrl": backdrop,
        "trailer": trailer,
        "trailerUrl": trailer_url,
        "directors": directors,
        "cast": cast,
        "reviews": reviews.results,
        "inWatchlist": in_watchlist,
        "progress": progress,
        "similar": similar.as_ref().map(|p| &p.results),
        "recommendations": recommendations.as_ref().map(|p| &p.results),
    }));

    if !output.is_human() {
        return Ok(());
    }

    output.table(&details_table(&details, &poster, trailer_url.as_deref(), in_watchlist, progress));
    if !credits.cast.is_empty() {
        if directors.is_empty() {
            output.info("Cast");
        } else {
            output.info(format!("Cast, directed by {}", directors.join(", ")));
        }
        output.table(&cast_table(&credits));
    }
    if !reviews.results.is_empty() {
        output.info(format!("Reviews ({} total)", reviews.total_results));
        output.table(&reviews_table(&reviews.results));
    }
    if let Some(similar) = similar {
        print_movies("Similar", &similar, output)?;
    }
    if let Some(recommendations) = recommendations {
        print_movies("Recommended", &recommendations, output)?;
    }
    Ok(())
}

fn details_table(
    details: &MovieDetails,
    poster: &str,
    trailer_url: Option<&str>,
    in_watchlist: bool,
    progress: f64,
) -> comfy_table::Table {
    let mut table = styled_table([details.title.clone(), details.id.to_string()]);
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        table.add_row(vec!["Tagline".to_string(), tagline.to_string()]);
    }
    table.add_row(vec!["Released".to_string(), details.release_date.clone().unwrap_or_default()]);
    if let Some(runtime) = details.runtime.filter(|r| *r > 0) {
        table.add_row(vec!["Runtime".to_string(), format!("{}h {}m", runtime / 60, runtime % 60)]);
    }
    table.add_row(vec!["Rating".to_string(), format!("{:.1}", details.vote_average)]);
    table.add_row(vec![
        "Genres".to_string(),
        details.genres.iter().map(|g| g.name.as_str()).collect::<Vec<_>>().join(", "),
    ]);
    table.add_row(vec!["Overview".to_string(), details.overview.clone()]);
    table.add_row(vec!["Poster".to_string(), poster.to_string()]);
    table.add_row(vec!["Trailer".to_string(), trailer_url.unwrap_or("-").to_string()]);
    table.add_row(vec!["On watchlist".to_string(), check_mark(in_watchlist)]);
    table.add_row(vec!["Progress".to_string(), percent(progress)]);
    table
}

fn cast_table(credits: &Credits) -> comfy_table::Table {
    let mut table = styled_table(["Actor", "Character"]);
    for member in credits.main_cast(MAIN_CAST) {
        table.add_row(vec![member.name.clone(), member.character.clone()]);
    }
    table
}

fn reviews_table(reviews: &[Review]) -> comfy_table::Table {
    let mut table = styled_table(["Author", "Rating", "Date", "Review"]);
    for review in reviews.iter().take(SHOWN_REVIEWS) {
        table.add_row(vec![
            review.byline().to_string(),
            review
                .author_details
                .rating
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "-".to_string()),
            review.created_at.get(..10).unwrap_or(&review.created_at).to_string(),
            excerpt(&review.content, REVIEW_EXCERPT),
        ]);
    }
    table
}

/// First `max` characters of `text`, with an ellipsis when cut.
fn excerpt(text: &str, max: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_genres_by_name_and_id() {
        let ids = resolve_genres(&["Action".to_string(), "878".to_string()]).unwrap();
        assert_eq!(ids, vec![28, 878]);
    }

    #[test]
    fn test_resolve_unknown_genre() {
        assert!(resolve_genres(&["telenovela".to_string()]).is_err());
    }

    #[test]
    fn test_genre_names() {
        assert_eq!(genre_names(&[28, 12]), "Action, Adventure");
        assert_eq!(genre_names(&[]), "");
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("  Short review. ", 300), "Short review.");
        assert_eq!(excerpt("abcdef", 3), "abc...");
        assert_eq!(excerpt("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_reviews_table_limits_rows() {
        let reviews: Vec<Review> = (0..5)
            .map(|i| {
                serde_json::from_value(json!({
                    "id": i.to_string(),
                    "author": format!("critic{}", i),
                    "content": "Fine.",
                    "created_at": "2021-04-01T10:00:00.000Z"
                }))
                .unwrap()
            })
            .collect();
        assert_eq!(reviews_table(&reviews).row_count(), SHOWN_REVIEWS);
    }

    #[test]
    fn test_cast_table_uses_billing_order() {
        let cast: Vec<_> = (0..12u32)
            .rev()
            .map(|i| json!({"id": i, "name": format!("Actor {}", i), "order": i}))
            .collect();
        let credits: Credits = serde_json::from_value(json!({"id": 603, "cast": cast})).unwrap();
        let table = cast_table(&credits);
        assert_eq!(table.row_count(), MAIN_CAST);
        let first = table.row(0).unwrap().cell_iter().next().unwrap().content();
        assert_eq!(first, "Actor 0");
    }
}
