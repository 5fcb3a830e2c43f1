use deyeturn_models::MovieId;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_SORT: &str = "popularity.desc";
const RECENT_RELEASES_FROM: u32 = 2024;

/// How long a cached response stays fresh before it is refetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Revalidate {
    /// Fast-moving lists (trending, now playing)
    Short,
    Medium,
    /// Data that rarely changes (top rated, genres, details)
    Long,
}

impl Revalidate {
    pub fn window(self) -> Duration {
        match self {
            Revalidate::Short => Duration::from_secs(60 * 5),
            Revalidate::Medium => Duration::from_secs(60 * 30),
            Revalidate::Long => Duration::from_secs(60 * 60 * 24),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

/// Curated home-screen rows, each a fixed discover query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    AwardWinning,
    Classics,
    HighRated,
    RecentReleases,
    Blockbusters,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::AwardWinning,
        Collection::Classics,
        Collection::HighRated,
        Collection::RecentReleases,
        Collection::Blockbusters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::AwardWinning => "award-winning",
            Collection::Classics => "classics",
            Collection::HighRated => "high-rated",
            Collection::RecentReleases => "recent-releases",
            Collection::Blockbusters => "blockbusters",
        }
    }

    pub fn query(&self, page: u32) -> DiscoverQuery {
        let base = DiscoverQuery { page, ..DiscoverQuery::default() };
        match self {
            Collection::AwardWinning | Collection::HighRated => DiscoverQuery {
                sort_by: Some("vote_average.desc".to_string()),
                vote_average_gte: Some(8.0),
                ..base
            },
            Collection::Classics => DiscoverQuery {
                sort_by: Some("vote_average.desc".to_string()),
                vote_average_gte: Some(7.5),
                release_year_lte: Some(1990),
                ..base
            },
            Collection::RecentReleases => DiscoverQuery {
                sort_by: Some("release_date.desc".to_string()),
                release_year_gte: Some(RECENT_RELEASES_FROM),
                ..base
            },
            Collection::Blockbusters => DiscoverQuery {
                sort_by: Some("revenue.desc".to_string()),
                ..base
            },
        }
    }
}

/// The canned movie lists shown on the home and browse screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
    Trending(TimeWindow),
    Collection(Collection),
}

impl ListKind {
    pub fn path(&self) -> String {
        match self {
            ListKind::Popular => "/movie/popular".to_string(),
            ListKind::TopRated => "/movie/top_rated".to_string(),
            ListKind::NowPlaying => "/movie/now_playing".to_string(),
            ListKind::Upcoming => "/movie/upcoming".to_string(),
            ListKind::Trending(window) => format!("/trending/movie/{}", window.as_str()),
            ListKind::Collection(_) => "/discover/movie".to_string(),
        }
    }

    pub fn revalidate(&self) -> Revalidate {
        match self {
            ListKind::Trending(_) | ListKind::NowPlaying => Revalidate::Short,
            ListKind::Popular | ListKind::Upcoming => Revalidate::Medium,
            ListKind::TopRated | ListKind::Collection(_) => Revalidate::Long,
        }
    }

    /// Trending is a single page; the rest accept `page`.
    pub fn is_paged(&self) -> bool {
        !matches!(self, ListKind::Trending(_))
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Popular => f.write_str("popular"),
            ListKind::TopRated => f.write_str("top-rated"),
            ListKind::NowPlaying => f.write_str("now-playing"),
            ListKind::Upcoming => f.write_str("upcoming"),
            ListKind::Trending(TimeWindow::Week) => f.write_str("trending"),
            ListKind::Trending(TimeWindow::Day) => f.write_str("trending-day"),
            ListKind::Collection(collection) => f.write_str(collection.as_str()),
        }
    }
}

impl FromStr for ListKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase().replace('_', "-");
        if let Some(collection) = Collection::ALL.iter().find(|c| c.as_str() == name) {
            return Ok(ListKind::Collection(*collection));
        }
        match name.as_str() {
            "popular" => Ok(ListKind::Popular),
            "top-rated" => Ok(ListKind::TopRated),
            "now-playing" => Ok(ListKind::NowPlaying),
            "upcoming" => Ok(ListKind::Upcoming),
            "trending" | "trending-week" => Ok(ListKind::Trending(TimeWindow::Week)),
            "trending-day" => Ok(ListKind::Trending(TimeWindow::Day)),
            _ => Err(format!(
                "Invalid list: {}. Use popular, top-rated, now-playing, upcoming, trending, trending-day, \
                 award-winning, classics, high-rated, recent-releases or blockbusters",
                s
            )),
        }
    }
}

/// Filters for the discover endpoint. Unset (and zero) filters are left out.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverQuery {
    pub page: u32,
    pub genres: Vec<u32>,
    pub year: Option<u32>,
    pub sort_by: Option<String>,
    pub vote_average_gte: Option<f64>,
    pub vote_average_lte: Option<f64>,
    pub release_year_gte: Option<u32>,
    pub release_year_lte: Option<u32>,
}

impl Default for DiscoverQuery {
    fn default() -> Self {
        Self {
            page: 1,
            genres: Vec::new(),
            year: None,
            sort_by: None,
            vote_average_gte: None,
            vote_average_lte: None,
            release_year_gte: None,
            release_year_lte: None,
        }
    }
}

impl DiscoverQuery {
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.max(1).to_string()),
            (
                "sort_by".to_string(),
                self.sort_by.clone().unwrap_or_else(|| DEFAULT_SORT.to_string()),
            ),
        ];

        if !self.genres.is_empty() {
            let joined = self.genres.iter().map(|g| g.to_string()).collect::<Vec<_>>().join(",");
            params.push(("with_genres".to_string(), joined));
        }
        if let Some(year) = self.year.filter(|y| *y != 0) {
            params.push(("primary_release_year".to_string(), year.to_string()));
        }
        if let Some(gte) = self.vote_average_gte.filter(|v| *v != 0.0) {
            params.push(("vote_average.gte".to_string(), gte.to_string()));
        }
        if let Some(lte) = self.vote_average_lte.filter(|v| *v != 0.0) {
            params.push(("vote_average.lte".to_string(), lte.to_string()));
        }
        if let Some(from) = self.release_year_gte.filter(|y| *y != 0) {
            params.push(("primary_release_date.gte".to_string(), format!("{}-01-01", from)));
        }
        if let Some(to) = self.release_year_lte.filter(|y| *y != 0) {
            params.push(("primary_release_date.lte".to_string(), format!("{}-12-31", to)));
        }

        params
    }

    /// A plain "movies in this genre" listing, cached like other genre rows.
    pub fn is_genre_listing(&self) -> bool {
        !self.genres.is_empty()
            && self.year.is_none()
            && self.sort_by.is_none()
            && self.vote_average_gte.is_none()
            && self.vote_average_lte.is_none()
            && self.release_year_gte.is_none()
            && self.release_year_lte.is_none()
    }
}

/// A fully specified GET against the metadata API.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub path: String,
    pub params: Vec<(String, String)>,
    /// `None` for user-specific requests, which always go to the API.
    pub revalidate: Option<Revalidate>,
}

impl Request {
    fn new(path: String, revalidate: Option<Revalidate>) -> Self {
        Self { path, params: Vec::new(), revalidate }
    }

    fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn list(kind: ListKind, page: u32) -> Self {
        if let ListKind::Collection(collection) = kind {
            return Self {
                path: kind.path(),
                params: collection.query(page).params(),
                revalidate: Some(kind.revalidate()),
            };
        }
        let request = Self::new(kind.path(), Some(kind.revalidate()));
        if kind.is_paged() {
            request.param("page", page.max(1))
        } else {
            request
        }
    }

    pub fn search(query: &str, page: u32) -> Self {
        Self::new("/search/movie".to_string(), None)
            .param("query", query.trim())
            .param("page", page.max(1))
    }

    pub fn discover(query: &DiscoverQuery) -> Self {
        let revalidate = query.is_genre_listing().then_some(Revalidate::Long);
        Self {
            path: "/discover/movie".to_string(),
            params: query.params(),
            revalidate,
        }
    }

    pub fn details(id: MovieId) -> Self {
        Self::new(format!("/movie/{}", id), Some(Revalidate::Long))
    }

    pub fn credits(id: MovieId) -> Self {
        Self::new(format!("/movie/{}/credits", id), Some(Revalidate::Long))
    }

    /// Reviews trickle in, so they revalidate sooner than the other detail calls.
    pub fn reviews(id: MovieId, page: u32) -> Self {
        Self::new(format!("/movie/{}/reviews", id), Some(Revalidate::Medium)).param("page", page.max(1))
    }

    pub fn videos(id: MovieId) -> Self {
        Self::new(format!("/movie/{}/videos", id), Some(Revalidate::Long))
    }

    pub fn similar(id: MovieId) -> Self {
        Self::new(format!("/movie/{}/similar", id), Some(Revalidate::Long))
    }

    pub fn recommendations(id: MovieId) -> Self {
        Self::new(format!("/movie/{}/recommendations", id), Some(Revalidate::Long))
    }

    pub fn with_language(self, language: Option<&str>) -> Self {
        match language {
            Some(lang) if !lang.is_empty() => self.param("language", lang),
            _ => self,
        }
    }

    /// Path plus encoded query string; identifies the response in the cache.
    pub fn cache_key(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }
        let query = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}
