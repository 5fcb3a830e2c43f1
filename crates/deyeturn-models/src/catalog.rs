use serde::{Deserialize, Serialize};
use crate::movie_id::MovieId;

/// Movie summary as returned by list, search and discover endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>, // "YYYY-MM-DD", sometimes empty
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl Movie {
    /// Release year parsed from `release_date`, if present.
    pub fn year(&self) -> Option<u32> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>, // Minutes
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Video {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
}

impl Video {
    pub fn is_youtube_trailer(&self) -> bool {
        self.kind == "Trailer" && self.site == "YouTube"
    }
}

/// Cast and crew of a movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Credits {
    pub id: MovieId,
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    /// Top-billed cast, in billing order.
    pub fn main_cast(&self, limit: usize) -> Vec<&CastMember> {
        let mut cast: Vec<&CastMember> = self.cast.iter().collect();
        cast.sort_by_key(|member| member.order);
        cast.truncate(limit);
        cast
    }

    pub fn directors(&self) -> impl Iterator<Item = &CrewMember> {
        self.crew.iter().filter(|member| member.job == "Director")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: String,
}

/// A user review; the API serves these as a [`Page`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    pub author: String,
    #[serde(default)]
    pub author_details: ReviewAuthor,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub url: String,
}

impl Review {
    /// Name to show: the username when set, otherwise the display name.
    pub fn byline(&self) -> &str {
        if self.author_details.username.is_empty() {
            &self.author
        } else {
            &self.author_details.username
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReviewAuthor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub avatar_path: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>, // Out of 10
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Fixed genre table used by browse and filter views.
pub const GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

impl Genre {
    /// Look up a genre in [`GENRES`] by id or case-insensitive name.
    pub fn lookup(key: &str) -> Option<Genre> {
        let key = key.trim();
        GENRES
            .iter()
            .find(|(id, name)| id.to_string() == key || name.eq_ignore_ascii_case(key))
            .map(|(id, name)| Genre { id: *id, name: name.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes_api_shape() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 550, "title": "Fight Club", "overview": "", "poster_path": "/a.jpg",
                 "backdrop_path": null, "release_date": "1999-10-15", "vote_average": 8.4,
                 "genre_ids": [18], "adult": false}
            ],
            "total_pages": 3,
            "total_results": 60
        }"#;
        let page: Page<Movie> = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, MovieId(550));
        assert_eq!(page.results[0].year(), Some(1999));
        assert!(page.has_next());
    }

    #[test]
    fn test_genre_lookup() {
        assert_eq!(Genre::lookup("horror").unwrap().id, 27);
        assert_eq!(Genre::lookup("878").unwrap().name, "Science Fiction");
        assert!(Genre::lookup("Opera").is_none());
    }

    #[test]
    fn test_video_trailer() {
        let video: Video = serde_json::from_str(
            r#"{"key": "abc", "site": "YouTube", "type": "Trailer", "name": "Official"}"#,
        )
        .unwrap();
        assert!(video.is_youtube_trailer());
    }

    #[test]
    fn test_credits_main_cast_in_billing_order() {
        let credits: Credits = serde_json::from_str(
            r#"{
                "id": 603,
                "cast": [
                    {"id": 2, "name": "Laurence Fishburne", "character": "Morpheus", "order": 1},
                    {"id": 1, "name": "Keanu Reeves", "character": "Neo", "profile_path": "/k.jpg", "order": 0},
                    {"id": 3, "name": "Carrie-Anne Moss", "character": "Trinity", "order": 2}
                ],
                "crew": [
                    {"id": 9, "name": "Lana Wachowski", "job": "Director", "department": "Directing"},
                    {"id": 10, "name": "Bill Pope", "job": "Director of Photography", "department": "Camera"}
                ]
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = credits.main_cast(2).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Keanu Reeves", "Laurence Fishburne"]);
        assert_eq!(credits.directors().count(), 1);
    }

    #[test]
    fn test_review_page_and_byline() {
        let page: Page<Review> = serde_json::from_str(
            r#"{
                "id": 603,
                "page": 1,
                "results": [
                    {"id": "5b1c", "author": "Jane Doe",
                     "author_details": {"name": "Jane Doe", "username": "janed", "avatar_path": null, "rating": 9.0},
                     "content": "Still holds up.", "created_at": "2018-06-09T17:51:53.359Z",
                     "url": "https://www.themoviedb.org/review/5b1c"},
                    {"id": "5b1d", "author": "anon", "content": "Meh."}
                ],
                "total_pages": 1,
                "total_results": 2
            }"#,
        )
        .unwrap();

        assert_eq!(page.results[0].byline(), "janed");
        assert_eq!(page.results[0].author_details.rating, Some(9.0));
        assert_eq!(page.results[1].byline(), "anon");
    }
}
