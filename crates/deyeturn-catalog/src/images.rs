pub const POSTER_SIZE: &str = "w500";
pub const BACKDROP_SIZE: &str = "w1280";
pub const PROFILE_SIZE: &str = "w185";

const PLACEHOLDER: &str = "/placeholder-movie.png";

/// Full image URL for an API image path, or the placeholder when there is none.
pub fn image_url(image_base_url: &str, path: Option<&str>, size: &str) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(path) => format!("{}/{}{}", image_base_url.trim_end_matches('/'), size, path),
        None => PLACEHOLDER.to_string(),
    }
}
