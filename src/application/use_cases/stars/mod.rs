pub mod fetch_stars;
pub mod set_github_token;
