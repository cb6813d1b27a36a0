mod film_key;
mod movie_metadata;
pub mod simplified_rating;

pub use film_key::FilmKey;
pub use movie_metadata::MovieMetadata;
