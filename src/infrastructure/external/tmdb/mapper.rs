use strsim::jaro_winkler;

use crate::domain::value_objects::MovieMetadata;

use super::models::{AlternativeTitlesResponse, MovieDetails, MovieResult};

/// Candidates whose best title similarity falls below this are not
/// considered matches at all.
const MIN_TITLE_SIMILARITY: f64 = 0.6;

/// Bonus for a candidate released in the requested year; large enough
/// to outweigh small title differences, small enough that a clearly
/// different title still loses.
const YEAR_MATCH_BONUS: f64 = 0.3;

fn normalize_title(title: &str) -> String {
    title.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

fn title_similarity(query: &str, candidate: &MovieResult) -> f64 {
    let query = normalize_title(query);
    [&candidate.title, &candidate.original_title]
        .iter()
        .filter_map(|t| t.as_deref())
        .map(|t| jaro_winkler(&query, &normalize_title(t)))
        .fold(0.0, f64::max)
}

/// Pick the single best candidate for (title, year), or none.
///
/// Favors same release year and closer title equality, tie-broken by
/// source popularity. Best effort: the caller only relies on getting
/// zero or one candidate.
pub fn best_match(title: &str, year: Option<i32>, results: &[MovieResult]) -> Option<MovieResult> {
    let mut best: Option<(f64, f64, &MovieResult)> = None;

    for candidate in results {
        let similarity = title_similarity(title, candidate);
        if similarity < MIN_TITLE_SIMILARITY {
            continue;
        }

        let mut score = similarity;
        if year.is_some() && candidate.release_year() == year {
            score += YEAR_MATCH_BONUS;
        }
        let popularity = candidate.popularity.unwrap_or(0.0);

        let better = match best {
            None => true,
            Some((best_score, best_pop, _)) => {
                score > best_score || (score == best_score && popularity > best_pop)
            }
        };
        if better {
            best = Some((score, popularity, candidate));
        }
    }

    best.map(|(_, _, candidate)| candidate.clone())
}

pub fn map_metadata(details: MovieDetails, alternatives: AlternativeTitlesResponse) -> MovieMetadata {
    let release_year = details
        .release_date
        .as_deref()
        .and_then(|d| d.get(..4))
        .and_then(|y| y.parse().ok());

    MovieMetadata {
        external_id: details.id,
        url: format!("https://www.themoviedb.org/movie/{}", details.id),
        title: details.title.unwrap_or_default(),
        release_year,
        genres: details.genres.into_iter().map(|g| g.name).collect(),
        production_countries: details
            .production_countries
            .into_iter()
            .map(|c| c.name)
            .collect(),
        spoken_languages: details
            .spoken_languages
            .into_iter()
            .filter_map(|l| l.english_name.or(l.name))
            .collect(),
        alternate_titles: alternatives.titles.into_iter().map(|t| t.title).collect(),
        popularity: details.popularity.unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: u64, title: &str, date: &str, popularity: f64) -> MovieResult {
        MovieResult {
            id,
            title: Some(title.to_string()),
            original_title: None,
            release_date: if date.is_empty() {
                None
            } else {
                Some(date.to_string())
            },
            popularity: Some(popularity),
            vote_average: None,
            vote_count: None,
        }
    }

    #[test]
    fn test_same_year_beats_more_popular_other_year() {
        let results = vec![
            result(1, "Solaris", "2002-11-27", 50.0),
            result(2, "Solaris", "1972-03-20", 10.0),
        ];
        let best = best_match("Solaris", Some(1972), &results).unwrap();
        assert_eq!(best.id, 2);
    }

    #[test]
    fn test_popularity_breaks_exact_ties() {
        let results = vec![
            result(1, "The Matrix", "1999-03-30", 10.0),
            result(2, "The Matrix", "1999-03-30", 80.0),
        ];
        let best = best_match("The Matrix", Some(1999), &results).unwrap();
        assert_eq!(best.id, 2);
    }

    #[test]
    fn test_dissimilar_titles_produce_no_candidate() {
        let results = vec![result(1, "Completely Different Film", "1999-01-01", 99.0)];
        assert_eq!(best_match("The Matrix", Some(1999), &results), None);
        assert_eq!(best_match("The Matrix", Some(1999), &[]), None);
    }

    #[test]
    fn test_no_year_requested_ranks_by_title_alone() {
        let results = vec![
            result(1, "The Matrix Reloaded", "2003-05-15", 90.0),
            result(2, "The Matrix", "1999-03-30", 10.0),
        ];
        let best = best_match("The Matrix", None, &results).unwrap();
        assert_eq!(best.id, 2);
    }

    #[test]
    fn test_map_metadata_fields() {
        use super::super::models::*;
        let details = MovieDetails {
            id: 603,
            title: Some("The Matrix".into()),
            release_date: Some("1999-03-30".into()),
            popularity: Some(85.0),
            genres: vec![Genre { id: 28, name: "Action".into() }],
            production_countries: vec![ProductionCountry {
                iso_3166_1: Some("US".into()),
                name: "United States of America".into(),
            }],
            spoken_languages: vec![SpokenLanguage {
                english_name: Some("English".into()),
                name: None,
            }],
        };
        let alternatives = AlternativeTitlesResponse {
            titles: vec![AlternativeTitle {
                iso_3166_1: Some("IT".into()),
                title: "Matrix".into(),
            }],
        };

        let metadata = map_metadata(details, alternatives);
        assert_eq!(metadata.external_id, 603);
        assert_eq!(metadata.url, "https://www.themoviedb.org/movie/603");
        assert_eq!(metadata.release_year, Some(1999));
        assert_eq!(metadata.genres, vec!["Action"]);
        assert_eq!(metadata.spoken_languages, vec!["English"]);
        assert_eq!(metadata.alternate_titles, vec!["Matrix"]);
    }
}
