//! Filter, group-by and ranking queries over the in-memory table.
//!
//! Every aggregate over ratings excludes missing values; an input with
//! no parseable ratings yields `None`, never NaN.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::entities::FilmRecord;
use crate::domain::services::director_resolver::DirectorResolver;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingStats {
    pub mean: f64,
    pub median: f64,
    pub max: f64,
    pub min: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_films: usize,
    pub average_rating: Option<f64>,
    pub great_movies: usize,
    pub features: usize,
    pub shorts: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub title_contains: Option<String>,
    pub director_contains: Option<String>,
    pub year: Option<i32>,
    pub min_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectorStats {
    pub director: String,
    pub films: usize,
    pub average_rating: Option<f64>,
    pub great_movies: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeStats {
    pub decade: i32,
    pub films: usize,
    pub average_rating: Option<f64>,
    pub great_movies: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalStats {
    pub first_watch: NaiveDate,
    pub last_watch: NaiveDate,
    pub span_days: i64,
}

fn mean_rating(films: &[&FilmRecord]) -> Option<f64> {
    let ratings: Vec<f64> = films.iter().filter_map(|f| f.rating).collect();
    if ratings.is_empty() {
        None
    } else {
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    }
}

/// Rated films first, highest rating first; unrated rows sort last.
fn by_rating_desc(a: &FilmRecord, b: &FilmRecord) -> Ordering {
    match (a.rating, b.rating) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn rating_stats(films: &[FilmRecord]) -> Option<RatingStats> {
    let mut ratings: Vec<f64> = films.iter().filter_map(|f| f.rating).collect();
    if ratings.is_empty() {
        return None;
    }
    ratings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = ratings.len() / 2;
    let median = if ratings.len() % 2 == 0 {
        (ratings[mid - 1] + ratings[mid]) / 2.0
    } else {
        ratings[mid]
    };

    Some(RatingStats {
        mean: ratings.iter().sum::<f64>() / ratings.len() as f64,
        median,
        max: *ratings.last().unwrap(),
        min: ratings[0],
    })
}

pub fn dashboard(films: &[FilmRecord]) -> DashboardStats {
    DashboardStats {
        total_films: films.len(),
        average_rating: mean_rating(&films.iter().collect::<Vec<_>>()),
        great_movies: films.iter().filter(|f| f.is_great()).count(),
        features: films.iter().filter(|f| f.is_feature()).count(),
        shorts: films
            .iter()
            .filter(|f| f.duration_minutes.map_or(false, |d| d < crate::domain::entities::FEATURE_MIN_MINUTES))
            .count(),
    }
}

/// Most recently watched films, newest first. Rows without a parsed
/// watch date are excluded.
pub fn recent_watches(films: &[FilmRecord], limit: usize) -> Vec<&FilmRecord> {
    let mut dated: Vec<&FilmRecord> = films.iter().filter(|f| f.watched_date.is_some()).collect();
    dated.sort_by(|a, b| b.watched_date.cmp(&a.watched_date));
    dated.truncate(limit);
    dated
}

/// Apply the search filters, sorted by rating descending with unrated
/// rows last.
pub fn search<'a>(films: &'a [FilmRecord], filters: &SearchFilters) -> Vec<&'a FilmRecord> {
    let title = filters.title_contains.as_ref().map(|t| t.to_lowercase());
    let director = filters.director_contains.as_ref().map(|d| d.to_lowercase());

    let mut results: Vec<&FilmRecord> = films
        .iter()
        .filter(|f| {
            title
                .as_ref()
                .map_or(true, |t| f.title.to_lowercase().contains(t))
        })
        .filter(|f| {
            director
                .as_ref()
                .map_or(true, |d| f.director.to_lowercase().contains(d))
        })
        .filter(|f| filters.year.map_or(true, |y| f.year == Some(y)))
        .filter(|f| {
            filters
                .min_rating
                .map_or(true, |min| f.rating.map_or(false, |r| r >= min))
        })
        .collect();
    results.sort_by(|a, b| by_rating_desc(a, b));
    results
}

pub fn top_rated(films: &[FilmRecord], limit: usize) -> Vec<&FilmRecord> {
    let mut rated: Vec<&FilmRecord> = films.iter().filter(|f| f.rating.is_some()).collect();
    rated.sort_by(|a, b| by_rating_desc(a, b));
    rated.truncate(limit);
    rated
}

pub fn top_rated_for_year(films: &[FilmRecord], year: i32, limit: usize) -> Vec<&FilmRecord> {
    let mut rated: Vec<&FilmRecord> = films
        .iter()
        .filter(|f| f.year == Some(year) && f.rating.is_some())
        .collect();
    rated.sort_by(|a, b| by_rating_desc(a, b));
    rated.truncate(limit);
    rated
}

/// `decade` is the decade start, e.g. 1990 covers 1990–1999.
pub fn top_rated_for_decade(films: &[FilmRecord], decade: i32, limit: usize) -> Vec<&FilmRecord> {
    let mut rated: Vec<&FilmRecord> = films
        .iter()
        .filter(|f| {
            f.rating.is_some() && f.year.map_or(false, |y| y >= decade && y < decade + 10)
        })
        .collect();
    rated.sort_by(|a, b| by_rating_desc(a, b));
    rated.truncate(limit);
    rated
}

/// Per-director stats over feature films only, ranked by film count.
/// The unknown-director bucket is excluded from the ranking.
pub fn director_rankings(
    films: &[FilmRecord],
    resolver: &DirectorResolver,
    limit: usize,
) -> Vec<DirectorStats> {
    let mut by_director: HashMap<String, Vec<&FilmRecord>> = HashMap::new();
    for film in films.iter().filter(|f| f.is_feature()) {
        let label = resolver.resolve(&film.director);
        if DirectorResolver::is_unknown(&label) {
            continue;
        }
        by_director.entry(label).or_default().push(film);
    }

    let mut rankings: Vec<DirectorStats> = by_director
        .into_iter()
        .map(|(director, films)| DirectorStats {
            films: films.len(),
            average_rating: mean_rating(&films),
            great_movies: films.iter().filter(|f| f.is_great()).count(),
            director,
        })
        .collect();
    // Deterministic: count first, name as tiebreak
    rankings.sort_by(|a, b| b.films.cmp(&a.films).then_with(|| a.director.cmp(&b.director)));
    rankings.truncate(limit);
    rankings
}

/// A director's films in release order; rows with an unknown year last.
pub fn filmography<'a>(
    films: &'a [FilmRecord],
    resolver: &DirectorResolver,
    director: &str,
) -> Vec<&'a FilmRecord> {
    let canonical = resolver.resolve(director);
    let mut result: Vec<&FilmRecord> = films
        .iter()
        .filter(|f| resolver.resolve(&f.director) == canonical)
        .collect();
    result.sort_by(|a, b| match (a.year, b.year) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    result
}

pub fn temporal_stats(films: &[FilmRecord]) -> Option<TemporalStats> {
    let dates: Vec<NaiveDate> = films.iter().filter_map(|f| f.watched_date).collect();
    let first = *dates.iter().min()?;
    let last = *dates.iter().max()?;
    Some(TemporalStats {
        first_watch: first,
        last_watch: last,
        span_days: (last - first).num_days(),
    })
}

/// Watch counts per (year, month), chronological.
pub fn monthly_activity(films: &[FilmRecord]) -> Vec<((i32, u32), usize)> {
    let mut counts: HashMap<(i32, u32), usize> = HashMap::new();
    for date in films.iter().filter_map(|f| f.watched_date) {
        *counts.entry((date.year(), date.month())).or_default() += 1;
    }
    let mut activity: Vec<((i32, u32), usize)> = counts.into_iter().collect();
    activity.sort_by_key(|(month, _)| *month);
    activity
}

/// Stats per release decade, over rows with both a year and a rating.
pub fn decade_stats(films: &[FilmRecord]) -> Vec<DecadeStats> {
    let mut by_decade: HashMap<i32, Vec<&FilmRecord>> = HashMap::new();
    for film in films.iter().filter(|f| f.rating.is_some()) {
        if let Some(year) = film.year {
            by_decade.entry((year / 10) * 10).or_default().push(film);
        }
    }
    let mut stats: Vec<DecadeStats> = by_decade
        .into_iter()
        .map(|(decade, films)| DecadeStats {
            decade,
            films: films.len(),
            average_rating: mean_rating(&films),
            great_movies: films.iter().filter(|f| f.is_great()).count(),
        })
        .collect();
    stats.sort_by_key(|s| s.decade);
    stats
}
