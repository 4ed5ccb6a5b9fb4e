//! Catalog-side record types.

use serde::{Deserialize, Serialize};

use crate::rating::Rating;

/// One film as returned by a catalog search.
///
/// `actors` is already aggregated by the catalog: distinct "First Last"
/// names ordered by last name and joined with `", "`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmRecord {
    pub title: String,
    pub year: i32,
    pub rating: Rating,
    pub genre: String,
    pub actors: String,
}

impl FilmRecord {
    /// Individual actor names, in catalog order.
    pub fn actor_names(&self) -> impl Iterator<Item = &str> {
        self.actors.split(", ").filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_names_splits_joined_list() {
        let film = FilmRecord {
            title: "Inception".to_string(),
            year: 2010,
            rating: Rating::Pg13,
            genre: "Sci-Fi".to_string(),
            actors: "Leonardo DiCaprio, Tom Hardy".to_string(),
        };
        let names: Vec<_> = film.actor_names().collect();
        assert_eq!(names, vec!["Leonardo DiCaprio", "Tom Hardy"]);
    }

    #[test]
    fn actor_names_empty() {
        let film = FilmRecord {
            title: "Untitled".to_string(),
            year: 2000,
            rating: Rating::G,
            genre: String::new(),
            actors: String::new(),
        };
        assert_eq!(film.actor_names().count(), 0);
    }
}
