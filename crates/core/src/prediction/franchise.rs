use crate::domain::movie::MovieRecord;

/// Titles that belong to a franchise without carrying its name.
pub const FRANCHISE_ALIASES: [(&str, &[&str]); 5] = [
    ("Batman", &["Dark Knight"]),
    ("Harry Potter", &["Fantastic Beasts"]),
    ("Lord of the Rings", &["The Hobbit"]),
    (
        "The Fast and the Furious",
        &["2 Fast 2 Furious", "Fast Five", "Fast & Furious", "Furious", "Fate of the Furious", "F9"],
    ),
    ("X-Men", &["Wolverine"]),
];

/// Series offered by the prediction form.
pub const KNOWN_SERIES: [&str; 16] = [
    "Avengers",
    "Batman",
    "Despicable Me",
    "Harry Potter",
    "Hunger Games",
    "Jurassic",
    "Lord of the Rings",
    "Mission: Impossible",
    "Pirates of the Caribbean",
    "Shrek",
    "Spider-Man",
    "Star Wars",
    "The Fast and the Furious",
    "Toy Story",
    "Transformers",
    "X-Men",
];

pub fn aliases_for(series: &str) -> &'static [&'static str] {
    FRANCHISE_ALIASES
        .iter()
        .find(|(name, _)| *name == series)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

/// Title contains the series name or one of its aliases.
pub fn belongs_to_series(movie: &MovieRecord, series: &str) -> bool {
    movie.title_contains(series)
        || aliases_for(series).iter().any(|alias| movie.title_contains(alias))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> MovieRecord {
        MovieRecord { title: title.to_string(), ..MovieRecord::placeholder() }
    }

    #[test]
    fn aliases_extend_membership() {
        assert!(belongs_to_series(&titled("The Dark Knight Rises"), "Batman"));
        assert!(belongs_to_series(&titled("Batman Begins"), "Batman"));
        assert!(belongs_to_series(&titled("Furious 7"), "The Fast and the Furious"));
        assert!(!belongs_to_series(&titled("Logan"), "X-Men"));
    }

    #[test]
    fn unknown_series_has_no_aliases() {
        assert!(aliases_for("Star Wars").is_empty());
        assert!(belongs_to_series(&titled("Star Wars: Episode IV"), "Star Wars"));
    }
}
