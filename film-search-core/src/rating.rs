/// MPAA-style film rating.
///
/// The catalog stores ratings as free text; anything that is not one of the
/// five known codes is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rating {
    G,
    Pg,
    Pg13,
    R,
    Nc17,
    Other(String),
}

/// Display severity of a rating. Only used for emphasis in tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    Mild,
    Moderate,
    Restricted,
    Unrated,
}

impl Rating {
    /// Canonical code, e.g. `"PG-13"`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::G => "G",
            Self::Pg => "PG",
            Self::Pg13 => "PG-13",
            Self::R => "R",
            Self::Nc17 => "NC-17",
            Self::Other(s) => s,
        }
    }

    /// Parse a rating leniently: trimmed, case-insensitive.
    pub fn from_str_loose(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_uppercase().as_str() {
            "G" => Self::G,
            "PG" => Self::Pg,
            "PG-13" | "PG13" => Self::Pg13,
            "R" => Self::R,
            "NC-17" | "NC17" => Self::Nc17,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn tier(&self) -> RatingTier {
        match self {
            Self::G => RatingTier::Mild,
            Self::Pg | Self::Pg13 | Self::R => RatingTier::Moderate,
            Self::Nc17 => RatingTier::Restricted,
            Self::Other(_) => RatingTier::Unrated,
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Rating {
    fn from(s: String) -> Self {
        Self::from_str_loose(&s)
    }
}

impl From<Rating> for String {
    fn from(r: Rating) -> Self {
        r.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_codes() {
        assert_eq!(Rating::from_str_loose("G"), Rating::G);
        assert_eq!(Rating::from_str_loose("pg"), Rating::Pg);
        assert_eq!(Rating::from_str_loose(" PG-13 "), Rating::Pg13);
        assert_eq!(Rating::from_str_loose("R"), Rating::R);
        assert_eq!(Rating::from_str_loose("nc-17"), Rating::Nc17);
    }

    #[test]
    fn unknown_code_kept_verbatim() {
        assert_eq!(
            Rating::from_str_loose(" Unrated "),
            Rating::Other("Unrated".to_string())
        );
        assert_eq!(Rating::from_str_loose("").as_str(), "");
    }

    #[test]
    fn tiers() {
        assert_eq!(Rating::G.tier(), RatingTier::Mild);
        assert_eq!(Rating::Pg.tier(), RatingTier::Moderate);
        assert_eq!(Rating::Pg13.tier(), RatingTier::Moderate);
        assert_eq!(Rating::R.tier(), RatingTier::Moderate);
        assert_eq!(Rating::Nc17.tier(), RatingTier::Restricted);
        assert_eq!(Rating::Other("X".into()).tier(), RatingTier::Unrated);
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&Rating::Pg13).unwrap();
        assert_eq!(json, "\"PG-13\"");
        let back: Rating = serde_json::from_str("\"nc-17\"").unwrap();
        assert_eq!(back, Rating::Nc17);
    }
}
