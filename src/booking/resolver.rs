use crate::models::{Room, StaffMember};

/// Which catalog a piece of free text is matched against.
///
/// Room names are short and enumerable; staff names are longer and more
/// varied, so the two kinds carry different score cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Room,
    Staff,
}

impl EntityKind {
    /// Minimum similarity score a candidate must reach to be accepted.
    pub fn cutoff(self) -> f64 {
        match self {
            Self::Room => 0.6,
            Self::Staff => 0.5,
        }
    }
}

/// A named catalog entry the resolver can match against.
pub trait CatalogEntry {
    fn id(&self) -> &str;
    fn display_name(&self) -> &str;
}

impl CatalogEntry for Room {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl CatalogEntry for StaffMember {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.full_name
    }
}

/// Resolve free text to the best-matching catalog entry, or `None` when no
/// candidate clears the kind's cutoff.
///
/// Both the query and every catalog name are normalized (non-alphanumerics
/// stripped, lowercased) so punctuation and spacing differences do not
/// block a match. Scoring is a normalized edit-distance ratio in `[0, 1]`;
/// an exact normalized match scores 1.0. Ties on score break to the
/// lexicographically smallest normalized name, keeping resolution
/// deterministic. Pure function over the supplied catalog snapshot.
pub fn resolve<'a, E: CatalogEntry>(kind: EntityKind, raw: &str, catalog: &'a [E]) -> Option<&'a E> {
    let query = normalize(raw);
    let mut best: Option<(f64, String, &E)> = None;

    for entry in catalog {
        let name = normalize(entry.display_name());
        let score = strsim::normalized_levenshtein(&query, &name);
        let better = match &best {
            None => true,
            Some((best_score, best_name, _)) => {
                score > *best_score || (score == *best_score && name < *best_name)
            }
        };
        if better {
            best = Some((score, name, entry));
        }
    }

    match best {
        Some((score, _, entry)) if score >= kind.cutoff() => Some(entry),
        _ => None,
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
