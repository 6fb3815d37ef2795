/// An opponent style as data.
///
/// One flat shape for every persona: style-specific behavior lives in
/// numbers (and, for LLM-backed opponents, prompt content keyed by `id`),
/// never in the type system. The engine itself only ever sees the `id`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Archetype {
    pub id: String,
    /// How often the style enters pots voluntarily, 0..1.
    pub looseness: f32,
    /// How often the style bets and raises over calling, 0..1.
    pub aggression: f32,
}

impl Archetype {
    pub fn new(id: &str, looseness: f32, aggression: f32) -> Self {
        Self {
            id: id.to_string(),
            looseness,
            aggression,
        }
    }
    /// The styles the trainer ships with.
    pub fn roster() -> Vec<Self> {
        vec![
            Self::new("TAG", 0.25, 0.70),
            Self::new("LAG", 0.55, 0.75),
            Self::new("NIT", 0.12, 0.30),
            Self::new("STATION", 0.60, 0.10),
            Self::new("MANIAC", 0.80, 0.90),
        ]
    }
    /// Looks an archetype up by its opaque label, falling back to the
    /// first roster entry for unknown labels.
    pub fn lookup(id: &str) -> Self {
        Self::roster()
            .into_iter()
            .find(|a| a.id.eq_ignore_ascii_case(id))
            .unwrap_or_else(|| Self::roster().remove(0))
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Archetype::lookup("lag").id, "LAG");
    }

    #[test]
    fn unknown_label_falls_back() {
        assert_eq!(Archetype::lookup("martian").id, "TAG");
    }
}
