// Two-letter codes accepted by the `state` field
pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Swing",
    "Other",
];

pub fn is_state(code: &str) -> bool {
    STATES.contains(&code)
}

pub fn is_genre(genre: &str) -> bool {
    GENRES.contains(&genre)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifty_states_and_dc() {
        assert_eq!(STATES.len(), 51);
        assert!(is_state("CA"));
        assert!(is_state("DC"));
        assert!(!is_state("ca"));
        assert!(!is_state("XX"));
    }

    #[test]
    fn genre_lookup_is_exact() {
        assert!(is_genre("Rock n Roll"));
        assert!(is_genre("R&B"));
        assert!(!is_genre("rock n roll"));
    }
}
