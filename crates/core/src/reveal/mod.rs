use crate::catalog::Song;

const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Shown when the month half of a release date cannot be parsed.
pub const MONTH_PLACEHOLDER: &str = "???";
/// Shown when the year half of a release date is missing.
pub const YEAR_PLACEHOLDER: &str = "????";

/// The answer surfaced after the flip: everything the guessing players get
/// to see once the round is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealCard {
    pub artist: String,
    pub title: String,
    pub month: String,
    pub year: String,
}

impl RevealCard {
    pub fn for_song(song: &Song) -> Self {
        let (month, year) = split_release_date(&song.date);
        Self {
            artist: song.artist.clone(),
            title: song.title.clone(),
            month,
            year,
        }
    }
}

/// Splits a `MM.YYYY` release date into a month abbreviation and a year.
///
/// Each half degrades independently: an out-of-range month still keeps the
/// parsed year, and a date with no dot yields both placeholders.
pub fn split_release_date(date: &str) -> (String, String) {
    let (month_part, year_part) = match date.split_once('.') {
        Some((month, year)) => (month, year),
        None => (date, ""),
    };

    let month = month_part
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|i| MONTH_ABBREVS.get(i))
        .map_or_else(|| MONTH_PLACEHOLDER.to_string(), |abbrev| abbrev.to_string());

    let year = match year_part.trim() {
        "" => YEAR_PLACEHOLDER.to_string(),
        year => year.to_string(),
    };

    (month, year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_month_and_year() {
        assert_eq!(
            split_release_date("3.1997"),
            ("Mar".to_string(), "1997".to_string())
        );
        assert_eq!(
            split_release_date("12.2020"),
            ("Dec".to_string(), "2020".to_string())
        );
        assert_eq!(
            split_release_date("09.1982"),
            ("Sep".to_string(), "1982".to_string())
        );
    }

    #[test]
    fn out_of_range_month_keeps_the_year() {
        assert_eq!(
            split_release_date("13.1990"),
            (MONTH_PLACEHOLDER.to_string(), "1990".to_string())
        );
        assert_eq!(
            split_release_date("0.1990"),
            (MONTH_PLACEHOLDER.to_string(), "1990".to_string())
        );
    }

    #[test]
    fn missing_pieces_become_placeholders() {
        assert_eq!(
            split_release_date("1997"),
            (MONTH_PLACEHOLDER.to_string(), YEAR_PLACEHOLDER.to_string())
        );
        assert_eq!(
            split_release_date("5."),
            ("May".to_string(), YEAR_PLACEHOLDER.to_string())
        );
    }

    #[test]
    fn builds_a_card_from_a_song() {
        let song = Song {
            id: 7,
            artist: "Toto".to_string(),
            title: "Africa".to_string(),
            date: "09.1982".to_string(),
            video_id: "FTQbiNvZqaY".to_string(),
        };

        let card = RevealCard::for_song(&song);
        assert_eq!(card.artist, "Toto");
        assert_eq!(card.month, "Sep");
        assert_eq!(card.year, "1982");
    }
}
