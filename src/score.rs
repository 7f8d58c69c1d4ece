//! Head-to-head scoring.
//!
//! Derived attributes and the winner verdict are recomputed from the two
//! records on every comparison; nothing here performs I/O or can fail.

use serde::Serialize;

use crate::models::Character;

/// Labels for the four derived attributes, in display order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum AttributeLabel {
    Likeability,
    MotionDiversity,
    MotionAppearances,
    ParkAppearances,
}

impl AttributeLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeLabel::Likeability => "Likeability",
            AttributeLabel::MotionDiversity => "Motion Diversity",
            AttributeLabel::MotionAppearances => "Motion Appearances",
            AttributeLabel::ParkAppearances => "Park Appearances",
        }
    }
}

/// One attribute scored for both sides.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct ScoreAttribute {
    pub label: AttributeLabel,
    pub value1: u32,
    pub value2: u32,
}

/// Three-way outcome of a comparison.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Verdict {
    FirstWins,
    SecondWins,
    Tie,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Scorecard {
    pub attributes: Vec<ScoreAttribute>,
    pub verdict: Verdict,
}

type Extractor = fn(&Character) -> u32;

// Fixed attribute order. The verdict counts per-attribute wins; it never
// compares raw attribute sums.
const ATTRIBUTES: [(AttributeLabel, Extractor); 4] = [
    (AttributeLabel::Likeability, likeability),
    (AttributeLabel::MotionDiversity, motion_diversity),
    (AttributeLabel::MotionAppearances, motion_appearances),
    (AttributeLabel::ParkAppearances, park_appearances),
];

/// Scores two characters against each other.
///
/// Whichever side is strictly greater on an attribute earns one win; equal
/// values earn neither side a point. The verdict goes to the side with more
/// attribute wins, with equal win counts (2-2 included) a tie.
pub fn score(first: &Character, second: &Character) -> Scorecard {
    let attributes: Vec<ScoreAttribute> = ATTRIBUTES
        .iter()
        .map(|(label, extract)| ScoreAttribute {
            label: *label,
            value1: extract(first),
            value2: extract(second),
        })
        .collect();

    let mut first_wins = 0;
    let mut second_wins = 0;
    for attribute in &attributes {
        if attribute.value1 > attribute.value2 {
            first_wins += 1;
        } else if attribute.value2 > attribute.value1 {
            second_wins += 1;
        }
    }

    let verdict = match first_wins.cmp(&second_wins) {
        std::cmp::Ordering::Greater => Verdict::FirstWins,
        std::cmp::Ordering::Less => Verdict::SecondWins,
        std::cmp::Ordering::Equal => Verdict::Tie,
    };

    Scorecard { attributes, verdict }
}

/// Share of allies among all allies and enemies, as a 0-100 percentage. A
/// character with neither allies nor enemies sits at exactly 50.
fn likeability(character: &Character) -> u32 {
    let allies = character.allies.len();
    let enemies = character.enemies.len();
    if allies + enemies == 0 {
        return 50;
    }
    (100.0 * allies as f64 / (allies + enemies) as f64).round() as u32
}

fn motion_categories(character: &Character) -> [&[String]; 4] {
    [
        character.films.as_slice(),
        character.short_films.as_slice(),
        character.tv_shows.as_slice(),
        character.video_games.as_slice(),
    ]
}

fn motion_diversity(character: &Character) -> u32 {
    motion_categories(character).iter().filter(|list| !list.is_empty()).count() as u32
}

fn motion_appearances(character: &Character) -> u32 {
    motion_categories(character).iter().map(|list| list.len() as u32).sum()
}

fn park_appearances(character: &Character) -> u32 {
    character.park_attractions.len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Character {
        Character { name: name.to_string(), ..Character::default() }
    }

    fn titles(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("Title {i}")).collect()
    }

    fn values(card: &Scorecard) -> Vec<(u32, u32)> {
        card.attributes.iter().map(|a| (a.value1, a.value2)).collect()
    }

    #[test]
    fn likeability_splits_allies_against_enemies() {
        let mut character = named("Mulan");
        character.allies = titles(1);
        character.enemies = titles(2);
        assert_eq!(likeability(&character), 33);

        character.allies = titles(2);
        character.enemies = titles(1);
        assert_eq!(likeability(&character), 67);

        character.allies = titles(3);
        character.enemies = Vec::new();
        assert_eq!(likeability(&character), 100);
    }

    #[test]
    fn record_with_no_categories_scores_neutral() {
        let blank = named("Blank");
        let card = score(&blank, &named("Also Blank"));
        assert_eq!(values(&card), vec![(50, 50), (0, 0), (0, 0), (0, 0)]);
        assert_eq!(card.verdict, Verdict::Tie);
    }

    #[test]
    fn three_attribute_wins_take_the_verdict() {
        let mut first = named("Mickey Mouse");
        first.films = titles(3);
        first.tv_shows = titles(2);
        first.video_games = titles(2);
        first.park_attractions = titles(2);

        let mut second = named("Donald Duck");
        second.films = titles(1);
        second.park_attractions = titles(1);

        let card = score(&first, &second);
        assert_eq!(values(&card), vec![(50, 50), (3, 1), (7, 1), (2, 1)]);
        assert_eq!(card.verdict, Verdict::FirstWins);
    }

    #[test]
    fn swapping_sides_swaps_the_verdict() {
        let mut first = named("Mickey Mouse");
        first.films = titles(3);
        first.tv_shows = titles(2);

        let second = named("Donald Duck");

        assert_eq!(score(&first, &second).verdict, Verdict::FirstWins);
        assert_eq!(score(&second, &first).verdict, Verdict::SecondWins);

        let card = score(&first, &first.clone());
        assert_eq!(card.verdict, Verdict::Tie);
        assert_eq!(score(&second, &second.clone()).verdict, Verdict::Tie);
        assert!(card.attributes.iter().all(|a| a.value1 == a.value2));
    }

    #[test]
    fn equal_win_counts_tie_even_with_unequal_sums() {
        // First takes Likeability (100 vs 50) and Motion Appearances (5 vs
        // 3); second takes Motion Diversity (3 vs 1) and Park Appearances
        // (2 vs 0). Raw sums are 106 vs 58.
        let mut first = named("Hercules");
        first.allies = titles(1);
        first.films = titles(5);

        let mut second = named("Megara");
        second.films = titles(1);
        second.short_films = titles(1);
        second.tv_shows = titles(1);
        second.park_attractions = titles(2);

        let card = score(&first, &second);
        assert_eq!(values(&card), vec![(100, 50), (1, 3), (5, 3), (0, 2)]);
        assert_eq!(card.verdict, Verdict::Tie);
    }

    #[test]
    fn empty_and_absent_categories_are_equivalent() {
        let mut with_empty = named("Goofy");
        with_empty.films = Vec::new();
        with_empty.allies = Vec::new();

        let absent = named("Goofy");

        assert_eq!(score(&with_empty, &absent).verdict, Verdict::Tie);
        assert_eq!(values(&score(&with_empty, &absent)), vec![(50, 50), (0, 0), (0, 0), (0, 0)]);
    }
}
