use gaffer_core::RealTeam;
use gaffer_core::utils::RandomSource;

/// Real clubs available for drafting and cup draws, with a rough strength
/// on the player star scale.
pub const REAL_CLUBS: [(&str, u8); 20] = [
    ("Real Madrid", 7),
    ("Manchester City", 7),
    ("Bayern Munich", 7),
    ("Barcelona", 6),
    ("Liverpool", 6),
    ("Inter", 6),
    ("Arsenal", 6),
    ("Paris Saint-Germain", 6),
    ("Juventus", 5),
    ("Atletico Madrid", 5),
    ("Borussia Dortmund", 5),
    ("Milan", 5),
    ("Napoli", 5),
    ("Benfica", 4),
    ("Porto", 4),
    ("Ajax", 4),
    ("Tottenham Hotspur", 4),
    ("Sevilla", 3),
    ("Celtic", 3),
    ("Feyenoord", 3),
];

pub const FIRST_NAMES: [&str; 20] = [
    "Marco", "Luka", "Kylian", "Erling", "Declan", "Jude", "Pedri", "Bruno", "Virgil", "Kevin",
    "Thibaut", "Rodri", "Harry", "Phil", "Martin", "Victor", "Rafael", "Joshua", "Jamal", "Florian",
];

pub const LAST_NAMES: [&str; 20] = [
    "Silva", "Modric", "Fernandes", "Haaland", "Rice", "Bellingham", "Gonzalez", "Dijk",
    "Bruyne", "Courtois", "Hernandez", "Kane", "Foden", "Odegaard", "Osimhen", "Leao",
    "Kimmich", "Musiala", "Wirtz", "Saliba",
];

/// Names for the managed fantasy sides and their managers.
pub const TEAM_NAMES: [&str; 8] = [
    "Athletic Sofa",
    "Real Ale Madrid",
    "Dynamo Kebab",
    "Sporting Lasagne",
    "Inter Meelan",
    "Borussia Teeth",
    "Crystal Palaver",
    "Nottingham Florist",
];

pub const MANAGER_NAMES: [&str; 8] = [
    "Sam Porter",
    "Alex Reid",
    "Jo Castle",
    "Chris Vane",
    "Pat Munroe",
    "Robin Shaw",
    "Dana Kovac",
    "Lee Winters",
];

pub struct NamePool;

impl NamePool {
    /// The full real club table, ids assigned in listing order.
    pub fn real_clubs() -> Vec<RealTeam> {
        REAL_CLUBS
            .iter()
            .enumerate()
            .map(|(index, &(name, strength))| {
                RealTeam::new(index as u32 + 1, String::from(name), strength)
            })
            .collect()
    }

    pub fn person_name(random: &mut dyn RandomSource) -> String {
        let first = FIRST_NAMES[random.roll(0, FIRST_NAMES.len() as i32 - 1) as usize];
        let last = LAST_NAMES[random.roll(0, LAST_NAMES.len() as i32 - 1) as usize];

        format!("{} {}", first, last)
    }
}
