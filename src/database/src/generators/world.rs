use crate::generators::names::{MANAGER_NAMES, NamePool, TEAM_NAMES};
use chrono::NaiveDateTime;
use gaffer_core::utils::RandomSource;
use gaffer_core::{
    GOALKEEPER_POSITION, Game, MAX_DEF_POSITION, MAX_LINEUP_POSITION, MAX_MID_POSITION,
    MAX_OVERALL, MIN_OVERALL, Player, PlayerPosition, RealTeam, Season, SeasonRollover, Team,
    TeamSeason,
};
use std::ops::RangeInclusive;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU32, Ordering};

static TEAM_ID_SEQUENCE: LazyLock<AtomicU32> = LazyLock::new(|| AtomicU32::new(1));
static PLAYER_ID_SEQUENCE: LazyLock<AtomicU32> = LazyLock::new(|| AtomicU32::new(1));

const STARTING_CASH: i32 = 100;

/// Everything a fresh game needs, ready to be adopted by a store.
#[derive(Debug)]
pub struct GeneratedWorld {
    pub game: Game,
    pub real_teams: Vec<RealTeam>,
    pub teams: Vec<(Team, Vec<Player>)>,
    pub season: Season,
    pub team_seasons: Vec<TeamSeason>,
}

/// Drafts a new game world: the real club table, the managed teams with
/// their squads and starting lineups, and the opening season rows.
pub struct WorldGenerator;

impl WorldGenerator {
    pub fn generate(
        game_id: u32,
        game_name: String,
        team_count: usize,
        started_at: NaiveDateTime,
        random: &mut dyn RandomSource,
    ) -> GeneratedWorld {
        let real_teams = NamePool::real_clubs();
        let game = Game::new(game_id, game_name);

        let mut teams = Vec::with_capacity(team_count);
        for index in 0..team_count {
            let id = TEAM_ID_SEQUENCE.fetch_add(1, Ordering::SeqCst);

            let mut team = Team::new(
                id,
                game_id,
                String::from(TEAM_NAMES[index % TEAM_NAMES.len()]),
                String::from(MANAGER_NAMES[index % MANAGER_NAMES.len()]),
            );
            team.cash = STARTING_CASH;

            let squad = Self::generate_squad(&real_teams, random);
            teams.push((team, squad));
        }

        let season = Season::new(game_id, 1, started_at);
        let team_seasons = teams
            .iter()
            .map(|(team, squad)| {
                TeamSeason::new(
                    game_id,
                    season.number,
                    team.id,
                    SeasonRollover::initial_starting_score(squad),
                )
            })
            .collect();

        GeneratedWorld {
            game,
            real_teams,
            teams,
            season,
            team_seasons,
        }
    }

    /// Fifteen players drafted from real clubs: two goalkeepers, five
    /// defenders, five midfielders, three forwards. The strongest of each
    /// group start, the captain is the best outfield starter.
    fn generate_squad(real_teams: &[RealTeam], random: &mut dyn RandomSource) -> Vec<Player> {
        let mut squad = Vec::with_capacity(15);

        Self::generate_group(&mut squad, real_teams, PlayerPosition::Goalkeeper, 2, random);
        Self::generate_group(&mut squad, real_teams, PlayerPosition::Defender, 5, random);
        Self::generate_group(&mut squad, real_teams, PlayerPosition::Midfielder, 5, random);
        Self::generate_group(&mut squad, real_teams, PlayerPosition::Forward, 3, random);

        Self::assign_slots(&mut squad);
        Self::appoint_captain(&mut squad);

        squad
    }

    fn generate_group(
        squad: &mut Vec<Player>,
        real_teams: &[RealTeam],
        position: PlayerPosition,
        count: usize,
        random: &mut dyn RandomSource,
    ) {
        for _ in 0..count {
            squad.push(Self::draft_player(real_teams, position, random));
        }
    }

    /// Drafts a single unsigned player, the same way the initial squads are
    /// filled. Deadline day uses this for replacement signings.
    pub fn draft_player(
        real_teams: &[RealTeam],
        position: PlayerPosition,
        random: &mut dyn RandomSource,
    ) -> Player {
        let id = PLAYER_ID_SEQUENCE.fetch_add(1, Ordering::SeqCst);
        let club = &real_teams[random.roll(0, real_teams.len() as i32 - 1) as usize];

        // Drafted players start at one to five stars and can train up to
        // two stars beyond that, capped at the overall ceiling.
        let overall = random.roll(i32::from(MIN_OVERALL), 5) as u8;

        let mut player = Player::new(id, NamePool::person_name(random), club.id, overall, position);
        player.potential = (overall + random.roll(0, 2) as u8).min(MAX_OVERALL);

        player
    }

    fn assign_slots(squad: &mut [Player]) {
        Self::fill_slots(
            squad,
            PlayerPosition::Goalkeeper,
            GOALKEEPER_POSITION..=GOALKEEPER_POSITION,
        );
        Self::fill_slots(
            squad,
            PlayerPosition::Defender,
            (GOALKEEPER_POSITION + 1)..=MAX_DEF_POSITION,
        );
        Self::fill_slots(
            squad,
            PlayerPosition::Midfielder,
            (MAX_DEF_POSITION + 1)..=MAX_MID_POSITION,
        );
        Self::fill_slots(
            squad,
            PlayerPosition::Forward,
            (MAX_MID_POSITION + 1)..=MAX_LINEUP_POSITION,
        );
    }

    fn fill_slots(squad: &mut [Player], position: PlayerPosition, slots: RangeInclusive<u8>) {
        let mut group: Vec<usize> = squad
            .iter()
            .enumerate()
            .filter(|(_, player)| player.position == position)
            .map(|(index, _)| index)
            .collect();

        group.sort_by(|&a, &b| {
            squad[b]
                .overall
                .cmp(&squad[a].overall)
                .then(squad[a].id.cmp(&squad[b].id))
        });

        for (slot, &index) in slots.zip(group.iter()) {
            squad[index].slot = Some(slot);
        }
    }

    fn appoint_captain(squad: &mut [Player]) {
        // The boost dies on the goalkeeper, so the armband goes outfield.
        let captain = squad
            .iter()
            .enumerate()
            .filter(|(_, player)| {
                player.slot.is_some() && player.position != PlayerPosition::Goalkeeper
            })
            .max_by(|(_, a), (_, b)| a.overall.cmp(&b.overall).then(b.id.cmp(&a.id)))
            .map(|(index, _)| index);

        if let Some(index) = captain {
            squad[index].captain = true;
        }
    }
}
