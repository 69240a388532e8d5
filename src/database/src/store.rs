use crate::error::StoreError;
use crate::generators::GeneratedWorld;
use chrono::NaiveDateTime;
use gaffer_core::{
    Fixture, FixtureResolution, Game, Player, RealTeam, Season, Stage, Team, TeamSeason,
};
use serde::Serialize;
use std::collections::HashMap;

/// In-memory backing store for running games. Owns every domain record and
/// hands the pure engine the slices and references it asks for; all
/// mutation goes through here.
#[derive(Debug, Default, Serialize)]
pub struct GameStore {
    games: HashMap<u32, Game>,
    teams: HashMap<u32, Team>,
    squads: HashMap<u32, Vec<Player>>,
    real_teams: Vec<RealTeam>,
    seasons: Vec<Season>,
    team_seasons: HashMap<String, TeamSeason>,
    fixtures: HashMap<String, Fixture>,
}

impl GameStore {
    pub fn new() -> Self {
        GameStore::default()
    }

    /// Adopts a freshly generated world in one move.
    pub fn insert_world(&mut self, world: GeneratedWorld) -> Result<(), StoreError> {
        self.insert_game(world.game);
        self.insert_real_teams(world.real_teams);

        for (team, squad) in world.teams {
            self.insert_team(team, squad);
        }

        self.insert_season(world.season);
        for team_season in world.team_seasons {
            self.insert_team_season(team_season)?;
        }

        Ok(())
    }

    pub fn insert_game(&mut self, game: Game) {
        self.games.insert(game.id, game);
    }

    pub fn game(&self, game_id: u32) -> Result<&Game, StoreError> {
        self.games
            .get(&game_id)
            .ok_or(StoreError::GameNotFound(game_id))
    }

    pub fn game_mut(&mut self, game_id: u32) -> Result<&mut Game, StoreError> {
        self.games
            .get_mut(&game_id)
            .ok_or(StoreError::GameNotFound(game_id))
    }

    pub fn insert_team(&mut self, team: Team, squad: Vec<Player>) {
        self.squads.insert(team.id, squad);
        self.teams.insert(team.id, team);
    }

    pub fn team(&self, team_id: u32) -> Result<&Team, StoreError> {
        self.teams
            .get(&team_id)
            .ok_or(StoreError::TeamNotFound(team_id))
    }

    pub fn team_mut(&mut self, team_id: u32) -> Result<&mut Team, StoreError> {
        self.teams
            .get_mut(&team_id)
            .ok_or(StoreError::TeamNotFound(team_id))
    }

    /// A game's teams in canonical id order, the order the pairing tables
    /// and standings expect.
    pub fn teams_in_game(&self, game_id: u32) -> Vec<&Team> {
        let mut teams: Vec<&Team> = self
            .teams
            .values()
            .filter(|team| team.game_id == game_id)
            .collect();

        teams.sort_by_key(|team| team.id);
        teams
    }

    pub fn squad(&self, team_id: u32) -> Result<&[Player], StoreError> {
        self.squads
            .get(&team_id)
            .map(Vec::as_slice)
            .ok_or(StoreError::TeamNotFound(team_id))
    }

    pub fn squad_mut(&mut self, team_id: u32) -> Result<&mut Vec<Player>, StoreError> {
        self.squads
            .get_mut(&team_id)
            .ok_or(StoreError::TeamNotFound(team_id))
    }

    pub fn insert_real_teams(&mut self, real_teams: Vec<RealTeam>) {
        self.real_teams = real_teams;
    }

    pub fn real_teams(&self) -> &[RealTeam] {
        &self.real_teams
    }

    pub fn real_team(&self, real_team_id: u32) -> Result<&RealTeam, StoreError> {
        self.real_teams
            .iter()
            .find(|real_team| real_team.id == real_team_id)
            .ok_or(StoreError::RealTeamNotFound(real_team_id))
    }

    pub fn insert_season(&mut self, season: Season) {
        self.seasons.push(season);
    }

    /// The highest-numbered season started in the game.
    pub fn current_season(&self, game_id: u32) -> Result<&Season, StoreError> {
        self.seasons
            .iter()
            .filter(|season| season.game_id == game_id)
            .max_by_key(|season| season.number)
            .ok_or(StoreError::SeasonNotFound(game_id))
    }

    pub fn insert_team_season(&mut self, team_season: TeamSeason) -> Result<(), StoreError> {
        if self.team_seasons.contains_key(&team_season.id) {
            return Err(StoreError::DuplicateTeamSeason(team_season.id));
        }

        self.team_seasons.insert(team_season.id.clone(), team_season);
        Ok(())
    }

    pub fn team_season(&self, id: &str) -> Result<&TeamSeason, StoreError> {
        self.team_seasons
            .get(id)
            .ok_or_else(|| StoreError::TeamSeasonNotFound(id.to_owned()))
    }

    pub fn team_season_mut(&mut self, id: &str) -> Result<&mut TeamSeason, StoreError> {
        self.team_seasons
            .get_mut(id)
            .ok_or_else(|| StoreError::TeamSeasonNotFound(id.to_owned()))
    }

    /// A season's score rows in canonical team id order.
    pub fn team_seasons_in_season(&self, game_id: u32, season: u32) -> Vec<TeamSeason> {
        let mut rows: Vec<TeamSeason> = self
            .team_seasons
            .values()
            .filter(|row| row.game_id == game_id && row.season == season)
            .cloned()
            .collect();

        rows.sort_by_key(|row| row.team_id);
        rows
    }

    pub fn insert_fixture(&mut self, fixture: Fixture) -> Result<(), StoreError> {
        if self.fixtures.contains_key(&fixture.id) {
            return Err(StoreError::DuplicateFixture(fixture.id));
        }

        self.fixtures.insert(fixture.id.clone(), fixture);
        Ok(())
    }

    pub fn fixture(&self, fixture_id: &str) -> Result<&Fixture, StoreError> {
        self.fixtures
            .get(fixture_id)
            .ok_or_else(|| StoreError::FixtureNotFound(fixture_id.to_owned()))
    }

    /// A season's fixtures in playing order.
    pub fn fixtures_in_season(&self, game_id: u32, season: u32) -> Vec<Fixture> {
        let mut fixtures: Vec<Fixture> = self
            .fixtures
            .values()
            .filter(|fixture| fixture.game_id == game_id && fixture.season == season)
            .cloned()
            .collect();

        fixtures.sort_by(|a, b| a.stage.cmp(&b.stage).then_with(|| a.id.cmp(&b.id)));
        fixtures
    }

    /// Writes an outcome onto a stored fixture. Resolving twice is an
    /// error here rather than the panic the domain type reserves for
    /// engine bugs.
    pub fn resolve_fixture(
        &mut self,
        fixture_id: &str,
        resolution: FixtureResolution,
        played_at: NaiveDateTime,
    ) -> Result<(), StoreError> {
        let fixture = self
            .fixtures
            .get_mut(fixture_id)
            .ok_or_else(|| StoreError::FixtureNotFound(fixture_id.to_owned()))?;

        if fixture.is_resolved() {
            return Err(StoreError::FixtureAlreadyResolved(fixture_id.to_owned()));
        }

        fixture.resolve(resolution, played_at);
        Ok(())
    }

    /// Flags a team done with the game's current stage.
    pub fn mark_team_ready(&mut self, team_id: u32) -> Result<(), StoreError> {
        let game_id = self.team(team_id)?.game_id;
        let stage = self.game(game_id)?.stage;

        let team = self
            .teams
            .get_mut(&team_id)
            .ok_or(StoreError::TeamNotFound(team_id))?;
        team.mark_ready(stage);

        Ok(())
    }

    /// Advances the game stage once every team is ready, wiring the
    /// borrow of the game row and its team rows together.
    pub fn advance_stage(&mut self, game_id: u32) -> Result<Option<Stage>, StoreError> {
        let game = self
            .games
            .get_mut(&game_id)
            .ok_or(StoreError::GameNotFound(game_id))?;

        let mut teams: Vec<&mut Team> = self
            .teams
            .values_mut()
            .filter(|team| team.game_id == game_id)
            .collect();
        teams.sort_by_key(|team| team.id);

        Ok(game.try_advance_stage(&mut teams))
    }

    /// The whole store as pretty JSON, for end-of-run dumps.
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
