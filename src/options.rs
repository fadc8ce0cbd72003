use crate::{
    game::{default_extra_shader_games, Game},
    parsers::version::NifVersion,
};
use enumset::EnumSet;

/// Export-time settings. They are read, never changed, while blocks are exported.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub game: Game,
    pub nif_version: NifVersion,
    /// Always reference `.dds` files, even if only the original image exists on disk.
    pub force_dds: bool,
    /// Games whose bump, gloss and reflection textures go into the shader texture list.
    pub extra_shader_games: EnumSet<Game>,
}

impl ExportOptions {
    /// Options for `game`, using the version that game's files are usually written with.
    pub fn new(game: Game) -> Self {
        Self {
            game,
            nif_version: game.default_version(),
            force_dds: false,
            extra_shader_games: default_extra_shader_games(),
        }
    }

    pub fn with_nif_version<V: Into<NifVersion>>(mut self, version: V) -> Self {
        self.nif_version = version.into();
        self
    }

    pub fn with_force_dds(mut self, force_dds: bool) -> Self {
        self.force_dds = force_dds;
        self
    }

    pub fn with_extra_shader_games(mut self, games: EnumSet<Game>) -> Self {
        self.extra_shader_games = games;
        self
    }

    /// Whether the target game keeps bump, gloss and reflection textures in the shader texture
    /// list.
    pub fn uses_extra_shader_textures(&self) -> bool {
        self.extra_shader_games.contains(self.game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_game() {
        let options = ExportOptions::new(Game::Morrowind);
        assert_eq!(options.nif_version, NifVersion(0x0400_0002));
        assert!(!options.force_dds);
        assert!(!options.uses_extra_shader_textures());
        assert!(ExportOptions::new(Game::CivilizationIv).uses_extra_shader_textures());
    }

    #[test]
    fn extra_shader_games_can_be_replaced() {
        let options = ExportOptions::new(Game::Oblivion)
            .with_extra_shader_games(EnumSet::only(Game::Oblivion))
            .with_nif_version("20.0.0.4".parse::<NifVersion>().unwrap())
            .with_force_dds(true);

        assert!(options.uses_extra_shader_textures());
        assert_eq!(options.nif_version, NifVersion(0x1400_0004));
        assert!(options.force_dds);
    }
}
