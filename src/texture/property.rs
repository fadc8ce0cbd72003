use crate::{
    blocks::{ApplyMode, BumpMap, ShaderTexDesc, TexDesc, TextureEffect, TexturingProperty},
    error::{FormatError, Warning},
    game::{ShaderSlotPolicy, ShaderTextureRole},
    registry::BlockId,
    scene::{MaterialTextures, Texture, TextureRole, TextureSlot},
    session::ExportSession,
};

impl ExportSession {
    /// Exports a `NiTexturingProperty` for the textures of one material. If an identical
    /// property was already exported, that one is returned instead.
    ///
    /// On error nothing this call registered is kept, and the warnings it raised are dropped
    /// from the session (they were still logged).
    pub fn compose_texturing_property<S: AsRef<str>>(
        &mut self,
        flags: u16,
        apply_mode: ApplyMode,
        material: &MaterialTextures,
        uv_layers: &[S],
        origin: Option<&str>,
    ) -> Result<BlockId, FormatError> {
        let checkpoint = self.store.checkpoint();
        let warnings = self.diagnostics.len();

        match self.assemble_texturing_property(flags, apply_mode, material, uv_layers) {
            Ok(property) => Ok(self.store.find_or_register(property, origin)),
            Err(e) => {
                self.store.rollback(checkpoint);
                self.diagnostics.truncate(warnings);
                Err(e)
            }
        }
    }

    fn assemble_texturing_property<S: AsRef<str>>(
        &mut self,
        flags: u16,
        apply_mode: ApplyMode,
        material: &MaterialTextures,
        uv_layers: &[S],
    ) -> Result<TexturingProperty, FormatError> {
        let mut property = TexturingProperty::new(flags, apply_mode);

        // The shader texture list has to exist before the slots below write into it.
        self.apply_shader_slot_policy(&mut property)?;

        for &role in TextureRole::ALL.iter() {
            self.assemble_slot(&mut property, role, material.get(role), uv_layers)?;
        }

        Ok(property)
    }

    /// Allocates the shader texture list the target game expects and points the slots the engine
    /// requires at its default textures. Games without a list are left alone.
    pub fn apply_shader_slot_policy(
        &mut self,
        property: &mut TexturingProperty,
    ) -> Result<(), FormatError> {
        let policy = match ShaderSlotPolicy::for_game(self.options().game) {
            Some(policy) => policy,
            None => return Ok(()),
        };

        property.shader_textures = (0..policy.slot_count)
            .map(|map_index| ShaderTexDesc::unused(map_index as u32))
            .collect();

        for (role, filename) in policy.engine_defaults {
            let source = self.build_source_texture(None, Some(*filename))?;
            let slot = property.shader_texture_mut(role.index());
            slot.is_used = true;
            slot.source = Some(source);
        }

        Ok(())
    }

    /// Exports the texture bound to `role` into `property`. Returns the descriptor if the texture
    /// went into one of the regular slots, `None` if there was nothing to export, the texture went
    /// into the shader texture list, or the game can't use it.
    pub fn assemble_slot<S: AsRef<str>>(
        &mut self,
        property: &mut TexturingProperty,
        role: TextureRole,
        slot: Option<&TextureSlot>,
        uv_layers: &[S],
    ) -> Result<Option<TexDesc>, FormatError> {
        let slot = match slot {
            Some(slot) => slot,
            None => return Ok(None),
        };

        let extra_shader_textures = self.options().uses_extra_shader_textures();

        match role {
            TextureRole::Base | TextureRole::Glow | TextureRole::Dark | TextureRole::Detail => {
                self.assemble_regular_slot(property, role, slot, uv_layers)
            }
            TextureRole::Gloss if !extra_shader_textures => {
                self.assemble_regular_slot(property, role, slot, uv_layers)
            }
            TextureRole::Gloss => {
                self.export_shader_texture(
                    property,
                    ShaderTextureRole::SpecularIntensity,
                    &slot.texture,
                )?;
                Ok(None)
            }
            TextureRole::Bump if !extra_shader_textures => {
                let desc = self.resolve_tex_desc(slot, uv_layers)?;
                property.bump_map = Some(BumpMap::new(desc));
                Ok(Some(desc))
            }
            TextureRole::Bump => {
                log::debug!(target: "nif_export", "skipping bump map '{}'", slot.texture.name);
                Ok(None)
            }
            TextureRole::Normal => {
                self.export_shader_texture(property, ShaderTextureRole::NormalMap, &slot.texture)?;
                Ok(None)
            }
            TextureRole::Reflection if !extra_shader_textures => {
                let game = self.options().game;
                self.warn(Warning::ReflectionUnsupported(game));
                Ok(None)
            }
            TextureRole::Reflection => {
                self.export_shader_texture(
                    property,
                    ShaderTextureRole::EnvironmentIntensity,
                    &slot.texture,
                )?;
                Ok(None)
            }
        }
    }

    fn assemble_regular_slot<S: AsRef<str>>(
        &mut self,
        property: &mut TexturingProperty,
        role: TextureRole,
        slot: &TextureSlot,
        uv_layers: &[S],
    ) -> Result<Option<TexDesc>, FormatError> {
        let desc = self.resolve_tex_desc(slot, uv_layers)?;
        if let Some(target) = property.slot_mut(role) {
            *target = Some(desc);
        }
        Ok(Some(desc))
    }

    fn export_shader_texture(
        &mut self,
        property: &mut TexturingProperty,
        role: ShaderTextureRole,
        texture: &Texture,
    ) -> Result<(), FormatError> {
        let source = self.build_source_texture(Some(texture), None)?;
        let slot = property.shader_texture_mut(role.index());
        slot.is_used = true;
        slot.source = Some(source);
        Ok(())
    }

    /// Exports an environment map `NiTextureEffect`. Every call registers a new block, even if an
    /// identical effect exists.
    pub fn compose_texture_effect(
        &mut self,
        texture: Option<&Texture>,
        origin: Option<&str>,
    ) -> Result<BlockId, FormatError> {
        let mut effect = TextureEffect::environment_map();

        if let Some(texture) = texture {
            effect.source_texture = Some(self.build_source_texture(Some(texture), None)?);
            if self.options().game.counts_affected_nodes() {
                effect.num_affected_node_list_pointers += 1;
            }
        }

        Ok(self.store.register_always(effect, origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        blocks::Block,
        game::Game,
        options::ExportOptions,
        scene::TextureKind,
    };
    use enumset::EnumSet;

    const NO_LAYERS: &[&str] = &[];

    fn session(game: Game) -> ExportSession {
        ExportSession::new(ExportOptions::new(game))
    }

    fn slot(name: &str) -> TextureSlot {
        TextureSlot::new(Texture::image(name, format!("C:/Data/Textures/{}.dds", name)))
    }

    fn property(session: &ExportSession, id: BlockId) -> &TexturingProperty {
        session.store().texturing_property(id).unwrap()
    }

    #[test]
    fn gloss_goes_to_regular_slot_by_default() {
        let mut session = session(Game::Oblivion);
        let material = MaterialTextures::new().with(TextureRole::Gloss, slot("shine"));
        let id = session
            .compose_texturing_property(1, ApplyMode::Modulate, &material, NO_LAYERS, None)
            .unwrap();

        assert!(property(&session, id).has_gloss_texture());
        assert!(property(&session, id).shader_textures.is_empty());
    }

    #[test]
    fn gloss_goes_to_shader_slot_for_extra_shader_games() {
        let mut session = session(Game::CivilizationIv);
        let material = MaterialTextures::new().with(TextureRole::Gloss, slot("shine"));
        let id = session
            .compose_texturing_property(1, ApplyMode::Modulate, &material, NO_LAYERS, None)
            .unwrap();

        let prop = property(&session, id);
        assert!(!prop.has_gloss_texture());
        assert!(prop.shader_textures[2].is_used);
        assert!(prop.shader_textures[2].source.is_some());
    }

    #[test]
    fn bump_is_dropped_for_extra_shader_games() {
        let mut session = session(Game::CivilizationIv);
        let material = MaterialTextures::new().with(TextureRole::Bump, slot("bumps"));
        let id = session
            .compose_texturing_property(1, ApplyMode::Modulate, &material, NO_LAYERS, None)
            .unwrap();

        assert!(!property(&session, id).has_bump_map_texture());
        assert!(session.warnings().is_empty());
    }

    #[test]
    fn normal_map_always_uses_shader_slot_one() {
        let mut session = session(Game::Oblivion);
        let material = MaterialTextures::new().with(TextureRole::Normal, slot("normals"));
        let id = session
            .compose_texturing_property(1, ApplyMode::Modulate, &material, NO_LAYERS, None)
            .unwrap();

        let prop = property(&session, id);
        assert_eq!(prop.shader_textures.len(), 2);
        assert!(!prop.shader_textures[0].is_used);
        assert!(prop.shader_textures[1].is_used);
        assert_eq!(prop.texture(TextureRole::Normal), None);
    }

    #[test]
    fn reflection_uses_shader_slot_three() {
        let mut session = session(Game::SidMeiersRailroads);
        let material = MaterialTextures::new().with(TextureRole::Reflection, slot("chrome"));
        let id = session
            .compose_texturing_property(1, ApplyMode::Modulate, &material, NO_LAYERS, None)
            .unwrap();

        let prop = property(&session, id);
        let chrome = prop.shader_textures[3].source.unwrap();
        assert_eq!(
            session.store().source_texture(chrome).unwrap().file_name,
            "chrome.dds"
        );
        assert!(session.warnings().is_empty());
    }

    #[test]
    fn injected_extra_shader_games() {
        let mut session = ExportSession::new(
            ExportOptions::new(Game::Oblivion)
                .with_extra_shader_games(EnumSet::only(Game::Oblivion)),
        );
        let material = MaterialTextures::new().with(TextureRole::Reflection, slot("chrome"));
        let id = session
            .compose_texturing_property(1, ApplyMode::Modulate, &material, NO_LAYERS, None)
            .unwrap();

        assert!(property(&session, id).shader_textures[3].is_used);
        assert!(session.warnings().is_empty());
    }

    #[test]
    fn failed_composition_registers_nothing() {
        let mut session = session(Game::SidMeiersRailroads);
        let material = MaterialTextures::new()
            .with(TextureRole::Base, slot("base"))
            .with(
                TextureRole::Detail,
                TextureSlot::new(Texture {
                    name: "Broken".to_owned(),
                    kind: TextureKind::Image(None),
                }),
            );

        let res =
            session.compose_texturing_property(1, ApplyMode::Modulate, &material, NO_LAYERS, None);

        assert_eq!(res, Err(FormatError::NoImageLoaded("Broken".to_owned())));
        assert!(session.store().is_empty());
    }

    #[test]
    fn failed_composition_keeps_earlier_blocks() {
        let mut session = session(Game::Oblivion);
        let shared = session.build_source_texture(None, Some("textures\\base.dds")).unwrap();
        let material = MaterialTextures::new()
            .with(TextureRole::Base, slot("base"))
            .with(TextureRole::Glow, TextureSlot::new(Texture::environment_map("Sky")));

        assert!(session
            .compose_texturing_property(1, ApplyMode::Modulate, &material, NO_LAYERS, None)
            .is_err());
        assert_eq!(
            session.store().iter().map(|(id, _)| id).collect::<Vec<_>>(),
            vec![shared]
        );
    }

    #[test]
    fn failed_composition_drops_its_warnings() {
        let mut session = session(Game::Oblivion);
        session.build_source_texture(None, None).unwrap();

        let material = MaterialTextures::new()
            .with(TextureRole::Base, slot("base").with_uv_layer("Lightmap"))
            .with(TextureRole::Glow, TextureSlot::new(Texture::environment_map("Sky")));

        assert!(session
            .compose_texturing_property(1, ApplyMode::Modulate, &material, &["UVMap"], None)
            .is_err());
        assert_eq!(session.warnings(), &[Warning::MissingTextureSource]);
    }

    #[test]
    fn normal_map_reuses_the_allocated_shader_list() {
        let mut railroads = session(Game::SidMeiersRailroads);
        let material = MaterialTextures::new().with(TextureRole::Normal, slot("normals"));
        let id = railroads
            .compose_texturing_property(1, ApplyMode::Modulate, &material, NO_LAYERS, None)
            .unwrap();

        let prop = property(&railroads, id);
        assert_eq!(prop.shader_textures.len(), 5);
        assert_eq!(
            prop.shader_textures.iter().map(|s| s.is_used).collect::<Vec<_>>(),
            vec![true, true, false, false, true]
        );
        assert_eq!(prop.shader_textures[1].map_index, 1);
        let normals = prop.shader_textures[1].source.unwrap();
        assert_eq!(
            railroads.store().source_texture(normals).unwrap().file_name,
            "normals.dds"
        );

        let mut civ = session(Game::CivilizationIv);
        let id = civ
            .compose_texturing_property(1, ApplyMode::Modulate, &material, NO_LAYERS, None)
            .unwrap();
        let prop = property(&civ, id);
        assert_eq!(prop.shader_textures.len(), 4);
        assert!(prop.shader_textures[1].is_used);
    }

    #[test]
    fn texture_effect_defaults() {
        let mut session = session(Game::Oblivion);
        let id = session.compose_texture_effect(None, None).unwrap();
        let effect = session.store().texture_effect(id).unwrap();

        assert_eq!(effect, &TextureEffect::environment_map());
        assert_eq!(effect.flags, 4);
        assert_eq!(effect.unknown_vector.x, 1.0);
        assert_eq!(effect.source_texture, None);
    }

    #[test]
    fn texture_effect_counts_affected_nodes_for_morrowind() {
        let sky = Texture::environment_map("Sky");

        let mut morrowind = session(Game::Morrowind);
        let id = morrowind.compose_texture_effect(Some(&sky), None).unwrap();
        let effect = morrowind.store().texture_effect(id).unwrap();
        assert_eq!(effect.num_affected_node_list_pointers, 1);

        let source = effect.source_texture.unwrap();
        assert_eq!(
            morrowind.store().source_texture(source).unwrap().file_name,
            "enviro 01.TGA"
        );

        let mut oblivion = session(Game::Oblivion);
        let wall = Texture::image("wall", "C:/Data/Textures/wall.dds");
        let id = oblivion.compose_texture_effect(Some(&wall), None).unwrap();
        assert_eq!(
            oblivion.store().texture_effect(id).unwrap().num_affected_node_list_pointers,
            0
        );
    }

    #[test]
    fn texture_effects_are_never_shared() {
        let mut session = session(Game::Morrowind);
        let sky = Texture::environment_map("Sky");
        let a = session.compose_texture_effect(Some(&sky), Some("Sphere")).unwrap();
        let b = session.compose_texture_effect(Some(&sky), Some("Sphere")).unwrap();

        assert_ne!(a, b);
        // one shared source texture, two effects
        assert_eq!(session.store().len(), 3);
        assert!(matches!(session.store().get(b), Some(Block::TextureEffect(_))));
    }
}
