use nif_export::{
    blocks::Matrix22, ApplyMode, Block, ExportOptions, ExportSession, Game, MaterialTextures,
    Texture, TextureRole, TextureSlot, Warning,
};

const NO_LAYERS: &[&str] = &[];

fn session(game: Game) -> ExportSession {
    ExportSession::new(ExportOptions::new(game))
}

fn file_name(session: &ExportSession, id: nif_export::BlockId) -> &str {
    &session.store().source_texture(id).unwrap().file_name
}

#[test]
fn railroads_engine_defaults() {
    let mut session = session(Game::SidMeiersRailroads);
    let id = session
        .compose_texturing_property(1, ApplyMode::Modulate, &MaterialTextures::new(), NO_LAYERS, None)
        .unwrap();

    let property = session.store().texturing_property(id).unwrap();
    let used = property
        .shader_textures
        .iter()
        .map(|slot| slot.is_used)
        .collect::<Vec<_>>();
    assert_eq!(used, vec![true, false, false, false, true]);

    let env = property.shader_textures[0].source.unwrap();
    let cube = property.shader_textures[4].source.unwrap();
    assert_eq!(file_name(&session, env), "RRT_Engine_Env_map.dds");
    assert_eq!(file_name(&session, cube), "RRT_Cube_Light_map_128.dds");

    for (index, slot) in property.shader_textures.iter().enumerate() {
        assert_eq!(slot.map_index, index as u32);
    }
}

#[test]
fn civilization_gets_four_unused_slots() {
    let mut session = session(Game::CivilizationIv);
    let id = session
        .compose_texturing_property(1, ApplyMode::Modulate, &MaterialTextures::new(), NO_LAYERS, None)
        .unwrap();

    let property = session.store().texturing_property(id).unwrap();
    assert_eq!(property.shader_textures.len(), 4);
    assert!(property.shader_textures.iter().all(|slot| !slot.is_used));
    assert_eq!(session.store().len(), 1);
}

#[test]
fn reflection_on_oblivion_is_a_warning() {
    let mut session = session(Game::Oblivion);
    let material = MaterialTextures::new().with(
        TextureRole::Reflection,
        TextureSlot::new(Texture::image("Chrome", "C:/Data/Textures/chrome.dds")),
    );

    let res =
        session.compose_texturing_property(1, ApplyMode::Modulate, &material, NO_LAYERS, None);

    assert!(res.is_ok());
    assert_eq!(
        session.warnings(),
        &[Warning::ReflectionUnsupported(Game::Oblivion)]
    );
}

#[test]
fn base_and_bump_on_oblivion() {
    let mut session = session(Game::Oblivion);
    let material = MaterialTextures::new()
        .with(
            TextureRole::Base,
            TextureSlot::new(Texture::image("Wood", "C:/Data/Textures/Wood/plank.dds")),
        )
        .with(
            TextureRole::Bump,
            TextureSlot::new(Texture::image("Bumps", "C:/Data/Textures/Wood/plank_n.dds"))
                .with_uv_layer("UVMap"),
        );

    let id = session
        .compose_texturing_property(1, ApplyMode::Modulate, &material, &["UVMap"], Some("Crate"))
        .unwrap();

    let property = session.store().texturing_property(id).unwrap();
    assert!(property.has_base_texture());
    assert!(property.has_bump_map_texture());
    assert!(property.shader_textures.is_empty());

    let bump = property.bump_map.as_ref().unwrap();
    assert_eq!(bump.luma_scale, 1.0);
    assert_eq!(bump.luma_offset, 0.0);
    assert_eq!(bump.matrix, Matrix22::identity());
    assert_eq!(file_name(&session, bump.texture.source), "textures\\wood\\plank_n.dds");
    assert_eq!(
        file_name(&session, property.base_texture.unwrap().source),
        "textures\\wood\\plank.dds"
    );
    assert_eq!(session.store().origin(id), Some("Crate"));
}

#[test]
fn identical_materials_share_one_property() {
    let mut session = session(Game::Fallout3);
    let material = MaterialTextures::new().with(
        TextureRole::Base,
        TextureSlot::new(Texture::image("Rust", "D:/Fallout 3/Data/Textures/Metal/rust.dds")),
    );

    let first = session
        .compose_texturing_property(1, ApplyMode::Modulate, &material, NO_LAYERS, None)
        .unwrap();
    let len = session.store().len();
    let second = session
        .compose_texturing_property(1, ApplyMode::Modulate, &material, NO_LAYERS, None)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(len, 2);
    assert_eq!(session.store().len(), len);

    // a different apply mode is a different property
    let third = session
        .compose_texturing_property(1, ApplyMode::Replace, &material, NO_LAYERS, None)
        .unwrap();
    assert_ne!(first, third);
    assert_eq!(session.store().len(), 3);
}

#[test]
fn blocks_are_stored_in_export_order() {
    let mut session = session(Game::Oblivion);
    let material = MaterialTextures::new()
        .with(
            TextureRole::Base,
            TextureSlot::new(Texture::image("Base", "C:/Data/Textures/base.dds")),
        )
        .with(
            TextureRole::Glow,
            TextureSlot::new(Texture::image("Glow", "C:/Data/Textures/glow.dds")),
        );

    session
        .compose_texturing_property(1, ApplyMode::Modulate, &material, NO_LAYERS, None)
        .unwrap();

    let kinds = session
        .store()
        .iter()
        .map(|(_, block)| block.type_name())
        .collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec!["NiSourceTexture", "NiSourceTexture", "NiTexturingProperty"]
    );
}

#[test]
fn file_names_per_game() {
    let texture = Texture::image("Leaf", "C:\\Games\\Data\\Textures\\Trees\\Leaf.tga");

    let mut morrowind = session(Game::Morrowind);
    assert_eq!(
        morrowind.export_texture_filename(&texture).unwrap(),
        "textures\\trees\\leaf.tga"
    );

    let mut zoo = session(Game::ZooTycoon2);
    assert_eq!(zoo.export_texture_filename(&texture).unwrap(), "Leaf.tga");
    assert!(zoo.warnings().is_empty());
}

#[test]
fn reset_starts_a_new_run() {
    let mut session = session(Game::Morrowind);
    session.build_source_texture(None, None).unwrap();
    assert_eq!(session.store().len(), 1);
    assert_eq!(session.warnings().len(), 1);

    session.reset();
    assert!(session.store().is_empty());
    assert!(session.warnings().is_empty());

    let id = session.compose_texture_effect(None, None).unwrap();
    assert_eq!(id.0, 0);
    assert!(matches!(
        session.store().get(id),
        Some(Block::TextureEffect(_))
    ));
}
