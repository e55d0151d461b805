//! This module builds the scene: the camera, the lights, and everything on the tree.
//!
//! All the randomness happens once, in [`setup_scene`]. After that, everything moves as a
//! function of the [`SceneClock`].

use crate::{
    foliage::{foliage_mesh, FoliageMaterial, SceneClock},
    view_state::ViewState,
};
use bevy::{
    core_pipeline::bloom::BloomSettings,
    prelude::*,
    render::{mesh::PrimitiveTopology, view::NoFrustumCulling},
};
use eg_animation::{
    orbit::{auto_rotate_rate, orbit_eye, MAX_POLAR_ANGLE, MIN_POLAR_ANGLE},
    sparkle_offset, sparkle_scale, FloatMotion, FoliageUniforms,
};
use eg_config::{linear_rgb, CardConfig, Palette, RGBArray};
use eg_generate::{
    generate_foliage, generate_ornaments, generate_sparkles, generate_star_outline,
    mesh::{extrude_outline, frustum, ExtrudeSettings, TriangleMesh},
    OrnamentColour, OrnamentKind, OrnamentPlacement, Sparkle,
};
use rand::{rngs::StdRng, SeedableRng};
use smooth_bevy_cameras::{
    controllers::orbit::{
        control_system, OrbitCameraBundle, OrbitCameraController, OrbitCameraPlugin,
    },
    LookTransform, LookTransformPlugin,
};
use std::collections::HashMap;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

/// Where the camera starts.
const CAMERA_EYE: Vec3 = Vec3::new(0., 2., 12.);

/// How far the whole tree is moved down, so that the camera looks at its middle.
const TREE_OFFSET_Y: f32 = -3.;

/// How far above the tip of the tree the star sits.
const STAR_LIFT: f32 = 0.6;

/// The number of sides of the core cone and the base.
const SOLID_SEGMENTS: u32 = 16;

/// How much brighter than its colour the star glows.
const STAR_EMISSIVE_STRENGTH: f32 = 3.;

/// The loaded config of the card.
#[derive(Resource, Clone, Debug, Deref)]
pub struct Card(pub CardConfig);

/// The RNG for everything generated at startup. It's seeded from [`CardConfig::seed`] if
/// there is one.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct CardRng(pub StdRng);

impl CardRng {
    /// Create a new RNG from the given seed, or from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        Self(seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64))
    }
}

/// An ornament hanging on the tree.
#[derive(Component, Clone, Copy, Debug)]
pub struct Ornament(pub OrnamentKind);

/// An object that bobs and wobbles around its resting place.
#[derive(Component, Clone, Copy, Debug)]
pub struct Floating {
    /// Where the object rests.
    pub rest: Vec3,

    /// How it moves.
    pub motion: FloatMotion,
}

/// A sparkle drifting around its resting place.
#[derive(Component, Clone, Copy, Debug)]
pub struct Drifting(pub Sparkle);

/// Lets the user orbit the camera with LControl and the mouse, and runs [`orbit_camera`] after
/// every drag so the camera never leaves the polar limits, even for a frame.
pub struct CardCameraPlugin;

impl Plugin for CardCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugin(LookTransformPlugin)
            .add_plugin(OrbitCameraPlugin::default())
            .add_system(orbit_camera.after(control_system));
    }
}

/// Convert an sRGB colour from the palette into a Bevy colour.
fn srgb(colour: RGBArray) -> Color {
    let [r, g, b] = colour;
    Color::rgb_u8(r, g, b)
}

/// Convert a generated triangle soup into a Bevy mesh.
pub fn triangle_mesh(soup: &TriangleMesh) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, soup.position_arrays());
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, soup.normal_arrays());
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, vec![[0f32, 0.]; soup.positions.len()]);
    mesh
}

/// The transform of a single ornament.
pub fn ornament_transform(placement: &OrnamentPlacement) -> Transform {
    let Vec3 { x, y, z } = placement.rotation;
    Transform::from_translation(placement.position)
        .with_rotation(Quat::from_euler(EulerRot::XYZ, x, y, z))
        .with_scale(Vec3::splat(placement.scale))
}

/// The shared material for every ornament of the given colour. Gifts are satin and baubles are
/// mirror polished.
fn ornament_material(colour: OrnamentColour, palette: &Palette) -> StandardMaterial {
    let (perceptual_roughness, metallic) = match colour {
        OrnamentColour::GiftRed | OrnamentColour::GiftGreen => (0.2, 0.4),
        OrnamentColour::Gold | OrnamentColour::GoldWarm => (0., 1.),
    };

    StandardMaterial {
        base_color: srgb(colour.srgb(palette)),
        perceptual_roughness,
        metallic,
        ..default()
    }
}

/// Set up the camera, the lights, and the window background.
#[instrument(skip_all)]
pub fn setup_camera_and_lights(mut commands: Commands, card: Res<Card>) {
    let palette = &card.palette;

    commands.insert_resource(ClearColor(srgb(palette.background)));
    commands.insert_resource(AmbientLight {
        color: srgb(palette.emerald_dark),
        brightness: 0.2,
    });

    // Hold LControl to orbit. Panning is disabled so the tree always stays in the middle
    commands
        .spawn((
            Camera3dBundle {
                camera: Camera {
                    hdr: true,
                    ..default()
                },
                projection: Projection::Perspective(PerspectiveProjection {
                    fov: 45f32.to_radians(),
                    ..default()
                }),
                ..default()
            },
            BloomSettings {
                threshold: 0.8,
                knee: 0.025,
                scale: 0.7,
                intensity: ViewState::default().bloom_intensity(),
            },
        ))
        .insert(OrbitCameraBundle::new(
            OrbitCameraController {
                mouse_rotate_sensitivity: Vec2::splat(0.25),
                mouse_translate_sensitivity: Vec2::ZERO,
                smoothing_weight: 0.9,
                ..default()
            },
            CAMERA_EYE,
            Vec3::ZERO,
            Vec3::Y,
        ));

    // Key light
    commands.spawn(SpotLightBundle {
        spot_light: SpotLight {
            color: srgb(palette.gold_highlight),
            intensity: 30_000.,
            range: 60.,
            outer_angle: 0.3,
            inner_angle: 0.15,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(10., 15., 10.).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    // Fill light
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            color: srgb(palette.fill_light),
            intensity: 4000.,
            range: 40.,
            ..default()
        },
        transform: Transform::from_xyz(-10., 5., -10.),
        ..default()
    });

    // Rim light
    commands.spawn(SpotLightBundle {
        spot_light: SpotLight {
            color: srgb(palette.gold),
            intensity: 20_000.,
            range: 40.,
            ..default()
        },
        transform: Transform::from_xyz(0., 10., -10.).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    debug!("Finished adding camera and lights");
}

/// Generate the tree and add it to the world.
#[instrument(skip_all)]
pub fn setup_scene(
    mut commands: Commands,
    card: Res<Card>,
    mut rng: ResMut<CardRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut foliage_materials: ResMut<Assets<FoliageMaterial>>,
) {
    let CardConfig {
        palette,
        tree,
        populations,
        ..
    } = &card.0;
    let rng = &mut rng.0;

    let foliage = generate_foliage(populations.foliage, tree, rng);
    let gifts = generate_ornaments(populations.heavy_ornaments, OrnamentKind::Heavy, tree, rng);
    let baubles = generate_ornaments(populations.light_ornaments, OrnamentKind::Light, tree, rng);
    let sparkles = generate_sparkles(populations.sparkles, tree, rng);
    info!(
        foliage = foliage.len(),
        gifts = gifts.len(),
        baubles = baubles.len(),
        sparkles = sparkles.len(),
        "Generated tree"
    );

    let foliage_mesh = meshes.add(foliage_mesh(&foliage));
    let foliage_material = foliage_materials.add(FoliageMaterial {
        uniforms: FoliageUniforms::from_palette(palette),
    });

    let core_mesh = meshes.add(triangle_mesh(&frustum(
        tree.base_radius * 0.5,
        0.,
        tree.height,
        SOLID_SEGMENTS,
    )));
    let core_material = materials.add(StandardMaterial {
        base_color: srgb(palette.core),
        unlit: true,
        ..default()
    });

    let cube = meshes.add(Mesh::from(shape::Cube { size: 1. }));
    let sphere = meshes.add(Mesh::from(shape::UVSphere {
        radius: 1.,
        sectors: 32,
        stacks: 32,
    }));
    let ornament_materials: HashMap<OrnamentColour, Handle<StandardMaterial>> =
        OrnamentColour::iter()
            .map(|colour| (colour, materials.add(ornament_material(colour, palette))))
            .collect();

    let sparkle_mesh = meshes.add(Mesh::from(shape::UVSphere {
        radius: 1.,
        sectors: 8,
        stacks: 6,
    }));
    let sparkle_material = materials.add(StandardMaterial {
        base_color: srgb(palette.sparkle),
        unlit: true,
        ..default()
    });

    let star_mesh = meshes.add(triangle_mesh(&extrude_outline(
        &generate_star_outline().points,
        &ExtrudeSettings::default(),
    )));
    let [r, g, b] = linear_rgb(palette.star_emissive).map(|c| c * STAR_EMISSIVE_STRENGTH);
    let star_material = materials.add(StandardMaterial {
        base_color: srgb(palette.gold),
        emissive: Color::rgb_linear(r, g, b),
        perceptual_roughness: 0.1,
        metallic: 1.,
        ..default()
    });

    let base_mesh = meshes.add(triangle_mesh(&frustum(0.8, 0.5, 1., SOLID_SEGMENTS)));
    let base_material = materials.add(StandardMaterial {
        base_color: srgb(palette.base),
        perceptual_roughness: 0.8,
        ..default()
    });

    let ground_mesh = meshes.add(Mesh::from(shape::Plane { size: 40. }));
    let ground_material = materials.add(StandardMaterial {
        base_color: srgb(palette.background),
        perceptual_roughness: 1.,
        ..default()
    });

    let star_rest = Vec3::new(0., tree.height + STAR_LIFT, 0.);

    commands
        .spawn(SpatialBundle::from_transform(Transform::from_xyz(
            0.,
            TREE_OFFSET_Y,
            0.,
        )))
        .with_children(|builder| {
            // The quads are moved in the shader, so the CPU bounding box is meaningless
            builder.spawn((
                MaterialMeshBundle {
                    mesh: foliage_mesh,
                    material: foliage_material,
                    ..default()
                },
                NoFrustumCulling,
            ));

            builder.spawn(PbrBundle {
                mesh: core_mesh,
                material: core_material,
                transform: Transform::from_xyz(0., tree.height / 2., 0.),
                ..default()
            });

            for (placements, mesh, kind) in [
                (&gifts, &cube, OrnamentKind::Heavy),
                (&baubles, &sphere, OrnamentKind::Light),
            ] {
                for placement in placements {
                    builder.spawn((
                        PbrBundle {
                            mesh: mesh.clone(),
                            material: ornament_materials[&placement.colour].clone(),
                            transform: ornament_transform(placement),
                            ..default()
                        },
                        Ornament(kind),
                    ));
                }
            }

            for sparkle in sparkles {
                builder.spawn((
                    PbrBundle {
                        mesh: sparkle_mesh.clone(),
                        material: sparkle_material.clone(),
                        transform: Transform::from_translation(sparkle.position)
                            .with_scale(Vec3::splat(sparkle.size)),
                        ..default()
                    },
                    Drifting(sparkle),
                ));
            }

            builder
                .spawn((
                    SpatialBundle::from_transform(Transform::from_translation(star_rest)),
                    Floating {
                        rest: star_rest,
                        motion: FloatMotion::default(),
                    },
                ))
                .with_children(|star| {
                    star.spawn(PbrBundle {
                        mesh: star_mesh,
                        material: star_material,
                        ..default()
                    });

                    // Halo
                    star.spawn(PointLightBundle {
                        point_light: PointLight {
                            color: srgb(palette.gold),
                            intensity: 1200.,
                            range: 8.,
                            ..default()
                        },
                        ..default()
                    });
                });

            builder.spawn(PbrBundle {
                mesh: base_mesh,
                material: base_material,
                ..default()
            });

            builder.spawn(PbrBundle {
                mesh: ground_mesh,
                material: ground_material,
                transform: Transform::from_xyz(0., -0.5, 0.),
                ..default()
            });
        });

    debug!("Finished adding tree to world");
}

/// Bob and wobble every [`Floating`] object.
pub fn float_objects(clock: Res<SceneClock>, mut query: Query<(&Floating, &mut Transform)>) {
    let time = clock.elapsed();

    for (floating, mut transform) in &mut query {
        let pose = floating.motion.pose_at(time);
        let Vec3 { x, y, z } = pose.rotation;

        transform.translation = floating.rest + Vec3::Y * pose.lift;
        transform.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }
}

/// Drift and twinkle every sparkle.
pub fn drift_sparkles(clock: Res<SceneClock>, mut query: Query<(&Drifting, &mut Transform)>) {
    let time = clock.elapsed();

    for (Drifting(sparkle), mut transform) in &mut query {
        transform.translation = sparkle.position + sparkle_offset(sparkle, time);
        transform.scale = Vec3::splat(sparkle.size * sparkle_scale(sparkle, time));
    }
}

/// Auto-rotate the camera while [`ViewState::auto_rotate`] is set, and keep it between the polar
/// limits however the user drags it.
pub fn orbit_camera(
    time: Res<Time>,
    card: Res<Card>,
    view_state: Res<ViewState>,
    mut cameras: Query<&mut LookTransform, With<OrbitCameraController>>,
) {
    // Rotating left like this goes anticlockwise when seen from above
    let delta_azimuth = if view_state.auto_rotate() {
        -auto_rotate_rate(card.auto_rotate_speed) * time.delta_seconds()
    } else {
        0.
    };

    for mut look in &mut cameras {
        let eye = orbit_eye(
            look.eye,
            look.target,
            delta_azimuth,
            (MIN_POLAR_ANGLE, MAX_POLAR_ANGLE),
        );

        // Don't trigger change detection when nothing moved
        if eye != look.eye {
            look.eye = eye;
        }
    }
}

/// Copy the bloom intensity from the [`ViewState`] to the camera when it changes.
pub fn sync_bloom(view_state: Res<ViewState>, mut bloom: Query<&mut BloomSettings>) {
    if !view_state.is_changed() {
        return;
    }

    let intensity = view_state.bloom_intensity();
    for mut settings in &mut bloom {
        settings.intensity = intensity;
    }
    debug!(intensity, "Synced bloom");
}
