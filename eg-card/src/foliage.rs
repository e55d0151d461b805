//! This module wires the foliage shader into Bevy: the material, the particle mesh, and the
//! per-frame system that keeps the shader's clock running.

use bevy::{
    pbr::{MaterialPipeline, MaterialPipelineKey},
    prelude::*,
    reflect::TypeUuid,
    render::{
        mesh::{Indices, MeshVertexAttribute, MeshVertexBufferLayout},
        render_asset::RenderAssets,
        render_resource::{
            AsBindGroup, AsBindGroupShaderType, BlendComponent, BlendFactor, BlendOperation,
            BlendState, PrimitiveTopology, RenderPipelineDescriptor, ShaderRef, ShaderType,
            SpecializedMeshPipelineError, VertexFormat,
        },
    },
};
use eg_animation::{drive_frame, FoliageUniforms, ShaderClock, FOLIAGE_WGSL};
use eg_generate::FoliagePoint;
use tracing::{debug, instrument};

/// The handle of the embedded foliage shader.
pub const FOLIAGE_SHADER_HANDLE: HandleUntyped =
    HandleUntyped::weak_from_u64(Shader::TYPE_UUID, 0x6576_6572_6772_6565);

/// The size and random seed of each foliage particle, packed together.
pub const ATTRIBUTE_SIZE_AND_SEED: MeshVertexAttribute =
    MeshVertexAttribute::new("Foliage_SizeAndSeed", 0x0f01_1a6e, VertexFormat::Float32x2);

/// The corners of each particle quad, wound counter-clockwise.
const QUAD_CORNERS: [[f32; 2]; 4] = [[0., 0.], [1., 0.], [1., 1.], [0., 1.]];

/// The clock of the mounted scene, which drives the foliage shader and every other animation.
#[derive(Resource, Clone, Copy, Debug, Default, Deref, DerefMut)]
pub struct SceneClock(pub ShaderClock);

/// The material of the foliage particles.
#[derive(AsBindGroup, TypeUuid, Clone, Debug)]
#[uuid = "3f6b1c2e-9d4a-4e57-8a0b-5c1d2e3f4a5b"]
#[uniform(0, FoliageMaterialUniform)]
pub struct FoliageMaterial {
    /// The values passed to the shader.
    pub uniforms: FoliageUniforms,
}

/// The GPU layout of [`FoliageUniforms`], matching `FoliageMaterial` in the WGSL.
#[derive(Clone, Default, ShaderType)]
pub struct FoliageMaterialUniform {
    pub colour_base: Vec4,
    pub colour_highlight: Vec4,
    pub time: f32,
    pub sway_amplitude: f32,
    pub breath_amplitude: f32,
    pub size_attenuation: f32,
}

impl AsBindGroupShaderType<FoliageMaterialUniform> for FoliageMaterial {
    fn as_bind_group_shader_type(&self, _images: &RenderAssets<Image>) -> FoliageMaterialUniform {
        let FoliageUniforms {
            colour_base,
            colour_highlight,
            time,
            sway_amplitude,
            breath_amplitude,
            size_attenuation,
        } = self.uniforms;

        FoliageMaterialUniform {
            colour_base: colour_base.extend(1.),
            colour_highlight: colour_highlight.extend(1.),
            time,
            sway_amplitude,
            breath_amplitude,
            size_attenuation,
        }
    }
}

impl Material for FoliageMaterial {
    fn vertex_shader() -> ShaderRef {
        FOLIAGE_SHADER_HANDLE.typed().into()
    }

    fn fragment_shader() -> ShaderRef {
        FOLIAGE_SHADER_HANDLE.typed().into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayout,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_NORMAL.at_shader_location(1),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(2),
            ATTRIBUTE_SIZE_AND_SEED.at_shader_location(3),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];

        // The quads face the camera, so there's no back to cull
        descriptor.primitive.cull_mode = None;

        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }

        // Additive blending, so overlapping particles glow
        if let Some(fragment) = descriptor.fragment.as_mut() {
            for target in fragment.targets.iter_mut().flatten() {
                target.blend = Some(BlendState {
                    color: BlendComponent {
                        src_factor: BlendFactor::SrcAlpha,
                        dst_factor: BlendFactor::One,
                        operation: BlendOperation::Add,
                    },
                    alpha: BlendComponent {
                        src_factor: BlendFactor::Zero,
                        dst_factor: BlendFactor::One,
                        operation: BlendOperation::Add,
                    },
                });
            }
        }

        Ok(())
    }
}

/// Registers the embedded foliage shader, the material, and the clock system.
pub struct FoliagePlugin;

impl Plugin for FoliagePlugin {
    fn build(&self, app: &mut App) {
        app.world
            .resource_mut::<Assets<Shader>>()
            .set_untracked(FOLIAGE_SHADER_HANDLE, Shader::from_wgsl(FOLIAGE_WGSL));

        app.add_plugin(MaterialPlugin::<FoliageMaterial>::default())
            .init_resource::<SceneClock>()
            .add_system(drive_scene_clock);
    }
}

/// Build one mesh holding every foliage particle as a quad of four vertices.
///
/// Each vertex of a quad has the same position, and the breathing direction goes in the normal
/// attribute. The shader uses the UV to push the corners apart in screen space.
#[instrument(skip_all, fields(count = points.len()))]
pub fn foliage_mesh(points: &[FoliagePoint]) -> Mesh {
    let vertex_count = points.len() * QUAD_CORNERS.len();
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(vertex_count);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(vertex_count);
    let mut corners: Vec<[f32; 2]> = Vec::with_capacity(vertex_count);
    let mut sizes_and_seeds: Vec<[f32; 2]> = Vec::with_capacity(vertex_count);
    let mut indices: Vec<u32> = Vec::with_capacity(points.len() * 6);

    for (idx, point) in points.iter().enumerate() {
        for corner in QUAD_CORNERS {
            positions.push(point.position.to_array());
            normals.push(point.breath_direction.to_array());
            corners.push(corner);
            sizes_and_seeds.push([point.size, point.random_seed]);
        }

        let base = (idx * QUAD_CORNERS.len()) as u32;
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, corners);
    mesh.insert_attribute(ATTRIBUTE_SIZE_AND_SEED, sizes_and_seeds);
    mesh.set_indices(Some(Indices::U32(indices)));

    debug!("Built foliage mesh");
    mesh
}

/// Advance the [`SceneClock`] and push the time into every foliage material.
///
/// A foliage entity whose material hasn't been loaded yet is skipped until it has.
pub fn drive_scene_clock(
    time: Res<Time>,
    mut clock: ResMut<SceneClock>,
    foliage: Query<&Handle<FoliageMaterial>>,
    mut materials: ResMut<Assets<FoliageMaterial>>,
) {
    let now = time.elapsed_seconds();

    // Always tick, even with nothing to drive, so the other animations keep moving
    drive_frame(&mut clock, None, now);

    for handle in &foliage {
        drive_frame(
            &mut clock,
            materials.get_mut(handle).map(|material| &mut material.uniforms),
            now,
        );
    }
}
