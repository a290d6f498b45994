use std::fmt;
use std::path::PathBuf;

use cgmath::Vector3;
use futures::channel::oneshot;

use crate::gfx::{
    camera::{ArcRotateCamera, SceneCamera},
    geometry::{self, GeometryData},
    lights::SceneLight,
    loader::{self, LoadResult},
    material::{MaterialId, MaterialManager, StandardMaterial},
};
use crate::ui::GuiTexture;

use super::mesh::SceneMesh;

macro_rules! scene_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub(crate) usize);

        impl $name {
            /// Position of the object in its scene collection
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

scene_handle!(
    /// Handle to a mesh in a [`Scene`]
    MeshId
);
scene_handle!(
    /// Handle to a camera in a [`Scene`]
    CameraId
);
scene_handle!(
    /// Handle to a light in a [`Scene`]
    LightId
);
scene_handle!(
    /// Handle to a GUI texture in a [`Scene`]
    TextureId
);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereOptions {
    pub diameter: f32,
    pub segments: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            diameter: 1.0,
            segments: 32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxOptions {
    pub size: f32,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self { size: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneOptions {
    pub width: f32,
    pub height: f32,
}

impl Default for PlaneOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundOptions {
    pub width: f32,
    pub height: f32,
    pub subdivisions: u32,
}

impl Default for GroundOptions {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 10.0,
            subdivisions: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IcoSphereOptions {
    pub radius: f32,
    pub subdivisions: u32,
}

impl Default for IcoSphereOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            subdivisions: 2,
        }
    }
}

type LoadCallback = Box<dyn FnOnce(&mut Scene, &[MeshId])>;

/// Model load still running in the background
struct PendingLoad {
    name: String,
    path: PathBuf,
    receiver: oneshot::Receiver<LoadResult>,
    on_loaded: LoadCallback,
}

/// Container of everything an assignment renders
///
/// Objects are only ever added, so handles stay valid for the lifetime of
/// the scene. Names need not be unique; lookups return the first match.
pub struct Scene {
    pub clear_color: [f32; 4],
    cameras: Vec<SceneCamera>,
    active_camera: Option<CameraId>,
    lights: Vec<SceneLight>,
    meshes: Vec<SceneMesh>,
    textures: Vec<GuiTexture>,
    material_manager: MaterialManager,
    pending_loads: Vec<PendingLoad>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            clear_color: [0.2, 0.2, 0.3, 1.0],
            cameras: Vec::new(),
            active_camera: None,
            lights: Vec::new(),
            meshes: Vec::new(),
            textures: Vec::new(),
            material_manager: MaterialManager::new(),
            pending_loads: Vec::new(),
        }
    }

    // Cameras

    pub fn add_camera(&mut self, camera: SceneCamera) -> CameraId {
        self.cameras.push(camera);
        let id = CameraId(self.cameras.len() - 1);
        if self.active_camera.is_none() {
            self.active_camera = Some(id);
        }
        id
    }

    pub fn create_arc_rotate_camera(
        &mut self,
        name: &str,
        alpha: f32,
        beta: f32,
        radius: f32,
        target: Vector3<f32>,
    ) -> CameraId {
        self.add_camera(SceneCamera::arc_rotate(
            name,
            ArcRotateCamera::new(alpha, beta, radius, target),
        ))
    }

    pub fn create_free_camera(&mut self, name: &str, position: Vector3<f32>, target: Vector3<f32>) -> CameraId {
        self.add_camera(SceneCamera::free(name, position, target))
    }

    pub fn cameras(&self) -> &[SceneCamera] {
        &self.cameras
    }

    pub fn camera(&self, id: CameraId) -> &SceneCamera {
        &self.cameras[id.0]
    }

    pub fn camera_mut(&mut self, id: CameraId) -> &mut SceneCamera {
        &mut self.cameras[id.0]
    }

    pub fn get_camera_by_name(&self, name: &str) -> Option<&SceneCamera> {
        self.cameras.iter().find(|camera| camera.name == name)
    }

    pub fn active_camera(&self) -> Option<&SceneCamera> {
        self.active_camera.map(|id| &self.cameras[id.0])
    }

    pub fn active_camera_mut(&mut self) -> Option<&mut SceneCamera> {
        self.active_camera.map(move |id| &mut self.cameras[id.0])
    }

    pub fn set_active_camera(&mut self, id: CameraId) {
        self.active_camera = Some(id);
    }

    // Lights

    pub fn add_light(&mut self, light: SceneLight) -> LightId {
        self.lights.push(light);
        LightId(self.lights.len() - 1)
    }

    pub fn create_hemispheric_light(&mut self, name: &str, direction: Vector3<f32>) -> LightId {
        self.add_light(SceneLight::hemispheric(name, direction))
    }

    pub fn create_directional_light(&mut self, name: &str, direction: Vector3<f32>) -> LightId {
        self.add_light(SceneLight::directional(name, direction))
    }

    pub fn create_point_light(&mut self, name: &str, position: Vector3<f32>) -> LightId {
        self.add_light(SceneLight::point(name, position))
    }

    pub fn lights(&self) -> &[SceneLight] {
        &self.lights
    }

    pub fn light(&self, id: LightId) -> &SceneLight {
        &self.lights[id.0]
    }

    pub fn light_mut(&mut self, id: LightId) -> &mut SceneLight {
        &mut self.lights[id.0]
    }

    pub fn get_light_by_name(&self, name: &str) -> Option<&SceneLight> {
        self.lights.iter().find(|light| light.name == name)
    }

    /// Light the renderer shades with
    pub fn primary_light(&self) -> Option<&SceneLight> {
        self.lights.iter().find(|light| light.enabled)
    }

    // Meshes

    pub fn add_mesh(&mut self, name: &str, geometry: GeometryData) -> MeshId {
        self.meshes.push(SceneMesh::new(name, geometry));
        MeshId(self.meshes.len() - 1)
    }

    pub fn create_sphere(&mut self, name: &str, options: SphereOptions) -> MeshId {
        let segments = options.segments.max(3);
        let geometry = geometry::generate_sphere(segments, segments / 2).scaled(options.diameter * 0.5);
        self.add_mesh(name, geometry)
    }

    pub fn create_box(&mut self, name: &str, options: BoxOptions) -> MeshId {
        self.add_mesh(name, geometry::generate_box(options.size))
    }

    pub fn create_plane(&mut self, name: &str, options: PlaneOptions) -> MeshId {
        self.add_mesh(name, geometry::generate_plane(options.width, options.height, 1, 1))
    }

    pub fn create_ground(&mut self, name: &str, options: GroundOptions) -> MeshId {
        self.add_mesh(
            name,
            geometry::generate_ground(options.width, options.height, options.subdivisions),
        )
    }

    pub fn create_icosphere(&mut self, name: &str, options: IcoSphereOptions) -> MeshId {
        self.add_mesh(
            name,
            geometry::generate_icosphere(options.radius, options.subdivisions),
        )
    }

    /// Large inward-facing box rendered unlit with `material`
    pub fn create_skybox(&mut self, name: &str, size: f32, material: StandardMaterial) -> MeshId {
        let material_id = self.add_material(material.unlit());
        let id = self.add_mesh(name, geometry::generate_box(size).flipped());
        self.meshes[id.0].material = Some(material_id);
        id
    }

    pub fn meshes(&self) -> &[SceneMesh] {
        &self.meshes
    }

    pub fn mesh(&self, id: MeshId) -> &SceneMesh {
        &self.meshes[id.0]
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> &mut SceneMesh {
        &mut self.meshes[id.0]
    }

    /// Iterates meshes together with their handles
    pub fn mesh_entries(&self) -> impl Iterator<Item = (MeshId, &SceneMesh)> {
        self.meshes.iter().enumerate().map(|(i, mesh)| (MeshId(i), mesh))
    }

    pub fn get_mesh_by_name(&self, name: &str) -> Option<&SceneMesh> {
        self.meshes.iter().find(|mesh| mesh.name == name)
    }

    pub fn get_mesh_by_name_mut(&mut self, name: &str) -> Option<&mut SceneMesh> {
        self.meshes.iter_mut().find(|mesh| mesh.name == name)
    }

    pub fn get_mesh_id_by_name(&self, name: &str) -> Option<MeshId> {
        self.meshes.iter().position(|mesh| mesh.name == name).map(MeshId)
    }

    // Materials

    pub fn add_material(&mut self, material: StandardMaterial) -> MaterialId {
        self.material_manager.add_material(material)
    }

    pub fn materials(&self) -> &MaterialManager {
        &self.material_manager
    }

    pub fn materials_mut(&mut self) -> &mut MaterialManager {
        &mut self.material_manager
    }

    /// Material a mesh renders with, the default one if unassigned
    pub fn material_for_mesh(&self, mesh: &SceneMesh) -> &StandardMaterial {
        self.material_manager.resolve(mesh.material.as_deref())
    }

    // GUI textures

    pub fn create_texture_for_mesh(&mut self, name: &str, mesh: MeshId, width: u32, height: u32) -> TextureId {
        self.textures.push(GuiTexture::for_mesh(name, mesh, width, height));
        TextureId(self.textures.len() - 1)
    }

    pub fn create_fullscreen_ui(&mut self, name: &str) -> TextureId {
        self.textures.push(GuiTexture::fullscreen(name));
        TextureId(self.textures.len() - 1)
    }

    pub fn textures(&self) -> &[GuiTexture] {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut [GuiTexture] {
        &mut self.textures
    }

    pub fn texture(&self, id: TextureId) -> &GuiTexture {
        &self.textures[id.0]
    }

    pub fn texture_mut(&mut self, id: TextureId) -> &mut GuiTexture {
        &mut self.textures[id.0]
    }

    pub fn get_texture_by_name(&self, name: &str) -> Option<&GuiTexture> {
        self.textures.iter().find(|texture| texture.name == name)
    }

    pub fn get_texture_by_name_mut(&mut self, name: &str) -> Option<&mut GuiTexture> {
        self.textures.iter_mut().find(|texture| texture.name == name)
    }

    // Asynchronous model loading

    /// Starts loading an OBJ model in the background
    ///
    /// Once [`poll_pending_loads`](Self::poll_pending_loads) sees the load
    /// complete, the models are added as meshes named `name` (then `name.1`,
    /// `name.2`, ... for further sub-models) and `on_loaded` is called with
    /// their handles. A failed load adds nothing and never calls `on_loaded`.
    pub fn import_mesh_async<F>(&mut self, name: &str, path: impl Into<PathBuf>, on_loaded: F)
    where
        F: FnOnce(&mut Scene, &[MeshId]) + 'static,
    {
        let path = path.into();
        log::debug!("Importing '{}' from {}", name, path.display());
        self.pending_loads.push(PendingLoad {
            name: name.to_string(),
            receiver: loader::spawn_obj_load(path.clone()),
            path,
            on_loaded: Box::new(on_loaded),
        });
    }

    /// Attaches every finished background load; never blocks
    ///
    /// Returns the number of loads that completed successfully.
    pub fn poll_pending_loads(&mut self) -> usize {
        let mut finished = Vec::new();
        let mut still_pending = Vec::new();

        for mut pending in self.pending_loads.drain(..) {
            match pending.receiver.try_recv() {
                Ok(Some(result)) => finished.push((pending, result)),
                Ok(None) => still_pending.push(pending),
                Err(oneshot::Canceled) => {
                    log::debug!("Load of {} was abandoned", pending.path.display());
                }
            }
        }
        self.pending_loads = still_pending;

        let mut attached = 0;
        for (pending, result) in finished {
            match result {
                Ok(models) => {
                    let ids: Vec<MeshId> = models
                        .into_iter()
                        .enumerate()
                        .map(|(i, model)| {
                            let name = if i == 0 {
                                pending.name.clone()
                            } else {
                                format!("{}.{}", pending.name, i)
                            };
                            self.add_mesh(&name, model.geometry)
                        })
                        .collect();
                    log::info!(
                        "Loaded '{}' ({} mesh(es)) from {}",
                        pending.name,
                        ids.len(),
                        pending.path.display()
                    );
                    (pending.on_loaded)(self, &ids);
                    attached += 1;
                }
                Err(err) => {
                    log::debug!("Dropping failed load of '{}': {}", pending.name, err);
                }
            }
        }

        attached
    }

    pub fn pending_load_count(&self) -> usize {
        self.pending_loads.len()
    }

    // Window events

    /// Updates every camera's aspect ratio; zero sizes are ignored
    pub fn handle_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        for camera in self.cameras.iter_mut() {
            camera.projection.resize(width, height);
        }
    }

    /// Gets statistics about the scene
    pub fn statistics(&self) -> SceneStatistics {
        SceneStatistics {
            camera_count: self.cameras.len(),
            light_count: self.lights.len(),
            mesh_count: self.meshes.len(),
            texture_count: self.textures.len(),
            material_count: self.material_manager.len(),
            total_triangles: self.meshes.iter().map(|m| m.geometry.triangle_count()).sum(),
            total_vertices: self.meshes.iter().map(|m| m.geometry.vertex_count()).sum(),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("cameras", &self.cameras.len())
            .field("lights", &self.lights.len())
            .field("meshes", &self.meshes.len())
            .field("textures", &self.textures.len())
            .field("pending_loads", &self.pending_loads.len())
            .finish()
    }
}

/// Scene statistics for debugging and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub camera_count: usize,
    pub light_count: usize,
    pub mesh_count: usize,
    pub texture_count: usize,
    pub material_count: usize,
    pub total_triangles: usize,
    pub total_vertices: usize,
}
