//! # Model Loading
//!
//! Wavefront OBJ loading through `tobj`, either synchronously or on a
//! background thread whose result arrives through a oneshot channel. Scenes
//! use the background variant to attach models without stalling the render
//! loop (see `Scene::import_mesh_async`).

use std::path::{Path, PathBuf};
use std::thread;

use futures::channel::oneshot;

use super::geometry::GeometryData;

/// A sub-model read from a model file
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub name: String,
    pub geometry: GeometryData,
}

pub type LoadResult = Result<Vec<LoadedModel>, LoadError>;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to load OBJ file {path}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("OBJ file {0} contains no geometry")]
    Empty(PathBuf),

    #[error("loader thread for {0} exited without a result")]
    Abandoned(PathBuf),
}

/// Loads every model in an OBJ file
///
/// Faces are triangulated and indices unified; missing normals are computed
/// from the faces. Material libraries are ignored.
pub fn load_obj(path: impl AsRef<Path>) -> LoadResult {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| LoadError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    let loaded: Vec<LoadedModel> = models
        .into_iter()
        .filter(|model| !model.mesh.indices.is_empty())
        .map(|model| {
            let mesh = model.mesh;
            LoadedModel {
                name: model.name,
                geometry: GeometryData::from_flat(
                    &mesh.positions,
                    &mesh.normals,
                    &mesh.texcoords,
                    mesh.indices,
                ),
            }
        })
        .collect();

    if loaded.is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    log::debug!("Loaded {} model(s) from {}", loaded.len(), path.display());
    Ok(loaded)
}

/// Starts loading `path` on a background thread
///
/// The receiver resolves once with the load result. If the thread cannot be
/// spawned the receiver resolves immediately with [`LoadError::Abandoned`].
pub fn spawn_obj_load(path: impl Into<PathBuf>) -> oneshot::Receiver<LoadResult> {
    let path = path.into();
    let (sender, receiver) = oneshot::channel();
    let thread_path = path.clone();

    let spawned = thread::Builder::new()
        .name("obj-loader".to_string())
        .spawn(move || {
            // The scene may have been dropped before the load finished
            let _ = sender.send(load_obj(&thread_path));
        });

    match spawned {
        Ok(_) => receiver,
        Err(err) => {
            log::debug!("Could not spawn loader thread for {}: {}", path.display(), err);
            let (sender, receiver) = oneshot::channel();
            let _ = sender.send(Err(LoadError::Abandoned(path)));
            receiver
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;

    pub(crate) const TETRAHEDRON_OBJ: &str = "\
o tetra
v 0.0 1.0 0.0
v -1.0 -1.0 1.0
v 1.0 -1.0 1.0
v 0.0 -1.0 -1.0
f 1 2 3
f 1 3 4
f 1 4 2
f 2 4 3
";

    pub(crate) fn write_temp_obj(file_name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("xr-scenes-tests");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file_name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_obj_computes_normals() {
        let path = write_temp_obj("loader_sync.obj", TETRAHEDRON_OBJ);
        let models = load_obj(&path).unwrap();

        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "tetra");
        assert_eq!(models[0].geometry.triangle_count(), 4);
        assert_eq!(models[0].geometry.normals.len(), models[0].geometry.vertices.len());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_obj("definitely/not/here.obj");
        assert!(matches!(result, Err(LoadError::Obj { .. })));
    }

    #[test]
    fn test_spawned_load_resolves() {
        let path = write_temp_obj("loader_async.obj", TETRAHEDRON_OBJ);
        let receiver = spawn_obj_load(path);
        let models = pollster::block_on(receiver).unwrap().unwrap();
        assert_eq!(models[0].geometry.vertex_count(), 4);
    }
}
