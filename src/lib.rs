#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;
pub mod shell;

use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

use geom::{ShellError, ShellMeshDiagnostics};
use shell::{GeneratorRegistry, ShellFamily, ShellMesh, ShellSpec};

pub use shell::{GrowthParameters, RaupParameters, generate_raup_mesh, generate_shell_mesh};

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen(js_name = initializeParallel)]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("could not start rayon thread pool: {err}")))
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

#[derive(Debug, Serialize)]
struct FamilyInfo {
    name: &'static str,
    description: &'static str,
    aliases: &'static [&'static str],
}

#[derive(Debug, Serialize, Clone, PartialEq)]
struct DiagnosticsExport {
    summary: String,
    collapsed_quads: usize,
    open_edges: usize,
    non_manifold_edges: usize,
    outward_quads: usize,
    inward_quads: usize,
    scale_factor: f64,
    warnings: Vec<String>,
}

impl From<&ShellMeshDiagnostics> for DiagnosticsExport {
    fn from(diagnostics: &ShellMeshDiagnostics) -> Self {
        Self {
            summary: diagnostics.summary(),
            collapsed_quads: diagnostics.collapsed_quad_count,
            open_edges: diagnostics.open_edge_count,
            non_manifold_edges: diagnostics.non_manifold_edge_count,
            outward_quads: diagnostics.outward_quad_count,
            inward_quads: diagnostics.inward_quad_count,
            scale_factor: diagnostics.scale_factor,
            warnings: diagnostics.warnings.clone(),
        }
    }
}

/// Render-ready buffers for the host.
///
/// `positions` and `normals` are flat `xyz` triples. `quads` keeps the
/// ring-stitched faces; `triangles` splits each into two for GPU upload.
#[derive(Debug, Serialize, Clone, PartialEq)]
struct MeshExport {
    family: ShellFamily,
    ring_count: usize,
    points_per_ring: usize,
    positions: Vec<f64>,
    quads: Vec<u32>,
    triangles: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    normals: Option<Vec<f64>>,
    color: [f64; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    accent_color: Option<[f64; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ramp_factor: Option<f64>,
    smooth: bool,
    diagnostics: DiagnosticsExport,
}

impl MeshExport {
    fn new(shell: &ShellMesh, diagnostics: &ShellMeshDiagnostics) -> Self {
        let normals = shell
            .smooth
            .then(|| shell.mesh.smooth_normals().as_flattened().to_vec());
        Self {
            family: shell.family,
            ring_count: shell.mesh.ring_count,
            points_per_ring: shell.mesh.points_per_ring,
            positions: shell.mesh.positions_flat().to_vec(),
            quads: shell.mesh.quads.clone(),
            triangles: shell.mesh.triangle_indices(),
            normals,
            color: shell.color.0,
            accent_color: shell.accent_color.map(|c| c.0),
            ramp_factor: shell.ramp_factor,
            smooth: shell.smooth,
            diagnostics: DiagnosticsExport::from(diagnostics),
        }
    }
}

/// Generates one shell from a `family`-tagged parameter object.
///
/// Missing fields fall back to the family defaults.
#[wasm_bindgen(js_name = generateShellMesh)]
pub fn generate_shell_mesh_js(spec: JsValue) -> Result<JsValue, JsValue> {
    let spec: ShellSpec = serde_wasm_bindgen::from_value(spec)
        .map_err(|err| js_error(format!("invalid shell parameters: {err}")))?;
    let (shell, diagnostics) = spec.generate().map_err(to_js_error)?;
    to_js(&MeshExport::new(&shell, &diagnostics))
}

/// Stateful entry point: pick a family, tweak parameters, regenerate.
#[wasm_bindgen]
pub struct ShellEngine {
    registry: GeneratorRegistry,
    spec: ShellSpec,
    last_result: Option<(ShellMesh, ShellMeshDiagnostics)>,
    result_dirty: bool,
}

impl Default for ShellEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl ShellEngine {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> ShellEngine {
        ShellEngine {
            registry: GeneratorRegistry::default(),
            spec: ShellSpec::defaults(ShellFamily::Contreras),
            last_result: None,
            result_dirty: true,
        }
    }

    /// Lists the registered shell families.
    #[wasm_bindgen]
    pub fn families(&self) -> Result<JsValue, JsValue> {
        let infos: Vec<FamilyInfo> = ShellFamily::ALL
            .iter()
            .map(|&family| FamilyInfo {
                name: family.name(),
                description: family.description(),
                aliases: family.aliases(),
            })
            .collect();
        to_js(&infos)
    }

    /// Switches to `name` with that family's default parameters.
    #[wasm_bindgen]
    pub fn select_family(&mut self, name: &str) -> Result<(), JsValue> {
        let family = self.select(name).map_err(js_error)?;
        log::debug!("selected shell family {}", family.name());
        Ok(())
    }

    /// Replaces all parameters with a `family`-tagged object.
    #[wasm_bindgen]
    pub fn load_params(&mut self, spec: JsValue) -> Result<(), JsValue> {
        self.spec = serde_wasm_bindgen::from_value(spec)
            .map_err(|err| js_error(format!("invalid shell parameters: {err}")))?;
        self.result_dirty = true;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_param(&mut self, key: &str, value: &str) -> Result<(), JsValue> {
        self.spec.set(key, value).map_err(to_js_error)?;
        self.result_dirty = true;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn generate(&mut self) -> Result<(), JsValue> {
        self.regenerate().map_err(to_js_error)
    }

    /// Mesh buffers of the last successful generation.
    #[wasm_bindgen]
    pub fn get_mesh(&self) -> Result<JsValue, JsValue> {
        let (shell, diagnostics) = self.current().map_err(js_error)?;
        to_js(&MeshExport::new(shell, diagnostics))
    }

    #[wasm_bindgen]
    pub fn get_diagnostics(&self) -> Result<String, JsValue> {
        let (_, diagnostics) = self.current().map_err(js_error)?;
        Ok(diagnostics.to_string())
    }
}

impl ShellEngine {
    fn select(&mut self, name: &str) -> Result<ShellFamily, String> {
        let family = self
            .registry
            .resolve(name)
            .ok_or_else(|| format!("unknown shell family `{name}`"))?;
        self.spec = ShellSpec::defaults(family);
        self.result_dirty = true;
        Ok(family)
    }

    fn regenerate(&mut self) -> Result<(), ShellError> {
        let result = self.spec.generate();
        match result {
            Ok(result) => {
                debug_log!("generated {}", result.1.summary());
                self.last_result = Some(result);
                self.result_dirty = false;
                Ok(())
            }
            Err(err) => {
                self.last_result = None;
                Err(err)
            }
        }
    }

    fn current(&self) -> Result<(&ShellMesh, &ShellMeshDiagnostics), &'static str> {
        if self.result_dirty {
            return Err("shell has not been generated since the last change");
        }
        self.last_result
            .as_ref()
            .map(|(shell, diagnostics)| (shell, diagnostics))
            .ok_or("no shell has been generated")
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()).into())
}

fn to_js_error(err: ShellError) -> JsValue {
    JsError::new(&err.to_string()).into()
}

fn js_error(message: impl AsRef<str>) -> JsValue {
    JsError::new(message.as_ref()).into()
}

#[cfg(test)]
mod tests {
    use super::{MeshExport, ShellEngine};
    use crate::shell::{ShellFamily, ShellSpec};

    fn small_spec() -> ShellSpec {
        let mut spec = ShellSpec::defaults(ShellFamily::Contreras);
        spec.set("t_max", "3").expect("t_max");
        spec.set("time_step", "0.1").expect("time_step");
        spec.set("points_in_circle", "6").expect("points_in_circle");
        spec
    }

    #[test]
    fn export_flattens_buffers() {
        let (shell, diagnostics) = small_spec().generate().expect("generation succeeds");
        let export = MeshExport::new(&shell, &diagnostics);

        assert_eq!(export.positions.len(), shell.mesh.vertex_count() * 3);
        assert_eq!(export.quads.len(), shell.mesh.quad_count() * 4);
        assert_eq!(export.triangles.len(), shell.mesh.quad_count() * 6);
        assert_eq!(export.normals.as_ref().map(Vec::len), Some(export.positions.len()));
        assert_eq!(export.diagnostics.open_edges, 2 * shell.mesh.points_per_ring);
    }

    #[test]
    fn export_skips_normals_for_flat_shading() {
        let mut spec = small_spec();
        spec.set("smooth", "false").expect("smooth");
        let (shell, diagnostics) = spec.generate().expect("generation succeeds");
        assert!(MeshExport::new(&shell, &diagnostics).normals.is_none());
    }

    #[test]
    fn engine_tracks_dirty_state() {
        let mut engine = ShellEngine::new();
        assert!(engine.current().is_err());

        engine.spec = small_spec();
        engine.regenerate().expect("generation succeeds");
        assert!(engine.current().is_ok());

        engine.select("raupian").expect("alias resolves");
        assert!(engine.current().is_err());
        assert!(engine.select("torus").is_err());
    }
}
