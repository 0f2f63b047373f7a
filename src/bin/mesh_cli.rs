#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("mesh_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use shell_engine::geom::{CancelToken, QuadMesh, ShellMeshDiagnostics};
    use shell_engine::shell::{
        GeneratorRegistry, ShellContext, ShellFamily, ShellMesh, ShellSpec, generate_with_context,
    };
    use std::fmt::Write as _;
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    const SNAPSHOT_QUANTIZE: f64 = 1e-6;
    const SNAPSHOT_DECIMALS: usize = 6;

    const USAGE: &str = r#"mesh_cli (shell-engine)

USAGE:
  mesh_cli list
  mesh_cli run <family> [key=value ...] [options]

FAMILIES:
  contreras   (aliases: helicospiral, snail)
  raup        (aliases: raupian, coil)

OPTIONS (run):
  --param <key=value>  Override one parameter (bare key=value works too)
  --out-dir <dir>      Write <family>.obj and <family>.snap to this dir
  --obj <path>         Write OBJ
  --snap <path>        Write snapshot (printed to stdout otherwise)
  --flip-winding       Reverse face winding before writing
  --overwrite          Overwrite existing output files
  -h, --help           Show this help

EXAMPLES:
  mesh_cli run contreras b=0.12 points_in_circle=20 --obj snail.obj
  mesh_cli run raup --param n_circles=200 --out-dir out
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                print_families();
                Ok(())
            }
            "run" => cmd_run(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn print_families() {
        for family in ShellFamily::ALL {
            println!("{:<10} {}", family.name(), family.description());
        }
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let family_name = args.next().ok_or("missing family name")?;
        let family = GeneratorRegistry::default()
            .resolve(&family_name)
            .ok_or_else(|| unknown_family(&family_name))?;

        let mut spec = ShellSpec::defaults(family);
        let mut overrides: Vec<(String, String)> = Vec::new();
        let mut out_dir: Option<PathBuf> = None;
        let mut obj_path: Option<PathBuf> = None;
        let mut snap_path: Option<PathBuf> = None;
        let mut overwrite = false;
        let mut flip_winding = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--param" => overrides.push(split_param(&args.value("--param")?)?),
                "--out-dir" => out_dir = Some(PathBuf::from(args.value("--out-dir")?)),
                "--obj" => obj_path = Some(PathBuf::from(args.value("--obj")?)),
                "--snap" => snap_path = Some(PathBuf::from(args.value("--snap")?)),
                "--flip-winding" => flip_winding = true,
                "--overwrite" => overwrite = true,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other if other.contains('=') && !other.starts_with('-') => {
                    overrides.push(split_param(other)?);
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        for (key, value) in &overrides {
            spec.set(key, value).map_err(|e| e.to_string())?;
        }

        if let Some(dir) = out_dir.as_ref() {
            if obj_path.is_some() || snap_path.is_some() {
                return Err("use either --out-dir or --obj/--snap (not both)".to_string());
            }
            fs::create_dir_all(dir).map_err(|e| format!("create out dir: {e}"))?;
            obj_path = Some(dir.join(format!("{}.obj", family.name())));
            snap_path = Some(dir.join(format!("{}.snap", family.name())));
        }

        let generator = spec.build().map_err(|e| e.to_string())?;
        let mut ctx = ShellContext::with_cancel(CancelToken::new());
        let (mut shell, diagnostics) =
            generate_with_context(generator.as_ref(), &mut ctx).map_err(|e| e.to_string())?;
        if flip_winding {
            shell.mesh.flip_winding();
        }

        let snapshot = snapshot(&shell, &diagnostics, &overrides);
        if let Some(path) = snap_path.as_deref() {
            write_text_file(path, &snapshot, overwrite)?;
            eprintln!("wrote {}", path.display());
        } else {
            print!("{snapshot}");
        }

        if let Some(path) = obj_path.as_deref() {
            write_obj_file(path, &shell.mesh, family.name(), overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        eprintln!("{}: {}", family.name(), diagnostics.summary());
        for warning in &diagnostics.warnings {
            eprintln!("warning: {warning}");
        }

        Ok(())
    }

    fn split_param(raw: &str) -> Result<(String, String), String> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("empty parameter name in `{raw}`"));
        }
        Ok((key.to_string(), value.trim().to_string()))
    }

    fn unknown_family(name: &str) -> String {
        let mut msg = String::new();
        let _ = writeln!(msg, "unknown shell family `{name}`\n\navailable families:");
        for family in ShellFamily::ALL {
            let _ = writeln!(msg, "  {}", family.name());
        }
        msg
    }

    fn check_writable(path: &Path, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        Ok(())
    }

    fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
        check_writable(path, overwrite)?;
        fs::write(path, normalize_snapshot_text(text)).map_err(|e| format!("write {}: {e}", path.display()))
    }

    fn write_obj_file(path: &Path, mesh: &QuadMesh, name: &str, overwrite: bool) -> Result<(), String> {
        mesh.validate().map_err(|e| format!("mesh validation failed: {e}"))?;
        check_writable(path, overwrite)?;

        let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        let mut w = BufWriter::new(file);

        writeln!(w, "# shell-engine mesh_cli").map_err(|e| format!("write obj: {e}"))?;
        writeln!(w, "o {name}").map_err(|e| format!("write obj: {e}"))?;

        for p in mesh.positions.iter().copied() {
            writeln!(w, "v {} {} {}", p[0], p[1], p[2]).map_err(|e| format!("write obj: {e}"))?;
        }

        for quad in mesh.quads.chunks_exact(4) {
            let [a, b, c, d] = [quad[0] + 1, quad[1] + 1, quad[2] + 1, quad[3] + 1];
            writeln!(w, "f {a} {b} {c} {d}").map_err(|e| format!("write obj: {e}"))?;
        }

        w.flush().map_err(|e| format!("flush {}: {e}", path.display()))
    }

    fn normalize_snapshot_text(text: &str) -> String {
        let normalized = text.replace("\r\n", "\n");
        if normalized.ends_with('\n') {
            normalized
        } else {
            format!("{normalized}\n")
        }
    }

    fn quantize_f64(value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let q = (value / SNAPSHOT_QUANTIZE).round() * SNAPSHOT_QUANTIZE;
        // Fold -0.0 into 0.0 so snapshots do not flicker on sign.
        if q == 0.0 { 0.0 } else { q }
    }

    fn write_vec3_line(out: &mut String, prefix: &str, v: [f64; 3]) {
        let [x, y, z] = v.map(quantize_f64);
        let _ = writeln!(
            out,
            "{prefix} {x:.SNAPSHOT_DECIMALS$} {y:.SNAPSHOT_DECIMALS$} {z:.SNAPSHOT_DECIMALS$}"
        );
    }

    fn write_diagnostics(out: &mut String, diag: &ShellMeshDiagnostics) {
        let _ = writeln!(out, "diag.vertex_count {}", diag.vertex_count);
        let _ = writeln!(out, "diag.quad_count {}", diag.quad_count);
        let _ = writeln!(out, "diag.collapsed_quad_count {}", diag.collapsed_quad_count);
        let _ = writeln!(out, "diag.open_edge_count {}", diag.open_edge_count);
        let _ = writeln!(out, "diag.non_manifold_edge_count {}", diag.non_manifold_edge_count);
        let _ = writeln!(out, "diag.outward_quad_count {}", diag.outward_quad_count);
        let _ = writeln!(out, "diag.inward_quad_count {}", diag.inward_quad_count);
        let _ = writeln!(out, "diag.scale_factor {:.9}", diag.scale_factor);
        let _ = writeln!(out, "diag.warning_count {}", diag.warnings.len());
        for (idx, warning) in diag.warnings.iter().enumerate() {
            let _ = writeln!(out, "diag.warning.{idx} {warning}");
        }
    }

    fn write_mesh(out: &mut String, mesh: &QuadMesh) {
        let _ = writeln!(out, "mesh.rings {} x {}", mesh.ring_count, mesh.points_per_ring);
        let _ = writeln!(out, "mesh.positions {}", mesh.positions.len());
        for p in mesh.positions.iter().copied() {
            write_vec3_line(out, "p", p);
        }

        let _ = writeln!(out, "mesh.quads {}", mesh.quad_count());
        for q in mesh.quads.chunks_exact(4) {
            let _ = writeln!(out, "q {} {} {} {}", q[0], q[1], q[2], q[3]);
        }
    }

    fn snapshot(shell: &ShellMesh, diag: &ShellMeshDiagnostics, overrides: &[(String, String)]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# shell-engine snapshot v1");
        let _ = writeln!(out, "family {}", shell.family.name());
        for (key, value) in overrides {
            let _ = writeln!(out, "param {key}={value}");
        }
        let _ = writeln!(out, "quantize {SNAPSHOT_QUANTIZE:.1e}");
        let _ = writeln!(out, "color {}", shell.color.to_hex());
        if let Some(accent) = shell.accent_color {
            let _ = writeln!(out, "accent_color {}", accent.to_hex());
        }
        if let Some(fac) = shell.ramp_factor {
            let _ = writeln!(out, "ramp_factor {fac}");
        }
        let _ = writeln!(out, "smooth {}", shell.smooth);
        write_diagnostics(&mut out, diag);
        write_mesh(&mut out, &shell.mesh);
        normalize_snapshot_text(&out)
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use shell_engine::shell::RaupParameters;

        #[test]
        fn obj_writes_one_quad_face_per_quad() {
            let params = RaupParameters {
                n_points: 4,
                n_circles: 3,
                ..RaupParameters::default()
            };
            let shell = shell_engine::generate_raup_mesh(&params).expect("generation succeeds");
            let path = std::env::temp_dir().join(format!("mesh_cli_obj_{}.obj", std::process::id()));

            write_obj_file(&path, &shell.mesh, "raup", true).expect("write obj");
            let text = fs::read_to_string(&path).expect("read obj");
            let _ = fs::remove_file(&path);

            assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 12);
            let faces: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();
            assert_eq!(faces.len(), 8);
            assert_eq!(faces[0], "f 1 2 6 5");
        }

        #[test]
        fn refuses_to_overwrite_without_flag() {
            let path = std::env::temp_dir().join(format!("mesh_cli_snap_{}.snap", std::process::id()));
            write_text_file(&path, "first", true).expect("first write");
            assert!(write_text_file(&path, "second", false).is_err());
            assert_eq!(fs::read_to_string(&path).expect("read"), "first\n");
            let _ = fs::remove_file(&path);
        }

        #[test]
        fn params_split_on_first_equals() {
            assert_eq!(
                split_param("color=#a=b").expect("valid"),
                ("color".to_string(), "#a=b".to_string())
            );
            assert!(split_param("=1").is_err());
            assert!(split_param("b").is_err());
        }

        #[test]
        fn quantize_folds_negative_zero() {
            assert_eq!(quantize_f64(-1e-9).to_bits(), 0.0_f64.to_bits());
            assert!((quantize_f64(0.123_456_78) - 0.123_457).abs() < 1e-12);
        }
    }
}
