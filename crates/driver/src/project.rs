//! The temporary Cargo project in which a generated program is built.
//!
//! Each project lives in its own freshly created temporary directory, which is
//! removed when the [`Project`] is dropped. The project consists of a manifest
//! depending on the runtime crate by path, and the generated program as its
//! `src/main.rs`.

use std::{
    env::consts::EXE_SUFFIX,
    fs,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
};

use jtr_compiler::Code;
use jtr_errors::driver::{Error, Result};
use tempfile::TempDir;
use tracing::{debug, info};

use crate::config::DriverConfig;

/// The package name, and hence binary name, of every generated program.
pub const PACKAGE_NAME: &str = "jtr-program";

/// A generated program, written out as a Cargo project that can be built.
#[derive(Debug)]
pub struct Project {
    dir: TempDir,
}

impl Project {
    /// Writes `code` into a new project depending on the runtime at
    /// `config.runtime_path`.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingRuntime`] if the runtime cannot be found.
    /// - [`Error::IOError`] if creating the project fails.
    pub fn create(config: &DriverConfig, code: &Code) -> Result<Self> {
        let runtime = fs::canonicalize(&config.runtime_path)
            .map_err(|_| Error::MissingRuntime(config.runtime_path.display().to_string()))?;

        let dir = tempfile::Builder::new().prefix("jtr-").tempdir()?;
        debug!(path = %dir.path().display(), "Created project directory");

        fs::write(dir.path().join("Cargo.toml"), manifest(&runtime))?;
        fs::create_dir(dir.path().join("src"))?;
        code.write_to(fs::File::create(dir.path().join("src").join("main.rs"))?)?;

        Ok(Self { dir })
    }

    /// Gets the root directory of the project.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Gets the path of the generated program's source.
    #[must_use]
    pub fn main_path(&self) -> PathBuf {
        self.path().join("src").join("main.rs")
    }

    /// Reads the current contents of the generated program's source.
    ///
    /// # Errors
    ///
    /// - [`Error::IOError`] if the source cannot be read.
    pub fn source(&self) -> Result<String> {
        Ok(fs::read_to_string(self.main_path())?)
    }

    /// Formats the generated program in place.
    ///
    /// # Errors
    ///
    /// - [`Error`] if `rustfmt` cannot be run or fails.
    pub fn format(&self, config: &DriverConfig) -> Result<()> {
        let mut command = Command::new(&config.rustfmt_path);
        command.arg("--edition").arg("2021").arg(self.main_path());
        run_captured(&mut command, "rustfmt")
    }

    /// Builds the generated program, returning the path of the resulting
    /// executable.
    ///
    /// # Errors
    ///
    /// - [`Error::ToolchainFailed`] if the program does not build.
    /// - [`Error::MissingArtifact`] if the build succeeds but produces no
    ///   executable.
    /// - [`Error::Spawn`] if `cargo` cannot be started.
    pub fn build(&self, config: &DriverConfig, release: bool) -> Result<PathBuf> {
        let mut command = Command::new(&config.cargo_path);
        command
            .arg("build")
            .arg("--quiet")
            .arg("--manifest-path")
            .arg(self.path().join("Cargo.toml"));
        if release {
            command.arg("--release");
        }
        let description = if release {
            "cargo build --release"
        } else {
            "cargo build"
        };
        run_captured(&mut command, description)?;

        let profile = if release { "release" } else { "debug" };
        let artifact = self
            .path()
            .join("target")
            .join(profile)
            .join(format!("{PACKAGE_NAME}{EXE_SUFFIX}"));

        if artifact.exists() {
            Ok(artifact)
        } else {
            Err(Error::MissingArtifact(artifact.display().to_string()))
        }
    }

    /// Builds and then runs the generated program, with its standard streams
    /// attached to ours, returning the status with which it exited.
    ///
    /// # Errors
    ///
    /// - [`Error`] if building the program fails, or if it cannot be started.
    pub fn run(&self, config: &DriverConfig) -> Result<ExitStatus> {
        let artifact = self.build(config, false)?;

        info!(program = %artifact.display(), "Running generated program");
        let status = Command::new(&artifact)
            .status()
            .map_err(|source| Error::Spawn {
                program: artifact.display().to_string(),
                source,
            })?;

        debug!(%status, "Generated program exited");
        Ok(status)
    }
}

/// Renders the manifest for a project that depends on the runtime at
/// `runtime`.
///
/// The empty `[workspace]` table keeps the project independent of any
/// workspace that the temporary directory happens to be inside.
fn manifest(runtime: &Path) -> String {
    format!(
        "[package]\nname = \"{PACKAGE_NAME}\"\nversion = \"0.0.0\"\nedition = \"2021\"\npublish = \
         false\n\n[dependencies]\njtr-runtime = {{ path = {} }}\n\n[workspace]\n",
        toml_string(&runtime.display().to_string())
    )
}

/// Quotes `text` as a TOML basic string.
fn toml_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04X}", u32::from(c))),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Runs `command` to completion with its output captured, failing with that
/// output if it exits unsuccessfully.
fn run_captured(command: &mut Command, description: &str) -> Result<()> {
    info!(command = description, "Invoking toolchain");

    let output = command
        .stdin(Stdio::null())
        .output()
        .map_err(|source| Error::Spawn {
            program: command.get_program().to_string_lossy().into_owned(),
            source,
        })?;

    if output.status.success() {
        Ok(())
    } else {
        let mut captured = String::from_utf8_lossy(&output.stderr).into_owned();
        captured.push_str(&String::from_utf8_lossy(&output.stdout));
        Err(Error::ToolchainFailed {
            command: description.to_string(),
            status:  output.status,
            output:  captured,
        })
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use jtr_compiler::Code;
    use jtr_errors::driver::Error;

    use crate::{
        config::DriverConfig,
        project::{manifest, toml_string, Project, PACKAGE_NAME},
    };

    #[test]
    fn writes_manifest_and_source() -> anyhow::Result<()> {
        let runtime = tempfile::tempdir()?;
        let config = DriverConfig::default().with_runtime(runtime.path());
        let mut code = Code::new();
        code.write_line("console_log(&[]);");

        let project = Project::create(&config, &code)?;

        let manifest = fs::read_to_string(project.path().join("Cargo.toml"))?;
        assert!(manifest.contains(&format!("name = \"{PACKAGE_NAME}\"")));
        assert!(manifest.contains("jtr-runtime = { path = "));
        assert!(manifest.contains("[workspace]"));
        assert_eq!(project.source()?, code.finalize());

        Ok(())
    }

    #[test]
    fn projects_are_removed_on_drop() -> anyhow::Result<()> {
        let runtime = tempfile::tempdir()?;
        let config = DriverConfig::default().with_runtime(runtime.path());

        let project = Project::create(&config, &Code::new())?;
        let path = project.path().to_path_buf();
        assert!(path.exists());
        drop(project);

        assert!(!path.exists());

        Ok(())
    }

    #[test]
    fn missing_runtimes_are_reported() {
        let config = DriverConfig::default().with_runtime("/nonexistent/jtr-runtime");

        let result = Project::create(&config, &Code::new());

        assert!(matches!(result, Err(Error::MissingRuntime(path)) if path == "/nonexistent/jtr-runtime"));
    }

    #[test]
    fn manifest_quotes_the_runtime_path() {
        let manifest = manifest(std::path::Path::new("/opt/jtr runtime"));

        assert!(manifest.contains("jtr-runtime = { path = \"/opt/jtr runtime\" }"));
        assert!(manifest.starts_with("[package]\nname = \"jtr-program\"\n"));
    }

    #[test]
    fn runtime_paths_are_valid_toml_strings() {
        assert_eq!(toml_string(r#"C:\jtr "runtime""#), r#""C:\\jtr \"runtime\"""#);
        assert_eq!(toml_string("/opt/e\u{301}\u{200b}"), "\"/opt/e\u{301}\u{200b}\"");
        assert_eq!(toml_string("/tmp/a\tb"), r#""/tmp/a\u0009b""#);
    }

    #[cfg(unix)]
    #[test]
    fn failing_toolchains_report_their_output() -> anyhow::Result<()> {
        let runtime = tempfile::tempdir()?;
        let config = DriverConfig::default()
            .with_runtime(runtime.path())
            .with_rustfmt("false");

        let project = Project::create(&config, &Code::new())?;
        let result = project.format(&config);

        assert!(matches!(
            result,
            Err(Error::ToolchainFailed { command, .. }) if command == "rustfmt"
        ));

        Ok(())
    }
}
