//! Locating and invoking the Lua language server, and the scratch space its
//! raw output lands in.

use anyhow::{bail, Context, Result};
use std::{
    env, fs,
    path::{Path, PathBuf},
    process::Command as Process,
};
use walkdir::WalkDir;

/// Name fragment identifying the language server's VS Code extension
/// directory.
const SERVER_EXTENSION_MARKER: &str = "sumneko.lua-";
const SERVER_BIN_NAME: &str = "lua-language-server";
/// The artifact the server writes when asked to document a package.
pub const DOC_JSON_FILE_NAME: &str = "doc.json";
const SCRATCH_DIR_NAME: &str = ".extract";

/// Finds a language server executable: the explicitly provided one, or the
/// newest installed VS Code extension.
pub fn locate_server(server_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = server_path {
        let path = PathBuf::from(path);
        if !path.is_file() {
            bail!("no language server executable at {}", path.display());
        }
        return Ok(path);
    }

    let home = dirs::home_dir()
        .context("could not determine a home directory to search for a language server")?;
    let extensions = home.join(".vscode").join("extensions");
    let mut candidates: Vec<PathBuf> = WalkDir::new(&extensions)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_string_lossy()
                    .contains(SERVER_EXTENSION_MARKER)
        })
        .map(|entry| entry.into_path())
        .collect();
    // The newest installed version wins.
    candidates.sort();
    let Some(extension) = candidates.pop() else {
        bail!(
            "could not locate a `{SERVER_BIN_NAME}` installation under {}; install the \
             extension or pass --server-path",
            extensions.display()
        );
    };
    let bin = extension
        .join("server")
        .join("bin")
        .join(format!("{SERVER_BIN_NAME}{}", env::consts::EXE_SUFFIX));
    if !bin.is_file() {
        bail!(
            "language server installation is missing its executable at {}",
            bin.display()
        );
    }
    Ok(bin)
}

/// Scratch space for the server's raw output, removed on drop unless the
/// user asked to keep it.
pub struct ScratchDir {
    path: PathBuf,
    keep: bool,
}

impl ScratchDir {
    /// Creates the scratch directory under the doc dir, clearing out any
    /// leftovers from an interrupted run.
    pub fn create(doc_path: &Path, keep: bool) -> Result<ScratchDir> {
        let path = doc_path.join(SCRATCH_DIR_NAME);
        if path.exists() {
            fs::remove_dir_all(&path)?;
        }
        fs::create_dir_all(&path)?;
        Ok(ScratchDir { path, keep })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if !self.keep {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}

/// Runs the language server over the package and returns the path of the
/// artifact it wrote.
pub fn extract_docs(server_bin: &Path, package_dir: &Path, scratch: &ScratchDir) -> Result<PathBuf> {
    let status = Process::new(server_bin)
        .arg(format!("--doc={}", package_dir.display()))
        .arg(format!("--doc_out_path={}", scratch.path().display()))
        .status()
        .with_context(|| format!("failed to launch {}", server_bin.display()))?;
    if !status.success() {
        bail!(
            "language server exited with {status} while documenting {}",
            package_dir.display()
        );
    }
    let artifact = scratch.path().join(DOC_JSON_FILE_NAME);
    if !artifact.is_file() {
        bail!(
            "language server produced no {DOC_JSON_FILE_NAME} under {}",
            scratch.path().display()
        );
    }
    Ok(artifact)
}
