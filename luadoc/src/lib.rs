//! Generate a Markdown API reference for a Lua package.
//!
//! The Lua language server does the extraction; `luadoc` classifies the
//! records it produces and renders each one into a deterministic Markdown
//! fragment, then writes the joined document in a single pass.

pub mod cli;
pub mod doc;
pub mod render;
pub mod server;

use anyhow::Result;
use cli::Command;
use doc::Documentation;
use luadoc_tracing::{println_action_green, println_yellow_err};
use render::{RenderPlan, RenderedDocumentation};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DOC_DIR_NAME: &str = "doc";
pub const DOC_FILE_NAME: &str = "reference.md";

/// Main entry point for `luadoc`: extract, render, and write the reference
/// document.
///
/// The output file is written exactly once, from the fully assembled text,
/// so a failed run never leaves a partially rewritten document behind.
pub fn compile_markdown(build_instructions: &Command) -> Result<PathBuf> {
    // get the package directory
    let dir = if let Some(ref path) = build_instructions.path {
        PathBuf::from(path)
    } else {
        std::env::current_dir()?
    };
    let doc_path = dir.join(DOC_DIR_NAME);
    fs::create_dir_all(&doc_path)?;

    let raw_docs = match &build_instructions.doc_json {
        Some(artifact) => {
            println_action_green("Reading", &format!("extraction artifact {artifact}"));
            Documentation::from_path(Path::new(artifact))?
        }
        None => {
            let server_bin = server::locate_server(build_instructions.server_path.as_deref())?;
            println_action_green(
                "Extracting",
                &format!("documentation for {} ({})", dir.display(), server_bin.display()),
            );
            let scratch =
                server::ScratchDir::create(&doc_path, build_instructions.keep_intermediate)?;
            let artifact = server::extract_docs(&server_bin, &dir, &scratch)?;
            Documentation::from_path(&artifact)?
        }
    };

    println_action_green("Rendering", &format!("{} documented items", raw_docs.0.len()));
    let render_plan = RenderPlan::new(build_instructions.method_arg_types);
    let rendered_docs = RenderedDocumentation::from_raw_docs(&raw_docs, &render_plan);
    for doc in &rendered_docs.docs {
        if let Some(heading) = &doc.heading {
            tracing::info!("{heading}");
        }
    }
    for diagnostic in &rendered_docs.diagnostics {
        println_yellow_err(&diagnostic.to_string());
    }

    // write to outfile
    let out_file = match &build_instructions.output {
        Some(path) => PathBuf::from(path),
        None => doc_path.join(DOC_FILE_NAME),
    };
    fs::write(&out_file, rendered_docs.finish())?;
    println_action_green("Finished", &out_file.display().to_string());

    Ok(out_file)
}
