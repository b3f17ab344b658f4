//! The command line interface for `luadoc`.
use clap::Parser;

#[derive(Debug, Parser, Default)]
#[clap(
    name = "luadoc",
    about = "Generate a Markdown API reference for a Lua package",
    version
)]
pub struct Command {
    /// Path to the Lua package root. By default, luadoc documents the
    /// current directory.
    #[clap(long)]
    pub path: Option<String>,
    /// Path to a `lua-language-server` executable to use for extraction.
    /// By default, luadoc searches the installed VS Code extensions.
    #[clap(long)]
    pub server_path: Option<String>,
    /// Render an existing extraction artifact instead of invoking the
    /// language server.
    #[clap(long)]
    pub doc_json: Option<String>,
    /// Where to write the rendered document. Defaults to `doc/reference.md`
    /// under the package root.
    #[clap(long)]
    pub output: Option<String>,
    /// Annotate method heading parameters with their types instead of the
    /// names-only shorthand.
    #[clap(long)]
    pub method_arg_types: bool,
    /// Keep the scratch directory holding the language server's raw output.
    #[clap(long)]
    pub keep_intermediate: bool,
    /// Silent mode. Don't output any warnings or errors to the command line.
    #[clap(long = "silent", short = 's')]
    pub silent: bool,
}
