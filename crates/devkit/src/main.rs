use crate::prelude::*;
use clap::Parser;

mod base64;
mod case;
mod clipboard;
mod codec;
mod error;
mod hash;
mod input;
mod json;
mod jwt;
mod live;
mod mcp;
mod prelude;
mod url;
mod uuid;
mod whitespace;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Everyday developer text utilities: encoders, decoders, formatters and generators"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "DEVKIT_VERBOSE", global = true, default_value = "false")]
    verbose: bool,

    /// Copy the primary output to the system clipboard
    #[clap(long, global = true, default_value = "false")]
    copy: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Percent-encode or decode a URL component
    Url(crate::url::UrlOptions),

    /// Encode or decode Base64
    Base64(crate::base64::Base64Options),

    /// Decode a JSON Web Token and check its claims
    Jwt(crate::jwt::JwtOptions),

    /// Format, minify or validate JSON
    Json(crate::json::JsonOptions),

    /// Convert text between naming conventions
    Case(crate::case::CaseOptions),

    /// Clean up whitespace
    Whitespace(crate::whitespace::WhitespaceOptions),

    /// Generate MD5 and SHA digests
    Hash(crate::hash::HashOptions),

    /// Generate v4 UUIDs
    Uuid(crate::uuid::UuidOptions),

    /// Re-run a tool on every line read from stdin, debounced
    Live(crate::live::LiveOptions),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Url(options) => crate::url::run(options, app.global).await,
        SubCommands::Base64(options) => crate::base64::run(options, app.global).await,
        SubCommands::Jwt(options) => crate::jwt::run(options, app.global).await,
        SubCommands::Json(options) => crate::json::run(options, app.global).await,
        SubCommands::Case(options) => crate::case::run(options, app.global).await,
        SubCommands::Whitespace(options) => crate::whitespace::run(options, app.global).await,
        SubCommands::Hash(options) => crate::hash::run(options, app.global).await,
        SubCommands::Uuid(options) => crate::uuid::run(options, app.global).await,
        SubCommands::Live(options) => crate::live::run(options, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
