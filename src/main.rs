use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use workspace_icons::{
    avatar::{AvatarLoader, AvatarModel, AvatarRender},
    collaborators::{FsWorkspaceImageReader, HttpFaviconResolver},
    config::Config,
    icons::{IconKind, IconResolver},
    skills::SkillConfig,
    sources::SourceConfig,
    statuses::StatusConfig,
    svg::{NoTheme, SvgThemer},
};

#[derive(Parser)]
#[command(name = "workspace-icons")]
#[command(version)]
#[command(about = "Resolve and theme workspace source, skill and status icons")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path [default: $WORKSPACE_ICONS_CONFIG or workspace-icons.toml]
    #[arg(short, long)]
    config: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the icon of a configured source
    Source {
        #[arg(short, long)]
        workspace: String,
        #[arg(short, long)]
        slug: String,
    },
    /// Resolve a skill icon from its absolute path
    Skill {
        #[arg(short, long)]
        workspace: String,
        #[arg(short, long)]
        path: String,
    },
    /// Print the effective status list with icons
    Statuses {
        #[arg(short, long)]
        workspace: String,
    },
    /// Theme an SVG file and print it as a data URL
    ThemeSvg {
        file: PathBuf,
        #[arg(long)]
        color: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("workspace_icons={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_file = Config::config_file(cli.config.as_deref());
    let config = Config::load_from_file(&config_file)
        .with_context(|| format!("loading configuration from {config_file}"))?;
    debug!("Configuration loaded from: {}", config_file);

    let themer = SvgThemer::from_config(NoTheme, &config.theme);

    if let Command::ThemeSvg { file, color } = &cli.command {
        let svg = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("reading {}", file.display()))?;
        println!("{}", themer.svg_to_themed_data_url(&svg, color.as_deref()));
        return Ok(());
    }

    let reader = Arc::new(FsWorkspaceImageReader::new(
        config.storage.workspaces_root.clone(),
    ));
    let favicons = Arc::new(HttpFaviconResolver::from_config(&config.favicon)?);
    let resolver = IconResolver::builder(reader.clone(), favicons)
        .config(&config)
        .themer(themer)
        .build();

    info!(
        "Resolving icons under {}",
        config.storage.workspaces_root.display()
    );

    match cli.command {
        Command::Source { workspace, slug } => {
            let source = SourceConfig::load(reader.as_ref(), &workspace, &slug).await?;
            print_icon(resolver.resolve_source_icon(&workspace, &source).await);
        }
        Command::Skill { workspace, path } => {
            let skill = SkillConfig::from_icon_path(&path)
                .with_context(|| format!("{path} is not inside a skills/<slug>/ directory"))?;
            print_icon(resolver.resolve_skill_icon(&workspace, &skill).await);
        }
        Command::Statuses { workspace } => {
            let statuses = StatusConfig::load_or_default(reader.as_ref(), &workspace).await;
            let loader = AvatarLoader::new(resolver);

            for status in statuses.sorted() {
                let model = Mutex::new(AvatarModel::new(IconKind::Status));
                loader.load_status(&model, &workspace, status).await;
                let icon = match model.lock().render().render {
                    AvatarRender::Emoji(emoji) => emoji,
                    AvatarRender::Image(url) => url,
                    AvatarRender::Glyph(glyph) => glyph.to_string(),
                };
                let marker = if status.id == statuses.default_status_id {
                    " (default)"
                } else {
                    ""
                };
                println!("{}\t{}{}\t{}", status.id, status.label, marker, icon);
            }
        }
        Command::ThemeSvg { .. } => {}
    }

    Ok(())
}

fn print_icon(icon: Option<workspace_icons::icons::ResolvedIcon>) {
    match icon {
        Some(icon) => println!("{}", icon.to_marker_string()),
        None => println!("(none)"),
    }
}
