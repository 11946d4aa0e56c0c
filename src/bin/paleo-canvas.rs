use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use paleo_canvas::{
    Catalog, FileFetcher, ImageFetcher, PaintSession, Profile, Species, StrokeScript,
    StudioConfig,
};

#[derive(Parser, Debug)]
#[command(name = "paleo-canvas", version)]
struct Cli {
    /// Studio configuration JSON (defaults apply when omitted).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Species catalog JSON (built-in catalog when omitted).
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the species catalog as JSON.
    Species,
    /// Turn a photo into a coloring silhouette and write it as a PNG.
    Mask(MaskArgs),
    /// Mask a photo, replay a stroke script onto it, and write the painting as a PNG.
    Paint(PaintArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Image path, `file://` URL, or (with the `http` feature) HTTP(S) URL.
    #[arg(long, conflicts_with = "species", required_unless_present = "species")]
    image: Option<String>,

    /// Catalog species id whose silhouette URL is used.
    #[arg(long)]
    species: Option<String>,

    /// Origin sent with HTTP requests.
    #[arg(long, default_value = "http://localhost")]
    origin: String,
}

#[derive(Args, Debug)]
struct MaskArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PaintArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Stroke script JSON: `[{"color": "#2980B9", "width": 12, "points": [[x, y], ...]}]`.
    #[arg(long)]
    strokes: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Player profile JSON that receives the completion XP (created if missing).
    #[arg(long)]
    profile: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let catalog = match cli.catalog.as_deref() {
        Some(path) => Catalog::from_json_file(path)?,
        None => Catalog::builtin(),
    };

    match cli.cmd {
        Command::Species => cmd_species(&catalog),
        Command::Mask(args) => cmd_mask(config, &catalog, args),
        Command::Paint(args) => cmd_paint(config, &catalog, args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<StudioConfig> {
    let cfg = match path {
        Some(p) => StudioConfig::from_json_file(p)?,
        None => StudioConfig::default(),
    }
    .with_env_overrides();
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_species(catalog: &Catalog) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(catalog).context("serialize catalog")?;
    println!("{json}");
    Ok(())
}

fn cmd_mask(config: StudioConfig, catalog: &Catalog, args: MaskArgs) -> anyhow::Result<()> {
    let session = masked_session(config, catalog, &args.source)?;
    write_png(&session, &args.out)
}

fn cmd_paint(config: StudioConfig, catalog: &Catalog, args: PaintArgs) -> anyhow::Result<()> {
    let script = StrokeScript::from_json_file(&args.strokes)?;
    let mut session = masked_session(config, catalog, &args.source)?;

    let segments = session.replay(&script);
    tracing::info!(strokes = script.strokes.len(), segments, "replayed strokes");
    write_png(&session, &args.out)?;

    if let Some(path) = args.profile {
        let finish = session.finish()?;
        let mut profile = read_profile(&path)?;
        let change = profile.apply_xp(finish.xp_delta);
        let json = serde_json::to_string_pretty(&profile).context("serialize profile")?;
        std::fs::write(&path, json)
            .with_context(|| format!("write profile '{}'", path.display()))?;
        eprintln!(
            "+{} xp for {} (level {} -> {})",
            finish.xp_delta, finish.species_id, change.previous_level, change.level
        );
    }
    Ok(())
}

fn masked_session(
    config: StudioConfig,
    catalog: &Catalog,
    source: &SourceArgs,
) -> anyhow::Result<PaintSession> {
    let species = match (&source.image, &source.species) {
        (Some(image), _) => Species {
            id: "custom".to_owned(),
            name: image.clone(),
            scientific_name: String::new(),
            silhouette_url: image.clone(),
            base_color: config.default_color(),
            description: String::new(),
        },
        (None, Some(id)) => catalog.get(id)?.clone(),
        (None, None) => anyhow::bail!("either --image or --species is required"),
    };

    let mut fetcher = make_fetcher(&species.silhouette_url, &source.origin)?;
    let mut session = PaintSession::new(config)?;
    let state = session.load_silhouette(&species, fetcher.as_mut());
    if let Some(msg) = state.error_message() {
        anyhow::bail!("loading '{}' failed: {msg}", species.silhouette_url);
    }
    Ok(session)
}

fn make_fetcher(url: &str, origin: &str) -> anyhow::Result<Box<dyn ImageFetcher>> {
    let is_http = url.starts_with("http://") || url.starts_with("https://");
    if !is_http {
        return Ok(Box::new(FileFetcher::new(".")));
    }

    http_fetcher(url, origin)
}

#[cfg(feature = "http")]
fn http_fetcher(_url: &str, origin: &str) -> anyhow::Result<Box<dyn ImageFetcher>> {
    Ok(Box::new(paleo_canvas::HttpFetcher::new(origin)?))
}

#[cfg(not(feature = "http"))]
fn http_fetcher(url: &str, _origin: &str) -> anyhow::Result<Box<dyn ImageFetcher>> {
    anyhow::bail!("'{url}' needs HTTP support; rebuild with `--features http`")
}

fn read_profile(path: &Path) -> anyhow::Result<Profile> {
    if !path.exists() {
        return Ok(Profile::default());
    }
    let bytes =
        std::fs::read(path).with_context(|| format!("read profile '{}'", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| "parse profile JSON")
}

fn write_png(session: &PaintSession, out: &Path) -> anyhow::Result<()> {
    let frame = session.surface().snapshot()?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}
