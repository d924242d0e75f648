use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context as _, bail};
use clap::{Args, Parser, Subcommand};
use fractal_explorer::{
    BandOutcome, ChannelMessagePort, Complex, ExplorerConfig, ExportMetadata, ExportQuality,
    FilePresenterPort, FractalKind, FractalParams, JobMessage, PpmFilePresenter, RasterJob,
    RasterWorker, RenderJobController, Viewport, WorkerMessage, export_target, render_export,
    write_export, zoom_level,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fractal_explorer", version, about = "Progressive escape-time fractal renderer")]
struct Cli {
    /// Tuning config (JSON); defaults apply to anything it leaves out.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render progressively through the raster worker and write a PPM.
    Render(RenderArgs),
    /// Render at export quality and write a PPM plus a JSON metadata sidecar.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// mandelbrot, julia or burning-ship.
    #[arg(long, default_value = "mandelbrot")]
    kind: FractalKind,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Iteration budget; the config default when omitted.
    #[arg(long)]
    max_iter: Option<u32>,

    #[arg(long, allow_hyphen_values = true)]
    julia_cr: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    julia_ci: Option<f64>,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    palette_offset: f64,

    /// Plane bounds as `min_re,max_re,min_im,max_im`. Defaults to the
    /// startup framing for the raster size.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    bounds: Option<Vec<f64>>,

    /// Job in wire format (JSON); replaces every other view option.
    #[arg(long, conflicts_with_all = ["kind", "width", "height", "bounds"])]
    job: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Render with preview shading (no smooth colouring).
    #[arg(long, default_value_t = false)]
    preview: bool,

    /// Output PPM path.
    #[arg(long, default_value = "output/fractal.ppm")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// standard, hd, ultra or ultra4.
    #[arg(long, default_value = "hd")]
    quality: ExportQuality,

    /// Device pixel ratio the quality scale is derived from.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    #[arg(long, default_value = "output")]
    dir: PathBuf,

    /// File stem; defaults to `{fractal}-{zoom}x`.
    #[arg(long)]
    name: Option<String>,
}

/// Everything needed to submit one render.
struct ResolvedView {
    viewport: Viewport,
    params: FractalParams,
    width: u32,
    height: u32,
    preview: bool,
}

impl ViewArgs {
    fn resolve(&self, config: &ExplorerConfig) -> anyhow::Result<ResolvedView> {
        if let Some(path) = &self.job {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read job '{}'", path.display()))?;
            let message: JobMessage = serde_json::from_str(&text)
                .with_context(|| format!("parse job '{}'", path.display()))?;
            let job = RasterJob::try_from(message)?;

            return Ok(ResolvedView {
                viewport: *job.viewport(),
                params: *job.params(),
                width: job.width(),
                height: job.height(),
                preview: job.preview(),
            });
        }

        let viewport = match self.bounds.as_deref() {
            Some(&[min_re, max_re, min_im, max_im]) => {
                Viewport::new(min_re, max_re, min_im, max_im)?
            }
            Some(other) => bail!("--bounds needs 4 values, got {}", other.len()),
            None => {
                let framing = Viewport::default_framing(self.width, self.height)?;
                framing.scaled_about(framing.center(), config.startup_zoom_out)?
            }
        };

        let julia_c = match (self.julia_cr, self.julia_ci) {
            (None, None) => None,
            (real, imag) => Some(Complex::new(real.unwrap_or(0.0), imag.unwrap_or(0.0))),
        };

        let mut params = FractalParams {
            kind: self.kind,
            julia_c,
            max_iterations: self.max_iter.unwrap_or(config.default_max_iterations),
            palette_offset: self.palette_offset,
        };
        if params.kind == FractalKind::Julia && params.julia_c.is_none() {
            params.julia_c = Some(params.julia_constant());
        }
        params.validate()?;

        Ok(ResolvedView {
            viewport,
            params,
            width: self.width,
            height: self.height,
            preview: false,
        })
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ExplorerConfig> {
    match path {
        Some(path) => Ok(ExplorerConfig::load(path)?),
        None => Ok(ExplorerConfig::default()),
    }
}

/// Magnification relative to the default framing of the raster.
fn zoom_for(view: &ResolvedView) -> anyhow::Result<f64> {
    let framing = Viewport::default_framing(view.width, view.height)?;
    Ok(zoom_level(framing.re_extent(), &view.viewport))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.cmd {
        Command::Render(args) => cmd_render(&config, args),
        Command::Export(args) => cmd_export(&config, args),
    }
}

fn cmd_render(config: &ExplorerConfig, args: RenderArgs) -> anyhow::Result<()> {
    let view = args.view.resolve(config)?;
    let (port, receiver) = ChannelMessagePort::channel();
    let worker = RasterWorker::spawn(config.rasterize_options(), port)?;
    let mut controller = RenderJobController::new(worker);

    let start = Instant::now();
    let request_id = controller.submit(
        view.viewport,
        view.params,
        view.width,
        view.height,
        view.preview || args.preview,
    )?;

    loop {
        let message = receiver.recv().context("raster worker stopped")?;

        match &message {
            WorkerMessage::Failed { message, .. } => bail!("render failed: {message}"),
            WorkerMessage::Crashed { message, .. } => bail!("raster worker crashed: {message}"),
            WorkerMessage::Band(_) => {}
        }

        match controller.on_worker_message(message) {
            Some(BandOutcome::Completed { .. }) => break,
            Some(BandOutcome::Composited { rows_received }) => {
                debug!(request_id, rows_received, height = view.height, "band composited");
            }
            Some(BandOutcome::Stale) | None => {}
        }
    }

    info!(
        request_id,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "render complete"
    );

    if let Some(parent) = args.out.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    PpmFilePresenter::new()
        .present(controller.surface().buffer(), &args.out)
        .with_context(|| format!("write ppm '{}'", args.out.display()))?;

    info!(path = %args.out.display(), "wrote image");

    Ok(())
}

fn cmd_export(config: &ExplorerConfig, args: ExportArgs) -> anyhow::Result<()> {
    let view = args.view.resolve(config)?;
    let target = export_target(
        view.width,
        view.height,
        args.quality,
        args.dpr,
        config.export_max_dimension,
    );

    let image = render_export(&view.viewport, &view.params, target, config.smooth_colouring)?;
    let metadata = ExportMetadata::new(&view.viewport, &view.params, zoom_for(&view)?);
    let files = write_export(
        &PpmFilePresenter::new(),
        &image,
        &metadata,
        &args.dir,
        args.name.as_deref(),
    )?;

    if target.downscaled {
        eprintln!(
            "export downscaled to {}x{} to fit {} px",
            target.width, target.height, config.export_max_dimension
        );
    }
    eprintln!("wrote {} and {}", files.image.display(), files.metadata.display());

    Ok(())
}
