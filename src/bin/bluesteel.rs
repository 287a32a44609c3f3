use anyhow::{Context, Result, bail};
use bluesteel_graphics::options::DEFAULTS;
use bluesteel_graphics::{OutputFormat, RenderOptions, Size, save_fig, storage};
use clap::Parser;
use log::{LevelFilter, debug};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bluesteel",
    version,
    about = "Render CSV/Excel data as line, scatter, bar, or stacked area charts"
)]
struct Cli {
    /// Data file (.csv, .xlsx or .xls). The first column is the index.
    data: PathBuf,
    /// Output path. Defaults to the data path with the format's extension.
    #[arg(short, long)]
    outfile: Option<PathBuf>,
    /// Chart type: line, scatter, horizontal_bar, vertical_bar, stacked_area.
    #[arg(long = "type_", visible_alias = "type")]
    type_: Option<String>,
    /// Chart title ("1970-2016" becomes "1970–2016", "\n" breaks the line).
    #[arg(long)]
    title: Option<String>,
    /// Output format: pdf, png, raw, rgba, svg, svgz. Inferred from --outfile if omitted.
    #[arg(long)]
    format: Option<String>,
    /// Figure size in inches, e.g. 11x7.
    #[arg(long)]
    size: Option<Size>,
    #[arg(long, allow_negative_numbers = true)]
    xmin: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    xmax: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    ymin: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    ymax: Option<f64>,
    /// X axis label (defaults to the index column's header).
    #[arg(long)]
    xlabel: Option<String>,
    /// Y axis label (defaults to the column name when there is a single series).
    #[arg(long)]
    ylabel: Option<String>,
    /// Source note printed in the lower right corner (defaults to the product credit).
    #[arg(long)]
    source: Option<String>,
    /// Draw axis lines and tick marks.
    #[arg(long, default_value_t = false)]
    spines: bool,
    /// Add gridlines along the index axis as well.
    #[arg(long, default_value_t = false)]
    grid: bool,
    /// Comma-separated x tick positions, e.g. 1980,1990,2000.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    xtick_loc: Option<Vec<f64>>,
    /// Comma-separated x tick labels; use " " for a blank one.
    #[arg(long, value_delimiter = ',')]
    xticklabels: Option<Vec<String>>,
    /// Comma-separated y tick positions.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    ytick_loc: Option<Vec<f64>>,
    /// Comma-separated y tick labels.
    #[arg(long, value_delimiter = ',')]
    yticklabels: Option<Vec<String>>,
    /// Rotate x tick labels by this many degrees (whole quarter turns).
    #[arg(long, allow_negative_numbers = true)]
    rot: Option<f64>,
    /// Print each bar's value at its end.
    #[arg(long, default_value_t = false)]
    label_bars: bool,
    /// Name each line at its last point instead of a legend.
    #[arg(long, default_value_t = false)]
    label_lines: bool,
    /// Name each stacked band inside the band instead of a legend.
    #[arg(long, default_value_t = false)]
    label_area: bool,
    /// Do not label the x axis.
    #[arg(long, default_value_t = false)]
    xlabel_off: bool,
    /// Do not label the y axis.
    #[arg(long, default_value_t = false)]
    ylabel_off: bool,
    /// Print x tick labels as plain years.
    #[arg(long, default_value_t = false)]
    xyear: bool,
    /// Print y tick labels as plain years.
    #[arg(long, default_value_t = false)]
    yyear: bool,
    /// Resolution in pixels per inch (default 100).
    #[arg(long)]
    dpi: Option<f64>,
    /// TTF font for text in raster output.
    #[arg(long)]
    font: Option<PathBuf>,
    /// JSON file with chart options; command-line flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overwrite the output file if it exists.
    #[arg(long, default_value_t = false)]
    force: bool,
    /// Log progress details.
    #[arg(short, long, default_value_t = false, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log errors.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

impl Cli {
    fn options(&self) -> RenderOptions {
        RenderOptions {
            type_: self.type_.clone(),
            title: self.title.clone(),
            outfile: self.outfile.clone(),
            format: self.format.clone(),
            size: self.size,
            xmin: self.xmin,
            xmax: self.xmax,
            ymin: self.ymin,
            ymax: self.ymax,
            xlabel: self.xlabel.clone(),
            ylabel: self.ylabel.clone(),
            source: self.source.clone(),
            spines: self.spines,
            grid: self.grid,
            xtick_loc: self.xtick_loc.clone(),
            xticklabels: self.xticklabels.clone(),
            ytick_loc: self.ytick_loc.clone(),
            yticklabels: self.yticklabels.clone(),
            rot: self.rot,
            label_bars: self.label_bars,
            label_lines: self.label_lines,
            label_area: self.label_area,
            xlabel_off: self.xlabel_off,
            ylabel_off: self.ylabel_off,
            xyear: self.xyear,
            yyear: self.yyear,
            dpi: self.dpi,
            font: self.font.clone(),
        }
    }

    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let table = storage::load_table(&cli.data)
        .with_context(|| format!("could not read {}", cli.data.display()))?;

    let base = match &cli.config {
        Some(path) => RenderOptions::from_json_file(path)?,
        None => RenderOptions::default(),
    };
    let mut options = base.merged_with(cli.options());

    if options.outfile.is_none() {
        let format = match options.format.as_deref() {
            Some(raw) => raw.parse::<OutputFormat>()?,
            None => DEFAULTS.format,
        };
        options.outfile = Some(cli.data.with_extension(format.as_str()));
    }
    if let Some(out) = &options.outfile
        && out.exists()
        && !cli.force
    {
        bail!("{} already exists; pass --force to overwrite it", out.display());
    }
    debug!("options: {:?}", options);

    let written = save_fig(&table, &options)?;
    eprintln!("Wrote chart to {}", written.display());
    Ok(())
}
