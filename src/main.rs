// src/main.rs

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use env_logger::Env;

use pubplot::plot_functions::plot_research::plot_research;
use pubplot::plot_functions::plot_scientific::plot_scientific;
use pubplot::plot_functions::TemplateOptions;
use pubplot::StyleConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Template {
    Scientific,
    Research,
    All,
}

/// Render the publication chart templates to PNG, PDF and SVG.
#[derive(Debug, Parser)]
#[command(name = "pubplot", version = pubplot::crate_version(), about)]
struct Args {
    /// Which template to render
    #[arg(long, value_enum, default_value_t = Template::All)]
    template: Template,

    /// Directory the output files are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// TOML file overriding options of the template's style
    #[arg(long, value_name = "FILE.toml")]
    style: Option<PathBuf>,

    /// Number of example series to plot
    #[arg(long)]
    series: Option<usize>,

    /// Open the first raster output in the system viewer
    #[arg(long)]
    show: bool,
}

fn style_for(base: StyleConfig, override_file: Option<&PathBuf>) -> anyhow::Result<StyleConfig> {
    match override_file {
        Some(path) => Ok(StyleConfig::load(path, &base)?),
        None => Ok(base),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating output directory {}", args.out_dir.display()))?;

    let options = TemplateOptions {
        series_count: args.series,
        out_dir: args.out_dir.clone(),
        show: args.show,
    };

    if matches!(args.template, Template::Scientific | Template::All) {
        let style = style_for(StyleConfig::scientific(), args.style.as_ref())?;
        let report = plot_scientific(&style, &options).context("scientific template failed")?;
        log::debug!("Scientific legend: {:?}", report.legend_entries);
    }
    if matches!(args.template, Template::Research | Template::All) {
        let style = style_for(StyleConfig::research(), args.style.as_ref())?;
        let report = plot_research(&style, &options).context("research template failed")?;
        log::debug!("Research legend: {:?}", report.legend_entries);
    }

    Ok(())
}
