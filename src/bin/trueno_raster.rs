//! trueno-raster: print or render classic scan-conversion results.
//!
//! Each subcommand runs one rasterizer and prints its pixels one per line
//! as `(x, y)`, with an `intensity` column for anti-aliased lines. With
//! `--png` the same pixels are plotted over coordinate axes.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use trueno_raster::config::RasterConfig;
use trueno_raster::prelude::*;
use trueno_raster::raster::{circle_spans, ellipse_spans};
use trueno_raster::render::{draw_axes, plot_points, plot_samples};

/// Scan-conversion playground
#[derive(Parser, Debug)]
#[command(name = "trueno-raster")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Classic 2D scan-conversion algorithms", long_about = None)]
struct Cli {
    /// Config file path (default: <config dir>/trueno-raster/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Also render the result to this PNG file
    #[arg(long, global = true)]
    png: Option<PathBuf>,

    /// Report luminance statistics of the rendered PNG on stderr
    #[arg(long, global = true, requires = "png")]
    stats: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bresenham circle
    Circle {
        /// Centre as x,y
        #[arg(long, default_value = "0,0", value_parser = parse_int_point, allow_hyphen_values = true)]
        center: IntPoint,

        /// Radius in pixels
        #[arg(long, allow_hyphen_values = true)]
        radius: i32,

        /// Print filled scanline spans instead of the outline
        #[arg(long)]
        fill: bool,
    },

    /// Midpoint ellipse
    Ellipse {
        /// Centre as x,y
        #[arg(long, default_value = "0,0", value_parser = parse_int_point, allow_hyphen_values = true)]
        center: IntPoint,

        /// Semi-axis along x
        #[arg(short, allow_hyphen_values = true)]
        a: i32,

        /// Semi-axis along y
        #[arg(short, allow_hyphen_values = true)]
        b: i32,

        /// Print filled scanline spans instead of the outline
        #[arg(long)]
        fill: bool,
    },

    /// Line segment
    Line {
        /// Start point as x,y
        #[arg(long, value_parser = parse_int_point, allow_hyphen_values = true)]
        from: IntPoint,

        /// End point as x,y
        #[arg(long, value_parser = parse_int_point, allow_hyphen_values = true)]
        to: IntPoint,

        /// dda, bresenham, midpoint, wu or gupta-sproull
        #[arg(short, long, default_value = "bresenham")]
        algorithm: LineAlgorithm,

        /// Gupta-Sproull line width (overrides the config file)
        #[arg(long)]
        width: Option<f32>,
    },

    /// Midpoint parabola x = k*y^2
    Parabola {
        /// Vertex as x,y
        #[arg(long, default_value = "0,0", value_parser = parse_int_point, allow_hyphen_values = true)]
        vertex: IntPoint,

        /// Coefficient k
        #[arg(short, default_value = "1", allow_hyphen_values = true)]
        k: i32,

        /// Rows above and below the vertex
        #[arg(long, default_value = "10")]
        extent: i32,
    },

    /// Polygon transforms, point test and scanline fill
    Polygon {
        /// Vertex as x,y; repeat for each vertex in order
        #[arg(short = 'p', long = "vertex", required = true, value_parser = parse_point, allow_hyphen_values = true)]
        vertices: Vec<Point>,

        /// Scale factor about the centroid
        #[arg(long)]
        scale: Option<f32>,

        /// Rotation about the centroid, degrees counter-clockwise
        #[arg(long, allow_hyphen_values = true)]
        rotate: Option<f32>,

        /// Translation as dx,dy
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        translate: Option<Point>,

        /// Report whether this point is inside
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        test: Option<Point>,

        /// Print filled scanline spans
        #[arg(long)]
        fill: bool,
    },

    /// Pie-chart slice geometry
    Pie {
        /// Slice values, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<f32>,

        /// Slice names, comma separated, one per value
        #[arg(long, value_delimiter = ',')]
        labels: Vec<String>,

        /// Chart radius
        #[arg(long, default_value = "0.6")]
        radius: f32,
    },
}

/// What a subcommand produced, for printing and plotting.
enum Output {
    Pixels(Vec<IntPoint>),
    Samples(Vec<PixelSample>),
    Spans(Vec<Span>),
    Polygon { polygon: Polygon, spans: Vec<Span> },
    Pie(Vec<PieSlice>),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let output = execute(&cli.command, &config)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    print_output(&mut out, &output)?;
    out.flush()?;

    if let Some(path) = &cli.png {
        let fb = render_png(&output, &config, path)?;
        log::info!("rendered {}", path.display());

        let (min, max, mean) = fb.luminance_stats();
        if cli.stats {
            eprintln!("luminance: min={min:.1} max={max:.1} mean={mean:.2}");
        } else {
            log::debug!("luminance: min={min:.1} max={max:.1} mean={mean:.2}");
        }
    }
    Ok(())
}

fn execute(command: &Command, config: &RasterConfig) -> Result<Output> {
    let output = match *command {
        Command::Circle { center, radius, fill: false } => Output::Pixels(bresenham_circle(center, radius)?),
        Command::Circle { center, radius, fill: true } => Output::Spans(circle_spans(center, radius)?),
        Command::Ellipse { center, a, b, fill: false } => Output::Pixels(midpoint_ellipse(center, a, b)?),
        Command::Ellipse { center, a, b, fill: true } => Output::Spans(ellipse_spans(center, a, b)?),
        Command::Line { from, to, algorithm, width } => {
            let samples = algorithm.rasterize(from, to, width.unwrap_or(config.line.width))?;
            if algorithm.is_antialiased() {
                Output::Samples(samples)
            } else {
                Output::Pixels(samples.into_iter().map(|s| s.point).collect())
            }
        }
        Command::Parabola { vertex, k, extent } => Output::Pixels(midpoint_parabola(vertex, k, extent)?),
        Command::Polygon { ref vertices, scale, rotate, translate, test, fill } => {
            let polygon = Polygon::new(vertices.clone())?;
            let center = polygon.centroid();

            let mut transform = Affine2D::IDENTITY;
            if let Some(k) = scale {
                transform = transform.then(&Affine2D::scale_about(center, k));
            }
            if let Some(degrees) = rotate {
                transform = transform.then(&Affine2D::rotate(center, degrees));
            }
            if let Some(offset) = translate {
                transform = transform.then(&Affine2D::translate(offset.x, offset.y));
            }
            let polygon = polygon.transformed(&transform);

            if let Some(p) = test {
                let verdict = if polygon.contains(p) { "inside" } else { "outside" };
                eprintln!("({}, {}) is {verdict}", p.x, p.y);
            }
            let spans = if fill { polygon.fill_spans() } else { Vec::new() };
            Output::Polygon { polygon, spans }
        }
        Command::Pie { ref values, ref labels, radius } => {
            let mut chart = PieChart::new(values.clone())?;
            if !labels.is_empty() {
                chart = chart.with_labels(labels.iter().map(|l| l.trim()))?;
            }
            Output::Pie(chart.slices(Point::ORIGIN, radius, &config.pie_layout())?)
        }
    };
    Ok(output)
}

fn print_output(out: &mut impl Write, output: &Output) -> Result<()> {
    match output {
        Output::Pixels(pixels) => {
            for p in pixels {
                writeln!(out, "{p}")?;
            }
        }
        Output::Samples(samples) => {
            for s in samples {
                writeln!(out, "{} intensity={:.3}", s.point, s.coverage)?;
            }
        }
        Output::Spans(spans) => print_spans(out, spans)?,
        Output::Polygon { polygon, spans } => {
            for v in polygon.vertices() {
                writeln!(out, "({:.3}, {:.3})", v.x, v.y)?;
            }
            print_spans(out, spans)?;
        }
        Output::Pie(slices) => {
            for s in slices {
                writeln!(
                    out,
                    "slice {}: {} start={:.2} sweep={:.2} label=({:.3}, {:.3})",
                    s.index,
                    s.caption(),
                    s.start_deg,
                    s.sweep_deg,
                    s.label_anchor.x,
                    s.label_anchor.y
                )?;
            }
        }
    }
    Ok(())
}

fn print_spans(out: &mut impl Write, spans: &[Span]) -> Result<()> {
    for span in spans {
        writeln!(out, "y={} x={}..={}", span.y, span.x_start, span.x_end)?;
    }
    Ok(())
}

fn render_png(output: &Output, config: &RasterConfig, path: &Path) -> Result<Framebuffer> {
    let style = &config.render;
    let background = style.background_color()?;
    let foreground = style.foreground_color()?;
    let axes = style.axes_color()?;

    let bounds = match output {
        Output::Pixels(pixels) => Rect::bounding(pixels.iter().map(|p| p.to_point())),
        Output::Samples(samples) => Rect::bounding(samples.iter().map(|s| s.point.to_point())),
        Output::Spans(spans) => Rect::bounding(spans.iter().flat_map(|s| {
            [IntPoint::new(s.x_start, s.y).to_point(), IntPoint::new(s.x_end, s.y).to_point()]
        })),
        Output::Polygon { polygon, .. } => Some(polygon.bounds()),
        Output::Pie(slices) => Rect::bounding(slices.iter().flat_map(|s| {
            s.outline.iter().copied().chain(std::iter::once(s.label_anchor))
        })),
    };
    let Some(bounds) = bounds else {
        bail!("nothing to render");
    };

    // Pie charts live in a unit-sized world; pad proportionally.
    let padding = match output {
        Output::Pie(_) => bounds.width.max(bounds.height) * 0.1,
        _ => style.padding,
    };
    let viewport = Viewport::fit(bounds, style.width, style.height, padding)?;
    let mut fb = Framebuffer::new(style.width, style.height)?;
    fb.clear(background);
    draw_axes(&mut fb, &viewport, style.tick_spacing, axes);

    match output {
        Output::Pixels(pixels) => plot_points(&mut fb, &viewport, pixels, style.point_size, foreground),
        Output::Samples(samples) => plot_samples(&mut fb, &viewport, samples, style.point_size, foreground),
        Output::Spans(spans) => {
            let pixels: Vec<IntPoint> = spans.iter().flat_map(Span::pixels).collect();
            plot_points(&mut fb, &viewport, &pixels, style.point_size, foreground);
        }
        Output::Polygon { polygon, spans } => {
            if spans.is_empty() {
                polygon.draw(&mut fb, &viewport, foreground);
            } else {
                polygon.fill(&mut fb, &viewport, foreground);
            }
        }
        Output::Pie(slices) => {
            let fills = config.pie.palette.colors(slices.len());
            for (slice, &color) in slices.iter().zip(&fills) {
                slice.fill(&mut fb, &viewport, color);
                slice.draw(&mut fb, &viewport, foreground);
            }
        }
    }

    PngEncoder::write_to_file(&fb, path).with_context(|| format!("writing {}", path.display()))?;
    Ok(fb)
}

// ============================================================================
// Configuration
// ============================================================================

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("trueno-raster/config.yaml"))
}

fn load_config(explicit: Option<&Path>) -> Result<RasterConfig> {
    match explicit {
        Some(path) => {
            RasterConfig::load(path).with_context(|| format!("loading config {}", path.display()))
        }
        None => Ok(default_config_path().map(RasterConfig::load_or_default).unwrap_or_default()),
    }
}

fn parse_pair(s: &str) -> std::result::Result<(f32, f32), String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected x,y but got '{s}'"))?;
    let parse = |v: &str| v.trim().parse::<f32>().map_err(|e| format!("'{v}': {e}"));
    Ok((parse(x)?, parse(y)?))
}

fn parse_point(s: &str) -> std::result::Result<Point, String> {
    parse_pair(s).map(Point::from)
}

fn parse_int_point(s: &str) -> std::result::Result<IntPoint, String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected x,y but got '{s}'"))?;
    let parse = |v: &str| v.trim().parse::<i32>().map_err(|e| format!("'{v}': {e}"));
    Ok(IntPoint::new(parse(x)?, parse(y)?))
}

// ============================================================================
// Logging
// ============================================================================

/// Minimal stderr sink for the `log` facade.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points() {
        assert_eq!(parse_int_point("3,-2").unwrap(), IntPoint::new(3, -2));
        assert_eq!(parse_point(" 1.5 , 2 ").unwrap(), Point::new(1.5, 2.0));
        assert!(parse_int_point("3").is_err());
        assert!(parse_int_point("1.5,2").is_err());
    }

    #[test]
    fn test_cli_parses_line() {
        let cli = Cli::try_parse_from([
            "trueno-raster", "line", "--from", "1,1", "--to", "3,5", "-a", "wu", "--png", "out.png",
        ])
        .unwrap();
        assert!(cli.png.is_some());
        match cli.command {
            Command::Line { from, to, algorithm, .. } => {
                assert_eq!(from, IntPoint::new(1, 1));
                assert_eq!(to, IntPoint::new(3, 5));
                assert_eq!(algorithm, LineAlgorithm::Wu);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_algorithm() {
        let result = Cli::try_parse_from(["trueno-raster", "line", "--from", "0,0", "--to", "1,1", "-a", "xiaolin"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_execute_polygon_transform() {
        let cli = Cli::try_parse_from([
            "trueno-raster", "polygon", "-p", "0,0", "-p", "2,0", "-p", "2,2", "-p", "0,2", "--translate", "-1,-1",
            "--fill",
        ])
        .unwrap();
        let Output::Polygon { polygon, spans } = execute(&cli.command, &RasterConfig::default()).unwrap() else {
            panic!("expected polygon output");
        };
        assert_eq!(polygon.vertices()[0], Point::new(-1.0, -1.0));
        assert!(!spans.is_empty());
    }

    #[test]
    fn test_execute_pie_and_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pie.png");
        let cli = Cli::try_parse_from(["trueno-raster", "pie", "--values", "36,41,19,28,30,16"]).unwrap();

        let config = RasterConfig::default();
        let output = execute(&cli.command, &config).unwrap();
        let mut text = Vec::new();
        print_output(&mut text, &output).unwrap();
        assert_eq!(String::from_utf8(text).unwrap().lines().count(), 6);

        let fb = render_png(&output, &config, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);

        // White background, black outlines, palette fills in between.
        let (min, max, mean) = fb.luminance_stats();
        assert!(min < 1.0);
        assert!((max - 255.0).abs() < 0.1);
        assert!(mean > min && mean < max);
    }

    #[test]
    fn test_execute_pie_with_labels() {
        let cli = Cli::try_parse_from([
            "trueno-raster", "pie", "--values", "36,41,19,28,30,16", "--labels",
            "Avocado,Orange,Banana,Kiwifruit,Mangos,Grapes",
        ])
        .unwrap();
        let output = execute(&cli.command, &RasterConfig::default()).unwrap();
        let mut text = Vec::new();
        print_output(&mut text, &output).unwrap();
        let text = String::from_utf8(text).unwrap();
        assert!(text.lines().next().unwrap().starts_with("slice 0: Avocado (21.2%) start=0.00"));
        assert!(text.contains("slice 5: Grapes (9.4%)"));
    }

    #[test]
    fn test_execute_pie_label_count_mismatch() {
        let cli = Cli::try_parse_from(["trueno-raster", "pie", "--values", "1,2,3", "--labels", "a,b"]).unwrap();
        assert!(execute(&cli.command, &RasterConfig::default()).is_err());
    }

    #[test]
    fn test_stats_requires_png() {
        assert!(Cli::try_parse_from(["trueno-raster", "--stats", "circle", "--radius", "3"]).is_err());
        let cli =
            Cli::try_parse_from(["trueno-raster", "circle", "--radius", "3", "--png", "c.png", "--stats"]).unwrap();
        assert!(cli.stats);
    }

    #[test]
    fn test_print_samples() {
        let output = Output::Samples(vec![PixelSample::new(IntPoint::new(2, 3), 0.25)]);
        let mut text = Vec::new();
        print_output(&mut text, &output).unwrap();
        assert_eq!(String::from_utf8(text).unwrap(), "(2, 3) intensity=0.250\n");
    }

    #[test]
    fn test_execute_rejects_bad_radius() {
        let cli = Cli::try_parse_from(["trueno-raster", "circle", "--radius", "-4"]).unwrap();
        assert!(execute(&cli.command, &RasterConfig::default()).is_err());
    }
}
