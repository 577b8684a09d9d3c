use plategen::render::raster::{
    self, ExportOptions, RasterError, RasterOptions, svg_to_jpeg, svg_to_pdf, svg_to_png,
};
use plategen::render::sanitize_svg_id;
use plategen::{Country, FormatProfile, PlateConfiguration};
use plategen_render::svg::{SvgRenderOptions, render_plate_svg};
use plategen_render::{LayoutOptions, LayoutedPlate, estimate_plate, layout_plate};
use serde::Serialize;
use std::io::{Read, Write as _};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Config(plategen::Error),
    Render(plategen_render::Error),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Config(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<plategen::Error> for CliError {
    fn from(value: plategen::Error) -> Self {
        Self::Config(value)
    }
}

impl From<plategen_render::Error> for CliError {
    fn from(value: plategen_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Profile,
    Assemble,
    Layout,
    Export,
    Fragment,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    fragment: Option<String>,
    strict: bool,
    country: Option<Country>,
    all: bool,
    pretty: bool,
    estimate: bool,
    plate_scale: f64,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    plate_id: Option<String>,
    out: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOut<'a> {
    profile: &'a FormatProfile,
    layout: &'a plategen_render::reconcile::LayoutResult,
    tree: &'a plategen_render::model::RenderTree,
}

fn usage() -> &'static str {
    "plategen\n\
\n\
USAGE:\n\
  plategen profile [--all] [--country <code>] [--pretty] [<input>]\n\
  plategen assemble [--pretty] [<input>]\n\
  plategen layout [--estimate] [--plate-scale <n>] [--pretty] [<input>]\n\
  plategen [render] [--format svg|png|jpg|pdf] [--scale <n>] [--plate-scale <n>] [--background <css-color>] [--id <plate-id>] [--out <path>] [<input>]\n\
  plategen export [--out <dir>] [<input>]\n\
  plategen fragment [<input>]\n\
\n\
INPUT:\n\
  <path>|-             JSON configuration from a file or stdin (camelCase, missing fields default)\n\
  --fragment <text>    URL fragment, e.g. 'country=PL&text=WW%20123'\n\
  --strict             reject unknown fragment keys and malformed values\n\
  --country <code>     switch the configuration to another country (resets its defaults)\n\
\n\
NOTES:\n\
  - Without <path> and --fragment, the default configuration is used.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG/PDF output defaults to writing next to the input file (or ./out.<ext>); '--out -' writes to stdout.\n\
  - export writes a 420 px wide Plate<name>.png into --out (default: current directory).\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        plate_scale: 1.0,
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "profile" => args.command = Command::Profile,
            "assemble" => args.command = Command::Assemble,
            "layout" => args.command = Command::Layout,
            "export" => args.command = Command::Export,
            "fragment" => args.command = Command::Fragment,
            "--all" => args.all = true,
            "--pretty" => args.pretty = true,
            "--strict" => args.strict = true,
            "--estimate" => args.estimate = true,
            "--fragment" => {
                let Some(fragment) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.fragment = Some(fragment.clone());
            }
            "--country" => {
                let Some(code) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.country = Some(code.parse::<Country>()?);
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--plate-scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.plate_scale = scale.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.plate_id = Some(sanitize_svg_id(id));
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.input.is_some() && args.fragment.is_some() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn load_configuration(args: &Args) -> Result<PlateConfiguration, CliError> {
    let config = match (&args.fragment, &args.input) {
        (Some(fragment), _) if args.strict => plategen::parse_fragment(fragment)?,
        (Some(fragment), _) => plategen::decode_fragment(fragment),
        (None, Some(path)) => plategen_render::configuration_from_json(&read_input(path)?)?,
        (None, None) => PlateConfiguration::default(),
    };
    Ok(match args.country {
        Some(country) if country != config.country => config.with_country(country),
        _ => config,
    })
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn write_bytes(bytes: &[u8], out: &str) -> Result<(), CliError> {
    if out == "-" {
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(out, bytes)?;
    }
    Ok(())
}

fn default_out_path(input: Option<&str>, ext: &str) -> PathBuf {
    match input {
        Some(path) if path != "-" => PathBuf::from(path).with_extension(ext),
        _ => PathBuf::from(format!("out.{ext}")),
    }
}

fn layout(config: &PlateConfiguration, args: &Args) -> Result<LayoutedPlate, CliError> {
    let options = LayoutOptions::default().with_scale(args.plate_scale);
    let plate = if args.estimate {
        estimate_plate(config, &options)?
    } else {
        layout_plate(config, &options)?
    };
    Ok(plate)
}

fn svg_options(args: &Args) -> SvgRenderOptions {
    SvgRenderOptions {
        svg_id: args.plate_id.clone(),
        ..Default::default()
    }
}

fn run(args: Args) -> Result<(), CliError> {
    if matches!(args.command, Command::Profile) && args.all {
        let profiles: Vec<FormatProfile> = Country::ALL
            .iter()
            .map(|c| plategen::resolve_format(*c))
            .collect();
        return write_json(&profiles, args.pretty);
    }

    let config = load_configuration(&args)?;

    match args.command {
        Command::Profile => write_json(&plategen::resolve_format(config.country), args.pretty),
        Command::Assemble => {
            let (_, assembled) = plategen::assemble(&config);
            write_json(&assembled, args.pretty)
        }
        Command::Fragment => {
            println!("{}", plategen::encode_fragment(&config));
            Ok(())
        }
        Command::Layout => {
            let plate = layout(&config, &args)?;
            write_json(
                &LayoutOut {
                    profile: &plate.profile,
                    layout: &plate.layout,
                    tree: &plate.tree,
                },
                args.pretty,
            )
        }
        Command::Render => {
            let plate = layout(&config, &args)?;
            let svg = render_plate_svg(&plate.tree, &svg_options(&args));
            let raster = RasterOptions {
                scale: args.render_scale,
                background: args.background.clone(),
                ..Default::default()
            };

            let bytes = match args.render_format {
                RenderFormat::Svg => {
                    match args.out.as_deref() {
                        None => print!("{svg}"),
                        Some(path) => write_bytes(svg.as_bytes(), path)?,
                    }
                    return Ok(());
                }
                RenderFormat::Png => svg_to_png(&svg, &raster)?,
                RenderFormat::Jpeg => svg_to_jpeg(&svg, &raster)?,
                RenderFormat::Pdf => svg_to_pdf(&svg)?,
            };
            let out = args.out.clone().unwrap_or_else(|| {
                default_out_path(args.input.as_deref(), args.render_format.extension())
                    .to_string_lossy()
                    .to_string()
            });
            write_bytes(&bytes, &out)
        }
        Command::Export => {
            let plate = layout(&config, &args)?;
            let export = ExportOptions {
                background: args.background.clone(),
                ..Default::default()
            };
            let exported =
                raster::export_tree_png(&config, &plate.tree, &svg_options(&args), &export)?;
            let dir = PathBuf::from(args.out.as_deref().unwrap_or("."));
            let path = dir.join(&exported.file_name);
            std::fs::write(&path, &exported.png)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
