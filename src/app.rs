use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::fs::OpenOptions;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::cli::args::CliArgs;
use crate::cli::intent::{self, Intent};
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::loader::Loader;
use crate::output::{self, OutputFormat, RenderOptions, Theme};
use crate::source::{CatalogOptions, ClientOptions, DataSource, PokeApiClient};
use crate::viewmodel::{Direction, FilterError, ViewModel};

fn print_banner() {
    const BANNER: &str = r#"
                 __              __
    ____  ____  / /_____  ____/ /__  _  __
   / __ \/ __ \/ //_/ _ \/ __  / _ \| |/_/
  / /_/ / /_/ / ,< /  __/ /_/ /  __/>  <
 / .___/\____/_/|_|\___/\__,_/\___/_/|_|
/_/
       v0.1.0 - terminal Pokédex
    "#;
    print!("{}", BANNER);
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

/// How the process should exit after a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Ingestion failed; the error was rendered in place of content.
    ViewFailed,
}

#[derive(Clone, Debug)]
struct RunConfig {
    client: ClientOptions,
    catalog: CatalogOptions,
    type_filter: Option<String>,
    height: Option<(u32, u32)>,
    weight: Option<(u32, u32)>,
    page: usize,
    format: OutputFormat,
    output: Option<String>,
    render: RenderOptions,
    interactive: bool,
    verbose: u8,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let api_url = args
        .api_url
        .or(cfg.api_url)
        .unwrap_or_else(|| crate::source::pokeapi::DEFAULT_API_URL.to_string());
    reqwest::Url::parse(&api_url).map_err(|e| format!("invalid api url '{api_url}': {e}"))?;

    let limit = args.limit.or(cfg.limit).unwrap_or(200);
    let concurrency = args.concurrency.or(cfg.concurrency).unwrap_or(20);
    if limit == 0 || concurrency == 0 {
        return Err("limit and concurrency must be positive".to_string());
    }
    let rate = args.rate.or(cfg.rate).unwrap_or(0);
    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);
    let proxy = args.proxy.or(cfg.proxy).filter(|p| !p.trim().is_empty());

    let type_filter = args.type_name.or(cfg.type_filter);
    let height = args
        .height
        .or(cfg.height)
        .map(|raw| {
            crate::utils::parse_range(&raw).map_err(|e| format!("invalid height '{raw}': {e}"))
        })
        .transpose()?;
    let weight = args
        .weight
        .or(cfg.weight)
        .map(|raw| {
            crate::utils::parse_range(&raw).map_err(|e| format!("invalid weight '{raw}': {e}"))
        })
        .transpose()?;
    let page = match args.page.as_deref() {
        Some(raw) => crate::utils::parse_page_number(raw)?,
        None => 1,
    };

    let theme_raw = args.theme.or(cfg.theme);
    let theme = match theme_raw.as_deref() {
        Some(raw) => Theme::parse(raw).ok_or_else(|| format!("invalid theme '{raw}'"))?,
        None => Theme::default(),
    };
    let no_color = args.no_color || cfg.no_color.unwrap_or(false);
    let show_sprites = args.show_sprites || cfg.show_sprites.unwrap_or(false);

    let output = args.output.or(cfg.output);
    let format = match args.output_format.or(cfg.output_format) {
        Some(raw) => {
            OutputFormat::parse(&raw).ok_or_else(|| format!("invalid output format '{raw}'"))?
        }
        None => output
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };

    Ok(RunConfig {
        client: ClientOptions {
            api_url,
            timeout_seconds: timeout,
            proxy,
        },
        catalog: CatalogOptions {
            limit,
            offset: 0,
            concurrency,
            rate,
        },
        type_filter,
        height,
        weight,
        page,
        format,
        output,
        render: RenderOptions {
            theme,
            color: !no_color,
            show_sprites,
        },
        interactive: args.interactive,
        verbose: args.verbose,
    })
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pokedex={level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_progress_bar(hidden: bool) -> Result<ProgressBar, String> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(0);
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(200));
    pb.set_style(
        ProgressStyle::with_template(
            ":: Loading: [{pos}/{len}] :: {per_sec} :: Duration: [{elapsed_precise}] :: {msg}",
        )
        .map_err(|e| format!("failed to build progress bar style: {e}"))?
        .progress_chars(r#"#>-"#),
    );
    Ok(pb)
}

/// Applies the filters and page requested on the command line.
fn apply_startup_filters(vm: &mut ViewModel, run: &RunConfig) -> Result<(), FilterError> {
    if let Some(name) = run.type_filter.as_deref() {
        vm.set_type_filter(name)?;
    }
    if let Some((min, max)) = run.height {
        vm.set_height_range(min, max)?;
    }
    if let Some((min, max)) = run.weight {
        vm.set_weight_range(min, max)?;
    }
    for _ in 1..run.page {
        if !vm.turn_page(Direction::Forward) {
            tracing::warn!(
                requested = run.page,
                last = vm.page_state().page_index + 1,
                "requested page is past the last page"
            );
            break;
        }
    }
    Ok(())
}

enum Flow {
    Render,
    Print(String),
    Quit,
}

fn apply_intent(
    vm: &mut ViewModel,
    render: &mut RenderOptions,
    action: Intent,
) -> Result<Flow, FilterError> {
    match action {
        Intent::SetType(name) => vm.set_type_filter(&name)?,
        Intent::SetHeight(min, max) => vm.set_height_range(min, max)?,
        Intent::SetWeight(min, max) => vm.set_weight_range(min, max)?,
        Intent::TurnPage(direction) => {
            if !vm.turn_page(direction) {
                tracing::debug!(?direction, "page turn at boundary ignored");
            }
        }
        Intent::ToggleTheme => render.theme = render.theme.toggle(),
        Intent::Reset => vm.reset(),
        Intent::Types => {
            return Ok(Flow::Print(format!(
                "types: {}",
                output::render_type_options(&vm.snapshot())
            )));
        }
        Intent::Help => return Ok(Flow::Print(intent::HELP.to_string())),
        Intent::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Render)
}

fn print_error(message: &str) {
    println!("[{}] {}", "ERR".bold().red(), message);
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

async fn run_interactive(vm: &mut ViewModel, render: &mut RenderOptions) -> Result<(), String> {
    print!("{}", output::render_text(&vm.snapshot(), render));
    println!("type 'help' for commands");
    prompt();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| format!("failed to read stdin: {e}"))?
    {
        match intent::parse_intent(&line) {
            Ok(None) => {}
            Ok(Some(action)) => match apply_intent(vm, render, action) {
                Ok(Flow::Render) => print!("{}", output::render_text(&vm.snapshot(), render)),
                Ok(Flow::Print(text)) => println!("{text}"),
                Ok(Flow::Quit) => return Ok(()),
                Err(e) => print_error(&e.to_string()),
            },
            Err(e) => print_error(&e),
        }
        prompt();
    }
    Ok(())
}

async fn write_output(path: &str, rendered: &[u8]) -> Result<(), String> {
    let mut outfile = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .await
        .map_err(|e| format!("failed to open output file: {e}"))?;
    outfile
        .write_all(rendered)
        .await
        .map_err(|e| format!("failed to write output file: {e}"))?;
    Ok(())
}

async fn run_async(mut run: RunConfig, source: Arc<dyn DataSource>) -> Result<Outcome, String> {
    let chatty = run.format == OutputFormat::Text && run.output.is_none();
    if chatty || run.interactive {
        print_banner();
        format_kv_line("Api", &run.client.api_url);
        format_kv_line("Limit", &run.catalog.limit.to_string());
        format_kv_line("Theme", run.render.theme.label());
        println!();
    }

    let pb = build_progress_bar(!(chatty || run.interactive))?;
    let mut vm = ViewModel::new();
    Loader::new(source, run.catalog)
        .with_progress(pb)
        .load(&mut vm)
        .await
        .map_err(|e| e.to_string())?;

    if vm.error().is_none() {
        apply_startup_filters(&mut vm, &run).map_err(|e| e.to_string())?;
        if run.interactive {
            run_interactive(&mut vm, &mut run.render).await?;
        }
    }

    let snapshot = vm.snapshot();
    match run.output.as_deref() {
        Some(path) => {
            let rendered = output::render(&snapshot, run.format, &run.render);
            write_output(path, &rendered).await?;
            tracing::info!(path, "wrote page");
        }
        None if !run.interactive || snapshot.error.is_some() => {
            let rendered = output::render(&snapshot, run.format, &run.render);
            std::io::stdout()
                .write_all(&rendered)
                .map_err(|e| format!("failed to write stdout: {e}"))?;
        }
        None => {}
    }

    if snapshot.error.is_some() {
        Ok(Outcome::ViewFailed)
    } else {
        Ok(Outcome::Success)
    }
}

pub fn run_cli() -> Result<Outcome, String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(Outcome::Success);
            }
            _ => return Err(e.to_string()),
        },
    };

    if args.init_config {
        let path = match args.config.as_deref() {
            Some(p) => config::expand_tilde(p),
            None => config::default_config_path()
                .ok_or_else(|| "could not determine home directory".to_string())?,
        };
        if config::ensure_default_config_file(&path)? {
            println!("wrote default config to {}", path.display());
        } else {
            println!("config already exists at {}", path.display());
        }
        return Ok(Outcome::Success);
    }

    let cfg = match args.config.as_deref() {
        Some(p) => config::load_config(&config::expand_tilde(p), false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;
    init_tracing(run.verbose);
    if !run.render.color {
        colored::control::set_override(false);
    }

    let source: Arc<dyn DataSource> =
        Arc::new(PokeApiClient::new(&run.client).map_err(|e| e.to_string())?);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run, source))
}
