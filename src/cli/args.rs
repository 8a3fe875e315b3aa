use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "pokedex",
    version,
    about = "terminal Pokédex over the PokéAPI",
    long_about = "Pokedex fetches Pokémon from the PokéAPI and shows them in pages of 20, filtered by type, height and weight.\n\nExamples:\n  pokedex --type grass\n  pokedex --height 5-10 --weight 0-300 --page 2\n  pokedex --interactive --theme dark\n  pokedex --output-format json --output page.json\n\nTip: Use --init-config to write a starter config to ~/.pokedex/config.yml."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'n',
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        long = "theme",
        value_name = "MODE",
        help_heading = "Output",
        help = "Color theme (light or dark)."
    )]
    pub theme: Option<String>,

    #[arg(
        long = "sprites",
        visible_alias = "show-sprites",
        help_heading = "Output",
        help = "Print the sprite URL under each card."
    )]
    pub show_sprites: bool,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered page to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "output-format",
        visible_alias = "of",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text or json)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'i',
        long = "interactive",
        help_heading = "Output",
        help = "Read filter and page commands from stdin after loading."
    )]
    pub interactive: bool,

    #[arg(
        short = 't',
        long = "type",
        value_name = "NAME",
        help_heading = "Filters",
        help = "Only show Pokémon whose primary type is NAME ('all' for any)."
    )]
    pub type_name: Option<String>,

    #[arg(
        short = 'H',
        long = "height",
        value_name = "MIN-MAX",
        help_heading = "Filters",
        help = "Inclusive height range in decimetres, within 0-20."
    )]
    pub height: Option<String>,

    #[arg(
        short = 'W',
        long = "weight",
        value_name = "MIN-MAX",
        help_heading = "Filters",
        help = "Inclusive weight range in hectograms, within 0-1000."
    )]
    pub weight: Option<String>,

    #[arg(
        short = 'p',
        long = "page",
        value_name = "N",
        help_heading = "Filters",
        help = "Page to show (1-based, clamped to the last page)."
    )]
    pub page: Option<String>,

    #[arg(
        short = 'u',
        long = "api",
        visible_alias = "api-url",
        value_name = "URL",
        help_heading = "Source",
        help = "PokéAPI base URL."
    )]
    pub api_url: Option<String>,

    #[arg(
        short = 'l',
        long = "limit",
        value_name = "N",
        help_heading = "Source",
        help = "How many Pokémon to load into memory."
    )]
    pub limit: Option<usize>,

    #[arg(
        short = 'c',
        long = "concurrency",
        value_name = "N",
        help_heading = "Performance",
        help = "Max in-flight detail requests."
    )]
    pub concurrency: Option<usize>,

    #[arg(
        short = 'r',
        long = "rate",
        value_name = "RPS",
        help_heading = "Performance",
        help = "Detail request rate limit in requests per second (0 = unlimited)."
    )]
    pub rate: Option<u32>,

    #[arg(
        short = 'T',
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'x',
        long = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help_heading = "Config",
        help = "Path to config file (defaults to ~/.pokedex/config.yml when present)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Config",
        help = "Write a commented default config file and exit."
    )]
    pub init_config: bool,
}
