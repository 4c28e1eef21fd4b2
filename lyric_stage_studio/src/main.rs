// Command-line front end for Lyric Stage.
//
// Usage:
//   lyric-stage [--store DIR] [-v] <COMMAND>
//
// Commands:
//   generate   build a song, print it, keep it as the last result
//   preview    build a short song (no bridge/outro), print it and narrate
//              the first lines; the store is left untouched
//   show       print the last result
//   save       add the last result to the gallery
//   gallery    list saved songs
//   narrate    narrate the last result (`--preview` for the first lines)
//   export     write the last result as a paginated lyric sheet
//   members    list the performer groups
//
// Logging goes to stderr through tracing-subscriber; the default level is
// `warn`, `-v`/`-vv` raise it and `LOG_LEVEL` overrides it.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use lyric_stage_pools::default_pools;
use lyric_stage_prng::SongRng;
use lyric_stage_song::{
    EngineConfig, Extras, GeneratedSong, GenerationOptions, LanguageMode, Mode, SongEngine,
};
use lyric_stage_studio::{
    ConsoleVoice, LyricSheet, NarrationEvent, Narrator, SongStore, Utterance, narration_queue,
    sheet_file_name,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "lyric-stage", version, about = "Combinatorial K-pop lyric generator")]
struct Cli {
    /// Directory holding the last result and the gallery.
    #[arg(long, global = true, default_value = ".lyric_stage")]
    store: PathBuf,

    /// Raise log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a song and keep it as the last result.
    Generate(GenerateArgs),
    /// Generate a short song and narrate its first lines without storing it.
    Preview(GenerateArgs),
    /// Print the last result.
    Show,
    /// Add the last result to the gallery.
    Save,
    /// List saved songs, newest first.
    Gallery {
        /// Print the full lyrics of each entry.
        #[arg(long)]
        full: bool,
    },
    /// Narrate the last result.
    Narrate {
        /// Only the first few lines.
        #[arg(long)]
        preview: bool,
        /// Pause between lines, in milliseconds.
        #[arg(long, default_value_t = 220)]
        gap_ms: u64,
        /// Simulated speaking time per character, in milliseconds.
        #[arg(long, default_value_t = 40)]
        char_ms: u64,
    },
    /// Write the last result as a paginated lyric sheet.
    Export {
        /// Output path (default: the song title with underscores, .txt).
        #[arg(long)]
        out: Option<PathBuf>,
        /// Lines per page.
        #[arg(long, default_value_t = lyric_stage_studio::export::LINES_PER_PAGE)]
        page_lines: usize,
    },
    /// List performer groups.
    Members,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// all, groupA, groupB, solo or subunit.
    #[arg(long, default_value = "all")]
    mode: Mode,

    /// en, ko or mix.
    #[arg(long = "lang", default_value = "mix")]
    language: LanguageMode,

    #[arg(long, default_value = "hype")]
    mood: String,

    /// Leave out the rap section.
    #[arg(long)]
    no_rap: bool,

    /// Leave out the bridge.
    #[arg(long)]
    no_bridge: bool,

    /// Use a full outro instead of the short closing lines.
    #[arg(long)]
    outro: bool,

    /// Member for solo mode (random if omitted).
    #[arg(long)]
    solo: Option<String>,

    /// One to three members for subunit mode (random trio if omitted).
    #[arg(long, num_args = 1..=3, value_delimiter = ',')]
    subunit: Vec<String>,

    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Engine configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the result as JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl GenerateArgs {
    fn options(&self) -> GenerationOptions {
        GenerationOptions {
            mode: self.mode,
            language: self.language,
            mood: self.mood.clone(),
            extras: Extras {
                include_rap: !self.no_rap,
                include_bridge: !self.no_bridge,
                include_outro: self.outro,
            },
            solo_member: self.solo.clone(),
            subunit_members: self.subunit.clone(),
        }
    }

    fn engine(&self) -> Result<SongEngine> {
        let config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading engine config {}", path.display()))?;
                EngineConfig::from_json(&json)
                    .with_context(|| format!("parsing engine config {}", path.display()))?
            }
            None => EngineConfig::default(),
        };
        Ok(SongEngine::new(default_pools(), config))
    }

    fn rng(&self) -> SongRng {
        match self.seed {
            Some(seed) => SongRng::new(seed),
            None => {
                let (rng, seed) = SongRng::from_entropy();
                info!(seed, "no seed given");
                rng
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match &cli.command {
        Command::Generate(args) => {
            let result = args.engine()?.generate(&args.options(), &mut args.rng());
            print_result(&result, args.json)?;
            open_store(&cli.store)?.store_last(&result)?;
        }
        Command::Preview(args) => {
            let mut options = args.options();
            options.extras.include_bridge = false;
            options.extras.include_outro = false;
            let mut rng = args.rng();
            let result = args.engine()?.generate(&options, &mut rng);
            print_result(&result, args.json)?;
            println!();
            let queue = narration_queue(&result.song, true, &mut rng);
            narrate(&queue, Duration::from_millis(220), Duration::from_millis(40))?;
        }
        Command::Show => {
            let last = open_store(&cli.store)?.require_last()?;
            print!("{}", last.formatted);
        }
        Command::Save => {
            let entry = open_store(&cli.store)?.save_last_to_gallery()?;
            println!("Saved \"{}\" ({}).", entry.title, entry.date);
        }
        Command::Gallery { full } => {
            let saved = open_store(&cli.store)?.gallery()?;
            if saved.is_empty() {
                println!("No saved songs.");
            }
            for entry in saved {
                println!("{}  {}", entry.date, entry.title);
                if *full {
                    println!("{}", entry.formatted);
                }
            }
        }
        Command::Narrate {
            preview,
            gap_ms,
            char_ms,
        } => {
            let last = open_store(&cli.store)?.require_last()?;
            let (mut rng, _) = SongRng::from_entropy();
            let queue = narration_queue(&last.song, *preview, &mut rng);
            narrate(
                &queue,
                Duration::from_millis(*gap_ms),
                Duration::from_millis(*char_ms),
            )?;
        }
        Command::Export { out, page_lines } => {
            let last = open_store(&cli.store)?.require_last()?;
            let sheet = LyricSheet::with_page_length(
                &last.song.meta.title,
                &last.song.meta.mood,
                &last.formatted,
                *page_lines,
            );
            let path = out
                .clone()
                .unwrap_or_else(|| PathBuf::from(sheet_file_name(&last.song.meta.title)));
            sheet
                .write_to(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {} ({} pages).", path.display(), sheet.page_count());
        }
        Command::Members => {
            let pools = default_pools();
            for group in [pools.members.group_a(), pools.members.group_b()] {
                println!("{}: {}", group.label, group.members.join(", "));
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("installing log subscriber")?;
    Ok(())
}

fn open_store(dir: &Path) -> Result<SongStore> {
    SongStore::open(dir).with_context(|| format!("opening store {}", dir.display()))
}

fn print_result(result: &GeneratedSong, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", result.formatted);
    }
    Ok(())
}

fn narrate(queue: &[Utterance], gap: Duration, per_char: Duration) -> Result<()> {
    let narrator = Narrator::new(gap);
    let mut voice = ConsoleVoice::new(std::io::stdout(), per_char);
    let outcome = narrator.play(queue, &mut voice, |event| {
        if let NarrationEvent::Started(index) = event {
            debug!(line = index, "speaking");
        }
    })?;
    info!(spoken = outcome.spoken, stopped = outcome.stopped, "narration done");
    Ok(())
}
