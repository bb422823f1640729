use clap::{Parser, ValueEnum};
use dice_roller::{
    AdvantageMode, MarkdownStringifier, ParseError, RollRequest, SimpleStringifier, Stringify,
};
use log::{info, warn};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Roll dice formulas such as `2d6+3`, `4d6kh3` or `1d20-1`.
///
/// An empty line or `r` rerolls the last formula, `h` prints the history and
/// `q` quits.
#[derive(Parser, Debug)]
#[command(name = "repl")]
#[command(version, about)]
struct Args {
    /// Advantage mode for the formula's lone d20
    #[arg(short, long, value_enum, default_value_t = Mode::Normal)]
    advantage: Mode,

    /// Modifier added to every roll on top of the formula's own
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    modifier: i64,

    /// Seed for a reproducible session
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of rolls kept in the history
    #[arg(long, default_value_t = 50)]
    history: usize,

    /// Render results as markdown
    #[arg(long)]
    markdown: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(ValueEnum, Debug, Copy, Clone)]
enum Mode {
    Normal,
    Advantage,
    Disadvantage,
}

impl From<Mode> for AdvantageMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Normal => AdvantageMode::Normal,
            Mode::Advantage => AdvantageMode::Advantage,
            Mode::Disadvantage => AdvantageMode::Disadvantage,
        }
    }
}

/// Most recent rolls first; the oldest is evicted once `cap` is reached.
struct History {
    entries: VecDeque<String>,
    cap: usize,
}

impl History {
    fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    fn push(&mut self, entry: String) {
        if self.cap == 0 {
            return;
        }
        if self.entries.len() == self.cap {
            self.entries.pop_back();
        }
        self.entries.push_front(entry);
    }
}

fn report(line: &str, err: &ParseError) {
    eprintln!("Error: {}", err);
    if let Some(pos) = err.position() {
        let width = pos.span.len().max(1);
        eprintln!("  {}", line);
        eprintln!("  {}{}", " ".repeat(pos.start()), "^".repeat(width));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level)).init();

    let advantage = AdvantageMode::from(args.advantage);
    let mut rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };
    let mut stringifier: Box<dyn Stringify> = if args.markdown {
        Box::new(MarkdownStringifier::new())
    } else {
        Box::new(SimpleStringifier::new())
    };
    let mut history = History::new(args.history);
    let mut last: Option<RollRequest> = None;
    info!("rolling with {} and modifier {}", advantage, dice_roller::format_modifier(args.modifier));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print!("> ");
    io::stdout().flush()?;
    while let Some(line) = lines.next() {
        let line = line?;
        match line.trim() {
            "q" => break,
            "h" => {
                for (i, entry) in history.entries.iter().enumerate() {
                    println!("{:>3}. {}", i + 1, entry);
                }
            }
            "" | "r" => match &last {
                Some(request) => {
                    let result = request.roll(&mut rng);
                    let text = stringifier.stringify(request.formula(), &result);
                    println!("{}", text);
                    history.push(text);
                }
                None => warn!("nothing to reroll yet"),
            },
            formula => match RollRequest::parse(formula) {
                Ok(request) => {
                    let request = request.with_advantage(advantage).with_modifier(args.modifier);
                    let result = request.roll(&mut rng);
                    let text = stringifier.stringify(request.formula(), &result);
                    println!("{}", text);
                    history.push(text);
                    last = Some(request);
                }
                Err(why) => report(formula, &why),
            },
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}
