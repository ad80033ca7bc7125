//! Terminal front-end
//!
//! Runs one Undercover session on stdin/stdout. Pass the keyboard around
//! the table during the reveal; everything else is read off the screen.
//!
//! Options: --civilians, --undercovers, --mr-white, --words, --seed, --json

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use undercover::{parse_roster, GameRng, Screen, Session, Settings, WordCatalog};

#[derive(Parser, Debug)]
#[command(name = "undercover", about = "Pass-the-device Undercover party game")]
struct Args {
    /// Civilians to deal.
    #[arg(long, default_value_t = 4)]
    civilians: usize,

    /// Undercovers to deal.
    #[arg(long, default_value_t = 1)]
    undercovers: usize,

    /// Deal a Mr. White as well.
    #[arg(long)]
    mr_white: bool,

    /// JSON word pair catalog (defaults to the built-in pairs).
    #[arg(long)]
    words: Option<PathBuf>,

    /// Fixed RNG seed for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    /// Print a JSON snapshot of the session after every transition.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let catalog = match &args.words {
        Some(path) => WordCatalog::from_path(path)?,
        None => WordCatalog::builtin(),
    };
    let rng = args.seed.map(GameRng::new).unwrap_or_else(GameRng::from_entropy);
    tracing::info!(seed = rng.seed(), pairs = catalog.len(), "session created");

    let settings = Settings::new(args.civilians, args.undercovers, args.mr_white);
    let mut table = Table {
        session: Session::new(catalog, rng),
        input: std::io::stdin().lock(),
        settings,
        json: args.json,
    };
    table.run()
}

struct Table<R> {
    session: Session,
    input: R,
    settings: Settings,
    json: bool,
}

impl<R: BufRead> Table<R> {
    fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            let keep_going = match self.session.screen() {
                Screen::Setup => self.setup()?,
                Screen::RevealWord { .. } => self.reveal()?,
                Screen::ClueOrder => self.clue_order()?,
                Screen::Elimination => self.elimination()?,
                Screen::Results { .. } => self.results()?,
            };
            if !keep_going {
                return Ok(());
            }
            if self.json {
                println!("{}", serde_json::to_string(&self.session)?);
            }
        }
    }

    /// Read one line; `None` on end of input.
    fn line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    fn setup(&mut self) -> Result<bool, Box<dyn std::error::Error>> {
        println!("\n== Game Setup ==");
        println!(
            "Roles: {} civilian(s), {} undercover(s){}",
            self.settings.num_civilians,
            self.settings.num_undercovers,
            if self.settings.include_mr_white { ", Mr. White" } else { "" }
        );
        if let Some(counts) = self.line("Change role counts? (e.g. `3 1 y`, Enter to keep): ")? {
            if !counts.is_empty() {
                match parse_counts(&counts) {
                    Some(settings) => self.settings = settings,
                    None => {
                        println!("Expected: <civilians> <undercovers> <y|n>");
                        return Ok(true);
                    }
                }
            }
        } else {
            return Ok(false);
        }

        println!("Player names, one per line (blank line to finish):");
        let mut text = String::new();
        loop {
            match self.line("> ")? {
                None => return Ok(false),
                Some(name) if name.is_empty() => break,
                Some(name) => {
                    text.push_str(&name);
                    text.push('\n');
                }
            }
        }

        if let Err(e) = self.session.start_game(parse_roster(&text), self.settings) {
            println!("{e}");
        }
        Ok(true)
    }

    fn reveal(&mut self) -> Result<bool, Box<dyn std::error::Error>> {
        let Some(card) = self.session.reveal_card() else {
            return Ok(false);
        };
        let (name, role, message, last) = (card.name.to_string(), card.role, card.message(), card.is_last());

        println!("\n== Role Reveal ({}/{}) ==", card.position + 1, card.total);
        if self.line(&format!("Pass the device to {name}, then press Enter. "))?.is_none() {
            return Ok(false);
        }
        println!("Your role: {role}");
        println!("{message}");
        let prompt = if last { "Press Enter to start the clue round. " } else { "Press Enter to hide. " };
        if self.line(prompt)?.is_none() {
            return Ok(false);
        }
        // Clear the terminal so the next player cannot scroll back.
        print!("\x1b[2J\x1b[H");

        self.session.advance_reveal()?;
        Ok(true)
    }

    fn clue_order(&mut self) -> Result<bool, Box<dyn std::error::Error>> {
        println!("\n== Clue Order (Round {}) ==", self.session.round());
        for (i, name) in self.session.clue_order().iter().enumerate() {
            println!("{:>2}. {}", i + 1, name);
        }
        if self.line("Give your clues, then press Enter to vote. ")?.is_none() {
            return Ok(false);
        }
        self.session.begin_elimination()?;
        Ok(true)
    }

    fn elimination(&mut self) -> Result<bool, Box<dyn std::error::Error>> {
        println!("\n== Elimination (Round {}) ==", self.session.round());
        let alive: Vec<String> = self.session.alive_players().map(|p| p.name.clone()).collect();
        for (i, name) in alive.iter().enumerate() {
            println!("{:>2}. {}", i + 1, name);
        }
        let Some(choice) = self.line("Eliminate (name or number): ")? else {
            return Ok(false);
        };
        let target = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| alive.get(i).cloned())
            .unwrap_or(choice);

        match self.session.eliminate(&target) {
            Ok(_) => {
                if let Some(player) = self.session.player(&target) {
                    println!("{} was a {}.", player.name, player.role);
                }
            }
            Err(e) => println!("{e}"),
        }
        Ok(true)
    }

    fn results(&mut self) -> Result<bool, Box<dyn std::error::Error>> {
        println!("\n== Game Over! ==");
        if let Some(winner) = self.session.winner() {
            println!("Winner: {winner}");
        }
        if let Some(words) = self.session.words() {
            println!("Civilian word: {}  Undercover word: {}", words.civilian, words.undercover);
        }
        println!("Points:");
        for player in self.session.standings() {
            println!(
                "  {} ({}): {}{}",
                player.name,
                player.role,
                player.points,
                if player.eliminated { " (eliminated)" } else { "" }
            );
        }

        let Some(answer) = self.line("Play again with the same players? [y]es / [n]ew players / [q]uit: ")? else {
            return Ok(false);
        };
        match answer.to_lowercase().as_str() {
            "y" | "yes" | "" => self.session.play_again(true)?,
            "n" | "new" => {
                self.session.play_again(false)?;
                self.settings = *self.session.settings();
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn parse_counts(input: &str) -> Option<Settings> {
    let mut parts = input.split_whitespace();
    let civilians = parts.next()?.parse().ok()?;
    let undercovers = parts.next()?.parse().ok()?;
    let mr_white = match parts.next() {
        None => false,
        Some(flag) => matches!(flag.to_lowercase().as_str(), "y" | "yes" | "true" | "1"),
    };
    Some(Settings::new(civilians, undercovers, mr_white))
}
