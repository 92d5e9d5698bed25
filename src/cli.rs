// Copyright 2026 The Sonoglyph Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::io::Write;
use std::io::stdin;
use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use sonoglyph_core::Fallible;
use sonoglyph_core::ReviewMode;
use sonoglyph_core::Timestamp;
use sonoglyph_core::TinyRng;

use crate::cmd::add::add_card;
use crate::cmd::add::import_results;
use crate::cmd::drill::drill;
use crate::cmd::history::clear_history;
use crate::cmd::history::list_history;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::config::ConfigFile;
use crate::config::Settings;
use crate::content::Mnemonic;
use crate::content::Mode;
use crate::content::Source;
use crate::storage::FileStorage;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding the card collection. Overrides the config file.
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    /// Path to a TOML config file. By default, ./sonoglyph.toml is read if it exists.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a card for a generated mnemonic.
    Add {
        /// The word or character to memorize.
        word: String,
        /// What the word means.
        #[arg(long)]
        definition: String,
        /// The scene shown as the prompt during review.
        #[arg(long)]
        scene: String,
        /// Aesthetic mode the scene was generated in.
        #[arg(long, default_value_t = Mode::Cinematic)]
        mode: Mode,
        /// Whether the card teaches a word or a character.
        #[arg(long, default_value_t = Source::Word)]
        source: Source,
        /// URL of the generated image, if any.
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Import generator output from a JSON file (one result or an array).
    Import {
        /// Path to the JSON file.
        path: PathBuf,
    },
    /// Review the cards that are due.
    Review,
    /// Practice every card in random order without rescheduling.
    Practice,
    /// Print collection statistics.
    Stats {
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Plain)]
        format: StatsFormat,
    },
    /// List recently generated mnemonics.
    History {
        /// Maximum number of entries to show.
        #[arg(long, conflicts_with = "clear")]
        limit: Option<usize>,
        /// Delete the history instead of listing it. Cards are kept.
        #[arg(long)]
        clear: bool,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let file = ConfigFile::load(cli.config.as_deref())?;
    let settings = Settings::resolve(file, cli.store)?;
    log::debug!("Using store at {}", settings.store_dir.display());
    let mut storage = FileStorage::new(&settings.store_dir);
    let mut out = stdout().lock();
    match cli.command {
        Command::Add {
            word,
            definition,
            scene,
            mode,
            source,
            image_url,
        } => {
            let result = Mnemonic {
                mode,
                source,
                image_url,
                ..Mnemonic::new(word, definition, scene)
            };
            add_card(
                &mut storage,
                result,
                Timestamp::now(),
                settings.history_limit,
                &mut out,
            )
        }
        Command::Import { path } => import_results(
            &mut storage,
            &path,
            Timestamp::now(),
            settings.history_limit,
            &mut out,
        ),
        Command::Review => run_drill(&mut storage, ReviewMode::DueOnly, &mut out),
        Command::Practice => run_drill(&mut storage, ReviewMode::PracticeAll, &mut out),
        Command::Stats { format } => print_stats(&storage, format, Timestamp::now(), &mut out),
        Command::History { clear: true, .. } => clear_history(&mut storage, &mut out),
        Command::History { limit, .. } => list_history(&storage, limit, &mut out),
    }
}

fn run_drill(storage: &mut FileStorage, mode: ReviewMode, out: &mut impl Write) -> Fallible<()> {
    let mut rng = TinyRng::from_clock();
    let mut input = stdin().lock();
    drill(storage, mode, &mut input, out, Timestamp::now, &mut rng)?;
    Ok(())
}
