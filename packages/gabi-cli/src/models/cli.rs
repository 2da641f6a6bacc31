use gabi_engine::models::{ActionKind, PlayerId};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "gabi", about = "Drive a game one command at a time.")]
pub struct Opt {
    /// path to the saved game
    #[structopt(long, parse(from_os_str), default_value = "gabi-state.json")]
    pub state: PathBuf,
    /// fixed seed for role draws and drag-downs
    #[structopt(long)]
    pub seed: Option<u64>,
    /// creatures win once they match the living villagers
    #[structopt(long)]
    pub creature_parity: bool,
    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// deal roles and start night 1
    #[structopt(name = "new-game")]
    NewGame {
        #[structopt(long)]
        players: usize,
    },
    /// show whose turn it is and what they may do
    #[structopt(name = "prompt")]
    Prompt,
    /// record the current actor's night action
    #[structopt(name = "submit-action")]
    SubmitAction {
        #[structopt(long)]
        actor: PlayerId,
        /// e.g. kill, heal, protect-once, skip
        #[structopt(long)]
        kind: ActionKind,
        #[structopt(long)]
        target: Option<PlayerId>,
    },
    /// move from the day to the vote
    #[structopt(name = "proceed")]
    Proceed,
    #[structopt(name = "cast-vote")]
    CastVote {
        #[structopt(long)]
        target: PlayerId,
    },
    #[structopt(name = "get-state")]
    GetState,
    /// pick the game up where it was left
    #[structopt(name = "resume")]
    Resume,
}
