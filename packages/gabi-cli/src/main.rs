use gabi_cli::{Command, ConsoleOutput, FileStore, Opt};
use gabi_engine::{PhaseController, WinRules};
use structopt::StructOpt;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let store = FileStore::open(&opt.state);
    let output = ConsoleOutput::stdout();
    let mut game = match opt.seed {
        Some(seed) => PhaseController::with_seed(store, output, seed),
        None => PhaseController::new(store, output),
    }
    .with_rules(WinRules {
        creature_parity: opt.creature_parity,
    });

    let session = match opt.command {
        Command::NewGame { players } => game.new_game(players)?,
        Command::Prompt => {
            let prompt = game.prompt()?;
            println!("{}", serde_json::to_string_pretty(&prompt)?);
            return Ok(());
        }
        Command::SubmitAction {
            actor,
            kind,
            target,
        } => game.submit(actor, kind, target)?,
        Command::Proceed => game.proceed()?,
        Command::CastVote { target } => game.cast_vote(target)?.session,
        Command::GetState => game.state(),
        Command::Resume => game.resume()?,
    };

    println!("{}", serde_json::to_string_pretty(&session)?);
    Ok(())
}
