mod cli;
mod commands;
mod env_loader;
mod error;
mod logging;
mod pak;

use error::PakError;

fn main() {
    env_loader::load_dotenv();

    if let Err(err) = cli::run() {
        match err.chain().find_map(|cause| cause.downcast_ref::<PakError>()) {
            Some(pak_err) => eprintln!("error[{}]: {err:#}", pak_err.code().as_str()),
            None => eprintln!("error: {err:#}"),
        }
        std::process::exit(1);
    }
}
