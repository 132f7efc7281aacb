use clap::Parser;
use gobc_drv::{init_logging, Cli, Config, Session};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("Gob v{}", env!("CARGO_PKG_VERSION"));
        return std::process::ExitCode::SUCCESS;
    }

    init_logging();

    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let code = Session::new(config).run();
    std::process::ExitCode::from(code as u8)
}
