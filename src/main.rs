use clap::Parser;

mod commands;
mod output;
mod tty;

use commands::migrate::MigrateArgs;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "lostack-migrate")]
#[command(version = VERSION)]
#[command(about = "Migrate docker-compose Traefik/Sablier labels to the LoStack labeling scheme")]
struct Cli {
    #[command(flatten)]
    args: MigrateArgs,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let json = cli.args.json;

    let result = commands::migrate::run(&cli.args);

    if json {
        let (json_result, exit_code) = output::map_cmd_result_to_json(result);
        if output::print_json_result(json_result).is_err() {
            return std::process::ExitCode::from(1);
        }
        return std::process::ExitCode::from(exit_code_to_u8(exit_code));
    }

    match result {
        Ok((_, exit_code)) => std::process::ExitCode::from(exit_code_to_u8(exit_code)),
        Err(err) => {
            tty::error(&err.to_string());
            let exit_code = output::exit_code_for_error(err.code);
            std::process::ExitCode::from(exit_code_to_u8(exit_code))
        }
    }
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
