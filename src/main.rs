use clap::Parser;

use folio::cli::{Cli, Commands};
use folio::config::{get_config, init_config_from};
use folio::interfaces::cli::run_cli_command;
use folio::runtime::modes::run_server;
use folio::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config_from(cli.config.as_deref());

    match cli.command {
        None | Some(Commands::Serve) => {
            // guard 必须存活到进程退出，否则文件日志会丢失
            let _log_guard = init_logging(&get_config().logging)?;
            run_server().await
        }
        Some(cmd) => {
            if let Err(e) = run_cli_command(cmd).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
