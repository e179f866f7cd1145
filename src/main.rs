use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use ys_monitor::commands;

fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("PATH")
        .help("Path to config.json (defaults to $YS_MONITOR_CONFIG or the user config directory)")
}

fn build_cli() -> Command {
    Command::new("ys-monitor")
        .about("Polls product availability and posts restock alerts to a webhook")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("run")
                .about("Monitor every configured product until sold out or Ctrl+C")
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("check")
                .about("Fetch a product's availability once and print it")
                .arg(
                    Arg::new("sku")
                        .help("Product SKU to check")
                        .required(true)
                        .index(1),
                )
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("config")
                .about("Manage the monitor configuration")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("path")
                        .about("Print the config file location")
                        .arg(config_arg()),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show the loaded config with the webhook token hidden")
                        .arg(config_arg()),
                )
                .subcommand(
                    Command::new("init")
                        .about("Write a new config file")
                        .arg(config_arg())
                        .arg(
                            Arg::new("webhook")
                                .short('w')
                                .long("webhook")
                                .value_name("URL")
                                .help("Discord webhook URL")
                                .required(true),
                        )
                        .arg(
                            Arg::new("sku")
                                .short('s')
                                .long("sku")
                                .value_name("SKU")
                                .help("Product SKU to monitor (repeatable)")
                                .action(ArgAction::Append)
                                .required(true),
                        )
                        .arg(
                            Arg::new("force")
                                .short('f')
                                .long("force")
                                .help("Overwrite an existing config file")
                                .action(ArgAction::SetTrue),
                        ),
                ),
        )
        .subcommand(Command::new("version").about("Shows version information"))
}

fn main() -> Result<()> {
    ys_monitor::init_logging();

    let matches = build_cli().get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    match matches.subcommand() {
        Some(("run", sub_matches)) => commands::run(sub_matches)?,
        Some(("check", sub_matches)) => commands::check(sub_matches)?,
        Some(("config", sub_matches)) => commands::config::execute(sub_matches)?,
        Some(("version", _)) => commands::version()?,
        _ => {
            println!("Welcome to ys-monitor!");
            println!("Use 'ys-monitor --help' for more information.");
        }
    }

    Ok(())
}
