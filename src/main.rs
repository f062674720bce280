use bcmtree::cli::args::Cli;
use bcmtree::cli::commands::execute_command;
use bcmtree::cli::output;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if let Err(e) = execute_command(&cli) {
        output::error(&e);
        std::process::exit(e.exit_code());
    }
}

/// Route tracing to stderr; `-d` raises the level one step per repeat.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .with_span_events(if verbosity > 2 {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        });

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    tracing::debug!("log level {}", filter);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcmtree::util::testing;

    #[ctor::ctor]
    fn init() {
        testing::init_test_setup();
    }

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn given_delete_flags_when_both_given_then_rejected() {
        let result = Cli::try_parse_from(["bcmtree", "delete", "doc.json", "1", "--cascade", "--keep-children"]);
        assert!(result.is_err());
    }

    #[test]
    fn given_clipboard_clear_when_parsing_then_subcommand_selected() {
        use bcmtree::cli::args::{ClipboardCommands, Commands};
        let cli = Cli::try_parse_from(["bcmtree", "-dd", "clipboard", "clear"]).unwrap();
        assert_eq!(cli.debug, 2);
        assert!(matches!(
            cli.command,
            Some(Commands::Clipboard {
                command: ClipboardCommands::Clear
            })
        ));
    }
}
