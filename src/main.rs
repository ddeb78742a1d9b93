use lash::config::ShellConfig;
use lash::flags::Flags;
use lash::shell::Shell;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut argv = env::args();
    let program = argv.next().unwrap_or_else(|| "lash".to_string());
    let args: Vec<String> = argv.collect();

    let mut flags = Flags::new();
    if flags.parse(&args).is_err() {
        eprintln!("{}", Flags::usage(&program));
        return ExitCode::FAILURE;
    }

    if flags.is_set("help") {
        flags.print_help(&program);
        return ExitCode::SUCCESS;
    }

    if flags.is_set("version") {
        println!(
            "Shell version {}.{}",
            env!("CARGO_PKG_VERSION_MAJOR"),
            env!("CARGO_PKG_VERSION_MINOR")
        );
        return ExitCode::SUCCESS;
    }

    init_logging(flags.is_set("debug"));

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lash: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), lash::error::ShellError> {
    let config = ShellConfig::from_env()?;

    println!("Starting shell...");
    let mut shell = Shell::new(config)?;
    shell.run()?;

    println!("Exiting shell...");
    shell.teardown();
    Ok(())
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "lash=debug" } else { "lash=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
