use clap::Args;
use finalhour_core::{CheckpointStore, ClockEngine, Config, ResumeLine};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

use crate::host::{Flow, Host, HELP};

/// Starting point, as written in the resumption line.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Starting day (1-3)
    #[arg(long, allow_negative_numbers = true)]
    pub day: Option<i64>,
    /// Starting hour (0-23)
    #[arg(long, allow_negative_numbers = true)]
    pub hour: Option<i64>,
    /// Starting minute (0-59)
    #[arg(long, allow_negative_numbers = true)]
    pub minute: Option<i64>,
    /// Comma-separated saves, e.g. "Alpha@2.10.30,Beta@1.05.00"
    #[arg(long, default_value = "")]
    pub saves: String,
}

/// Build the engine and the checkpoints, then run the interactive loop
/// until `quit`, end of input or Ctrl-C. Writes the resumption line on the way out.
pub fn run(args: RunArgs, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let settings = config.clock_settings();
    let origin = ClockEngine::new(settings.clone()).origin();
    let day = args.day.unwrap_or_else(|| i64::from(origin.day()));
    let hour = args.hour.unwrap_or_else(|| i64::from(origin.hour()));
    let minute = args.minute.unwrap_or_else(|| i64::from(origin.minute()));

    let start = match ResumeLine::parse_time(day, hour, minute) {
        Ok(time) => time,
        Err(e) => {
            tracing::error!(day, hour, minute, "invalid starting parameters");
            return Err(e.into());
        }
    };
    tracing::info!(%start, "starting parameters");

    let mut store = CheckpointStore::new();
    if !args.saves.is_empty() {
        tracing::info!(saves = %args.saves, "starting savestate string");
    }
    let failures = store.deserialize(&args.saves);

    let engine = ClockEngine::with_time(settings, start);
    let mut host = Host::new(&config, engine, store, std::io::stdout());
    if !failures.is_empty() {
        println!("could not restore saves: {}", failures.join(", "));
    }
    println!("{HELP}");
    host.print_status()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .enable_time()
        .build()?;
    let result = runtime.block_on(event_loop(&mut host));
    // A pending stdin read would otherwise block the runtime drop.
    runtime.shutdown_background();
    result?;

    tracing::info!("closing");
    let line = host.shutdown();
    line.write_to(&config.system.continue_file)?;
    Ok(())
}

/// Single-threaded loop: one tick per interval while running, user input in between.
async fn event_loop<W: std::io::Write>(host: &mut Host<W>) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut next_tick = Instant::now() + host.engine().tick_interval();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = tokio::time::sleep_until(next_tick) => {
                host.on_tick()?;
                next_tick = Instant::now() + host.engine().tick_interval();
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(());
                };
                let interval_before = host.engine().tick_interval();
                if host.handle_line(&line)? == Flow::Quit {
                    return Ok(());
                }
                if host.engine().tick_interval() != interval_before {
                    next_tick = Instant::now() + host.engine().tick_interval();
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!("interrupted");
                return Ok(());
            }
        }
    }
}
