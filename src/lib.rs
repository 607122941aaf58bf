pub mod gameplay;
pub mod gameroom;
#[cfg(feature = "server")]
pub mod hosting;

/// Runs accumulated by a batting side.
pub type Runs = u16;
/// Opaque room identifier chosen by the joining client.
pub type RoomKey = String;
/// Connection identity; the only way actions are attributed to a player.
pub type PlayerId = uuid::Uuid;

// ============================================================================
// MATCH RULES
// Fixed for every room; there is no per-room rule configuration.
// ============================================================================
/// Deliveries per over.
pub const BALLS_PER_OVER: u16 = 6;
/// Wickets that end a side's innings.
pub const WICKETS_LIMIT: u8 = 2;
/// Completed overs that end a side's innings.
pub const OVERS_LIMIT: u16 = 2;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.unwrap();
        println!();
        log::warn!("violent interrupt received, exiting immediately");
        std::process::exit(0);
    });
}
