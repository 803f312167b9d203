use clap::Parser;

const ABOUT: &str = "Current weather for Pomeranian towns";

#[derive(Parser, Debug)]
#[command(version, about = ABOUT)]
pub struct Args {
    /// Show temperatures in °F instead of the configured unit system
    #[arg(long)]
    pub imperial: bool,

    /// Show temperatures in °C instead of the configured unit system
    #[arg(long, conflicts_with = "imperial")]
    pub metric: bool,

    /// Drop cached observations before refreshing
    #[arg(long)]
    pub clear_cache: bool,
}
