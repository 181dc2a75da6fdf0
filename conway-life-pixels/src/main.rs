#![deny(clippy::all)]
#![forbid(unsafe_code)]

use life_universe::ConwayUniverse;
use pixels_main_support::{Error, animate};
use playback::Config;

const UNIVERSE_WIDTH: u32 = 64;
const UNIVERSE_HEIGHT: u32 = 64;

fn main() -> Result<(), Error> {
    env_logger::init();
    log::info!("starting {UNIVERSE_WIDTH}x{UNIVERSE_HEIGHT} universe");
    animate(
        || ConwayUniverse::new(UNIVERSE_WIDTH, UNIVERSE_HEIGHT),
        Config::default(),
    )
}
