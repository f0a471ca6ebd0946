//=========================================================================
// Star Dodge
//
// Binary entry point. Log level is taken from `RUST_LOG`.
//
//=========================================================================

use star_dodge::EngineBuilder;

fn main() {
    env_logger::init();

    EngineBuilder::new().with_tps(60.0).build().run();
}
