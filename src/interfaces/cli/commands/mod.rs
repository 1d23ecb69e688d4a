//! CLI command implementations

mod config_gen;
mod display;
mod lookup;
mod tile;
mod whoami;

pub use config_gen::config_generate;
pub use display::print_record;
pub use lookup::lookup_ip;
pub use tile::print_tile;
pub use whoami::whoami;
