use std::{env, io};

use iniparse::Ini;

fn main() {
    env_logger::init();

    let path = env::args().nth(1).expect("expected path as first argument");
    let config = Ini::from_file(&path).expect("failed to parse configuration file");

    let stdout = io::stdout().lock();
    config
        .write(stdout, true)
        .expect("failed to write configuration");
}
