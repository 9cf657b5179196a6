// fixcheck: compare build output against expected fixtures.
// Usage: fixcheck [--root DIR] run [--manifest suite.yaml] [--filter name]

use env_logger::Env;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    std::process::exit(fixcheck::cli::run());
}
