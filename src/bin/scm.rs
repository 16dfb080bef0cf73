use rust_scm::{cmdline, environment};

fn main() -> Result<(), cmdline::Error> {
    pretty_env_logger::init();
    let env = environment::global();
    let args = std::env::args().collect();
    cmdline::launch(args, &env)
}
