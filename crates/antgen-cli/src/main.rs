mod command;
mod host;
mod schema;
mod util;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    command::run()
}
