mod command;
mod model;
mod sim;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
