mod command;
mod store;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
