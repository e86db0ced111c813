use std::path::PathBuf;

use crate::{command::config::GameConfigArg, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PrintConfigArg {
    #[clap(flatten)]
    config: GameConfigArg,
    /// Write the configuration to a file instead of stdout
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &PrintConfigArg) -> anyhow::Result<()> {
    let PrintConfigArg { config, output } = arg;
    let config = config.load()?;
    Output::save_json(&config, output.clone())
}
