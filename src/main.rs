use anyhow::Result;
use wakagist::{cli::run_cli, utils::runtime::single_thread_runtime};

fn main() -> Result<()> {
    single_thread_runtime()?.block_on(run_cli())
}
