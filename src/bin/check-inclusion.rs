use anyhow::Result;

fn main() -> Result<()> {
    subtask_inclusion::cli::run(subtask_inclusion::cli::CliMode::Tree)
}
