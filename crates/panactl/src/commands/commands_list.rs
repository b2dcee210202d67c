//! Lists the remote-control command names and the tokens they send.

use serde::Serialize;
use tabled::Tabled;

use panactl_core::command;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct CommandEntry {
    name: &'static str,
    token: &'static str,
}

#[derive(Tabled)]
struct CommandRow {
    #[tabled(rename = "Command")]
    name: &'static str,
    #[tabled(rename = "Token")]
    token: &'static str,
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let entries: Vec<CommandEntry> = command::aliases()
        .map(|(name, token)| CommandEntry { name, token })
        .collect();

    let out = output::render_list(
        global.output,
        &entries,
        |e| CommandRow {
            name: e.name,
            token: e.token,
        },
        |e| e.name.to_owned(),
    )?;
    output::print_output(&out, global.quiet);

    if !global.quiet && global.output == crate::cli::OutputFormat::Table {
        eprintln!(
            "Other names are sent as {}<NAME>; raw {} tokens pass through unchanged.",
            command::RC_PREFIX,
            command::TOKEN_PREFIX
        );
    }
    Ok(())
}
