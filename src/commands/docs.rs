//! `lore docs`: embedded reference documents (schema, contribution
//! policy, entry template).

use crate::core::assets;
use crate::core::error::LoreError;
use clap::Subcommand;

#[derive(clap::Args, Debug)]
pub struct DocsCli {
    #[clap(subcommand)]
    pub command: DocsCommand,
}

#[derive(Subcommand, Debug)]
pub enum DocsCommand {
    /// List the embedded reference documents.
    List,
    /// Display one embedded document.
    Show {
        #[clap(value_parser)]
        name: String,
    },
}

pub fn run_docs_cli(cli: DocsCli) -> Result<(), LoreError> {
    match cli.command {
        DocsCommand::List => {
            println!("Embedded reference documents:");
            for doc in assets::list_docs() {
                println!("- {}", doc);
            }
            Ok(())
        }
        DocsCommand::Show { name } => match assets::get_embedded_doc(&name) {
            Some(content) => {
                println!("{}", content);
                Ok(())
            }
            None => Err(LoreError::NotFound(format!(
                "no embedded document named '{}'; run 'lore docs list'",
                name
            ))),
        },
    }
}
