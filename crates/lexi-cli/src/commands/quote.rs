use lexi_core::AppContext;

use crate::cli::QuoteCommands;
use crate::error::CliError;

pub fn run_quote(command: QuoteCommands, context: &AppContext) -> Result<(), CliError> {
    match command {
        QuoteCommands::Show { id, json } => {
            let quote = context
                .quotes
                .load_by_id(id)?
                .ok_or(CliError::QuoteNotFound(id))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                println!("\"{}\"\n  - {}", quote.quote, quote.author);
            }
        }
        QuoteCommands::List => {
            for id in context.quotes.list_stored_ids()? {
                println!("{id}");
            }
        }
    }
    Ok(())
}
