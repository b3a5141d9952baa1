use lexi_core::AppContext;

use crate::cli::LogCommands;
use crate::commands::common::{format_login_record_line, login_record_item, LoginRecordItem};
use crate::error::CliError;

pub fn run_log(command: LogCommands, context: &AppContext) -> Result<(), CliError> {
    match command {
        LogCommands::List { email, json } => {
            let records = match email.as_deref() {
                Some(email) => context.login_log.records_for(email),
                None => context.login_log.load_all(),
            };

            if json {
                let items = records
                    .iter()
                    .map(login_record_item)
                    .collect::<Vec<LoginRecordItem>>();
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for record in &records {
                    println!("{}", format_login_record_line(record));
                }
            }
        }
    }
    Ok(())
}
