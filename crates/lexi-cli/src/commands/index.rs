use lexi_core::AppContext;

use crate::error::CliError;

pub fn run_index(
    prefix: Option<&str>,
    limit: Option<usize>,
    context: &AppContext,
) -> Result<(), CliError> {
    let index = context.index.build_index()?;
    let limit = limit.unwrap_or(usize::MAX);

    let words = match prefix {
        Some(prefix) => index.search_prefix(prefix, limit),
        None => index.words().iter().take(limit).map(String::as_str).collect(),
    };
    for word in words {
        println!("{word}");
    }
    Ok(())
}
