use crate::config::inputs::ActionInputs;
use crate::host::ActionHost;
use crate::utils::constants::{ACTION_NAME, VERSION};

const RULE_WIDTH: usize = 90;

/// Banner written before the first attempt.
pub fn header_lines(inputs: &ActionInputs) -> Vec<String> {
    let rule = "-".repeat(RULE_WIDTH);
    vec![
        rule.clone(),
        format!("flxbl-actions  -- ❤️  by flxbl.io ❤️  -Version:{VERSION}"),
        rule.clone(),
        format!("Action     : {ACTION_NAME}"),
        format!("Repository : {}", inputs.repository),
        format!("SFP Server : {}", inputs.server_url),
        rule,
        String::new(),
    ]
}

pub fn print_header<H: ActionHost>(host: &H, inputs: &ActionInputs) {
    for line in header_lines(inputs) {
        host.info(&line);
    }
}
