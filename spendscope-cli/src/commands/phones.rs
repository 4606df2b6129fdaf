//! Phones command - transactions whose description carries a phone number

use std::path::Path;

use anyhow::Result;
use spendscope_core::PhoneBoundary;

use super::{get_context, get_logger, load_records, log_command, search};

pub fn run(file: Option<&Path>, loose: bool, json: bool) -> Result<()> {
    let logger = get_logger();
    log_command(&logger, "phones");

    let ctx = get_context(logger)?;
    let records = load_records(&ctx, file)?;
    let outcome = ctx.analysis_service.search_by_phone(&records, boundary(loose));

    search::show(&outcome, json)
}

/// `--loose` also accepts numbers glued to surrounding text
fn boundary(loose: bool) -> PhoneBoundary {
    if loose {
        PhoneBoundary::Substring
    } else {
        PhoneBoundary::Anchored
    }
}
