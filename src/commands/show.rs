use crate::core::{
    command_init::{ViewCommandInit, ViewOptions},
    error::Result,
    print_info, print_section_header,
    render::render_changes,
    store::Operation,
    view::Tab,
};
use colored::*;

/// Show the changes of `hash`, or of the newest commit when omitted
pub fn execute_show(options: &ViewOptions, hash: Option<String>) -> Result<()> {
    let mut context = ViewCommandInit::initialize(options)?;
    match hash.as_deref() {
        Some(hash) => context.select_commit(hash),
        None => context.switch_tab(Tab::Commit),
    }
    let snapshot = context.browser_snapshot(Some(Operation::FileChanges))?;

    let Some(selected) = snapshot.selected_commit.as_deref() else {
        print_info("No commits yet");
        return Ok(());
    };

    match snapshot.commits.iter().find(|commit| commit.hash == selected) {
        Some(commit) => print_section_header(&format!(
            "{} {}",
            commit.short_hash().yellow(),
            commit.summary()
        )),
        None => print_section_header(&selected.yellow().to_string()),
    }
    print!("{}", render_changes(&context.visible_changes(), true));
    println!();

    Ok(())
}
