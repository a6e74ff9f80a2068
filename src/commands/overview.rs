use crate::core::{
    command_init::{ViewCommandInit, ViewOptions},
    error::Result,
    print_section_header,
    render::{render_changes, render_commits, render_header, render_tree},
};

pub fn execute_overview(options: &ViewOptions) -> Result<()> {
    let mut context = ViewCommandInit::initialize(options)?;
    let snapshot = context.browser_snapshot(None)?;

    if let Some(info) = &snapshot.repo_info {
        print!("\n{}", render_header(info));
    }

    print_section_header("Files");
    print!("{}", render_tree(&snapshot.file_tree));

    print_section_header("History");
    print!(
        "{}",
        render_commits(&snapshot.commits, snapshot.selected_commit.as_deref())
    );

    print_section_header("Working changes");
    print!("{}", render_changes(&context.visible_changes(), false));
    println!();

    Ok(())
}
